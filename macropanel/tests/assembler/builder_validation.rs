use std::sync::Arc;

use macropanel::{PanelAssembler, PanelError, SourceSpec};
use macropanel_mock::MockSource;

use crate::helpers::{mock_builder, monthly};

fn invalid(result: Result<PanelAssembler, PanelError>) -> String {
    match result {
        Err(PanelError::InvalidArg(msg)) => msg,
        Err(other) => panic!("unexpected error: {other:?}"),
        Ok(_) => panic!("expected build to fail"),
    }
}

#[test]
fn requires_at_least_one_source() {
    let msg = invalid(mock_builder().build());
    assert!(msg.contains("no sources"));
}

#[test]
fn rejects_a_second_price_source() {
    let msg = invalid(
        mock_builder()
            .source(SourceSpec::price("^GSPC"))
            .source(SourceSpec::price("^TEST"))
            .build(),
    );
    assert!(msg.contains("price source"));
}

#[test]
fn rejects_duplicate_labels() {
    let msg = invalid(
        mock_builder()
            .source(monthly("UNRATE"))
            .source(monthly("UNRATE"))
            .build(),
    );
    assert!(msg.contains("UNRATE"));
}

#[test]
fn requires_a_collaborator_for_every_role() {
    let msg = invalid(
        PanelAssembler::builder()
            .with_price_provider(Arc::new(MockSource::new()))
            .source(SourceSpec::price("^TEST"))
            .source(monthly("UNRATE"))
            .build(),
    );
    assert!(msg.contains("observation provider"));
}

#[test]
fn default_catalog_installs_sources_and_renames() {
    let assembler = mock_builder()
        .with_default_catalog("data_features")
        .build()
        .expect("valid assembler");
    assert_eq!(assembler.sources().len(), 14);
    assert_eq!(assembler.config().column_renames.len(), 5);
    assert_eq!(assembler.config().statistical_api_key.as_deref(), Some("demo"));
}

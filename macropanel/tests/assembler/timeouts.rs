use std::time::Duration;

use macropanel::{PanelAssembler, PanelError, SourceSpec};
use macropanel_mock::{DynamicMockSource, MockBehavior};

use crate::helpers::{mock_builder, monthly};

#[tokio::test(start_paused = true)]
async fn slow_source_is_omitted_after_provider_timeout() {
    let report = mock_builder()
        .source(SourceSpec::price("^TEST"))
        .source(monthly("TIMEOUT"))
        .provider_timeout(Duration::from_millis(50))
        .build()
        .expect("valid assembler")
        .assemble()
        .await
        .expect("panel");

    assert!(matches!(
        &report.omitted[..],
        [PanelError::SourceTimeout { label }] if label == "TIMEOUT"
    ));
    assert_eq!(report.panel.n_rows(), 3);
}

#[tokio::test(start_paused = true)]
async fn provider_timeout_longer_than_latency_keeps_the_source() {
    let err = mock_builder()
        .source(monthly("TIMEOUT"))
        .provider_timeout(Duration::from_secs(1))
        .build()
        .expect("valid assembler")
        .assemble()
        .await
        .expect_err("no fixture behind the slow key");
    // The slow key answers in time, then fails for lack of a fixture.
    let PanelError::AllSourcesUnavailable(list) = err else {
        panic!("unexpected error: {err:?}");
    };
    assert!(matches!(
        &list[..],
        [PanelError::SourceUnavailable { reason, .. }] if reason.contains("no fixture")
    ));
}

#[tokio::test(start_paused = true)]
async fn hanging_fetch_hits_the_request_deadline() {
    let (source, controller) = DynamicMockSource::new_with_controller("scripted");
    controller
        .set_observation_behavior("UNRATE", MockBehavior::Hang)
        .await;

    let err = PanelAssembler::builder()
        .with_observation_provider(source)
        .source(monthly("UNRATE"))
        .provider_timeout(Duration::from_secs(60))
        .request_timeout(Duration::from_millis(100))
        .build()
        .expect("valid assembler")
        .assemble()
        .await
        .expect_err("deadline");

    assert!(matches!(
        err,
        PanelError::RequestTimeout { ref capability } if capability == "assemble:fetch"
    ));
}

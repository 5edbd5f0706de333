use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use macropanel::{PanelAssembler, PanelError, RawRecord, SourceSpec};
use macropanel_mock::{DynamicMockSource, MockBehavior, MockSource};
use macropanel_remote::{FredConnector, JsonAdapter};

use crate::helpers::{d, mock_builder, monthly};

#[tokio::test]
async fn failing_source_is_omitted_and_the_rest_assembles() {
    let report = mock_builder()
        .source(SourceSpec::price("^TEST"))
        .source(monthly("FAIL"))
        .source(monthly("UNRATE"))
        .build()
        .expect("valid assembler")
        .assemble()
        .await
        .expect("panel");

    assert!(!report.is_complete());
    assert_eq!(report.omitted_labels(), vec!["FAIL"]);
    assert!(matches!(
        &report.omitted[0],
        PanelError::SourceUnavailable { label, reason }
            if label == "FAIL" && reason.contains("forced failure")
    ));
    let names: Vec<&str> = report.panel.column_names().collect();
    assert!(names.contains(&"UNRATE"));
    assert!(!names.contains(&"FAIL"));
}

#[tokio::test]
async fn statistical_source_without_key_is_omitted_without_a_request() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let adapter = <dyn JsonAdapter>::from_fn(move |_url, _query| {
        seen.fetch_add(1, Ordering::SeqCst);
        Err(PanelError::connector("test", "unexpected request"))
    });
    let assembler = PanelAssembler::builder()
        .with_price_provider(Arc::new(MockSource::new()))
        .with_observation_provider(Arc::new(FredConnector::from_adapter(adapter)))
        .source(SourceSpec::price("^TEST"))
        .source(monthly("GDP"))
        .build()
        .expect("valid assembler");

    let report = assembler.assemble().await.expect("panel");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(matches!(
        &report.omitted[..],
        [PanelError::SourceUnavailable { label, reason }]
            if label == "GDP" && reason.contains("API key")
    ));
    assert_eq!(report.panel.value(d(2020, 1, 3), "Close"), Some(121.0));
}

#[tokio::test]
async fn every_source_failing_is_an_aggregate_error() {
    let err = mock_builder()
        .source(SourceSpec::price("FAIL"))
        .source(monthly("FAIL").with_label("fail-stat"))
        .build()
        .expect("valid assembler")
        .assemble()
        .await
        .expect_err("no usable source");

    match err {
        PanelError::AllSourcesUnavailable(list) => {
            assert_eq!(list.len(), 2);
            assert!(list.iter().all(PanelError::is_source_failure));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn source_missing_a_declared_field_is_omitted_as_schema_error() {
    let (source, controller) = DynamicMockSource::new_with_controller("scripted");
    controller
        .set_observation_behavior(
            "UNRATE",
            MockBehavior::Return(vec![RawRecord::new().with("date", "2020-01-01")]),
        )
        .await;
    controller
        .set_observation_behavior(
            "CPIAUCNS",
            MockBehavior::Return(vec![
                RawRecord::new().with("date", "2020-01-01").with("value", "1.0"),
                RawRecord::new().with("date", "2020-01-03").with("value", "3.0"),
            ]),
        )
        .await;

    let report = PanelAssembler::builder()
        .with_observation_provider(source)
        .source(monthly("UNRATE"))
        .source(monthly("CPIAUCNS"))
        .statistical_api_key("demo")
        .build()
        .expect("valid assembler")
        .assemble()
        .await
        .expect("panel");

    assert!(matches!(
        &report.omitted[..],
        [PanelError::Schema { label, field }] if label == "UNRATE" && field == "value"
    ));
    assert_eq!(report.panel.value(d(2020, 1, 2), "CPIAUCNS"), Some(2.0));

    let requests = controller.observation_requests().await;
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.api_key.as_deref() == Some("demo")));
}

#[tokio::test]
async fn empty_source_is_omitted_as_schema_error() {
    let (source, controller) = DynamicMockSource::new_with_controller("scripted");
    controller
        .set_observation_behavior("UNRATE", MockBehavior::Return(Vec::new()))
        .await;

    let report = PanelAssembler::builder()
        .with_price_provider(Arc::new(MockSource::new()))
        .with_observation_provider(source)
        .source(SourceSpec::price("^TEST"))
        .source(monthly("UNRATE"))
        .build()
        .expect("valid assembler")
        .assemble()
        .await
        .expect("panel");

    assert!(!report.is_complete());
    assert!(matches!(
        &report.omitted[..],
        [PanelError::Schema { label, field }] if label == "UNRATE" && field == "date"
    ));
    assert!(report.panel.column("UNRATE").is_none());
    assert_eq!(report.panel.n_rows(), 3);
}

#[tokio::test]
async fn price_without_usable_closes_is_omitted() {
    let (source, controller) = DynamicMockSource::new_with_controller("scripted");
    controller
        .set_price_behavior(
            "^GONE",
            MockBehavior::Return(vec![
                RawRecord::new().with("Date", "2020-01-01").with("Close", "."),
                RawRecord::new().with("Date", "2020-01-02").with("Close", "."),
            ]),
        )
        .await;

    let report = PanelAssembler::builder()
        .with_price_provider(source)
        .with_observation_provider(Arc::new(MockSource::new()))
        .source(SourceSpec::price("^GONE"))
        .source(monthly("UNRATE"))
        .statistical_api_key("demo")
        .build()
        .expect("valid assembler")
        .assemble()
        .await
        .expect("panel");

    assert_eq!(report.omitted_labels(), vec!["^GONE"]);
    assert!(matches!(
        &report.omitted[0],
        PanelError::SourceUnavailable { reason, .. } if reason.contains("no usable values")
    ));
    let names: Vec<&str> = report.panel.column_names().collect();
    assert_eq!(names, vec!["UNRATE"]);
}

#[tokio::test]
async fn only_empty_sources_is_an_aggregate_error() {
    let (source, controller) = DynamicMockSource::new_with_controller("scripted");
    controller
        .set_price_behavior("^NONE", MockBehavior::Return(Vec::new()))
        .await;
    controller
        .set_observation_behavior(
            "UNRATE",
            MockBehavior::Return(vec![
                RawRecord::new().with("date", "2020-01-01").with("value", "."),
            ]),
        )
        .await;

    let err = PanelAssembler::builder()
        .with_price_provider(source.clone())
        .with_observation_provider(source)
        .source(SourceSpec::price("^NONE"))
        .source(monthly("UNRATE"))
        .build()
        .expect("valid assembler")
        .assemble()
        .await
        .expect_err("nothing usable");
    let PanelError::AllSourcesUnavailable(list) = err else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(list.len(), 2);
}

#[tokio::test]
async fn zero_base_price_is_a_data_error() {
    let (source, controller) = DynamicMockSource::new_with_controller("scripted");
    controller
        .set_price_behavior(
            "^ZERO",
            MockBehavior::Return(vec![
                RawRecord::new().with("Date", "2020-01-01").with("Close", 0.0),
                RawRecord::new().with("Date", "2020-01-02").with("Close", 1.0),
            ]),
        )
        .await;

    let err = PanelAssembler::builder()
        .with_price_provider(source)
        .source(SourceSpec::price("^ZERO"))
        .build()
        .expect("valid assembler")
        .assemble()
        .await
        .expect_err("unusable base");
    assert!(matches!(err, PanelError::Data(_)), "got {err:?}");
}

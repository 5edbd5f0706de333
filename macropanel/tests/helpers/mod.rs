use std::sync::Arc;

use chrono::NaiveDate;
use macropanel::{Frequency, PanelAssembler, PanelAssemblerBuilder, SeriesClass, SourceSpec};
use macropanel_mock::MockSource;

/// Calendar day from components for readability in tests.
#[allow(dead_code)]
pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid test date")
}

/// Builder with the static mock registered for every source role.
#[allow(dead_code)]
pub fn mock_builder() -> PanelAssemblerBuilder {
    let mock = Arc::new(MockSource::new());
    PanelAssembler::builder()
        .with_price_provider(mock.clone())
        .with_observation_provider(mock.clone())
        .with_table_loader(mock)
        .statistical_api_key("demo")
}

/// A continuous monthly statistical source publishing `id` under the same column name.
#[allow(dead_code)]
pub fn monthly(id: &str) -> SourceSpec {
    SourceSpec::statistical(id, id, SeriesClass::Continuous, Frequency::Monthly)
}

/// Assert two floats agree to a relative tolerance.
#[allow(dead_code)]
pub fn assert_close(actual: Option<f64>, expected: f64) {
    let a = actual.expect("value present");
    assert!(
        (a - expected).abs() <= 1e-9 * expected.abs().max(1.0),
        "expected {expected}, got {a}"
    );
}

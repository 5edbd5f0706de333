//! Deterministic in-process sources for tests and examples.
//!
//! [`MockSource`] serves static fixtures for every source role. The symbol,
//! series id or file name `FAIL` fails with a connector error and `TIMEOUT`
//! sleeps before answering. [`DynamicMockSource`] defers every call to a
//! controller so tests can script returns, failures and hangs.
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use macropanel_core::connector::{
    ObservationProvider, ObservationRequest, PriceProvider, TableLoader,
};
use macropanel_core::{PanelError, RawRecord};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockSource, MockBehavior};

/// How long a `TIMEOUT` request sleeps before answering.
pub const MOCK_LATENCY: Duration = Duration::from_millis(200);

/// Mock source for CI-safe examples. Provides deterministic data from static fixtures.
pub struct MockSource;

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSource {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn not_found(what: &str) -> PanelError {
        PanelError::connector("macropanel-mock", format!("no fixture for {what}"))
    }

    async fn maybe_fail_or_timeout(key: &str, capability: &'static str) -> Result<(), PanelError> {
        match key {
            "FAIL" => Err(PanelError::connector(
                "macropanel-mock",
                format!("forced failure: {capability}"),
            )),
            "TIMEOUT" => {
                // Short enough to keep tests fast; callers pick a smaller provider timeout.
                tokio::time::sleep(MOCK_LATENCY).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl PriceProvider for MockSource {
    fn name(&self) -> &'static str {
        "macropanel-mock"
    }

    async fn daily_history(&self, symbol: &str) -> Result<Vec<RawRecord>, PanelError> {
        Self::maybe_fail_or_timeout(symbol, "daily_history").await?;
        fixtures::prices::by_symbol(symbol)
            .ok_or_else(|| Self::not_found(&format!("price history of {symbol}")))
    }
}

#[async_trait]
impl ObservationProvider for MockSource {
    fn name(&self) -> &'static str {
        "macropanel-mock"
    }

    async fn observations(&self, req: &ObservationRequest) -> Result<Vec<RawRecord>, PanelError> {
        let id = req.series_id.as_str();
        Self::maybe_fail_or_timeout(id, "observations").await?;
        fixtures::observations::by_series(id)
            .ok_or_else(|| Self::not_found(&format!("observations of {id}")))
    }
}

#[async_trait]
impl TableLoader for MockSource {
    fn name(&self) -> &'static str {
        "macropanel-mock"
    }

    async fn load(&self, path: &Path) -> Result<Vec<RawRecord>, PanelError> {
        let file = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or_default();
        Self::maybe_fail_or_timeout(file, "load").await?;
        fixtures::tables::by_file_name(file)
            .ok_or_else(|| Self::not_found(&format!("table {}", path.display())))
    }
}

use std::path::Path;

use async_trait::async_trait;

use crate::PanelError;
use crate::types::RawRecord;

/// Focused role trait for collaborators that serve daily price history.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Stable collaborator name used in error tagging and logs.
    fn name(&self) -> &'static str;

    /// Fetch the full available daily history for `symbol`.
    ///
    /// Records carry OHLC-style fields; only `Date` and `Close` are consumed.
    async fn daily_history(&self, symbol: &str) -> Result<Vec<RawRecord>, PanelError>;
}

/// Request for the observations of one statistical series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationRequest {
    /// Provider series identifier.
    pub series_id: String,
    /// Credentials from the panel configuration, if any.
    pub api_key: Option<String>,
}

impl ObservationRequest {
    /// Build a request without credentials.
    pub fn new(series_id: impl Into<String>) -> Self {
        Self {
            series_id: series_id.into(),
            api_key: None,
        }
    }

    /// Attach an API key.
    #[must_use]
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }
}

/// Focused role trait for collaborators that serve statistical observations.
#[async_trait]
pub trait ObservationProvider: Send + Sync {
    /// Stable collaborator name used in error tagging and logs.
    fn name(&self) -> &'static str;

    /// Fetch `date`/`value` records for a series. Values may be textual sentinels.
    async fn observations(&self, req: &ObservationRequest) -> Result<Vec<RawRecord>, PanelError>;
}

/// Focused role trait for collaborators that load structured local files.
#[async_trait]
pub trait TableLoader: Send + Sync {
    /// Stable collaborator name used in error tagging and logs.
    fn name(&self) -> &'static str;

    /// Load every row of the file at `path`.
    async fn load(&self, path: &Path) -> Result<Vec<RawRecord>, PanelError>;
}

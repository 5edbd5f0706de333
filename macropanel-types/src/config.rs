//! Configuration passed explicitly into the panel assembler.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Day offsets for the trailing-window growth metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Days between an observation and its 10-year trailing counterpart
    /// (365 x 10 plus leap days).
    pub ten_year_offset_days: u32,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            ten_year_offset_days: 3652,
        }
    }
}

impl MetricsConfig {
    /// The 5-year offset: half the 10-year offset, rounded half to even.
    #[must_use]
    pub const fn five_year_offset_days(&self) -> u32 {
        let n = self.ten_year_offset_days;
        let half = n / 2;
        if n % 2 == 1 && half % 2 == 1 {
            half + 1
        } else {
            half
        }
    }

    /// Day offset for a trailing window of `years`, if that window is computed.
    #[must_use]
    pub const fn offset_days(&self, years: u32) -> Option<u32> {
        match years {
            10 => Some(self.ten_year_offset_days),
            5 => Some(self.five_year_offset_days()),
            _ => None,
        }
    }

    /// Trailing windows as `(years, offset_days)`, longest first.
    #[must_use]
    pub const fn windows(&self) -> [(u32, u32); 2] {
        [
            (10, self.ten_year_offset_days),
            (5, self.five_year_offset_days()),
        ]
    }
}

/// Shape of the final panel index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PanelIndex {
    /// Every calendar day between the global first and last observed dates.
    #[default]
    DailyCalendar,
    /// Only dates observed by at least one series.
    Union,
}

/// Final renaming of a source-specific label to a panel column name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRename {
    /// Label as produced by the source.
    pub from: String,
    /// Canonical panel column name.
    pub to: String,
}

impl ColumnRename {
    /// Build a rename rule.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Global configuration for the `PanelAssembler`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Trailing-window offsets for derived price metrics.
    pub metrics: MetricsConfig,
    /// Whether the final index is the full daily calendar or the raw date union.
    pub index: PanelIndex,
    /// Renames applied to the final panel, in order.
    pub column_renames: Vec<ColumnRename>,
    /// API key handed to the statistical-series collaborator, if any.
    pub statistical_api_key: Option<String>,
    /// Timeout for each individual source fetch.
    pub provider_timeout: Duration,
    /// Optional deadline across the whole fetch fan-out.
    pub request_timeout: Option<Duration>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            metrics: MetricsConfig::default(),
            index: PanelIndex::default(),
            column_renames: Vec::new(),
            statistical_api_key: None,
            provider_timeout: Duration::from_secs(30),
            request_timeout: None,
        }
    }
}

//! Re-exports of the shared data model so downstream crates can depend on
//! `macropanel-core` alone.

pub use macropanel_types::{
    CanonicalSeries, CoercionKind, ColumnRename, DateField, FillPolicy, Frequency, MetricsConfig,
    Panel, PanelColumn, PanelConfig, PanelError, PanelIndex, PanelReport, RawRecord, RawValue,
    RecordSchema, SeriesClass, SeriesPoint, SourceKind, SourceSpec, ValueCoercionWarning,
    ValueField,
};

/// Canonical column names of the price-derived block of a panel.
pub mod columns {
    /// Closing price.
    pub const CLOSE: &str = "Close";
    /// Closing price divided by the first close of the calendar.
    pub const CLOSE_NORM: &str = "Close Norm";
    /// Day-over-day percent change of the close.
    pub const DAILY_DELTA: &str = "Daily Delta";

    /// Trailing normalized value column for a window of `years`.
    #[must_use]
    pub fn trailing(years: u32) -> String {
        format!("{years} yr")
    }

    /// Trailing compound annual growth column for a window of `years`.
    #[must_use]
    pub fn cagr(years: u32) -> String {
        format!("CAGR {years} yr")
    }
}

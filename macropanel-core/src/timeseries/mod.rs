//! Time-series alignment engine.
//!
//! Modules include:
//! - `normalize`: raw records to canonical, sorted, de-duplicated series
//! - `calendar`: contiguous daily calendars
//! - `reindex`: place a series on a daily calendar with forward fill
//! - `metrics`: normalized level, daily delta and trailing-window CAGR
//! - `merge`: outer-join series into a panel and expand it to a daily index
//! - `fill`: per-class post-merge fill policies
/// Contiguous daily calendars.
pub mod calendar;
/// Post-merge fill policies.
pub mod fill;
/// Outer join of series into a panel.
pub mod merge;
/// Derived price metrics.
pub mod metrics;
/// Raw record normalization.
pub mod normalize;
/// Calendar reindexing.
pub mod reindex;

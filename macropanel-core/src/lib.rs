//! macropanel-core
//!
//! Source traits and the time-series alignment engine shared across the
//! macropanel crates.
//!
//! - `types`: re-exported data model (records, series, panel, config, errors).
//! - `connector`: role traits for price, statistical and table collaborators.
//! - `timeseries`: normalize, reindex, derive metrics, merge and fill.
//!
//! Every engine stage is a pure function from an immutable series or panel to
//! a new one, so each can be exercised on its own.
#![warn(missing_docs)]

/// Collaborator role traits.
pub mod connector;
/// Time-series alignment engine.
pub mod timeseries;
pub mod types;

pub use connector::{ObservationProvider, ObservationRequest, PriceProvider, TableLoader};
pub use timeseries::calendar::DailyCalendar;
pub use timeseries::fill::{apply_fill_policies, forward_fill, interpolate_interior};
pub use timeseries::merge::{expand_to_daily, merge_outer};
pub use timeseries::metrics::{DerivedMetrics, TrailingWindow, compute_metrics};
pub use timeseries::normalize::{Normalized, normalize_records, parse_date_text};
pub use timeseries::reindex::{reindex_forward_fill, reindex_sparse};
pub use types::*;

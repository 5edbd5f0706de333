//! Data model, error taxonomy and configuration primitives shared by the
//! macropanel crates.
#![warn(missing_docs)]

mod config;
mod error;
mod panel;
mod record;
mod reports;
mod schema;
mod series;
mod source;

pub use config::{ColumnRename, MetricsConfig, PanelConfig, PanelIndex};
pub use error::PanelError;
pub use panel::{Panel, PanelColumn};
pub use record::{RawRecord, RawValue};
pub use reports::{CoercionKind, PanelReport, ValueCoercionWarning};
pub use schema::{DateField, RecordSchema, ValueField};
pub use series::{CanonicalSeries, FillPolicy, Frequency, SeriesClass, SeriesPoint};
pub use source::{SourceKind, SourceSpec};

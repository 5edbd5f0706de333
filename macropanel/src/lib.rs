//! macropanel assembles a daily panel of an equity index and macroeconomic series.
//!
//! Overview
//! - Fetches a daily price series, statistical series and local tables through
//!   the collaborator traits in `macropanel_core::connector`.
//! - Normalizes every source into date-keyed canonical series, reindexes the
//!   price onto a gap-free daily calendar and derives normalized level, daily
//!   change and 10/5-year trailing CAGR.
//! - Outer-joins everything onto one daily index and fills gaps per column
//!   class: step-change series forward-fill, continuous series interpolate
//!   between observations, and the price block is left untouched.
//! - A source that fails, times out or lacks a declared field is dropped from
//!   the panel and reported in `PanelReport::omitted`.
//!
//! Building and running an assembler:
//! ```rust,ignore
//! use std::sync::Arc;
//! use macropanel::{CsvExporter, CsvTableLoader, PanelAssembler};
//! use macropanel_remote::{FredConnector, YahooConnector};
//!
//! let assembler = PanelAssembler::builder()
//!     .with_price_provider(Arc::new(YahooConnector::new_default()?))
//!     .with_observation_provider(Arc::new(FredConnector::new_default()?))
//!     .with_table_loader(Arc::new(CsvTableLoader::new()))
//!     .with_default_catalog("data_features")
//!     .statistical_api_key("...")
//!     .build()?;
//!
//! let report = assembler.assemble().await?;
//! for omitted in &report.omitted {
//!     eprintln!("omitted: {omitted}");
//! }
//! CsvExporter::new().write(&report.panel, "panel.csv")?;
//! ```
//!
//! See `macropanel/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

mod assemble;
pub mod catalog;
pub(crate) mod core;
mod export;
mod files;
mod util;

pub use crate::core::{PanelAssembler, PanelAssemblerBuilder, tag_err};
pub use export::CsvExporter;
pub use files::CsvTableLoader;
pub use util::{collapse_failures, join_with_deadline};

// Re-export core types for convenience
pub use macropanel_core::{
    CanonicalSeries, CoercionKind, ColumnRename, DateField, FillPolicy, Frequency, MetricsConfig,
    Panel, PanelColumn, PanelConfig, PanelError, PanelIndex, PanelReport, RawRecord, RawValue,
    RecordSchema, SeriesClass, SeriesPoint, SourceKind, SourceSpec, ValueCoercionWarning,
    ValueField,
    connector::{ObservationProvider, ObservationRequest, PriceProvider, TableLoader},
};

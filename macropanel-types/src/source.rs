//! Declarative descriptors for the sources feeding a panel.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::schema::{DateField, RecordSchema, ValueField};
use crate::series::{Frequency, SeriesClass};

/// Which collaborator serves a source, and with what identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SourceKind {
    /// Daily price history for an instrument symbol.
    Price {
        /// Instrument symbol, e.g. `^GSPC`.
        symbol: String,
    },
    /// Observations of a statistical series.
    Statistical {
        /// Provider series identifier, e.g. `GDP`.
        series_id: String,
    },
    /// A structured local file.
    Table {
        /// Path to the file.
        path: PathBuf,
    },
}

/// Full description of one source: where it comes from, how to read it,
/// and how its columns are filled after the merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Unique label used in diagnostics and reports.
    pub label: String,
    /// Collaborator and identifier.
    pub kind: SourceKind,
    /// How to read the raw records.
    pub schema: RecordSchema,
    /// Class tag attached to every series of this source.
    pub class: SeriesClass,
    /// Native cadence, informational.
    pub frequency: Frequency,
}

impl SourceSpec {
    /// Field holding the closing price in price records.
    pub const PRICE_CLOSE_FIELD: &'static str = "Close";
    /// Field holding the date in price records.
    pub const PRICE_DATE_FIELD: &'static str = "Date";

    /// Daily closing price of `symbol`, published as the `Close` column.
    pub fn price(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Self {
            label: symbol.clone(),
            kind: SourceKind::Price { symbol },
            schema: RecordSchema::single(
                Self::PRICE_DATE_FIELD,
                ValueField::same(Self::PRICE_CLOSE_FIELD),
            ),
            class: SeriesClass::Protected,
            frequency: Frequency::Daily,
        }
    }

    /// A statistical series read from `date`/`value` observations.
    pub fn statistical(
        series_id: impl Into<String>,
        column: impl Into<String>,
        class: SeriesClass,
        frequency: Frequency,
    ) -> Self {
        let series_id = series_id.into();
        Self {
            label: series_id.clone(),
            kind: SourceKind::Statistical { series_id },
            schema: RecordSchema::single("date", ValueField::new("value", column)),
            class,
            frequency,
        }
    }

    /// A local structured file with an explicit schema.
    pub fn table(
        label: impl Into<String>,
        path: impl Into<PathBuf>,
        date: DateField,
        values: Vec<ValueField>,
        frequency: Frequency,
    ) -> Self {
        Self {
            label: label.into(),
            kind: SourceKind::Table { path: path.into() },
            schema: RecordSchema::multi(date, values),
            class: SeriesClass::Continuous,
            frequency,
        }
    }

    /// Override the class tag.
    #[must_use]
    pub fn with_class(mut self, class: SeriesClass) -> Self {
        self.class = class;
        self
    }

    /// Override the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// True for the price source.
    #[must_use]
    pub const fn is_price(&self) -> bool {
        matches!(self.kind, SourceKind::Price { .. })
    }
}

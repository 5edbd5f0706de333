//! Wide, date-indexed table produced by the merger.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::PanelError;
use crate::series::{CanonicalSeries, SeriesClass, SeriesPoint};

/// One column of a panel: name, class tag and one cell per index row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelColumn {
    name: String,
    class: SeriesClass,
    values: Vec<Option<f64>>,
}

impl PanelColumn {
    /// Build a column. Length is checked when the column is placed in a `Panel`.
    pub fn new(name: impl Into<String>, class: SeriesClass, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            class,
            values,
        }
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class tag carried over from the source series.
    #[must_use]
    pub const fn class(&self) -> SeriesClass {
        self.class
    }

    /// Cells, aligned with the panel index.
    #[must_use]
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Number of non-missing cells.
    #[must_use]
    pub fn observed_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Same cells under a new name.
    #[must_use]
    pub fn renamed(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    /// Same name and class with replaced cells.
    #[must_use]
    pub fn with_values(&self, values: Vec<Option<f64>>) -> Self {
        Self {
            name: self.name.clone(),
            class: self.class,
            values,
        }
    }
}

/// A table indexed by calendar date with uniquely named, ordered columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    index: Vec<NaiveDate>,
    columns: Vec<PanelColumn>,
}

impl Panel {
    /// Build a panel, validating index order, column lengths and name uniqueness.
    ///
    /// # Errors
    /// Returns `PanelError::Alignment` if the index is not strictly increasing, a
    /// column's length differs from the index length, or two columns share a name.
    pub fn try_new(index: Vec<NaiveDate>, columns: Vec<PanelColumn>) -> Result<Self, PanelError> {
        if let Some(w) = index.windows(2).find(|w| w[0] >= w[1]) {
            return Err(PanelError::alignment(format!(
                "panel index is not strictly increasing at {} -> {}",
                w[0], w[1]
            )));
        }
        let mut seen: HashSet<&str> = HashSet::new();
        for c in &columns {
            if c.values.len() != index.len() {
                return Err(PanelError::alignment(format!(
                    "column '{}' has {} cells for an index of {} rows",
                    c.name,
                    c.values.len(),
                    index.len()
                )));
            }
            if !seen.insert(c.name.as_str()) {
                return Err(PanelError::alignment(format!(
                    "column '{}' is provided more than once",
                    c.name
                )));
            }
        }
        Ok(Self { index, columns })
    }

    /// An empty panel with no rows and no columns.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            index: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Date index in ascending order.
    #[must_use]
    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    /// Columns in insertion order.
    #[must_use]
    pub fn columns(&self) -> &[PanelColumn] {
        &self.columns
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(PanelColumn::name)
    }

    /// Look up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&PanelColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Cell at (`date`, `column`); `None` if either is absent or the cell is missing.
    #[must_use]
    pub fn value(&self, date: NaiveDate, column: &str) -> Option<f64> {
        let row = self.row_of(date)?;
        self.column(column).and_then(|c| c.values[row])
    }

    /// Row position of `date` in the index.
    #[must_use]
    pub fn row_of(&self, date: NaiveDate) -> Option<usize> {
        self.index.binary_search(&date).ok()
    }

    /// Number of index rows.
    #[must_use]
    pub const fn n_rows(&self) -> usize {
        self.index.len()
    }

    /// Number of columns.
    #[must_use]
    pub const fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// True if consecutive index entries are exactly one day apart.
    #[must_use]
    pub fn is_gap_free(&self) -> bool {
        self.index
            .windows(2)
            .all(|w| w[0].succ_opt() == Some(w[1]))
    }

    /// Extract one column as a canonical series over the full index.
    #[must_use]
    pub fn series(&self, column: &str) -> Option<CanonicalSeries> {
        let col = self.column(column)?;
        let points = self
            .index
            .iter()
            .zip(&col.values)
            .map(|(&date, &value)| SeriesPoint { date, value })
            .collect();
        CanonicalSeries::try_new(col.name.clone(), col.class, points).ok()
    }

    /// Decompose into index and columns.
    #[must_use]
    pub fn into_parts(self) -> (Vec<NaiveDate>, Vec<PanelColumn>) {
        (self.index, self.columns)
    }
}

//! Report envelopes produced by the assembler.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PanelError;
use crate::panel::Panel;

/// What failed to coerce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoercionKind {
    /// A value cell that is not numeric; the value became missing.
    Value,
    /// A date cell that could not be parsed; the record was skipped.
    Date,
}

/// Non-fatal coercion failure recorded while normalizing a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCoercionWarning {
    /// Source label.
    pub label: String,
    /// Output column (for value failures) or raw date field (for date failures).
    pub column: String,
    /// Date of the record, when it could be parsed.
    pub date: Option<NaiveDate>,
    /// The raw cell as text.
    pub raw: String,
    /// Which cell failed.
    pub kind: CoercionKind,
}

/// Summary of a panel assembly run.
///
/// Carries the assembled `panel`, the sources omitted from it, and
/// diagnostics about values that were coerced to missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelReport {
    /// Final panel.
    pub panel: Panel,
    /// Sources left out of the panel, with the reason for each.
    pub omitted: Vec<PanelError>,
    /// Count of value-coercion warnings per output column.
    pub coercions: BTreeMap<String, usize>,
    /// Records skipped because their date could not be parsed.
    pub skipped_records: usize,
}

impl PanelReport {
    /// True if no source was omitted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.omitted.is_empty()
    }

    /// Labels of omitted sources, in declaration order.
    #[must_use]
    pub fn omitted_labels(&self) -> Vec<&str> {
        self.omitted
            .iter()
            .filter_map(|e| match e {
                PanelError::SourceUnavailable { label, .. }
                | PanelError::SourceTimeout { label }
                | PanelError::Schema { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Total value-coercion warnings across all columns.
    #[must_use]
    pub fn total_coercions(&self) -> usize {
        self.coercions.values().sum()
    }
}

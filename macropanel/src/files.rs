use std::path::Path;

use async_trait::async_trait;
use macropanel_core::connector::TableLoader;
use macropanel_core::{PanelError, RawRecord, RawValue};

/// Loads header-row CSV files into raw records.
///
/// Every non-empty cell is kept as `RawValue::Text` and left for the
/// normalizer to coerce; empty cells become `RawValue::Null`. Short rows
/// simply lack the trailing fields.
#[derive(Debug, Clone)]
pub struct CsvTableLoader {
    delimiter: u8,
}

impl Default for CsvTableLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvTableLoader {
    /// Collaborator name used in error tagging and logs.
    pub const NAME: &'static str = "csv";

    /// Comma-delimited loader.
    #[must_use]
    pub const fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Use another field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse CSV bytes into records.
    ///
    /// # Errors
    /// Returns `PanelError::Connector` if the header row or a record is malformed.
    pub fn parse(&self, bytes: &[u8]) -> Result<Vec<RawRecord>, PanelError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(bytes);
        let headers = reader
            .headers()
            .map_err(|e| PanelError::connector(Self::NAME, format!("header row: {e}")))?
            .clone();

        let mut out: Vec<RawRecord> = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| PanelError::connector(Self::NAME, e.to_string()))?;
            out.push(
                headers
                    .iter()
                    .zip(row.iter())
                    .map(|(h, cell)| {
                        let value = if cell.trim().is_empty() {
                            RawValue::Null
                        } else {
                            RawValue::from(cell)
                        };
                        (h, value)
                    })
                    .collect(),
            );
        }
        Ok(out)
    }
}

#[async_trait]
impl TableLoader for CsvTableLoader {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "macropanel::csv::load", skip(self), fields(path = %path.display()))
    )]
    async fn load(&self, path: &Path) -> Result<Vec<RawRecord>, PanelError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| PanelError::connector(Self::NAME, format!("{}: {e}", path.display())))?;
        self.parse(&bytes).map_err(|e| match e {
            PanelError::Connector { msg, .. } => {
                PanelError::connector(Self::NAME, format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }
}

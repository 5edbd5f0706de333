use std::io::Write;
use std::path::Path;

use macropanel_core::{Panel, PanelError};

/// Writes a panel as delimited text.
///
/// The first column is the date index, headed `Date` and formatted `%Y-%m-%d`;
/// the other columns follow in panel order. Missing cells are written empty.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    delimiter: u8,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvExporter {
    /// Header of the date index column.
    pub const INDEX_HEADER: &'static str = "Date";

    /// Comma-delimited exporter.
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

    /// Write `panel` to a file at `path`, replacing it if present.
    ///
    /// # Errors
    /// Returns `PanelError::Export` if the file cannot be created or written.
    pub fn write(&self, panel: &Panel, path: impl AsRef<Path>) -> Result<(), PanelError> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| PanelError::Export {
            path: path.display().to_string(),
            msg: e.to_string(),
        })?;
        self.write_records(panel, file)
            .map_err(|msg| PanelError::Export {
                path: path.display().to_string(),
                msg,
            })
    }

    /// Write `panel` to any writer.
    ///
    /// # Errors
    /// Returns `PanelError::Export` if writing fails.
    pub fn write_to<W: Write>(&self, panel: &Panel, writer: W) -> Result<(), PanelError> {
        self.write_records(panel, writer)
            .map_err(|msg| PanelError::Export {
                path: "<writer>".to_string(),
                msg,
            })
    }

    fn write_records<W: Write>(&self, panel: &Panel, writer: W) -> Result<(), String> {
        let mut w = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        let header = std::iter::once(Self::INDEX_HEADER).chain(panel.column_names());
        w.write_record(header).map_err(|e| e.to_string())?;

        let mut row: Vec<String> = Vec::with_capacity(panel.n_cols() + 1);
        for (i, date) in panel.index().iter().enumerate() {
            row.clear();
            row.push(date.format("%Y-%m-%d").to_string());
            row.extend(
                panel
                    .columns()
                    .iter()
                    .map(|c| c.values()[i].map(|v| v.to_string()).unwrap_or_default()),
            );
            w.write_record(&row).map_err(|e| e.to_string())?;
        }
        w.flush().map_err(|e| e.to_string())
    }
}

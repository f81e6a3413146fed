//! Spreadsheet export for Smartmarks.
//!
//! Flattens the full loaded collection into tabular rows and hands them to a
//! [`SpreadsheetWriter`]. The shipped writer produces a CSV file; the column
//! order is fixed: Title, URL, Category, Pinned, Favorite, Clicks, Created.

use std::fs;
use std::path::Path;

use crate::types::errors::ExportError;
use crate::types::view::ExportRow;

/// Column headers, in output order.
pub const EXPORT_COLUMNS: [&str; 7] = [
    "Title", "URL", "Category", "Pinned", "Favorite", "Clicks", "Created",
];

/// Trait for the spreadsheet-writing collaborator.
pub trait SpreadsheetWriter {
    /// Writes the rows to the target file.
    fn write_rows<P: AsRef<Path>>(&self, rows: &[ExportRow], path: P) -> Result<(), ExportError>;
}

/// CSV implementation of the spreadsheet writer.
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    /// Quotes a field when it contains a comma, quote, or line break.
    fn escape(field: &str) -> String {
        if field.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Renders the header plus one line per row.
    pub fn render(&self, rows: &[ExportRow]) -> String {
        let mut out = String::new();
        out.push_str(&EXPORT_COLUMNS.join(","));
        out.push('\n');
        for row in rows {
            let fields = [
                Self::escape(&row.title),
                Self::escape(&row.url),
                Self::escape(&row.category),
                row.pinned.clone(),
                row.favorite.clone(),
                row.clicks.to_string(),
                row.created.to_string(),
            ];
            out.push_str(&fields.join(","));
            out.push('\n');
        }
        out
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SpreadsheetWriter for CsvExporter {
    fn write_rows<P: AsRef<Path>>(&self, rows: &[ExportRow], path: P) -> Result<(), ExportError> {
        fs::write(path, self.render(rows))
            .map_err(|e| ExportError::IoError(format!("Failed to write export file: {}", e)))
    }
}

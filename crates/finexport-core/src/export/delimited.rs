//! Delimited-text (CSV) exporter

use super::context::RenderContext;
use super::exporter::Exporter;
use crate::types::{columns, ExportFormat, Record, Value};
use std::borrow::Cow;

/// Field delimiter
pub const DELIMITER: char = ',';

/// Render records as comma-separated text.
///
/// The header comes from the first record's keys. Later records are rendered
/// against that column list: missing fields become empty cells and extra
/// fields are dropped. Returns an empty string for empty input.
pub fn to_delimited_text(records: &[Record]) -> String {
    if records.is_empty() {
        return String::new();
    }
    let columns = columns(records);

    let mut output = String::new();
    push_row(&mut output, columns.iter().map(|name| escape_field(name)));

    for record in records {
        push_row(
            &mut output,
            columns
                .iter()
                .map(|name| render_cell(record.get(name))),
        );
    }

    output
}

fn push_row<'a>(output: &mut String, cells: impl Iterator<Item = Cow<'a, str>>) {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            output.push(DELIMITER);
        }
        output.push_str(&cell);
    }
    output.push('\n');
}

fn render_cell(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(Value::Text(s)) => escape_field(s),
        Some(other) => Cow::Owned(other.to_plain_text()),
    }
}

/// Quote a field if it contains the delimiter or a double quote
pub fn escape_field(s: &str) -> Cow<'_, str> {
    if s.contains(DELIMITER) || s.contains('"') {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(s)
    }
}

/// Delimited-text exporter, for both the CSV and the spreadsheet-labelled variant
pub struct DelimitedExporter {
    format: ExportFormat,
}

impl DelimitedExporter {
    /// Plain CSV exporter
    pub fn csv() -> Self {
        Self {
            format: ExportFormat::Csv,
        }
    }

    /// Same CSV payload, saved with a spreadsheet extension and MIME type
    pub fn excel() -> Self {
        Self {
            format: ExportFormat::Excel,
        }
    }
}

impl Exporter for DelimitedExporter {
    fn export(&self, records: &[Record], _ctx: &RenderContext) -> String {
        to_delimited_text(records)
    }

    fn format(&self) -> ExportFormat {
        self.format
    }
}

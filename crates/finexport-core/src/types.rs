//! Core type definitions for finexport

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date layout used for date-time cells and file name stamps
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing or explicit null
    Null,
    /// Free text
    Text(String),
    /// Numeric value
    Number(f64),
    /// Boolean flag
    Boolean(bool),
    /// Point in time, rendered as a calendar date
    DateTime(DateTime<Utc>),
}

impl Value {
    /// Render the value without any format-specific escaping
    pub fn to_plain_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Text(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::DateTime(dt) => dt.format(DATE_FORMAT).to_string(),
        }
    }

    /// Check for null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::DateTime(dt)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

/// One exportable row: field name to value, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a field. An existing field keeps its position and gets the new value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Get a field value by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Field names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate over fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// Column set of an export: the first record's keys, left to right
pub fn columns(records: &[Record]) -> Vec<&str> {
    records
        .first()
        .map(|first| first.keys().collect())
        .unwrap_or_default()
}

/// Logical output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated values
    Csv,
    /// Comma-separated values saved under a spreadsheet extension
    Excel,
    /// Standalone HTML document with one table
    Html,
}

impl ExportFormat {
    /// All formats, in display order
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Excel, ExportFormat::Html];

    /// Format name as accepted on the command line and in config
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "excel",
            ExportFormat::Html => "html",
        }
    }

    /// File extension of the saved artifact
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Html => "html",
        }
    }

    /// MIME type of the saved artifact
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Excel => "application/vnd.ms-excel",
            ExportFormat::Html => "text/html",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = crate::FinExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "html" => Ok(ExportFormat::Html),
            other => Err(crate::FinExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// One export action: records, base file name and target format
#[derive(Debug, Clone)]
pub struct ExportJob {
    /// Rows to export
    pub records: Vec<Record>,
    /// File name stem, without date or extension
    pub base_file_name: String,
    /// Output format
    pub format: ExportFormat,
}

impl ExportJob {
    /// Create a new export job
    pub fn new(records: Vec<Record>, base_file_name: impl Into<String>, format: ExportFormat) -> Self {
        Self {
            records,
            base_file_name: base_file_name.into(),
            format,
        }
    }

    /// Check if the job has anything to export
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Bytes ready for a file-save step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested file name, e.g. `report_2024-01-15.csv`
    pub file_name: String,
    /// MIME type label
    pub mime_type: &'static str,
    /// File content
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Content as text (all formats are UTF-8)
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_value_plain_text() {
        assert_eq!(Value::Null.to_plain_text(), "");
        assert_eq!(Value::from("Gold ETF").to_plain_text(), "Gold ETF");
        assert_eq!(Value::from(50000).to_plain_text(), "50000");
        assert_eq!(Value::from(0.5).to_plain_text(), "0.5");
        assert_eq!(Value::from(-12.25).to_plain_text(), "-12.25");
        assert_eq!(Value::from(true).to_plain_text(), "true");

        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 23, 59, 0).unwrap();
        assert_eq!(Value::from(dt).to_plain_text(), "2024-01-15");
    }

    #[test]
    fn test_value_from_option() {
        let none: Option<&str> = None;
        assert!(Value::from(none).is_null());
        assert_eq!(Value::from(Some(3)), Value::Number(3.0));
    }

    #[test]
    fn test_record_preserves_insertion_order() {
        let record = Record::new()
            .with("name", "Gold ETF")
            .with("amount", 50000)
            .with("category", "commodity");
        let keys: Vec<_> = record.keys().collect();
        assert_eq!(keys, vec!["name", "amount", "category"]);
    }

    #[test]
    fn test_record_insert_replaces_in_place() {
        let mut record = Record::new().with("a", 1).with("b", 2);
        record.insert("a", 10);
        let keys: Vec<_> = record.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(record.get("a"), Some(&Value::Number(10.0)));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_columns_from_first_record() {
        let records = vec![
            Record::new().with("x", 1).with("y", 2),
            Record::new().with("z", 3),
        ];
        assert_eq!(columns(&records), vec!["x", "y"]);
        assert!(columns(&[]).is_empty());
    }

    #[test]
    fn test_format_metadata() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Excel.extension(), "xlsx");
        assert_eq!(ExportFormat::Html.extension(), "html");
        assert_eq!(ExportFormat::Csv.mime_type(), "text/csv");
        assert_eq!(ExportFormat::Excel.mime_type(), "application/vnd.ms-excel");
        assert_eq!(ExportFormat::Html.mime_type(), "text/html");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("XLSX".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
        assert_eq!("excel".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
        assert_eq!(" html ".parse::<ExportFormat>().unwrap(), ExportFormat::Html);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_format_serde_names() {
        let json = serde_json::to_string(&ExportFormat::Excel).unwrap();
        assert_eq!(json, "\"excel\"");
        let parsed: ExportFormat = serde_json::from_str("\"html\"").unwrap();
        assert_eq!(parsed, ExportFormat::Html);
    }
}

//! Loading records from JSON
//!
//! Input is an array of objects. Field order follows the source document.
//! Date-time cells use the `{"$date": ...}` wrapper with either an RFC 3339
//! string or epoch milliseconds, since JSON has no native date type.

use crate::error::{FinExportError, Result};
use crate::types::{Record, Value};
use chrono::{DateTime, Utc};
use serde_json::Map;
use std::io::Read;

/// Key of the date-time wrapper object
pub const DATE_KEY: &str = "$date";

/// Parse records from a JSON string
pub fn parse_records(input: &str) -> Result<Vec<Record>> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    records_from_json(value)
}

/// Read records from any JSON source
pub fn load_records<R: Read>(reader: R) -> Result<Vec<Record>> {
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    records_from_json(value)
}

fn records_from_json(value: serde_json::Value) -> Result<Vec<Record>> {
    let items = match value {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(FinExportError::Validation(format!(
                "Expected an array of records, found {}",
                kind(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            serde_json::Value::Object(fields) => record_from_object(fields)
                .map_err(|e| e.with_context(format!("Record {}", index))),
            other => Err(FinExportError::Validation(format!(
                "Record {} is {}, expected an object",
                index,
                kind(&other)
            ))),
        })
        .collect()
}

fn record_from_object(fields: Map<String, serde_json::Value>) -> Result<Record> {
    let mut record = Record::new();
    for (name, value) in fields {
        let cell = cell_from_json(value)
            .map_err(|e| e.with_context(format!("Field '{}'", name)))?;
        record.insert(name, cell);
    }
    Ok(record)
}

fn cell_from_json(value: serde_json::Value) -> Result<Value> {
    Ok(match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => number_cell(&n),
        serde_json::Value::String(s) => Value::Text(s),
        serde_json::Value::Object(obj) if obj.len() == 1 && obj.contains_key(DATE_KEY) => {
            Value::DateTime(parse_date(&obj[DATE_KEY])?)
        }
        other => Value::Text(other.to_string()),
    })
}

/// Largest integer an `f64` holds exactly
const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Integers beyond `f64` precision keep their literal digits as text
fn number_cell(n: &serde_json::Number) -> Value {
    let exact = match (n.as_u64(), n.as_i64()) {
        (Some(u), _) => u <= MAX_SAFE_INTEGER,
        (None, Some(i)) => i.unsigned_abs() <= MAX_SAFE_INTEGER,
        (None, None) => true,
    };

    match n.as_f64() {
        Some(f) if exact => Value::Number(f),
        _ => Value::Text(n.to_string()),
    }
}

fn parse_date(value: &serde_json::Value) -> Result<DateTime<Utc>> {
    match value {
        serde_json::Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| FinExportError::Validation(format!("Invalid date '{}': {}", s, e))),
        serde_json::Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .ok_or_else(|| FinExportError::Validation(format!("Invalid epoch milliseconds: {}", n))),
        other => Err(FinExportError::Validation(format!(
            "Invalid date value: {}",
            other
        ))),
    }
}

fn kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_basic_records() {
        let records = parse_records(
            r#"[
                {"name": "Gold ETF", "amount": 50000, "active": true, "note": null},
                {"name": "Tax, Free Bond", "amount": 20000.5}
            ]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("name"), Some(&Value::from("Gold ETF")));
        assert_eq!(records[0].get("amount"), Some(&Value::Number(50000.0)));
        assert_eq!(records[0].get("active"), Some(&Value::Boolean(true)));
        assert_eq!(records[0].get("note"), Some(&Value::Null));
        assert_eq!(records[1].get("amount"), Some(&Value::Number(20000.5)));
    }

    #[test]
    fn test_preserves_field_order() {
        let records = parse_records(r#"[{"zeta": 1, "alpha": 2, "mid": 3}]"#).unwrap();
        let keys: Vec<_> = records[0].keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_date_wrappers() {
        let records = parse_records(
            r#"[{"a": {"$date": "2024-01-15T10:30:00Z"}, "b": {"$date": 1709337600000}}]"#,
        )
        .unwrap();
        assert_eq!(
            records[0].get("a"),
            Some(&Value::DateTime(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()))
        );
        assert_eq!(
            records[0].get("b"),
            Some(&Value::DateTime(Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap()))
        );
    }

    #[test]
    fn test_invalid_date() {
        let err = parse_records(r#"[{"a": {"$date": "yesterday"}}]"#).unwrap_err();
        assert!(err.to_string().contains("Record 0"));
        assert!(err.to_string().contains("Field 'a'"));
    }

    #[test]
    fn test_nested_values_become_text() {
        let records = parse_records(r#"[{"tags": ["gold", "etf"], "meta": {"k": 1}}]"#).unwrap();
        assert_eq!(records[0].get("tags"), Some(&Value::from(r#"["gold","etf"]"#)));
        assert_eq!(records[0].get("meta"), Some(&Value::from(r#"{"k":1}"#)));
    }

    #[test]
    fn test_large_integers_keep_their_digits() {
        let records = parse_records(
            r#"[{"big": 12345678901234567890, "neg": -9007199254740993, "safe": 9007199254740991, "ratio": 1.5e300}]"#,
        )
        .unwrap();
        assert_eq!(records[0].get("big"), Some(&Value::from("12345678901234567890")));
        assert_eq!(records[0].get("neg"), Some(&Value::from("-9007199254740993")));
        assert_eq!(records[0].get("safe"), Some(&Value::Number(9007199254740991.0)));
        assert_eq!(records[0].get("ratio"), Some(&Value::Number(1.5e300)));
    }

    #[test]
    fn test_empty_array() {
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_non_array() {
        let err = parse_records(r#"{"name": "x"}"#).unwrap_err();
        assert!(matches!(err, FinExportError::Validation(_)));
    }

    #[test]
    fn test_rejects_non_object_element() {
        let err = parse_records(r#"[{"a": 1}, 42]"#).unwrap_err();
        assert!(err.to_string().contains("Record 1"));
    }

    #[test]
    fn test_malformed_json() {
        let err = load_records("[{".as_bytes()).unwrap_err();
        assert!(matches!(err, FinExportError::Serde(_)));
    }
}

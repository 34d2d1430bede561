//! Render-time context and file naming

use crate::config::DEFAULT_TIMESTAMP_FORMAT;
use crate::types::{ExportFormat, DATE_FORMAT};
use chrono::{DateTime, Local, NaiveDate, Utc};
use std::fmt::Write;

/// The moment an export is rendered
///
/// Carries the clock reading so that file names and the generated-at line of
/// the markup report come from one instant and can be pinned in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    /// Generation time in local time
    pub generated_at: DateTime<Local>,
}

impl RenderContext {
    /// Context for the current instant
    pub fn now() -> Self {
        Self {
            generated_at: Local::now(),
        }
    }

    /// Context for a fixed instant
    pub fn at(generated_at: DateTime<Local>) -> Self {
        Self { generated_at }
    }

    /// Calendar date used in file names (UTC date of the instant)
    pub fn file_date(&self) -> NaiveDate {
        self.generated_at.with_timezone(&Utc).date_naive()
    }

    /// Generated-at line rendered with the given strftime layout.
    ///
    /// A layout chrono cannot render falls back to the default long form.
    pub fn timestamp(&self, layout: &str) -> String {
        let mut out = String::new();
        if write!(out, "{}", self.generated_at.format(layout)).is_ok() {
            return out;
        }

        tracing::warn!("Invalid timestamp layout {:?}, using default", layout);
        self.generated_at
            .format(DEFAULT_TIMESTAMP_FORMAT)
            .to_string()
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::now()
    }
}

/// Suggested file name: `<base>_<YYYY-MM-DD>.<ext>`
pub fn suggested_file_name(base: &str, format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "{}_{}.{}",
        base,
        date.format(DATE_FORMAT),
        format.extension()
    )
}

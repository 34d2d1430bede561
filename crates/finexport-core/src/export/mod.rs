//! Export functionality for records
//!
//! This module turns an ordered list of [`Record`](crate::types::Record)s
//! into downloadable text files.
//!
//! # Overview
//!
//! Export functionality supports:
//! - CSV (comma-separated, quoted only where needed)
//! - Excel-labelled CSV (same payload, `.xlsx` name)
//! - HTML (standalone document with one escaped table)
//!
//! Files are named `<base>_<YYYY-MM-DD>.<ext>`. An export with no records
//! is declined rather than producing an empty file.
//!
//! # Example
//!
//! ```ignore
//! use finexport_core::export::{ExportManager, RenderContext};
//!
//! let manager = ExportManager::new();
//! let job = ExportJob::new(records, "investments", ExportFormat::Csv);
//! let artifact = manager.prepare(&job, &RenderContext::now())?;
//! ```

mod context;
mod delimited;
mod exporter;
mod markup;
mod sink;

pub use context::{suggested_file_name, RenderContext};
pub use delimited::{escape_field, to_delimited_text, DelimitedExporter, DELIMITER};
pub use exporter::{ExportManager, Exporter};
pub use markup::{escape_html, to_markup_table, MarkupExporter};
pub use sink::ArtifactSink;

#[cfg(test)]
pub use sink::MemorySink;

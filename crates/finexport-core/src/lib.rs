//! finexport-core - Core library for finexport
//!
//! This crate provides the record model and the tabular exporters
//! (CSV, Excel-labelled CSV, HTML table), together with file naming,
//! configuration, and JSON record loading.

pub mod error;
pub mod types;
pub mod config;
pub mod records;
pub mod export;

pub use error::{FinExportError, Result};
pub use types::*;

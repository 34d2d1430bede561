//! Exporter trait and manager

use super::context::{suggested_file_name, RenderContext};
use super::delimited::DelimitedExporter;
use super::markup::MarkupExporter;
use super::sink::ArtifactSink;
use crate::config::ExportConfig;
use crate::error::{FinExportError, Result};
use crate::types::{ExportArtifact, ExportFormat, ExportJob, Record};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Trait for record exporters
pub trait Exporter: Send + Sync {
    /// Render records to text. Empty input renders as an empty string.
    fn export(&self, records: &[Record], ctx: &RenderContext) -> String;

    /// Get the format this exporter produces
    fn format(&self) -> ExportFormat;

    /// Get the file extension
    fn file_extension(&self) -> &str {
        self.format().extension()
    }

    /// Get the MIME type
    fn mime_type(&self) -> &str {
        self.format().mime_type()
    }
}

/// Manager for handling multiple export formats
pub struct ExportManager {
    exporters: HashMap<ExportFormat, Box<dyn Exporter>>,
}

impl ExportManager {
    /// Create a new export manager with default exporters
    pub fn new() -> Self {
        Self::with_markup(MarkupExporter::new())
    }

    /// Create a manager whose markup exporter follows the given configuration
    pub fn from_config(config: &ExportConfig) -> Self {
        Self::with_markup(MarkupExporter::from_config(config))
    }

    fn with_markup(markup: MarkupExporter) -> Self {
        let mut manager = Self {
            exporters: HashMap::new(),
        };

        manager.register(Box::new(DelimitedExporter::csv()));
        manager.register(Box::new(DelimitedExporter::excel()));
        manager.register(Box::new(markup));

        manager
    }

    /// Register an exporter, replacing any previous one for the same format
    pub fn register(&mut self, exporter: Box<dyn Exporter>) {
        self.exporters.insert(exporter.format(), exporter);
    }

    /// Render records in the given format
    pub fn render(&self, records: &[Record], format: ExportFormat, ctx: &RenderContext) -> Result<String> {
        let exporter = self.lookup(format)?;
        Ok(exporter.export(records, ctx))
    }

    /// Produce the artifact for a job.
    ///
    /// Returns [`FinExportError::EmptyInput`] when the job has no records; no
    /// bytes are produced in that case.
    pub fn prepare(&self, job: &ExportJob, ctx: &RenderContext) -> Result<ExportArtifact> {
        let exporter = self.lookup(job.format)?;

        if job.is_empty() {
            warn!("No records to export for '{}'", job.base_file_name);
            return Err(FinExportError::EmptyInput);
        }

        let content = exporter.export(&job.records, ctx);
        let file_name = suggested_file_name(&job.base_file_name, job.format, ctx.file_date());
        debug!(
            "Rendered {} records as {} ({} bytes) for {}",
            job.records.len(),
            job.format,
            content.len(),
            file_name
        );

        Ok(ExportArtifact {
            file_name,
            mime_type: job.format.mime_type(),
            bytes: content.into_bytes(),
        })
    }

    /// Prepare a job and hand it to a sink.
    ///
    /// An empty job is declined: nothing is saved and `Ok(None)` is returned.
    pub fn export(
        &self,
        job: &ExportJob,
        ctx: &RenderContext,
        sink: &dyn ArtifactSink,
    ) -> Result<Option<PathBuf>> {
        let artifact = match self.prepare(job, ctx) {
            Ok(artifact) => artifact,
            Err(FinExportError::EmptyInput) => return Ok(None),
            Err(e) => return Err(e),
        };

        let path = sink.save(&artifact)?;
        info!("Exported {} records to {}", job.records.len(), path.display());
        Ok(Some(path))
    }

    /// Get list of available formats, in display order
    pub fn available_formats(&self) -> Vec<ExportFormat> {
        ExportFormat::ALL
            .into_iter()
            .filter(|f| self.exporters.contains_key(f))
            .collect()
    }

    /// Check if a format is available
    pub fn has_format(&self, format: ExportFormat) -> bool {
        self.exporters.contains_key(&format)
    }

    /// Get an exporter by format
    pub fn get(&self, format: ExportFormat) -> Option<&dyn Exporter> {
        self.exporters.get(&format).map(|e| e.as_ref())
    }

    fn lookup(&self, format: ExportFormat) -> Result<&dyn Exporter> {
        self.get(format)
            .ok_or_else(|| FinExportError::UnknownFormat(format.to_string()))
    }
}

impl Default for ExportManager {
    fn default() -> Self {
        Self::new()
    }
}

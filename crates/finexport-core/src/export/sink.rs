//! File-save step abstraction

use crate::error::Result;
use crate::types::ExportArtifact;
use std::path::PathBuf;

/// Trait for the step that persists a rendered artifact
pub trait ArtifactSink: Send + Sync {
    /// Save an artifact under its suggested file name, returning where it went
    fn save(&self, artifact: &ExportArtifact) -> Result<PathBuf>;
}

/// In-memory sink for testing
#[cfg(test)]
pub use memory::MemorySink;

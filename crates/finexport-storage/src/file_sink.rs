//! File system sink for export artifacts

use finexport_core::error::{FinExportError, Result};
use finexport_core::export::ArtifactSink;
use finexport_core::types::ExportArtifact;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Saves artifacts as files in one output directory
pub struct FileSystemSink {
    /// Directory artifacts are written to
    output_dir: PathBuf,
}

impl FileSystemSink {
    /// Create a sink writing into `output_dir`, creating it if needed
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let sink = Self {
            output_dir: output_dir.into(),
        };

        sink.ensure_dir()?;
        Ok(sink)
    }

    /// Create a sink for the user's download directory
    pub fn default_location() -> Result<Self> {
        let output_dir = dirs::download_dir()
            .or_else(|| {
                directories::UserDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
            })
            .unwrap_or_else(|| PathBuf::from("."));

        Self::new(output_dir)
    }

    /// Get the output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Ensure the output directory exists
    fn ensure_dir(&self) -> Result<()> {
        if !self.output_dir.exists() {
            fs::create_dir_all(&self.output_dir).map_err(|e| {
                FinExportError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create output directory: {}", e),
                ))
            })?;
            debug!("Created output directory: {:?}", self.output_dir);
        }
        Ok(())
    }

    /// Get the final path for a file name
    fn artifact_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    /// Get a temporary path for atomic writes
    fn temp_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(format!(".{}.tmp", file_name))
    }

    /// Write bytes atomically (write to temp, then rename)
    fn atomic_write(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let temp_path = self.temp_path(file_name);
        let final_path = self.artifact_path(file_name);

        let temp_file = fs::File::create(&temp_path).map_err(|e| {
            FinExportError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create temp file: {}", e),
            ))
        })?;
        let mut writer = BufWriter::new(temp_file);
        if let Err(e) = writer.write_all(bytes).and_then(|_| writer.flush()) {
            drop(writer);
            let _ = fs::remove_file(&temp_path);
            return Err(FinExportError::Io(e));
        }
        drop(writer);

        fs::rename(&temp_path, &final_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            FinExportError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to rename temp file: {}", e),
            ))
        })?;

        debug!("Saved {} bytes to {:?}", bytes.len(), final_path);
        Ok(final_path)
    }
}

impl ArtifactSink for FileSystemSink {
    fn save(&self, artifact: &ExportArtifact) -> Result<PathBuf> {
        validate_file_name(&artifact.file_name)?;
        self.atomic_write(&artifact.file_name, &artifact.bytes)
    }
}

/// Reject names that would escape the output directory
fn validate_file_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name.starts_with('.')
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');

    if invalid {
        return Err(FinExportError::Validation(format!(
            "Invalid export file name: {:?}",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn create_test_sink() -> (FileSystemSink, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let sink = FileSystemSink::new(temp_dir.path()).unwrap();
        (sink, temp_dir)
    }

    fn artifact(name: &str, content: &str) -> ExportArtifact {
        ExportArtifact {
            file_name: name.to_string(),
            mime_type: "text/csv",
            bytes: content.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("exports").join("2024");
        let sink = FileSystemSink::new(&nested).unwrap();
        assert!(sink.output_dir().exists());
    }

    #[test]
    fn test_save_writes_under_suggested_name() {
        let (sink, temp) = create_test_sink();
        let path = sink
            .save(&artifact("investments_2024-03-02.csv", "name,amount\n"))
            .unwrap();

        assert_eq!(path, temp.path().join("investments_2024-03-02.csv"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "name,amount\n");
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let (sink, _temp) = create_test_sink();
        sink.save(&artifact("report_2024-01-15.csv", "a\n1\n")).unwrap();

        assert!(!sink.temp_path("report_2024-01-15.csv").exists());
        assert!(sink.artifact_path("report_2024-01-15.csv").exists());
    }

    #[test]
    fn test_overwrites_existing_file() {
        let (sink, _temp) = create_test_sink();
        sink.save(&artifact("report_2024-01-15.csv", "old\n")).unwrap();
        let path = sink.save(&artifact("report_2024-01-15.csv", "new\n")).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "new\n");
    }

    #[test]
    fn test_rejects_path_traversal() {
        let (sink, _temp) = create_test_sink();
        for name in ["../escape.csv", "sub/dir.csv", "", ".hidden.csv", "a\\b.csv"] {
            let result = sink.save(&artifact(name, "x"));
            assert!(
                matches!(result, Err(FinExportError::Validation(_))),
                "expected rejection for {:?}",
                name
            );
        }
    }
}

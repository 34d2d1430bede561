//! Formats command
//!
//! List the export formats with their file extension and MIME type.

use anyhow::Result;
use finexport_core::export::ExportManager;

/// Execute the formats command
pub fn execute() -> Result<()> {
    use colored::Colorize;

    let manager = ExportManager::new();
    for format in manager.available_formats() {
        println!(
            "{:<8} .{:<6} {}",
            format.name().cyan(),
            format.extension(),
            format.mime_type().dimmed()
        );
    }

    Ok(())
}

//! Export command
//!
//! Export records loaded from JSON to CSV, Excel-labelled CSV or HTML.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use finexport_core::config::Config;
use finexport_core::export::{ExportManager, RenderContext};
use finexport_core::records::load_records;
use finexport_core::{ExportFormat, ExportJob, Record};
use finexport_storage::FileSystemSink;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    /// Comma-separated values (.csv)
    Csv,
    /// CSV content saved as .xlsx
    #[value(alias = "xlsx")]
    Excel,
    /// Standalone HTML table (.html)
    Html,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Excel => ExportFormat::Excel,
            FormatArg::Html => ExportFormat::Html,
        }
    }
}

/// Arguments for the export command
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// JSON file with an array of records ("-" for stdin)
    #[arg(default_value = "-")]
    pub input: PathBuf,

    /// Export format (defaults to the configured format)
    #[arg(long, short, value_enum)]
    pub format: Option<FormatArg>,

    /// Base file name; the date and extension are appended
    #[arg(long, short, default_value = "export")]
    pub name: String,

    /// Directory to save into (configured or download directory if not specified)
    #[arg(long, short)]
    pub output_dir: Option<PathBuf>,

    /// Write the content to stdout instead of saving a file
    #[arg(long, conflicts_with = "output_dir")]
    pub stdout: bool,

    /// Title of the HTML report
    #[arg(long)]
    pub title: Option<String>,
}

/// Execute the export command
pub fn execute(args: ExportArgs, config_path: &Path) -> Result<()> {
    use colored::Colorize;

    tracing::debug!("Using config path {:?}", config_path);
    let mut config = Config::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if let Some(title) = &args.title {
        config.export.report_title = title.clone();
    }

    let format = args
        .format
        .map(ExportFormat::from)
        .unwrap_or(config.export.default_format);

    let records = read_input(&args.input)?;
    let job = ExportJob::new(records, args.name.clone(), format);

    if job.is_empty() {
        eprintln!("{} No records to export, nothing written.", "⚠".yellow());
        return Ok(());
    }

    eprintln!(
        "Exporting {} records as {}...",
        job.records.len().to_string().yellow(),
        format.to_string().cyan()
    );

    let manager = ExportManager::from_config(&config.export);
    let ctx = RenderContext::now();

    if args.stdout {
        let artifact = manager.prepare(&job, &ctx)?;
        io::stdout()
            .write_all(&artifact.bytes)
            .context("Failed to write to stdout")?;
        return Ok(());
    }

    let sink = match args.output_dir.or(config.output.directory) {
        Some(dir) => FileSystemSink::new(dir)?,
        None => FileSystemSink::default_location()?,
    };

    if let Some(path) = manager.export(&job, &ctx, &sink)? {
        eprintln!("{} Exported to {}", "✓".green(), path.display());
    }

    Ok(())
}

fn read_input(input: &Path) -> Result<Vec<Record>> {
    if input == Path::new("-") {
        return load_records(io::stdin().lock()).context("Failed to read records from stdin");
    }

    let file = File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    load_records(BufReader::new(file))
        .with_context(|| format!("Failed to read records from {}", input.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_values() {
        assert!(FormatArg::from_str("csv", true).is_ok());
        assert!(FormatArg::from_str("excel", true).is_ok());
        assert!(FormatArg::from_str("xlsx", true).is_ok());
        assert!(FormatArg::from_str("html", true).is_ok());
        assert!(FormatArg::from_str("pdf", true).is_err());
    }

    #[test]
    fn test_format_mapping() {
        assert_eq!(ExportFormat::from(FormatArg::Csv), ExportFormat::Csv);
        assert_eq!(ExportFormat::from(FormatArg::Excel), ExportFormat::Excel);
        assert_eq!(ExportFormat::from(FormatArg::Html), ExportFormat::Html);
    }

    #[test]
    fn test_read_input_missing_file() {
        let result = read_input(Path::new("/nonexistent/records.json"));
        assert!(result.is_err());
    }
}

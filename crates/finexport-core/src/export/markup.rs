//! Markup-table (HTML) exporter

use super::context::RenderContext;
use super::exporter::Exporter;
use crate::config::{ExportConfig, DEFAULT_REPORT_TITLE, DEFAULT_TIMESTAMP_FORMAT};
use crate::types::{columns, ExportFormat, Record, Value};

/// Render records as a standalone HTML document with a single table.
///
/// Uses the default title and timestamp layout. Returns an empty string for
/// empty input.
pub fn to_markup_table(records: &[Record], ctx: &RenderContext) -> String {
    MarkupExporter::new().render(records, ctx)
}

/// HTML table exporter
pub struct MarkupExporter {
    /// Heading shown above the table
    title: String,
    /// strftime layout of the generated-at line
    timestamp_format: String,
}

impl MarkupExporter {
    /// Create a new markup exporter with default settings
    pub fn new() -> Self {
        Self {
            title: DEFAULT_REPORT_TITLE.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }

    /// Create from export configuration
    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new()
            .with_title(config.report_title.clone())
            .with_timestamp_format(config.timestamp_format.clone())
    }

    /// Set the report title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the generated-at layout
    pub fn with_timestamp_format(mut self, layout: impl Into<String>) -> Self {
        self.timestamp_format = layout.into();
        self
    }

    /// Render the full document
    fn render(&self, records: &[Record], ctx: &RenderContext) -> String {
        if records.is_empty() {
            return String::new();
        }

        let mut html = self.render_header(ctx);
        html.push_str(&render_table(records));
        html.push_str(FOOTER);
        html
    }

    /// Preamble, style block, title and generated-at line
    fn render_header(&self, ctx: &RenderContext) -> String {
        let title = escape_html(&self.title);
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 2rem; color: #333; }}
        h1 {{ font-size: 1.5rem; margin-bottom: 0.25rem; }}
        .generated {{ color: #777; font-size: 0.875rem; margin-top: 0; }}
        table {{ border-collapse: collapse; width: 100%; }}
        th, td {{ border: 1px solid #ddd; padding: 8px; text-align: left; }}
        th {{ background-color: #f4f4f4; font-weight: 600; }}
        tr:nth-child(even) {{ background-color: #fafafa; }}
    </style>
</head>
<body>
<h1>{title}</h1>
<p class="generated">Generated on: {generated}</p>
"#,
            title = title,
            generated = escape_html(&ctx.timestamp(&self.timestamp_format)),
        )
    }
}

impl Default for MarkupExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for MarkupExporter {
    fn export(&self, records: &[Record], ctx: &RenderContext) -> String {
        self.render(records, ctx)
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Html
    }
}

const FOOTER: &str = "</body>\n</html>\n";

fn render_table(records: &[Record]) -> String {
    let columns = columns(records);
    let mut html = String::from("<table>\n<thead>\n<tr>\n");

    for name in &columns {
        html.push_str(&format!("    <th>{}</th>\n", escape_html(name)));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for record in records {
        html.push_str("<tr>\n");
        for name in &columns {
            html.push_str(&format!("    <td>{}</td>\n", render_cell(record.get(name))));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n");
    html
}

fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::Text(s)) => escape_html(s),
        Some(other) => other.to_plain_text(),
    }
}

/// Escape the five HTML-significant characters
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

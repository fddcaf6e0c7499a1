//! Renderer module
//!
//! Renders a Report to different output formats: text, jsonl, json, md

use colored::Colorize;
use serde::Serialize;

use crate::core::model::{Finding, Report, ScanError};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// The single finding line emitted in text mode
///
/// Also used by the streaming sink so text output stays identical whether
/// findings are streamed or rendered from a collected report.
pub fn finding_line(finding: &Finding) -> String {
    format!(
        "Potential incorrect Link usage in: {}",
        finding.path.yellow()
    )
}

/// One line of a report in structured formats
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum Item<'a> {
    Finding(&'a Finding),
    Error(&'a ScanError),
}

impl<'a> Item<'a> {
    fn all(report: &'a Report) -> Vec<Item<'a>> {
        report
            .findings
            .iter()
            .map(Item::Finding)
            .chain(report.errors.iter().map(Item::Error))
            .collect()
    }
}

/// Renderer for reports
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a report to a string
    pub fn render(&self, report: &Report) -> String {
        match self.config.format {
            OutputFormat::Text => self.render_text(report),
            OutputFormat::Jsonl => self.render_jsonl(report),
            OutputFormat::Json => self.render_json(report),
            OutputFormat::Markdown => self.render_markdown(report),
        }
    }

    /// Render as plain text (one line per finding; errors go to stderr)
    fn render_text(&self, report: &Report) -> String {
        report
            .findings
            .iter()
            .map(finding_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, report: &Report) -> String {
        Item::all(report)
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, report: &Report) -> String {
        let items = Item::all(report);
        if self.config.pretty {
            serde_json::to_string_pretty(&items).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&items).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown
    fn render_markdown(&self, report: &Report) -> String {
        let mut output = String::new();

        if !report.findings.is_empty() {
            output.push_str("## Findings\n\n");
            for finding in &report.findings {
                output.push_str(&format!("- `{}`\n", finding.path));
            }
            output.push('\n');
        }

        if !report.errors.is_empty() {
            output.push_str("## Errors\n\n");
            for error in &report.errors {
                output.push_str(&format!(
                    "- **{}** `{}`: {}\n",
                    error.kind, error.path, error.message
                ));
            }
            output.push('\n');
        }

        output
    }
}

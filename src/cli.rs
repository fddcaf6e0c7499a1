//! CLI module - Command-line interface definition and runner

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::core::model::{Finding, Report, ScanError};
use crate::core::render::{finding_line, OutputFormat, RenderConfig, Renderer};
use crate::scanner::{scan_roots, ScanConfig, ScanSink};

/// linkaudit - flag JS/JSX/TSX files that mix `<Link>` components with raw `<a>` anchors.
#[derive(Parser, Debug)]
#[command(name = "linkaudit")]
#[command(
    author,
    version,
    about,
    long_about = r#"linkaudit recursively scans one or more directory roots and reports every
.js/.jsx/.tsx file whose content contains both a `<Link` marker and an `<a`
marker. Mixing a router link component with a raw anchor in the same file
usually means one of them should be the other.

Findings print one line per file. In text format (the default) findings are
streamed to stdout as the walk proceeds; traversal errors (unreadable
directories, unreadable files) are logged to stderr and never abort the scan.

Output formats:
- text: `Potential incorrect Link usage in: <path>` per finding (default)
- jsonl: one JSON object per finding/error per line
- json: a single JSON array
- md: human-friendly Markdown

Examples:
    linkaudit src/pages src/components
    linkaudit --format jsonl .
    linkaudit --deny src    # exit 2 when findings exist (CI gating)
"#
)]
pub struct Cli {
    /// Directory roots to scan.
    #[arg(
        value_name = "ROOTS",
        num_args = 0..,
        default_value = ".",
        long_help = "One or more directory roots to scan (defaults to the current directory).\n\n\
Roots are scanned independently: an error under one root never prevents\n\
findings from the others. Reported paths are joined from the root as given,\n\
so relative roots produce relative paths."
    )]
    pub roots: Vec<PathBuf>,

    /// Output format (text/jsonl/json/md).
    #[arg(
        long,
        default_value = "text",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- text (default): one finding per line, streamed as the walk proceeds\n\
- jsonl: one JSON object per line (findings and errors)\n\
- json: a single JSON array\n\
- md (markdown)\n\n\
Structured formats are sorted by path for stable output."
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(
        long,
        long_help = "Pretty-print JSON and JSONL output with indentation for human readability.\n\n\
Has no effect on text/md formats."
    )]
    pub pretty: bool,

    /// Disable colored output.
    #[arg(
        long,
        long_help = "Disable colored output. This is useful when piping to files or when your\n\
terminal does not support ANSI colors."
    )]
    pub no_color: bool,

    /// Quiet mode (suppress error lines and the summary).
    #[arg(
        short,
        long,
        long_help = "Reduce non-essential output. Findings are still printed to stdout; error\n\
lines and the scan summary are suppressed."
    )]
    pub quiet: bool,

    /// Verbose mode (print a scan summary to stderr).
    #[arg(
        short,
        long,
        long_help = "Print a scan summary (files visited, candidates, findings, errors) to\n\
stderr when the scan completes."
    )]
    pub verbose: bool,

    /// Skip hidden files and directories (dotfiles).
    #[arg(
        long,
        long_help = "Skip hidden files and directories (dotfiles).\n\n\
By default every file under the roots is visited."
    )]
    pub skip_hidden: bool,

    /// Respect .gitignore and other ignore rules.
    #[arg(
        long,
        long_help = "Respect ignore files (.gitignore, .ignore, global ignores) while walking.\n\n\
By default the scan is raw and visits paths that would normally be ignored."
    )]
    pub respect_gitignore: bool,

    /// Exit with status 2 when findings exist.
    #[arg(
        long,
        long_help = "Exit with status 2 when one or more findings exist, for CI gating.\n\n\
Without this flag the exit status is 0 whether or not anything was flagged."
    )]
    pub deny: bool,
}

/// Streams findings to stdout and errors to stderr as the walk produces them
struct StreamSink {
    quiet: bool,
}

impl ScanSink for StreamSink {
    fn finding(&mut self, finding: Finding) {
        println!("{}", finding_line(&finding));
    }

    fn error(&mut self, error: ScanError) {
        if !self.quiet {
            eprintln!("{}", error);
        }
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<ExitCode> {
    let format: OutputFormat = cli.format.parse().unwrap_or_default();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = ScanConfig {
        skip_hidden: cli.skip_hidden,
        respect_gitignore: cli.respect_gitignore,
    };

    let summary = match format {
        OutputFormat::Text => {
            let mut sink = StreamSink { quiet: cli.quiet };
            scan_roots(&cli.roots, &config, &mut sink)
        }
        _ => {
            let mut report = Report::new();
            let summary = scan_roots(&cli.roots, &config, &mut report);
            report.sort();

            let renderer = Renderer::with_config(RenderConfig::with_pretty(format, cli.pretty));
            let output = renderer.render(&report);
            if !output.is_empty() {
                println!("{}", output);
            }
            summary
        }
    };

    if cli.verbose && !cli.quiet {
        eprintln!(
            "scanned {} files ({} candidates): {} findings, {} errors",
            summary.files_seen, summary.candidates, summary.findings, summary.errors
        );
    }

    if cli.deny && summary.findings > 0 {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

//! Output formatting for compile reports.

use crate::cli::OutputFormat;
use crate::orchestrator::{FileReport, FileStatus, RunSummary};
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::Path;
use wml_compiler::CompileError;
use wml_source_map::LineIndex;

/// A compile failure rendered with the offending source line.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(wml::compile))]
pub struct CompileDiagnostic {
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("{label}")]
    span: Option<SourceSpan>,
    label: String,
    #[help]
    help: Option<String>,
}

impl CompileDiagnostic {
    /// Build a diagnostic for `error` raised while compiling `source`.
    pub fn new(path: &Path, source: &str, error: &CompileError) -> Self {
        let index = LineIndex::new(source);
        let span = index
            .line_span(error.line(), source)
            .map(|span| SourceSpan::from(span.to_range()));

        Self {
            message: error.to_string(),
            src: NamedSource::new(path.display().to_string(), source.to_string()),
            span,
            label: error.code().as_str().to_string(),
            help: help_for(error),
        }
    }
}

fn help_for(error: &CompileError) -> Option<String> {
    let help = match error {
        CompileError::UnbalancedClosingBracket { .. } => {
            "inline content has more '>' than '<' on its first line"
        }
        CompileError::UnmatchedOpeningBracket { .. } => {
            "inline content reached the end of the file before its closing '>'"
        }
        CompileError::Parse(_) => "close the template placeholder on the same line",
    };
    Some(help.to_string())
}

/// Formatter for compile reports.
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print the outcome of one file.
    pub fn print_report(&self, report: &FileReport) {
        match self.format {
            OutputFormat::Human => self.print_report_human(report),
            OutputFormat::Json => println!("{}", report_json(report)),
            OutputFormat::Machine => {
                if let Some(line) = report_machine(report) {
                    println!("{}", line);
                }
            }
        }
    }

    /// Print the summary.
    pub fn print_summary(&self, summary: &RunSummary) {
        match self.format {
            OutputFormat::Human => print_summary_human(summary),
            OutputFormat::Json => println!("{}", summary_json(summary)),
            OutputFormat::Machine => {
                // No summary for machine format
            }
        }
    }

    // Human format

    fn print_report_human(&self, report: &FileReport) {
        match &report.status {
            FileStatus::Written(out) => {
                println!(
                    "\x1b[32mcompiled\x1b[0m {} -> {}",
                    report.path.display(),
                    out.display()
                );
            }
            FileStatus::Compiled(html) => print!("{}", html),
            FileStatus::Failed { source, error } => {
                let diagnostic = CompileDiagnostic::new(&report.path, source, error);
                eprintln!("{:?}", miette::Report::new(diagnostic));
            }
            FileStatus::Io(message) => {
                eprintln!(
                    "\x1b[31merror\x1b[0m: {}: {}",
                    report.path.display(),
                    message
                );
            }
        }
    }
}

fn print_summary_human(summary: &RunSummary) {
    eprintln!();
    if summary.error_count == 0 {
        eprintln!(
            "\x1b[32m✓\x1b[0m Compiled {} file{} ({}ms)",
            summary.file_count,
            if summary.file_count == 1 { "" } else { "s" },
            summary.duration_ms
        );
    } else {
        eprintln!(
            "\x1b[31m✗\x1b[0m Found {} error{} in {} files",
            summary.error_count,
            if summary.error_count == 1 { "" } else { "s" },
            summary.file_count
        );
        eprintln!("Time: {}ms", summary.duration_ms);
    }
}

// JSON format

fn report_json(report: &FileReport) -> serde_json::Value {
    let file = report.path.to_string_lossy();
    match &report.status {
        FileStatus::Written(out) => serde_json::json!({
            "type": "compiled",
            "file": file,
            "output": out.to_string_lossy(),
        }),
        FileStatus::Compiled(html) => serde_json::json!({
            "type": "compiled",
            "file": file,
            "html": html,
        }),
        FileStatus::Failed { error, .. } => serde_json::json!({
            "type": "error",
            "file": file,
            "code": error.code().as_str(),
            "line": error.line(),
            "message": error.to_string(),
        }),
        FileStatus::Io(message) => serde_json::json!({
            "type": "error",
            "file": file,
            "code": "io",
            "message": message,
        }),
    }
}

fn summary_json(summary: &RunSummary) -> serde_json::Value {
    serde_json::json!({
        "type": "summary",
        "files": summary.file_count,
        "errors": summary.error_count,
        "duration_ms": summary.duration_ms
    })
}

// Machine format

fn report_machine(report: &FileReport) -> Option<String> {
    let file = report.path.display();
    match &report.status {
        FileStatus::Written(_) | FileStatus::Compiled(_) => None,
        FileStatus::Failed { error, .. } => Some(format!(
            "{}:{}:{}:{}",
            file,
            error.line(),
            error.code().as_str(),
            error.to_string().replace(':', "\\:")
        )),
        FileStatus::Io(message) => Some(format!("{}:0:io:{}", file, message.replace(':', "\\:"))),
    }
}

//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// WieldyMarkup compiler - turns indented shorthand into HTML
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "wml")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Files to compile (default: every markup file in the workspace)
    pub files: Vec<PathBuf>,

    /// Workspace directory to search
    #[arg(short = 'C', long)]
    pub workspace: Option<PathBuf>,

    /// Path to wml.json
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Remove all whitespace between tags
    #[arg(long)]
    pub compress: bool,

    /// Leading character of lines copied through verbatim
    #[arg(long)]
    pub embedding_token: Option<char>,

    /// Directory to write HTML into (default: next to each source)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Print HTML to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,

    /// Recompile when markup files change
    #[arg(short, long)]
    pub watch: bool,

    /// Output format
    #[arg(long, default_value = "human")]
    pub output: OutputFormat,

    /// Show timing information
    #[arg(long)]
    pub timings: bool,

    /// Extra exclude patterns (glob)
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Preserve watch output (don't clear screen)
    #[arg(long)]
    pub preserve_watch_output: bool,
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON output, one object per line
    Json,
    /// Machine-readable output
    Machine,
}

impl Args {
    /// Log filter used when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "info"
        } else {
            "warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = Args::parse_from([
            "wml",
            "index.wml",
            "--compress",
            "--embedding-token",
            "|",
            "-o",
            "dist",
            "--output",
            "json",
        ]);
        assert_eq!(args.files, vec![PathBuf::from("index.wml")]);
        assert!(args.compress);
        assert_eq!(args.embedding_token, Some('|'));
        assert_eq!(args.out_dir, Some(PathBuf::from("dist")));
        assert_eq!(args.output, OutputFormat::Json);
        assert_eq!(args.log_filter(), "warn");
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["wml", "-v"]);
        assert!(args.files.is_empty());
        assert!(!args.watch);
        assert_eq!(args.output, OutputFormat::Human);
        assert_eq!(args.log_filter(), "info");
    }
}

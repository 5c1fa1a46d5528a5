//! Orchestrator for compiling markup files.

use crate::cli::Args;
use crate::config::Config;
use crate::output::OutputFormatter;
use log::{debug, info};
use miette::{IntoDiagnostic, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use wml_compiler::{compile_with_options, CompileError};

/// What happened to one input file.
#[derive(Debug)]
pub enum FileStatus {
    /// HTML was written to this path.
    Written(PathBuf),
    /// HTML was produced for stdout.
    Compiled(String),
    /// The markup did not compile.
    Failed {
        /// The markup that failed.
        source: String,
        /// The compile error.
        error: CompileError,
    },
    /// The file could not be read or the output could not be written.
    Io(String),
}

impl FileStatus {
    /// Whether this status counts as an error.
    pub fn is_error(&self) -> bool {
        matches!(self, FileStatus::Failed { .. } | FileStatus::Io(_))
    }
}

/// Outcome of compiling one file.
#[derive(Debug)]
pub struct FileReport {
    /// The input file.
    pub path: PathBuf,
    /// What happened.
    pub status: FileStatus,
}

/// Result of a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Number of files compiled.
    pub file_count: usize,
    /// Number of files that failed.
    pub error_count: usize,
    /// Time taken.
    pub duration_ms: u64,
}

/// Orchestrator for running the compiler over a workspace.
pub struct Orchestrator {
    /// Configuration.
    config: Config,
    /// CLI arguments.
    args: Args,
    /// Output formatter.
    formatter: OutputFormatter,
}

impl Orchestrator {
    /// Create a new orchestrator.
    pub fn new(workspace: PathBuf, args: Args) -> Result<Self> {
        let config = Config::load(&workspace, &args)?;
        if let Some(path) = &config.config_path {
            info!("using config {}", path.display());
        }
        debug!("exclude patterns: {:?}", config.exclude_patterns);
        let formatter = OutputFormatter::new(args.output);

        Ok(Self {
            config,
            args,
            formatter,
        })
    }

    /// Compile every input once and print the results.
    pub fn run_once(&self) -> Result<RunSummary> {
        let start = Instant::now();

        let files = self.input_files();
        info!("found {} markup files", files.len());

        let reports: Vec<FileReport> = files.par_iter().map(|f| self.compile_file(f)).collect();

        for report in &reports {
            self.formatter.print_report(report);
        }

        let summary = RunSummary {
            file_count: reports.len(),
            error_count: reports.iter().filter(|r| r.status.is_error()).count(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        if self.args.timings {
            eprintln!("\nTiming: {}ms", summary.duration_ms);
        }

        if !self.args.stdout {
            self.formatter.print_summary(&summary);
        }

        Ok(summary)
    }

    /// Run in watch mode.
    pub fn run_watch_mode(&self) -> Result<()> {
        use notify::{Config as NotifyConfig, RecommendedWatcher, RecursiveMode, Watcher};
        use std::sync::mpsc::{channel, RecvTimeoutError};
        use std::time::Duration;

        eprintln!("Starting watch mode...\n");

        // Initial compile
        let _ = self.run_once();

        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                if let Ok(event) = res {
                    let _ = tx.send(event);
                }
            },
            NotifyConfig::default().with_poll_interval(Duration::from_millis(500)),
        )
        .into_diagnostic()?;

        watcher
            .watch(&self.config.workspace, RecursiveMode::Recursive)
            .into_diagnostic()?;

        loop {
            match rx.recv_timeout(Duration::from_millis(100)) {
                Ok(event) => {
                    let changed = event
                        .paths
                        .iter()
                        .any(|p| self.config.should_process(p));
                    if !changed {
                        continue;
                    }

                    if !self.args.preserve_watch_output {
                        // Clear screen
                        print!("\x1B[2J\x1B[1;1H");
                    }

                    eprintln!("File change detected. Recompiling...\n");
                    let _ = self.run_once();
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        Ok(())
    }

    /// Files named on the command line, or every markup file in the workspace.
    fn input_files(&self) -> Vec<PathBuf> {
        if !self.args.files.is_empty() {
            return self.args.files.clone();
        }

        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(&self.config.workspace)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| self.config.should_process(p))
            .collect();
        files.sort();
        files
    }

    /// Compile a single file.
    fn compile_file(&self, path: &Path) -> FileReport {
        let status = match std::fs::read_to_string(path) {
            Ok(source) => match compile_with_options(&source, &self.config.compiler) {
                Ok(html) if self.args.stdout => FileStatus::Compiled(html),
                Ok(html) => self.write_output(path, &html),
                Err(error) => {
                    debug!("{}: {}", path.display(), error);
                    FileStatus::Failed { source, error }
                }
            },
            Err(e) => FileStatus::Io(format!("Failed to read: {}", e)),
        };

        FileReport {
            path: path.to_path_buf(),
            status,
        }
    }

    fn write_output(&self, source: &Path, html: &str) -> FileStatus {
        let out = self.config.output_path(source);
        if let Some(parent) = out.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                return FileStatus::Io(format!("Failed to create {}: {}", parent.display(), e));
            }
        }
        match std::fs::write(&out, html) {
            Ok(()) => {
                debug!("wrote {}", out.display());
                FileStatus::Written(out)
            }
            Err(e) => FileStatus::Io(format!("Failed to write {}: {}", out.display(), e)),
        }
    }
}

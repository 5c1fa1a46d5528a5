//! Configuration loading and management.

use crate::cli::Args;
use globset::{Glob, GlobSet, GlobSetBuilder};
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wml_compiler::{CompilerOptions, DEFAULT_EMBEDDING_TOKEN};

/// Name of the configuration file searched for in the workspace.
pub const CONFIG_FILE_NAME: &str = "wml.json";

/// Contents of `wml.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigFile {
    /// Compress output.
    pub compress: Option<bool>,
    /// Verbatim line marker.
    pub embedding_token: Option<char>,
    /// Markup file extensions, with the leading dot.
    pub extensions: Option<Vec<String>>,
    /// Glob patterns of files to skip.
    pub exclude: Vec<String>,
    /// Output directory, relative to the workspace.
    pub out_dir: Option<PathBuf>,
}

impl ConfigFile {
    /// Load `wml.json` from a path. Comments are allowed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;

        serde_json::from_str(&remove_json_comments(&content))
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to parse {}", path.display()))
    }

    /// Find `wml.json` in a directory or its parents.
    pub fn find(dir: &Path) -> Option<PathBuf> {
        dir.ancestors()
            .map(|ancestor| ancestor.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }
}

/// Resolved configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Workspace root directory.
    pub workspace: PathBuf,
    /// The config file that was loaded, if any.
    pub config_path: Option<PathBuf>,
    /// Options handed to every compile call.
    pub compiler: CompilerOptions,
    /// Markup file extensions, with the leading dot.
    pub extensions: Vec<String>,
    /// Exclude patterns.
    pub exclude_patterns: Vec<String>,
    /// Where HTML is written; `None` writes beside each source.
    pub out_dir: Option<PathBuf>,
    exclude: GlobSet,
}

impl Config {
    /// Load configuration from CLI arguments and workspace.
    ///
    /// Command-line flags take precedence over `wml.json`.
    pub fn load(workspace: &Path, args: &Args) -> Result<Self> {
        let config_path = args
            .config
            .clone()
            .or_else(|| ConfigFile::find(workspace));

        let file = match &config_path {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };

        let compiler = CompilerOptions {
            compress: args.compress || file.compress.unwrap_or(false),
            embedding_token: args
                .embedding_token
                .or(file.embedding_token)
                .unwrap_or(DEFAULT_EMBEDDING_TOKEN),
        };

        let extensions = file
            .extensions
            .unwrap_or_else(|| vec![".wml".to_string()]);

        let mut exclude_patterns = vec![
            "**/node_modules/**".to_string(),
            "**/.git/**".to_string(),
        ];
        exclude_patterns.extend(file.exclude);
        exclude_patterns.extend(args.ignore.iter().cloned());
        let exclude = build_glob_set(&exclude_patterns)?;

        let out_dir = args
            .out_dir
            .clone()
            .or(file.out_dir)
            .map(|dir| workspace.join(dir));

        Ok(Self {
            workspace: workspace.to_path_buf(),
            config_path,
            compiler,
            extensions,
            exclude_patterns,
            out_dir,
            exclude,
        })
    }

    /// Check whether a path has one of the markup extensions.
    pub fn has_markup_extension(&self, path: &Path) -> bool {
        let ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        self.extensions.iter().any(|e| e == &ext)
    }

    /// Check if a file should be compiled.
    pub fn should_process(&self, path: &Path) -> bool {
        if !self.has_markup_extension(path) {
            return false;
        }
        let relative = path.strip_prefix(&self.workspace).unwrap_or(path);
        !self.exclude.is_match(path) && !self.exclude.is_match(relative)
    }

    /// Where the HTML for `source` is written.
    pub fn output_path(&self, source: &Path) -> PathBuf {
        let html = source.with_extension("html");
        let Some(out_dir) = &self.out_dir else {
            return html;
        };

        match html.strip_prefix(&self.workspace) {
            Ok(relative) => out_dir.join(relative),
            Err(_) => match html.file_name() {
                Some(name) => out_dir.join(name),
                None => html,
            },
        }
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .into_diagnostic()
            .wrap_err_with(|| format!("Invalid exclude pattern {:?}", pattern))?;
        builder.add(glob);
    }
    builder.build().into_diagnostic()
}

/// Strip `//` and `/* */` comments outside of string literals.
fn remove_json_comments(json: &str) -> String {
    let mut result = String::with_capacity(json.len());
    let mut chars = json.chars().peekable();
    let mut in_string = false;
    let mut escape_next = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            if escape_next {
                escape_next = false;
            } else if c == '\\' {
                escape_next = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                result.push(c);
            }
            ('/', Some('/')) => {
                for nc in chars.by_ref() {
                    if nc == '\n' {
                        result.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                while let Some(nc) = chars.next() {
                    if nc == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => result.push(c),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_remove_json_comments() {
        let input = r#"{
            // a comment
            "outDir": "dist", /* inline */
            "embeddingToken": "/"
        }"#;
        let result = remove_json_comments(input);
        assert!(!result.contains("a comment"));
        assert!(!result.contains("inline"));
        assert!(result.contains(r#""embeddingToken": "/""#));
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{
                // production build
                "compress": true,
                "embeddingToken": "|",
                "extensions": [".wml", ".wieldy"],
                "exclude": ["**/drafts/**"],
                "outDir": "public"
            }"#,
        )
        .unwrap();

        let found = ConfigFile::find(&dir.path().join("nested/deeper")).unwrap();
        let file = ConfigFile::load(&found).unwrap();
        assert_eq!(file.compress, Some(true));
        assert_eq!(file.embedding_token, Some('|'));
        assert_eq!(file.out_dir, Some(PathBuf::from("public")));

        let config = Config::load(dir.path(), &Args::default()).unwrap();
        assert!(config.compiler.compress);
        assert_eq!(config.compiler.embedding_token, '|');
        assert!(config.should_process(&dir.path().join("pages/index.wieldy")));
        assert!(!config.should_process(&dir.path().join("drafts/wip.wml")));
        assert!(!config.should_process(&dir.path().join("notes.txt")));
        assert_eq!(
            config.output_path(&dir.path().join("pages/index.wml")),
            dir.path().join("public/pages/index.html")
        );
    }

    #[test]
    fn test_args_override_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "embeddingToken": "|", "outDir": "public" }"#,
        )
        .unwrap();

        let args = Args {
            compress: true,
            embedding_token: Some('~'),
            out_dir: Some(PathBuf::from("build")),
            ..Default::default()
        };
        let config = Config::load(dir.path(), &args).unwrap();
        assert!(config.compiler.compress);
        assert_eq!(config.compiler.embedding_token, '~');
        assert_eq!(config.out_dir, Some(dir.path().join("build")));
    }

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path(), &Args::default()).unwrap();
        assert_eq!(config.compiler, CompilerOptions::default());
        assert_eq!(config.extensions, vec![".wml".to_string()]);
        assert!(!config.should_process(&dir.path().join("node_modules/pkg/a.wml")));

        let source = dir.path().join("a/b.wml");
        assert_eq!(config.output_path(&source), dir.path().join("a/b.html"));
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{ \"compress\": \"yes\" }").unwrap();
        let err = ConfigFile::load(&path).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse"));
    }
}

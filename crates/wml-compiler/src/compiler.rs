//! The public compiler facade.

use log::debug;

use crate::error::CompileResult;
use crate::state::CompilationState;

/// Marks a line to be copied to the output without parsing.
pub const DEFAULT_EMBEDDING_TOKEN: char = '`';

/// Options controlling compilation output.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct CompilerOptions {
    /// Emit no indentation or line breaks between tags.
    pub compress: bool,
    /// Leading character of verbatim lines.
    pub embedding_token: char,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            compress: false,
            embedding_token: DEFAULT_EMBEDDING_TOKEN,
        }
    }
}

/// Compiles WieldyMarkup text into HTML.
///
/// The compiler stores the text and options between calls; each call to
/// [`Compiler::compile`] starts from a fresh state, so compiling twice gives
/// the same output.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    text: String,
    options: CompilerOptions,
    output: String,
}

impl Compiler {
    /// Create a compiler with no text.
    pub fn new(options: CompilerOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Create a compiler for `text`.
    pub fn with_text(text: impl Into<String>, options: CompilerOptions) -> Self {
        Self {
            text: text.into(),
            options,
            output: String::new(),
        }
    }

    /// The stored input text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the stored input text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Whether output is compressed.
    pub fn compress(&self) -> bool {
        self.options.compress
    }

    /// Enable or disable compressed output.
    pub fn set_compress(&mut self, compress: bool) {
        self.options.compress = compress;
    }

    /// The verbatim line marker.
    pub fn embedding_token(&self) -> char {
        self.options.embedding_token
    }

    /// Change the verbatim line marker.
    pub fn set_embedding_token(&mut self, token: char) {
        self.options.embedding_token = token;
    }

    /// Output of the last successful compile.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Compile the stored text.
    ///
    /// `text` and `compress`, when given, replace the stored values before
    /// compiling. On error the previous output is kept.
    pub fn compile(&mut self, text: Option<&str>, compress: Option<bool>) -> CompileResult<String> {
        if let Some(text) = text {
            self.text = text.to_string();
        }
        if let Some(compress) = compress {
            self.options.compress = compress;
        }

        debug!(
            "compiling {} bytes (compress: {})",
            self.text.len(),
            self.options.compress
        );
        self.output = CompilationState::new(&self.text, &self.options).run()?;
        Ok(self.output.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompileError;

    #[test]
    fn test_defaults() {
        let compiler = Compiler::default();
        assert_eq!(compiler.text(), "");
        assert_eq!(compiler.output(), "");
        assert!(!compiler.compress());
        assert_eq!(compiler.embedding_token(), '`');
    }

    #[test]
    fn test_compile_stored_text() {
        let mut compiler = Compiler::with_text("div", CompilerOptions::default());
        assert_eq!(compiler.output(), "");
        assert_eq!(compiler.compile(None, None).unwrap(), "<div>\n</div>\n");
        assert_eq!(compiler.output(), "<div>\n</div>\n");
    }

    #[test]
    fn test_overrides_are_stored() {
        let mut compiler = Compiler::new(CompilerOptions::default());
        let html = compiler.compile(Some("p\n  span"), Some(true)).unwrap();
        assert_eq!(html, "<p><span></span></p>");
        assert_eq!(compiler.text(), "p\n  span");
        assert!(compiler.compress());

        compiler.set_compress(false);
        assert_eq!(
            compiler.compile(None, None).unwrap(),
            "<p>\n  <span>\n  </span>\n</p>\n"
        );
    }

    #[test]
    fn test_recompile_is_fresh() {
        let mut compiler = Compiler::with_text("  li", CompilerOptions::default());
        let first = compiler.compile(None, None).unwrap();
        let second = compiler.compile(None, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_error_keeps_previous_output() {
        let mut compiler = Compiler::new(CompilerOptions::default());
        compiler.compile(Some("div"), None).unwrap();
        let err = compiler.compile(Some("div <open"), None).unwrap_err();
        assert_eq!(err, CompileError::unmatched_opening_bracket(1));
        assert_eq!(compiler.output(), "<div>\n</div>\n");
    }

    #[test]
    fn test_set_embedding_token() {
        let mut compiler = Compiler::default();
        compiler.set_embedding_token('~');
        assert_eq!(
            compiler.compile(Some("~<hr>\n`p"), None).unwrap(),
            "<hr>\n<`p>\n</`p>\n"
        );
    }
}

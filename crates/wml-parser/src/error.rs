//! Error types for WieldyMarkup line parsing.

use std::fmt;

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that occurred while parsing a single line of markup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// An attribute value opened a template placeholder that never closes.
    #[error("Unmatched '{open}' found in line {line}")]
    UnmatchedTemplateDelimiter {
        /// The opening delimiter, `{{` or `<%`.
        open: &'static str,
        /// 1-based source line.
        line: usize,
    },
}

impl ParseError {
    /// Create an unmatched template delimiter error.
    pub fn unmatched_template_delimiter(open: &'static str, line: usize) -> Self {
        Self::UnmatchedTemplateDelimiter { open, line }
    }

    /// The 1-based line the error was raised on.
    pub fn line(&self) -> usize {
        match self {
            Self::UnmatchedTemplateDelimiter { line, .. } => *line,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnmatchedTemplateDelimiter { .. } => ErrorCode::UnmatchedTemplateDelimiter,
        }
    }
}

/// Error codes shared by every stage of the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Inline content closes more brackets than it opens on its first line.
    UnbalancedClosingBracket,
    /// Input ended while inline content still had open brackets.
    UnmatchedOpeningBracket,
    /// A `{{` or `<%` attribute value without its closing delimiter.
    UnmatchedTemplateDelimiter,
}

impl ErrorCode {
    /// Get the error code as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::UnbalancedClosingBracket => "unbalanced-closing-bracket",
            ErrorCode::UnmatchedOpeningBracket => "unmatched-opening-bracket",
            ErrorCode::UnmatchedTemplateDelimiter => "unmatched-template-delimiter",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

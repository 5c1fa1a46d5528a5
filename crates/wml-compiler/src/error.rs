//! Error types for WieldyMarkup compilation.

use wml_parser::{ErrorCode, ParseError};

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;

/// An error that aborted a compile call.
///
/// Every variant carries the 1-based line on which the offending construct
/// starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// Inline content whose first line closes more `>` than it opens.
    #[error("Too many '>' found on line {line}")]
    UnbalancedClosingBracket {
        /// 1-based source line.
        line: usize,
    },
    /// Input ended before inline content closed all of its `<`.
    #[error("Unmatched '<' found on line {line}")]
    UnmatchedOpeningBracket {
        /// 1-based source line.
        line: usize,
    },
    /// A line-level parse failure.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl CompileError {
    /// Create an unbalanced closing bracket error.
    pub fn unbalanced_closing_bracket(line: usize) -> Self {
        Self::UnbalancedClosingBracket { line }
    }

    /// Create an unmatched opening bracket error.
    pub fn unmatched_opening_bracket(line: usize) -> Self {
        Self::UnmatchedOpeningBracket { line }
    }

    /// The 1-based line the error points at.
    pub fn line(&self) -> usize {
        match self {
            Self::UnbalancedClosingBracket { line } | Self::UnmatchedOpeningBracket { line } => {
                *line
            }
            Self::Parse(err) => err.line(),
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnbalancedClosingBracket { .. } => ErrorCode::UnbalancedClosingBracket,
            Self::UnmatchedOpeningBracket { .. } => ErrorCode::UnmatchedOpeningBracket,
            Self::Parse(err) => err.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_and_codes() {
        let err = CompileError::unbalanced_closing_bracket(3);
        assert_eq!(err.to_string(), "Too many '>' found on line 3");
        assert_eq!(err.code().as_str(), "unbalanced-closing-bracket");

        let err = CompileError::unmatched_opening_bracket(9);
        assert_eq!(err.to_string(), "Unmatched '<' found on line 9");
        assert_eq!(err.line(), 9);

        let err: CompileError = ParseError::unmatched_template_delimiter("<%", 4).into();
        assert_eq!(err.to_string(), "Unmatched '<%' found in line 4");
        assert_eq!(err.code(), ErrorCode::UnmatchedTemplateDelimiter);
        assert_eq!(err.line(), 4);
    }
}

//! Error types for grammar engines.

use thiserror::Error;

/// Result type for grammar operations.
pub type GrammarResult<T> = Result<T, GrammarError>;

/// Errors raised while parsing or composing grammar text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// The text is not valid grammar. Positions are 1-based.
    #[error("parse error at {line}:{column}: {message}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
    },

    /// The elements cannot be rendered as text.
    #[error("compose error: {0}")]
    Compose(String),

    /// A guarded engine's lock was poisoned by a panicking caller.
    #[error("lock poisoned: {0}")]
    Lock(String),
}

impl GrammarError {
    pub(crate) fn parse_at(message: impl Into<String>, (line, column): (usize, usize)) -> Self {
        Self::Parse {
            message: message.into(),
            line,
            column,
        }
    }
}

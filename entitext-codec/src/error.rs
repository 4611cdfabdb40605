//! Error types for the codec.

use entitext_grammar::GrammarError;
use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while converting between entities and text.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The parse produced no content element (nothing, or only a section index).
    #[error("no element found")]
    NoContentFound,

    /// A single-entity parse produced more than one content element.
    #[error("expected one element, found {found}")]
    TooManyContentElements { found: usize },

    /// A single-entity parse produced more than one section index.
    #[error("expected at most one section index, found {found}")]
    AmbiguousMetadata { found: usize },

    /// A section index declares import statements.
    #[error("imports in model text are not currently supported")]
    ImportsUnsupported,

    /// The entity's classifier has no grammar mapping.
    #[error("unsupported classifier: {classifier_path}")]
    UnsupportedClassifier { classifier_path: String },

    /// The converter cannot map this entity or element.
    #[error("cannot convert '{path}': {reason}")]
    Conversion { path: String, reason: String },

    /// The grammar engine rejected the text.
    #[error("parse failure: {0}")]
    ParseFailure(#[source] GrammarError),

    /// The grammar engine could not render the element.
    #[error("compose failure: {0}")]
    ComposeFailure(#[source] GrammarError),

    /// Reading or writing a stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML for [`crate::CodecConfig`].
    #[error("TOML deserialization error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration values are inconsistent.
    #[error("config error: {0}")]
    Config(String),
}

impl CodecError {
    pub(crate) fn conversion(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Conversion {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

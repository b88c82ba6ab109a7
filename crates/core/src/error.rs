use std::io;

/// Errors that can occur during keyword operations
///
/// Lookups that simply find nothing are not errors; they come back as
/// `Ok(None)` or an empty list so commands can quietly do nothing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown type \"{0}\"")]
    UnknownKeywordType(String),

    #[error("Unknown delete type \"{0}\"")]
    UnknownDeleteMode(String),

    #[error("Unknown snippet with index \"{index}\" for keyword type \"{keyword_type}\" ({available} configured)")]
    SnippetIndexOutOfRange {
        index: usize,
        available: usize,
        keyword_type: String,
    },

    #[error("Invalid pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown fallback command \"{0}\"")]
    UnknownFallback(String),

    #[error("Project settings not found")]
    ProjectSettingsNotFound,

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for keyword operations
pub type Result<T> = std::result::Result<T, Error>;

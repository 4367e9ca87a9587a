//! Error types for hilite

use thiserror::Error;

/// Result type alias for hilite operations
pub type Result<T> = std::result::Result<T, HiliteError>;

/// Highlighter error types
#[derive(Error, Debug)]
pub enum HiliteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Invalid pattern in rule '{rule}': {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unknown token type: {0}")]
    UnknownTokenType(String),

    #[error("Unknown color: {0}")]
    UnknownColor(String),

    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    Message(String),
}

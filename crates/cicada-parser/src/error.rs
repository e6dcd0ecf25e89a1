//! Parser error types

use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// The byte stream is not a valid document in the expected format
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// The document is valid YAML but violates the definition schema
    #[error("schema violation in '{field}': {message}")]
    SchemaViolation { field: String, message: String },

    /// A trigger or binding expression failed to parse
    #[error("invalid expression '{expression}': {message}")]
    ExpressionSyntax { expression: String, message: String },
}

impl From<serde_yaml::Error> for ParseError {
    fn from(err: serde_yaml::Error) -> Self {
        // serde_yaml includes the offending line/column in its display output
        ParseError::MalformedDocument(err.to_string())
    }
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

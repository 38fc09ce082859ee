//! Error types for fluentql

use thiserror::Error;

/// Result type alias for fluentql operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for building and running statements
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrmError {
    /// A host value could not be turned into row values
    #[error("Bind error: {0}")]
    Bind(String),

    /// The execution handle reported a failure
    #[error("Execution error: {0}")]
    Execution(String),

    /// A query that must yield a row yielded none
    #[error("Not found: {0}")]
    NotFound(String),

    /// The builder is not set up to run (no handle, nothing to write, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// A query hook refused to let the statement run
    #[error("Query aborted by hook: {0}")]
    Aborted(String),
}

impl OrmError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a bind error
    pub fn bind(message: impl Into<String>) -> Self {
        Self::Bind(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Wrap any driver error as an execution error.
    pub fn execution(err: impl std::fmt::Display) -> Self {
        Self::Execution(err.to_string())
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a bind error
    pub fn is_bind(&self) -> bool {
        matches!(self, Self::Bind(_))
    }
}

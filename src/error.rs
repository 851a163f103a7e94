//! Error types for query building and dialect handling

use thiserror::Error;

/// Errors produced by the fallible convenience layers of the crate.
///
/// The core functions never fail: the validator reports problems as a
/// [`ValidationResult`](crate::types::ValidationResult) and the splitter
/// absorbs malformed input into the last statement.
#[derive(Debug, Error)]
pub enum SqlEditError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid operation '{id}': {reason}")]
    InvalidOperation { id: String, reason: String },

    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SqlEditError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_operation(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOperation {
            id: id.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown_dialect(tag: impl Into<String>) -> Self {
        Self::UnknownDialect(tag.into())
    }
}

pub type Result<T> = std::result::Result<T, SqlEditError>;

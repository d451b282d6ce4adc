//! # AppError
//!
//! Centralized error handling for the Guarda Memória backend.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., City, Pessoa, Media)
    #[error("{0} not found with key {1}")]
    NotFound(String, String),

    /// Malformed identifier or missing required parameter
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Infrastructure failure (e.g., database down, query error)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    /// Shorthand for the common "entity X with key Y" miss.
    pub fn not_found(kind: &str, key: impl ToString) -> Self {
        AppError::NotFound(kind.to_string(), key.to_string())
    }
}

/// A specialized Result type for Guarda Memória logic.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_kind_and_key() {
        let err = AppError::not_found("city", 42);
        assert_eq!(err.to_string(), "city not found with key 42");
    }
}

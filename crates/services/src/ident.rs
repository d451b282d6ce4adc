//! # Identifier resolution
//!
//! Path segments arrive as raw strings and are resolved here before any
//! port is touched. Numeric ids must parse as decimal integers; slugs and
//! permalinks pass through unchanged.

use domains::error::{AppError, Result};

/// Parses a path segment as a numeric entity id.
///
/// A non-numeric segment is an [`AppError::InvalidArgument`], which the web
/// layer reports as HTTP 400 — the database is never consulted for it.
pub fn parse_numeric_id(raw: &str) -> Result<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::InvalidArgument(format!("'{raw}' is not a numeric id")))
}

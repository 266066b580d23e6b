//! Custom error types for tally
//!
//! This module defines the error hierarchy for the client using thiserror
//! for ergonomic error definitions. Errors are grouped by the failure taxonomy
//! the dashboard cares about: transport, validation, unsupported input and
//! missing entities.

use thiserror::Error;

/// The main error type for tally operations
#[derive(Error, Debug)]
pub enum TallyError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Network or transport failure talking to the backend
    #[error("Network error: {0}")]
    Http(String),

    /// Backend answered with a non-success status we have no better mapping for
    #[error("Server error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Validation errors (client-side or reported by the backend)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Upload of a file type the backend has no endpoint for
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl TallyError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from the network layer
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Api { .. })
    }
}

impl From<std::io::Error> for TallyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TallyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for TallyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Json(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

/// Result type alias for tally operations
pub type TallyResult<T> = Result<T, TallyError>;

//! Unified error types for the maintenance service.
//!
//! Business functions return [`Result`] and propagate store failures with `?`.
//! The HTTP layer maps each variant onto a status code in `api::error`.

use thiserror::Error;

/// Every failure the service can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// The underlying store rejected a query
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem or socket failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A technical-data payload did not match its installation type
    #[error("Invalid payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// A required field was missing or a parameter was out of range
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable description of the rejected input
        message: String,
    },

    /// The referenced element does not exist
    #[error("Element not found: {id}")]
    ElementNotFound {
        /// Element id that was looked up
        id: String,
    },

    /// A user, agent, record or roster referenced by id does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity ("user", "agent", ...)
        entity: &'static str,
        /// Id that was looked up
        id: String,
    },

    /// The caller could not be identified or is not approved
    #[error("Unauthorized: {reason}")]
    Unauthorized {
        /// Why the caller was rejected
        reason: String,
    },

    /// The caller is known but lacks the required role
    #[error("Forbidden: role {role} may not perform this action")]
    Forbidden {
        /// Role the caller holds
        role: String,
    },
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Revocation ledger unavailable: {message}")]
    LedgerUnavailable { message: String },

    #[error("Mail delivery failed: {message}")]
    Mail { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Whether this error is an infrastructure fault rather than an
    /// authorization outcome. Lenient verification never swallows these.
    pub fn is_infrastructure_fault(&self) -> bool {
        matches!(self, DomainError::LedgerUnavailable { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

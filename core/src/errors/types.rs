//! Error type definitions for authentication and token operations
//!
//! Message text for the authorization errors matches what the API returns
//! to clients; credential failures share one deliberately generic message
//! so responses never reveal whether the email or the password was wrong.

use thiserror::Error;

use crate::domain::entities::token::TokenKind;

/// Token verification and lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token revoked")]
    Revoked,

    #[error("Wrong token kind, expected {expected}")]
    WrongKind { expected: TokenKind },
}

impl TokenError {
    /// Stable error code for API payloads
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Malformed => "MALFORMED_TOKEN",
            TokenError::InvalidSignature => "INVALID_SIGNATURE",
            TokenError::Expired => "TOKEN_EXPIRED",
            TokenError::Revoked => "TOKEN_REVOKED",
            TokenError::WrongKind { .. } => "WRONG_TOKEN_KIND",
        }
    }
}

/// Authentication and access-gate errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("That user does not exist")]
    PrincipalNotFound,

    #[error("You need to be logged in to access this resource")]
    Unauthenticated,

    #[error("You are banned and not allowed to access this resource")]
    Banned,

    #[error("You are not allowed to access this resource")]
    Forbidden,
}

impl AuthError {
    /// Stable error code for API payloads
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::PrincipalNotFound => "PRINCIPAL_NOT_FOUND",
            AuthError::Unauthenticated => "UNAUTHENTICATED",
            AuthError::Banned => "BANNED",
            AuthError::Forbidden => "FORBIDDEN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_failure_message_is_generic() {
        // Unknown email and wrong password must be indistinguishable.
        let message = AuthError::InvalidCredentials.to_string();
        assert_eq!(message, "Incorrect email or password");
        assert!(!message.to_lowercase().contains("exist"));
    }

    #[test]
    fn test_wrong_kind_names_expected_kind() {
        let error = TokenError::WrongKind {
            expected: TokenKind::Refresh,
        };
        assert!(error.to_string().contains("refresh"));
        assert_eq!(error.code(), "WRONG_TOKEN_KIND");
    }
}

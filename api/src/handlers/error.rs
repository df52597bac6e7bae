//! Domain error translation into HTTP responses
//!
//! Every handler and middleware failure funnels through `ApiError` so
//! the status mapping lives in one place:
//!
//! - token failures and missing authentication: 401
//! - banned principals and insufficient privilege: 403
//! - bad credentials and validation failures: 400
//! - missing principal or resource: 404
//! - revocation ledger outage: 503 (never silently treated as valid)

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

use ink_core::errors::{AuthError, DomainError, TokenError};
use ink_shared::types::ApiResponse;

/// Wrapper turning a `DomainError` into an actix response
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::Token(token_error) => match token_error {
                TokenError::Malformed
                | TokenError::InvalidSignature
                | TokenError::Expired
                | TokenError::Revoked
                | TokenError::WrongKind { .. } => StatusCode::UNAUTHORIZED,
            },
            DomainError::Auth(auth_error) => match auth_error {
                AuthError::InvalidCredentials => StatusCode::BAD_REQUEST,
                AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
                AuthError::PrincipalNotFound => StatusCode::NOT_FOUND,
                AuthError::Banned | AuthError::Forbidden => StatusCode::FORBIDDEN,
            },
            DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::LedgerUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            DomainError::Mail { .. } | DomainError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
        }

        // Internal detail stays in the log; the client sees a stable
        // message per error variant. Token failures all share one body:
        // a spent single-use link must answer exactly like a dead one.
        let message = match &self.0 {
            DomainError::Token(_) => "Invalid token".to_string(),
            DomainError::Internal { .. } => "An internal error occurred".to_string(),
            DomainError::Mail { .. } => "Email delivery failed".to_string(),
            DomainError::LedgerUnavailable { .. } => {
                "Token verification is temporarily unavailable".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(status).json(ApiResponse::<()>::error(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_token_failures_map_to_unauthorized() {
        for error in [
            TokenError::Malformed,
            TokenError::InvalidSignature,
            TokenError::Expired,
            TokenError::Revoked,
        ] {
            let api_error = ApiError(DomainError::Token(error));
            assert_eq!(api_error.status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_ledger_outage_maps_to_service_unavailable() {
        let api_error = ApiError(DomainError::LedgerUnavailable {
            message: "connection refused".to_string(),
        });
        assert_eq!(api_error.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_token_failure_bodies_are_indistinguishable() {
        let revoked = ApiError(DomainError::Token(TokenError::Revoked)).error_response();
        let expired = ApiError(DomainError::Token(TokenError::Expired)).error_response();
        assert_eq!(revoked.status(), expired.status());

        let revoked = to_bytes(revoked.into_body()).await.unwrap();
        let expired = to_bytes(expired.into_body()).await.unwrap();
        assert_eq!(revoked, expired);

        let text = String::from_utf8_lossy(&revoked).to_lowercase();
        assert!(!text.contains("revoked"));
        assert!(!text.contains("expired"));
    }

    #[test]
    fn test_internal_detail_is_not_leaked() {
        let api_error = ApiError(DomainError::Internal {
            message: "secret detail".to_string(),
        });
        let response = api_error.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_banned_maps_to_forbidden() {
        let api_error = ApiError(DomainError::Auth(AuthError::Banned));
        assert_eq!(api_error.status_code(), StatusCode::FORBIDDEN);
    }
}

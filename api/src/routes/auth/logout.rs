use actix_web::{web, HttpResponse};

use crate::dto::auth::MessageResponse;
use crate::handlers::ApiError;
use crate::middleware::VerifiedToken;
use crate::routes::AppState;

use ink_core::repositories::{RevocationLedger, UserRepository};
use ink_core::services::mail::Mailer;
use ink_shared::config::AuthConfig;
use ink_shared::types::ApiResponse;

use super::clear_refresh_cookie;

/// Handler for POST /api/v1/auth/logout
///
/// Records the presented refresh token in the revocation ledger and
/// clears the cookie. Any replay of the recorded token fails until it
/// would have expired on its own.
pub async fn logout<U, L, M>(
    state: web::Data<AppState<U, L, M>>,
    config: web::Data<AuthConfig>,
    token: VerifiedToken,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    L: RevocationLedger + 'static,
    M: Mailer + 'static,
{
    state.auth_service.logout(&token.raw, &token.claims).await?;

    Ok(HttpResponse::Ok()
        .cookie(clear_refresh_cookie(&config.cookie))
        .json(ApiResponse::success(MessageResponse::new(
            "Logged out successfully",
        ))))
}

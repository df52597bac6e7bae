use actix_web::{web, HttpResponse};

use crate::dto::auth::AccessTokenResponse;
use crate::handlers::ApiError;
use crate::middleware::VerifiedToken;
use crate::routes::AppState;

use ink_core::repositories::{RevocationLedger, UserRepository};
use ink_core::services::mail::Mailer;
use ink_shared::config::AuthConfig;
use ink_shared::types::ApiResponse;

use super::refresh_cookie;

/// Handler for POST /api/v1/auth/refresh
///
/// Rotates the refresh token: the presented one is revoked and a new
/// pair is issued against the principal's current state.
pub async fn refresh<U, L, M>(
    state: web::Data<AppState<U, L, M>>,
    config: web::Data<AuthConfig>,
    token: VerifiedToken,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    L: RevocationLedger + 'static,
    M: Mailer + 'static,
{
    let pair = state
        .auth_service
        .refresh_session(&token.raw, &token.claims)
        .await?;

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(&config.cookie, &pair.refresh_token))
        .json(ApiResponse::success(AccessTokenResponse::new(
            pair.access_token,
            pair.access_expires_in,
        ))))
}

use actix_web::{web, HttpResponse};

use crate::dto::auth::{AccessTokenResponse, LoginRequest};
use crate::handlers::ApiError;
use crate::routes::AppState;

use ink_core::repositories::{RevocationLedger, UserRepository};
use ink_core::services::mail::Mailer;
use ink_shared::config::AuthConfig;
use ink_shared::types::ApiResponse;

use super::refresh_cookie;

/// Handler for POST /api/v1/auth/login
///
/// Verifies credentials and issues a token pair. The access token is
/// returned in the body; the refresh token is set as a hardened cookie.
/// Unknown email and wrong password produce the same error response.
pub async fn login<U, L, M>(
    state: web::Data<AppState<U, L, M>>,
    config: web::Data<AuthConfig>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    L: RevocationLedger + 'static,
    M: Mailer + 'static,
{
    let pair = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(&config.cookie, &pair.refresh_token))
        .json(ApiResponse::success(AccessTokenResponse::new(
            pair.access_token,
            pair.access_expires_in,
        ))))
}

/// Handler for POST /api/v1/auth/admin/login
///
/// Same as login, but refuses principals without administrator
/// privileges before verifying credentials.
pub async fn admin_login<U, L, M>(
    state: web::Data<AppState<U, L, M>>,
    config: web::Data<AuthConfig>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    L: RevocationLedger + 'static,
    M: Mailer + 'static,
{
    let pair = state
        .auth_service
        .admin_login(&request.email, &request.password)
        .await?;

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(&config.cookie, &pair.refresh_token))
        .json(ApiResponse::success(AccessTokenResponse::new(
            pair.access_token,
            pair.access_expires_in,
        ))))
}

use actix_web::{web, HttpResponse};

use crate::dto::auth::AccessTokenResponse;
use crate::handlers::ApiError;
use crate::middleware::VerifiedToken;
use crate::routes::AppState;

use ink_core::repositories::{RevocationLedger, UserRepository};
use ink_core::services::mail::Mailer;
use ink_shared::config::AuthConfig;
use ink_shared::types::ApiResponse;

/// Handler for GET /api/v1/auth/access
///
/// Issues a fresh access token against a verified refresh token without
/// rotating it. The access token reflects the principal's current role
/// and ban state, not what was true at login.
pub async fn access<U, L, M>(
    state: web::Data<AppState<U, L, M>>,
    config: web::Data<AuthConfig>,
    token: VerifiedToken,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    L: RevocationLedger + 'static,
    M: Mailer + 'static,
{
    let access_token = state.auth_service.reissue_access(&token.claims).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(AccessTokenResponse::new(
        access_token,
        config.jwt.access_token_expiry,
    ))))
}

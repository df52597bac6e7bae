use actix_web::{web, HttpResponse};

use crate::dto::auth::{MessageResponse, PasswordResetRequest, PasswordResetSubmit};
use crate::handlers::ApiError;
use crate::routes::AppState;

use ink_core::repositories::{RevocationLedger, UserRepository};
use ink_core::services::mail::Mailer;
use ink_shared::types::ApiResponse;

/// Handler for POST /api/v1/account/password-reset/request
///
/// Emails a reset link for the given address. Succeeds regardless of
/// whether an account exists; a reset link for a missing account simply
/// fails at redemption.
pub async fn request_reset<U, L, M>(
    state: web::Data<AppState<U, L, M>>,
    request: web::Json<PasswordResetRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    L: RevocationLedger + 'static,
    M: Mailer + 'static,
{
    state
        .auth_service
        .request_password_reset(&request.email)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
        "Check your inbox for a password reset link",
    ))))
}

/// Handler for POST /api/v1/account/password-reset
///
/// Redeems a reset token and sets the new password. Single-use: the
/// first redemption wins and later attempts fail as revoked.
pub async fn submit_reset<U, L, M>(
    state: web::Data<AppState<U, L, M>>,
    request: web::Json<PasswordResetSubmit>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    L: RevocationLedger + 'static,
    M: Mailer + 'static,
{
    state
        .auth_service
        .reset_password(&request.token, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
        "Password updated",
    ))))
}

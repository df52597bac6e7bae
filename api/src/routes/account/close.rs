use actix_web::{web, HttpResponse};

use crate::dto::auth::{ActionTokenRequest, MessageResponse};
use crate::handlers::ApiError;
use crate::middleware::CurrentUser;
use crate::routes::AppState;

use ink_core::repositories::{RevocationLedger, UserRepository};
use ink_core::services::mail::Mailer;
use ink_shared::types::ApiResponse;

/// Handler for POST /api/v1/account/close/request
///
/// Requires an authenticated principal and emails them an account
/// closure link.
pub async fn request_close<U, L, M>(
    state: web::Data<AppState<U, L, M>>,
    user: CurrentUser,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    L: RevocationLedger + 'static,
    M: Mailer + 'static,
{
    state.auth_service.request_account_close(&user.0).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
        "Check your inbox for an account closure link",
    ))))
}

/// Handler for POST /api/v1/account/close
///
/// Redeems a closure token and deletes the account. Single-use.
pub async fn close<U, L, M>(
    state: web::Data<AppState<U, L, M>>,
    request: web::Json<ActionTokenRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    L: RevocationLedger + 'static,
    M: Mailer + 'static,
{
    state.auth_service.close_account(&request.token).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
        "Account closed",
    ))))
}

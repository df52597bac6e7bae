use actix_web::{web, HttpResponse};

use crate::dto::auth::{ActionTokenRequest, UserResponse};
use crate::handlers::ApiError;
use crate::routes::AppState;

use ink_core::repositories::{RevocationLedger, UserRepository};
use ink_core::services::mail::Mailer;
use ink_shared::types::ApiResponse;

/// Handler for POST /api/v1/account/confirm
///
/// Redeems a sign-up confirmation token and creates the account. The
/// token is single-use: a second redemption fails as revoked.
pub async fn confirm<U, L, M>(
    state: web::Data<AppState<U, L, M>>,
    request: web::Json<ActionTokenRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    L: RevocationLedger + 'static,
    M: Mailer + 'static,
{
    let user = state.auth_service.confirm_email(&request.token).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(UserResponse::from(user))))
}

use actix_web::{web, HttpResponse};

use crate::dto::auth::{MessageResponse, SignUpRequest};
use crate::handlers::ApiError;
use crate::routes::AppState;

use ink_core::repositories::{RevocationLedger, UserRepository};
use ink_core::services::mail::Mailer;
use ink_shared::types::ApiResponse;

/// Handler for POST /api/v1/account/signup
///
/// Starts a sign-up by emailing a confirmation link. No account exists
/// until the link is redeemed. The response is identical whether or not
/// the email is already taken.
pub async fn signup<U, L, M>(
    state: web::Data<AppState<U, L, M>>,
    request: web::Json<SignUpRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    L: RevocationLedger + 'static,
    M: Mailer + 'static,
{
    state
        .auth_service
        .sign_up(&request.email, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
        "Check your inbox to complete sign up",
    ))))
}

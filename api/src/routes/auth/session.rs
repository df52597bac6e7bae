use actix_web::HttpResponse;

use crate::dto::auth::{SessionResponse, UserResponse};
use crate::middleware::MaybeUser;

use ink_shared::types::ApiResponse;

/// Handler for GET /api/v1/auth/session
///
/// Sits behind a lenient gate: a valid access token yields the caller's
/// identity, anything else yields an anonymous session rather than an
/// error.
pub async fn session(user: MaybeUser) -> HttpResponse {
    let response = match user.0 {
        Some(user) => SessionResponse {
            authenticated: true,
            user: Some(UserResponse::from(user)),
        },
        None => SessionResponse {
            authenticated: false,
            user: None,
        },
    };

    HttpResponse::Ok().json(ApiResponse::success(response))
}

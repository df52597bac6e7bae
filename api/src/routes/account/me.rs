use actix_web::HttpResponse;

use crate::dto::auth::UserResponse;
use crate::middleware::CurrentUser;

use ink_shared::types::ApiResponse;

/// Handler for GET /api/v1/account/me
///
/// Returns the authenticated principal as freshly resolved by the token
/// gate, so role and ban changes are visible immediately.
pub async fn me(user: CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(UserResponse::from(user.0)))
}

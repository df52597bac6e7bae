//! Application factory
//!
//! Builds the Actix-web application with all routes, middleware, and
//! shared state wired together.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, Error, HttpResponse};
use tracing_actix_web::TracingLogger;

use crate::dto::auth::MessageResponse;
use crate::middleware::{cors::create_cors, TokenGate, TokenPipeline};
use crate::routes::account::{
    close::{close, request_close},
    confirm::confirm,
    me::me,
    password_reset::{request_reset, submit_reset},
    signup::signup,
};
use crate::routes::auth::{
    access::access, login::admin_login, login::login, logout::logout, refresh::refresh,
    session::session,
};
use crate::routes::AppState;

use ink_core::domain::entities::token::TokenKind;
use ink_core::repositories::{RevocationLedger, UserRepository};
use ink_core::services::mail::Mailer;
use ink_shared::config::AuthConfig;
use ink_shared::types::ApiResponse;

/// Create and configure the application with all dependencies
pub fn create_app<U, L, M>(
    app_state: web::Data<AppState<U, L, M>>,
    auth_config: AuthConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    L: RevocationLedger + 'static,
    M: Mailer + 'static,
{
    // The token gate reaches the auth service through a trait object so
    // it can be configured per route without carrying type parameters.
    let pipeline: Arc<dyn TokenPipeline> = app_state.auth_service.clone();

    App::new()
        .app_data(app_state)
        .app_data(web::Data::new(pipeline))
        .app_data(web::Data::new(auth_config))
        .wrap(TracingLogger::default())
        .wrap(create_cors())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(login::<U, L, M>))
                        .route("/admin/login", web::post().to(admin_login::<U, L, M>))
                        .route(
                            "/logout",
                            web::post()
                                .to(logout::<U, L, M>)
                                .wrap(TokenGate::strict(TokenKind::Refresh)),
                        )
                        .route(
                            "/refresh",
                            web::post()
                                .to(refresh::<U, L, M>)
                                .wrap(TokenGate::strict(TokenKind::Refresh)),
                        )
                        .route(
                            "/access",
                            web::get()
                                .to(access::<U, L, M>)
                                .wrap(TokenGate::strict(TokenKind::Refresh)),
                        )
                        .route(
                            "/session",
                            web::get()
                                .to(session)
                                .wrap(TokenGate::lenient(TokenKind::Access)),
                        ),
                )
                .service(
                    web::scope("/account")
                        .route("/signup", web::post().to(signup::<U, L, M>))
                        .route("/confirm", web::post().to(confirm::<U, L, M>))
                        .route(
                            "/password-reset/request",
                            web::post().to(request_reset::<U, L, M>),
                        )
                        .route("/password-reset", web::post().to(submit_reset::<U, L, M>))
                        .route(
                            "/close/request",
                            web::post()
                                .to(request_close::<U, L, M>)
                                .wrap(TokenGate::strict(TokenKind::Access)),
                        )
                        .route("/close", web::post().to(close::<U, L, M>))
                        .route(
                            "/me",
                            web::get()
                                .to(me)
                                .wrap(TokenGate::strict(TokenKind::Access)),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "inkwell-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<MessageResponse>::error(
        "The requested resource was not found",
    ))
}

use std::sync::Arc;

use actix_web::{web, HttpServer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ink_api::{create_app, AppState};
use ink_core::services::auth::AuthServiceConfig;
use ink_core::services::mail::Mailer;
use ink_core::services::{AuthService, LedgerSweeper, TokenService, TokenServiceConfig};
use ink_infra::{DatabasePool, HttpMailer, LogMailer, MySqlRevocationLedger, MySqlUserRepository};
use ink_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set; using the default development secret");
    }

    let pool = DatabasePool::new(config.database.clone()).await?;

    let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let ledger = Arc::new(MySqlRevocationLedger::new(pool.get_pool().clone()));

    let token_service = Arc::new(TokenService::new(
        Arc::clone(&ledger),
        TokenServiceConfig::from_jwt(&config.auth.jwt),
    ));

    let sweeper = Arc::new(LedgerSweeper::new(
        Arc::clone(&ledger),
        config.auth.sweep.clone(),
    ));
    sweeper.start_background_task();

    let mailer: Arc<dyn Mailer> = if config.mail.is_configured() {
        Arc::new(HttpMailer::new(config.mail.clone()))
    } else {
        warn!("No mail provider configured; outbound email will be logged only");
        Arc::new(LogMailer)
    };

    let auth_service = Arc::new(AuthService::new(
        users,
        token_service,
        Arc::new(mailer),
        AuthServiceConfig::from_shared(&config.auth),
    ));

    let app_state = web::Data::new(AppState { auth_service });

    let bind_address = config.server.bind_address();
    info!("Starting Inkwell API server on {}", bind_address);

    let auth_config = config.auth.clone();
    HttpServer::new(move || create_app(app_state.clone(), auth_config.clone()))
        .bind(&bind_address)?
        .run()
        .await?;

    Ok(())
}

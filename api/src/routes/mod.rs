//! Route handlers

pub mod account;
pub mod auth;

use std::sync::Arc;

use ink_core::repositories::{RevocationLedger, UserRepository};
use ink_core::services::mail::Mailer;
use ink_core::services::AuthService;

/// Application state that holds shared services
pub struct AppState<U, L, M>
where
    U: UserRepository,
    L: RevocationLedger,
    M: Mailer,
{
    pub auth_service: Arc<AuthService<U, L, M>>,
}

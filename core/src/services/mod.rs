//! Business services

pub mod auth;
pub mod mail;
pub mod token;

pub use auth::AuthService;
pub use token::{LedgerSweeper, TokenService, TokenServiceConfig};

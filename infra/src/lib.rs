//! # Infrastructure Layer
//!
//! Concrete implementations for everything the core defines at its
//! boundaries:
//!
//! - **Database**: MySQL-backed revocation ledger and user repository
//!   using SQLx
//! - **Mail**: HTTP mail provider client, plus a log-only mailer for
//!   environments without a configured provider

pub mod database;
pub mod mail;

pub use database::{DatabasePool, MySqlRevocationLedger, MySqlUserRepository};
pub use mail::{HttpMailer, LogMailer};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

//! Token lifecycle service: issuance, ordered verification, revocation,
//! and the background ledger sweep.

pub mod config;
pub mod service;
pub mod sweep;

pub use config::TokenServiceConfig;
pub use service::TokenService;
pub use sweep::LedgerSweeper;

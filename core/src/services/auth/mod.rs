//! Authentication flows and access gating

pub mod config;
pub mod gate;
pub mod service;

pub use config::AuthServiceConfig;
pub use service::AuthService;

//! # Inkwell Core
//!
//! Core business logic and domain layer for the Inkwell backend.
//! This crate contains the token lifecycle subsystem (issuance, ordered
//! verification, the revocation ledger and its sweep), the account flows
//! built on top of it, repository interfaces, and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;

//! Repository interfaces and in-memory test doubles

pub mod ledger;
pub mod user;

pub use ledger::{MemoryRevocationLedger, RevocationLedger};
pub use user::{MemoryUserRepository, UserRepository};

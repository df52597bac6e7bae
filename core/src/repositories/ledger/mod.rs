//! Revocation ledger interface and in-memory implementation

mod mock;
mod r#trait;

pub use mock::MemoryRevocationLedger;
pub use r#trait::RevocationLedger;

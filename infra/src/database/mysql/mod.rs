//! MySQL repository implementations

pub mod ledger_repository_impl;
pub mod user_repository_impl;

pub use ledger_repository_impl::MySqlRevocationLedger;
pub use user_repository_impl::MySqlUserRepository;

//! User repository interface and in-memory implementation

mod mock;
mod r#trait;

pub use mock::MemoryUserRepository;
pub use r#trait::UserRepository;

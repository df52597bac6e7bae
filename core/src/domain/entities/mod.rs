//! Domain entities

pub mod token;
pub mod user;

pub use token::{ActionPurpose, Claims, RevokedToken, TokenKind, TokenPair};
pub use user::User;

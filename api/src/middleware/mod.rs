//! HTTP middleware

pub mod cors;
pub mod token;

pub use token::{CurrentUser, MaybeUser, TokenGate, TokenPipeline, VerifiedToken};

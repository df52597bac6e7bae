//! Request handling support: error translation into HTTP responses

pub mod error;

pub use error::ApiError;

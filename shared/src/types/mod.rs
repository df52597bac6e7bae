//! Shared type definitions

pub mod response;

pub use response::ApiResponse;

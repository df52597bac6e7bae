//! # Inkwell API
//!
//! HTTP layer for the Inkwell backend: Actix-web routes, the token gate
//! middleware, DTOs, and server wiring.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use routes::AppState;

//! # Inkwell Shared
//!
//! Configuration structures and response types shared across the Inkwell
//! backend crates.

pub mod config;
pub mod types;

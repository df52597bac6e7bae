//! Account lifecycle route handlers
//!
//! Sign-up with email confirmation, password reset, account closure,
//! and the current-account view. The confirmation, reset, and closure
//! endpoints redeem single-use action tokens delivered by email.

pub mod close;
pub mod confirm;
pub mod me;
pub mod password_reset;
pub mod signup;

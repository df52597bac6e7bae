//! Outbound mail boundary
//!
//! Email delivery itself lives in the infrastructure layer; the core only
//! knows the `Mailer` trait and how to compose the messages it sends.

pub mod content;
mod mock;

pub use mock::MemoryMailer;

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::DomainResult;

/// An outbound email message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// HTML body
    pub body: String,
}

/// Boundary trait for the mail provider
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a message out-of-band
    async fn send(&self, message: EmailMessage) -> DomainResult<()>;
}

// Lets callers pick a provider at runtime while the services stay generic.
#[async_trait]
impl Mailer for Arc<dyn Mailer> {
    async fn send(&self, message: EmailMessage) -> DomainResult<()> {
        (**self).send(message).await
    }
}

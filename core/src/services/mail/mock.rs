//! Recording mailer for testing

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::DomainResult;

use super::{EmailMessage, Mailer};

/// Mailer that records every message instead of delivering it
pub struct MemoryMailer {
    sent: Arc<RwLock<Vec<EmailMessage>>>,
}

impl MemoryMailer {
    /// Create a new recording mailer
    pub fn new() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// All messages sent so far
    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.read().await.clone()
    }

    /// The most recently sent message
    pub async fn last(&self) -> Option<EmailMessage> {
        self.sent.read().await.last().cloned()
    }
}

impl Default for MemoryMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, message: EmailMessage) -> DomainResult<()> {
        self.sent.write().await.push(message);
        Ok(())
    }
}

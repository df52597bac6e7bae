//! Log-only mailer for development environments
//!
//! Used when no provider API key is configured. Action links still need
//! to reach a human somehow, so the full message is written to the log.

use async_trait::async_trait;
use tracing::info;

use ink_core::errors::DomainResult;
use ink_core::services::mail::{EmailMessage, Mailer};

/// Mailer that writes messages to the application log instead of sending
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: EmailMessage) -> DomainResult<()> {
        info!(
            to = %message.to,
            subject = %message.subject,
            body = %message.body,
            "Email delivery skipped (no mail provider configured)"
        );
        Ok(())
    }
}

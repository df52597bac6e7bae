//! HTTP mail provider client (Mailgun-compatible API)

use async_trait::async_trait;
use tracing::{debug, error};

use ink_core::errors::{DomainError, DomainResult};
use ink_core::services::mail::{EmailMessage, Mailer};
use ink_shared::config::MailConfig;

/// Mailer that delivers through a Mailgun-compatible HTTP API
pub struct HttpMailer {
    client: reqwest::Client,
    config: MailConfig,
}

impl HttpMailer {
    /// Create a new HTTP mailer from provider configuration
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/{}/messages",
            self.config.api_url.trim_end_matches('/'),
            self.config.domain
        )
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: EmailMessage) -> DomainResult<()> {
        debug!("Sending email to {}: {}", message.to, message.subject);

        let form = [
            ("from", self.config.from_address.as_str()),
            ("to", message.to.as_str()),
            ("subject", message.subject.as_str()),
            ("html", message.body.as_str()),
        ];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth("api", Some(&self.config.api_key))
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                error!("Mail provider request failed: {}", e);
                DomainError::Mail {
                    message: format!("Mail provider request failed: {}", e),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Mail provider returned {}: {}", status, body);
            return Err(DomainError::Mail {
                message: format!("Mail provider returned {}", status),
            });
        }

        debug!("Email accepted by provider for {}", message.to);
        Ok(())
    }
}

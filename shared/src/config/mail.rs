//! Outbound mail provider configuration

use serde::{Deserialize, Serialize};

/// Mail provider configuration (HTTP API style)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Provider API base URL
    pub api_url: String,

    /// Provider API key
    pub api_key: String,

    /// Sending domain
    pub domain: String,

    /// From address used on outbound mail
    pub from_address: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: String::from("https://api.mailgun.net/v3"),
            api_key: String::new(),
            domain: String::from("mail.inkwell.local"),
            from_address: String::from("Inkwell <noreply@inkwell.local>"),
        }
    }
}

impl MailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("MAIL_API_URL")
                .unwrap_or_else(|_| "https://api.mailgun.net/v3".to_string()),
            api_key: std::env::var("MAIL_API_KEY").unwrap_or_default(),
            domain: std::env::var("MAIL_DOMAIN")
                .unwrap_or_else(|_| "mail.inkwell.local".to_string()),
            from_address: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "Inkwell <noreply@inkwell.local>".to_string()),
        }
    }

    /// Whether a real provider key is configured
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

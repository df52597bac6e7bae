//! Token service configuration

use ink_shared::config::JwtConfig;

use crate::domain::entities::token::ActionPurpose;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Symmetric signing secret
    pub secret: String,

    /// Issuer claim stamped into and required of every token
    pub issuer: String,

    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,

    /// Sign-up confirmation token lifetime in seconds
    pub confirm_token_expiry: i64,

    /// Password reset token lifetime in seconds
    pub reset_token_expiry: i64,

    /// Account closure token lifetime in seconds
    pub close_token_expiry: i64,
}

impl TokenServiceConfig {
    /// Build from the shared JWT configuration
    pub fn from_jwt(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            issuer: config.issuer.clone(),
            access_token_expiry: config.access_token_expiry,
            refresh_token_expiry: config.refresh_token_expiry,
            confirm_token_expiry: config.confirm_token_expiry,
            reset_token_expiry: config.reset_token_expiry,
            close_token_expiry: config.close_token_expiry,
        }
    }

    /// Lifetime for an action token of the given purpose
    pub fn action_expiry(&self, purpose: ActionPurpose) -> i64 {
        match purpose {
            ActionPurpose::ConfirmEmail => self.confirm_token_expiry,
            ActionPurpose::ResetPassword => self.reset_token_expiry,
            ActionPurpose::CloseAccount => self.close_token_expiry,
        }
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from_jwt(&JwtConfig::default())
    }
}

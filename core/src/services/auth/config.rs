//! Authentication service configuration

use ink_shared::config::AuthConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Base URL used when building action links sent by email
    pub action_link_base: String,

    /// bcrypt cost factor for new password hashes
    pub bcrypt_cost: u32,
}

impl AuthServiceConfig {
    /// Build from the shared authentication configuration
    pub fn from_shared(config: &AuthConfig) -> Self {
        Self {
            action_link_base: config.action_link_base.clone(),
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            action_link_base: String::from("http://localhost:8080"),
            bcrypt_cost: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_shared_carries_configured_cost() {
        let shared = AuthConfig {
            bcrypt_cost: 12,
            action_link_base: String::from("https://inkwell.example"),
            ..AuthConfig::default()
        };

        let config = AuthServiceConfig::from_shared(&shared);
        assert_eq!(config.bcrypt_cost, 12);
        assert_eq!(config.action_link_base, "https://inkwell.example");
    }
}

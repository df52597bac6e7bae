//! Authentication and token lifecycle configuration

use serde::{Deserialize, Serialize};

/// JWT signing configuration with independent lifetimes per token kind.
///
/// Each kind of token has its own TTL; the action-token lifetimes are
/// configured per purpose because confirmation, reset, and close links are
/// issued from different flows and may need different windows.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// Sign-up confirmation token expiry in seconds
    pub confirm_token_expiry: i64,

    /// Password reset token expiry in seconds
    pub reset_token_expiry: i64,

    /// Account closure token expiry in seconds
    pub close_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("your-secret-key-change-in-production"),
            access_token_expiry: 900,        // 15 minutes
            refresh_token_expiry: 2_419_200, // 28 days
            confirm_token_expiry: 1800,      // 30 minutes
            reset_token_expiry: 1800,        // 30 minutes
            close_token_expiry: 1800,        // 30 minutes
            issuer: String::from("inkwell"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "your-secret-key-change-in-production"
    }
}

/// Refresh-token cookie configuration
///
/// The refresh token travels in a hardened cookie across page loads:
/// script-inaccessible, HTTPS-only, and same-site strict against CSRF.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Cookie name carrying the refresh token
    pub name: String,

    /// Cookie HttpOnly flag
    #[serde(default = "default_http_only")]
    pub http_only: bool,

    /// Cookie secure flag (HTTPS only)
    pub secure: bool,

    /// Cookie SameSite attribute
    pub same_site: String,

    /// Cookie lifetime in seconds
    pub max_age: i64,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: String::from("inkwell_refresh"),
            http_only: default_http_only(),
            secure: true,
            same_site: String::from("Strict"),
            max_age: 2_419_200, // matches refresh token lifetime
        }
    }
}

/// Revocation ledger sweep configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SweepConfig {
    /// How often to run the pruning sweep (in seconds)
    pub interval_seconds: u64,

    /// Whether the background sweep is enabled
    pub enabled: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // run every hour
            enabled: true,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Refresh cookie configuration
    #[serde(default)]
    pub cookie: CookieConfig,

    /// Ledger sweep configuration
    #[serde(default)]
    pub sweep: SweepConfig,

    /// Base URL used when building action links sent by email
    pub action_link_base: String,

    /// bcrypt cost factor for newly hashed passwords
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        // Falls back to the default secret so the startup warning in the
        // binary recognizes an unconfigured deployment.
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| JwtConfig::default().secret);
        let access_token_expiry = env_i64("JWT_ACCESS_TOKEN_EXPIRY", 900);
        let refresh_token_expiry = env_i64("JWT_REFRESH_TOKEN_EXPIRY", 2_419_200);
        let confirm_token_expiry = env_i64("JWT_CONFIRM_TOKEN_EXPIRY", 1800);
        let reset_token_expiry = env_i64("JWT_RESET_TOKEN_EXPIRY", 1800);
        let close_token_expiry = env_i64("JWT_CLOSE_TOKEN_EXPIRY", 1800);
        let sweep_interval = env_i64("LEDGER_SWEEP_INTERVAL", 3600) as u64;
        let action_link_base = std::env::var("ACTION_LINK_BASE")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());
        let bcrypt_cost = env_i64("BCRYPT_COST", default_bcrypt_cost() as i64) as u32;

        Self {
            jwt: JwtConfig {
                secret,
                access_token_expiry,
                refresh_token_expiry,
                confirm_token_expiry,
                reset_token_expiry,
                close_token_expiry,
                issuer: String::from("inkwell"),
            },
            cookie: CookieConfig::default(),
            sweep: SweepConfig {
                interval_seconds: sweep_interval,
                enabled: true,
            },
            action_link_base,
            bcrypt_cost,
        }
    }

    /// Get JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt.secret
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            cookie: CookieConfig::default(),
            sweep: SweepConfig::default(),
            action_link_base: String::from("http://localhost:8080"),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

fn env_i64(key: &str, fallback: i64) -> i64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(fallback)
}

fn default_http_only() -> bool {
    true
}

fn default_bcrypt_cost() -> u32 {
    10
}

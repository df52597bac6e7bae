//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT issuer
pub const JWT_ISSUER: &str = "inkwell";

/// The kind of a signed token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived token carrying a role snapshot, sent on every API call
    Access,
    /// Long-lived token used only to obtain new access tokens
    Refresh,
    /// Single-use token embedded in an out-of-band link
    Action,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
            TokenKind::Action => write!(f, "action"),
        }
    }
}

/// The one state-changing operation an action token authorizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionPurpose {
    /// Complete a sign-up by creating the account
    ConfirmEmail,
    /// Set a new password
    ResetPassword,
    /// Delete the account
    CloseAccount,
}

impl std::fmt::Display for ActionPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionPurpose::ConfirmEmail => write!(f, "confirm-email"),
            ActionPurpose::ResetPassword => write!(f, "reset-password"),
            ActionPurpose::CloseAccount => write!(f, "close-account"),
        }
    }
}

/// Claims structure for the JWT payload
///
/// `sub` is optional because sign-up confirmation tokens are issued before
/// the account exists; such tokens identify their subject by email alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID), absent on pre-account action tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Subject email address
    pub email: String,

    /// Token kind
    pub kind: TokenKind,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Unique token id
    ///
    /// Timestamps have one-second resolution, so without this two tokens
    /// minted back to back for the same subject would serialize to the
    /// same JWT and share a ledger hash.
    pub jti: String,

    /// Admin flag snapshot (access tokens only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,

    /// Ban flag snapshot (access tokens only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_banned: Option<bool>,

    /// Action purpose tag (action tokens only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<ActionPurpose>,

    /// Password hash snapshot carried by sign-up confirmation tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_hash: Option<String>,
}

impl Claims {
    /// Creates claims for an access token carrying a role snapshot
    pub fn new_access(user: &super::user::User, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: Some(user.id.to_string()),
            email: user.email.clone(),
            kind: TokenKind::Access,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            iss: JWT_ISSUER.to_string(),
            jti: Uuid::new_v4().to_string(),
            is_admin: Some(user.is_admin),
            is_banned: Some(user.is_banned),
            purpose: None,
            credential_hash: None,
        }
    }

    /// Creates claims for a refresh token
    ///
    /// Refresh tokens carry no role data: anything likely to change (admin
    /// or ban status) is re-read when the next access token is minted.
    pub fn new_refresh(user: &super::user::User, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: Some(user.id.to_string()),
            email: user.email.clone(),
            kind: TokenKind::Refresh,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            iss: JWT_ISSUER.to_string(),
            jti: Uuid::new_v4().to_string(),
            is_admin: None,
            is_banned: None,
            purpose: None,
            credential_hash: None,
        }
    }

    /// Creates claims for a single-use action token
    pub fn new_action(
        purpose: ActionPurpose,
        email: impl Into<String>,
        sub: Option<Uuid>,
        credential_hash: Option<String>,
        ttl_seconds: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: sub.map(|id| id.to_string()),
            email: email.into(),
            kind: TokenKind::Action,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            iss: JWT_ISSUER.to_string(),
            jti: Uuid::new_v4().to_string(),
            is_admin: None,
            is_banned: None,
            purpose: Some(purpose),
            credential_hash,
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the user ID from the claims, when present and well-formed
    pub fn user_id(&self) -> Option<Uuid> {
        self.sub.as_deref().and_then(|s| Uuid::parse_str(s).ok())
    }

    /// The embedded expiry as a timestamp type
    ///
    /// The embedded expiry is authoritative; ledger entries copy it verbatim.
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }
}

/// Revocation ledger entry
///
/// An entry, once inserted, stands until pruned; pruning removes it only
/// after the token it shadows has independently expired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokedToken {
    /// SHA-256 hash of the literal token string
    pub token_hash: String,

    /// Expiry copied from the token's own `exp` claim
    pub expires_at: DateTime<Utc>,
}

impl RevokedToken {
    /// Creates a new ledger entry
    pub fn new(token_hash: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token_hash: token_hash.into(),
            expires_at,
        }
    }

    /// Whether the shadowed token has expired on its own
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Token pair returned to the client after login or refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::user::User;
    use super::*;

    fn sample_user() -> User {
        User::new("reader@example.com".to_string(), "bcrypt-hash".to_string())
    }

    #[test]
    fn test_access_claims_snapshot_roles() {
        let mut user = sample_user();
        user.is_admin = true;
        let claims = Claims::new_access(&user, 900);

        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.sub, Some(user.id.to_string()));
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.is_admin, Some(true));
        assert_eq!(claims.is_banned, Some(false));
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_refresh_claims_carry_no_role_data() {
        let user = sample_user();
        let claims = Claims::new_refresh(&user, 2_419_200);

        assert_eq!(claims.kind, TokenKind::Refresh);
        assert_eq!(claims.is_admin, None);
        assert_eq!(claims.is_banned, None);
        assert_eq!(claims.purpose, None);
    }

    #[test]
    fn test_action_claims_pre_account() {
        let claims = Claims::new_action(
            ActionPurpose::ConfirmEmail,
            "new@example.com",
            None,
            Some("hash-snapshot".to_string()),
            1800,
        );

        assert_eq!(claims.kind, TokenKind::Action);
        assert_eq!(claims.sub, None);
        assert_eq!(claims.user_id(), None);
        assert_eq!(claims.purpose, Some(ActionPurpose::ConfirmEmail));
        assert_eq!(claims.credential_hash.as_deref(), Some("hash-snapshot"));
    }

    #[test]
    fn test_claims_minted_together_are_distinct() {
        let user = sample_user();
        let first = Claims::new_refresh(&user, 2_419_200);
        let second = Claims::new_refresh(&user, 2_419_200);

        assert_ne!(first.jti, second.jti);
        assert_ne!(first, second);
    }

    #[test]
    fn test_claims_expiration() {
        let user = sample_user();
        let mut claims = Claims::new_access(&user, 900);
        claims.exp = Utc::now().timestamp() - 1;

        assert!(claims.is_expired());
    }

    #[test]
    fn test_expires_at_round_trips_exp() {
        let user = sample_user();
        let claims = Claims::new_refresh(&user, 60);
        assert_eq!(claims.expires_at().timestamp(), claims.exp);
    }

    #[test]
    fn test_revoked_token_expiry() {
        let entry = RevokedToken::new("hash", Utc::now() - chrono::Duration::hours(1));
        assert!(entry.is_expired());

        let entry = RevokedToken::new("hash", Utc::now() + chrono::Duration::hours(1));
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_claims_serialization_omits_empty_payload() {
        let user = sample_user();
        let claims = Claims::new_refresh(&user, 60);
        let json = serde_json::to_string(&claims).unwrap();

        assert!(!json.contains("purpose"));
        assert!(!json.contains("credential_hash"));

        let decoded: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(claims, decoded);
    }

    #[test]
    fn test_token_pair_creation() {
        let pair = TokenPair::new("a".into(), "r".into(), 900, 2_419_200);
        assert_eq!(pair.access_expires_in, 900);
        assert_eq!(pair.refresh_expires_in, 2_419_200);
    }
}

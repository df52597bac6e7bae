//! Main token service implementation

use std::sync::Arc;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::entities::token::{ActionPurpose, Claims, RevokedToken, TokenKind, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::RevocationLedger;

use super::config::TokenServiceConfig;

/// Hashes a token string for ledger storage.
///
/// The ledger stores a SHA-256 digest of the literal token string rather
/// than the token itself, keeping long JWTs out of indexed columns.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Service for issuing, verifying, and revoking signed tokens.
///
/// Verification is ordered: signature and structure, then expiry, then the
/// revocation ledger, then the expected kind. A ledger outage aborts
/// verification rather than assuming the token valid.
pub struct TokenService<L: RevocationLedger> {
    ledger: Arc<L>,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<L: RevocationLedger> TokenService<L> {
    /// Creates a new token service instance
    pub fn new(ledger: Arc<L>, config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.validate_exp = true;
        // The embedded expiry is authoritative to the second.
        validation.leeway = 0;

        Self {
            ledger,
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// The ledger this service consults
    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    /// Issues an access token carrying the user's current role snapshot
    pub fn issue_access(&self, user: &User) -> DomainResult<String> {
        let claims = Claims::new_access(user, self.config.access_token_expiry);
        self.encode_jwt(&claims)
    }

    /// Issues a refresh token for the user
    pub fn issue_refresh(&self, user: &User) -> DomainResult<String> {
        let claims = Claims::new_refresh(user, self.config.refresh_token_expiry);
        self.encode_jwt(&claims)
    }

    /// Issues an access + refresh pair for the user
    pub fn issue_pair(&self, user: &User) -> DomainResult<TokenPair> {
        Ok(TokenPair::new(
            self.issue_access(user)?,
            self.issue_refresh(user)?,
            self.config.access_token_expiry,
            self.config.refresh_token_expiry,
        ))
    }

    /// Issues a single-use action token for an out-of-band link
    pub fn issue_action(
        &self,
        purpose: ActionPurpose,
        email: &str,
        sub: Option<Uuid>,
        credential_hash: Option<String>,
    ) -> DomainResult<String> {
        let claims = Claims::new_action(
            purpose,
            email,
            sub,
            credential_hash,
            self.config.action_expiry(purpose),
        );
        self.encode_jwt(&claims)
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> DomainResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            // Signing can only fail on configuration faults, never per request.
            DomainError::Internal {
                message: format!("Token signing failed: {}", e),
            }
        })
    }

    /// Verifies a candidate token string and returns its claims.
    ///
    /// Failure order: `Malformed`/`InvalidSignature`, then `Expired`, then
    /// `Revoked`, then `WrongKind` when `expected` is given.
    pub async fn verify(
        &self,
        token: &str,
        expected: Option<TokenKind>,
    ) -> DomainResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        DomainError::Token(TokenError::Expired)
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        DomainError::Token(TokenError::InvalidSignature)
                    }
                    _ => DomainError::Token(TokenError::Malformed),
                }
            })?;

        // Ledger consultation fails closed: an error here aborts the request.
        if self.ledger.is_revoked(&hash_token(token)).await? {
            return Err(DomainError::Token(TokenError::Revoked));
        }

        if let Some(expected) = expected {
            if token_data.claims.kind != expected {
                return Err(DomainError::Token(TokenError::WrongKind { expected }));
            }
        }

        Ok(token_data.claims)
    }

    /// Verifies an action token and checks its purpose tag
    pub async fn verify_action(
        &self,
        token: &str,
        purpose: ActionPurpose,
    ) -> DomainResult<Claims> {
        let claims = self.verify(token, Some(TokenKind::Action)).await?;

        if claims.purpose != Some(purpose) {
            return Err(DomainError::Token(TokenError::WrongKind {
                expected: TokenKind::Action,
            }));
        }

        Ok(claims)
    }

    /// Records a token in the revocation ledger.
    ///
    /// The ledger entry copies the token's own expiry; the entry outlives
    /// the token's natural life by nothing and shadows it completely.
    pub async fn revoke(&self, token: &str, claims: &Claims) -> DomainResult<()> {
        let entry = RevokedToken::new(hash_token(token), claims.expires_at());
        self.ledger.record(entry).await
    }
}

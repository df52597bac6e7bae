//! Main authentication service implementation
//!
//! All account flows live here: login/logout, refresh rotation, sign-up,
//! and the three single-use action flows (confirm email, reset password,
//! close account). The action flows share one `redeem_action` workflow:
//! verify the token, perform the purpose-bound side effect, then record
//! the token in the revocation ledger no matter how the side effect went.

use std::future::Future;
use std::sync::Arc;

use tracing::warn;

use crate::domain::entities::token::{ActionPurpose, Claims, TokenKind, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{RevocationLedger, UserRepository};
use crate::services::mail::{content, Mailer};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;

/// Authentication service for the complete account lifecycle
pub struct AuthService<U, L, M>
where
    U: UserRepository,
    L: RevocationLedger,
    M: Mailer,
{
    /// User repository, consulted fresh on every authenticated request
    users: Arc<U>,
    /// Token service for issuance, verification, and revocation
    tokens: Arc<TokenService<L>>,
    /// Out-of-band mail delivery
    mailer: Arc<M>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, L, M> AuthService<U, L, M>
where
    U: UserRepository,
    L: RevocationLedger,
    M: Mailer,
{
    /// Create a new authentication service
    pub fn new(
        users: Arc<U>,
        tokens: Arc<TokenService<L>>,
        mailer: Arc<M>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            users,
            tokens,
            mailer,
            config,
        }
    }

    /// The token service backing this service
    pub fn tokens(&self) -> &Arc<TokenService<L>> {
        &self.tokens
    }

    /// Authenticate with email and password and issue a token pair.
    ///
    /// Unknown email and wrong password fail identically so responses
    /// never confirm whether an account exists.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<TokenPair> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let matches =
            bcrypt::verify(password, &user.password_hash).map_err(|e| DomainError::Internal {
                message: format!("Credential verification failed: {}", e),
            })?;
        if !matches {
            return Err(AuthError::InvalidCredentials.into());
        }

        self.tokens.issue_pair(&user)
    }

    /// Login for the admin client: refuses non-admin principals before
    /// attempting credential verification.
    pub async fn admin_login(&self, email: &str, password: &str) -> DomainResult<TokenPair> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::PrincipalNotFound)?;

        if !user.is_admin {
            return Err(AuthError::Forbidden.into());
        }

        self.login(email, password).await
    }

    /// Log out by recording the presented token in the ledger.
    ///
    /// Clients discard their copies; the ledger entry makes any replay of
    /// this token fail with `Revoked` until it would have expired anyway.
    pub async fn logout(&self, token: &str, claims: &Claims) -> DomainResult<()> {
        self.tokens.revoke(token, claims).await
    }

    /// Rotate a refresh token: revoke the presented one and issue a new
    /// pair from a fresh principal read.
    pub async fn refresh_session(
        &self,
        token: &str,
        claims: &Claims,
    ) -> DomainResult<TokenPair> {
        if claims.kind != TokenKind::Refresh {
            return Err(TokenError::WrongKind {
                expected: TokenKind::Refresh,
            }
            .into());
        }

        let user = self.resolve_principal(claims).await?;

        // Record first: the old token must be dead before its replacement
        // leaves the building.
        self.tokens.revoke(token, claims).await?;

        self.tokens.issue_pair(&user)
    }

    /// Issue a fresh access token against a verified refresh token,
    /// without rotating the refresh token.
    pub async fn reissue_access(&self, claims: &Claims) -> DomainResult<String> {
        if claims.kind != TokenKind::Refresh {
            return Err(TokenError::WrongKind {
                expected: TokenKind::Refresh,
            }
            .into());
        }

        let user = self.resolve_principal(claims).await?;
        self.tokens.issue_access(&user)
    }

    /// Re-fetch the current principal for verified claims.
    ///
    /// Always a fresh read so role and ban changes since issuance are
    /// observed. A valid token for a deleted subject fails explicitly
    /// with `PrincipalNotFound` rather than degrading to anonymous.
    pub async fn resolve_principal(&self, claims: &Claims) -> DomainResult<User> {
        let user = match claims.user_id() {
            Some(id) => self.users.find_by_id(id).await?,
            // Pre-account action tokens identify their subject by email.
            None => self.users.find_by_email(&claims.email).await?,
        };

        user.ok_or_else(|| AuthError::PrincipalNotFound.into())
    }

    /// Begin a sign-up.
    ///
    /// A taken email gets a notice instead of a confirmation link; both
    /// paths succeed so the response never reveals which one happened.
    pub async fn sign_up(&self, email: &str, password: &str) -> DomainResult<()> {
        if self.users.find_by_email(email).await?.is_some() {
            return self.mailer.send(content::attempted_sign_up(email)).await;
        }

        // The confirmation token carries the hash, not the password; the
        // account is created only when the link is redeemed.
        let hash =
            bcrypt::hash(password, self.config.bcrypt_cost).map_err(|e| DomainError::Internal {
                message: format!("Password hashing failed: {}", e),
            })?;
        let token =
            self.tokens
                .issue_action(ActionPurpose::ConfirmEmail, email, None, Some(hash))?;
        let link = self.action_link("/account/confirm", &token);

        self.mailer.send(content::sign_up_confirm(email, &link)).await
    }

    /// Redeem a sign-up confirmation token, creating the account
    pub async fn confirm_email(&self, token: &str) -> DomainResult<User> {
        let users = Arc::clone(&self.users);
        self.redeem_action(token, ActionPurpose::ConfirmEmail, move |claims| async move {
            let hash = claims
                .credential_hash
                .clone()
                .ok_or(DomainError::Token(TokenError::Malformed))?;
            users.create(User::new(claims.email, hash)).await
        })
        .await
    }

    /// Mail a password reset link for the given email address
    pub async fn request_password_reset(&self, email: &str) -> DomainResult<()> {
        let token = self
            .tokens
            .issue_action(ActionPurpose::ResetPassword, email, None, None)?;
        let link = self.action_link("/account/password-reset", &token);

        self.mailer.send(content::password_reset(email, &link)).await
    }

    /// Redeem a password reset token, setting the new password
    pub async fn reset_password(&self, token: &str, new_password: &str) -> DomainResult<User> {
        let users = Arc::clone(&self.users);
        let cost = self.config.bcrypt_cost;
        let new_password = new_password.to_string();

        self.redeem_action(token, ActionPurpose::ResetPassword, move |claims| async move {
            let hash = bcrypt::hash(new_password, cost).map_err(|e| DomainError::Internal {
                message: format!("Password hashing failed: {}", e),
            })?;
            users
                .update_password(&claims.email, &hash)
                .await?
                .ok_or_else(|| AuthError::PrincipalNotFound.into())
        })
        .await
    }

    /// Mail an account closure link to the authenticated principal
    pub async fn request_account_close(&self, user: &User) -> DomainResult<()> {
        let token = self.tokens.issue_action(
            ActionPurpose::CloseAccount,
            &user.email,
            Some(user.id),
            None,
        )?;
        let link = self.action_link("/account/close", &token);

        self.mailer
            .send(content::account_close(&user.email, &link))
            .await
    }

    /// Redeem an account closure token, deleting the account
    pub async fn close_account(&self, token: &str) -> DomainResult<User> {
        let users = Arc::clone(&self.users);
        self.redeem_action(token, ActionPurpose::CloseAccount, move |claims| async move {
            users
                .delete_by_email(&claims.email)
                .await?
                .ok_or_else(|| AuthError::PrincipalNotFound.into())
        })
        .await
    }

    /// The single-use redemption workflow shared by every action flow.
    ///
    /// Steps: verify the token (strict, matching purpose), run the side
    /// effect, then record the token in the ledger. The recording happens
    /// even when the side effect failed; only a verification failure skips
    /// it, since no side effect was attempted. This makes redemption
    /// succeed at most once per issued token.
    async fn redeem_action<T, F, Fut>(
        &self,
        token: &str,
        purpose: ActionPurpose,
        side_effect: F,
    ) -> DomainResult<T>
    where
        F: FnOnce(Claims) -> Fut,
        Fut: Future<Output = DomainResult<T>>,
    {
        let claims = self.tokens.verify_action(token, purpose).await?;

        let outcome = side_effect(claims.clone()).await;

        match self.tokens.revoke(token, &claims).await {
            Ok(()) => outcome,
            Err(ledger_error) => {
                if outcome.is_ok() {
                    // The side effect landed but the token could not be
                    // burned; surface the fault rather than hand back a
                    // replayable link.
                    return Err(ledger_error);
                }
                warn!("Failed to record a spent action token: {}", ledger_error);
                outcome
            }
        }
    }

    fn action_link(&self, path: &str, token: &str) -> String {
        format!(
            "{}{}?token={}",
            self.config.action_link_base.trim_end_matches('/'),
            path,
            token
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MemoryRevocationLedger, MemoryUserRepository};
    use crate::services::mail::MemoryMailer;
    use crate::services::token::TokenServiceConfig;

    // Low bcrypt cost keeps the tests fast.
    const TEST_COST: u32 = 4;

    struct Harness {
        users: Arc<MemoryUserRepository>,
        ledger: Arc<MemoryRevocationLedger>,
        mailer: Arc<MemoryMailer>,
        auth: AuthService<MemoryUserRepository, MemoryRevocationLedger, MemoryMailer>,
    }

    fn harness() -> Harness {
        let users = Arc::new(MemoryUserRepository::new());
        let ledger = Arc::new(MemoryRevocationLedger::new());
        let mailer = Arc::new(MemoryMailer::new());
        let tokens = Arc::new(TokenService::new(
            Arc::clone(&ledger),
            TokenServiceConfig::default(),
        ));
        let auth = AuthService::new(
            Arc::clone(&users),
            tokens,
            Arc::clone(&mailer),
            AuthServiceConfig {
                bcrypt_cost: TEST_COST,
                ..AuthServiceConfig::default()
            },
        );
        Harness {
            users,
            ledger,
            mailer,
            auth,
        }
    }

    async fn seed_user(h: &Harness, email: &str, password: &str) -> User {
        let hash = bcrypt::hash(password, TEST_COST).unwrap();
        let user = User::new(email.to_string(), hash);
        h.users.insert(user.clone()).await;
        user
    }

    fn token_from_link(message: &crate::services::mail::EmailMessage) -> String {
        let start = message.body.find("token=").unwrap() + "token=".len();
        let rest = &message.body[start..];
        let end = rest.find('"').unwrap_or(rest.len());
        rest[..end].to_string()
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_pair() {
        let h = harness();
        let user = seed_user(&h, "reader@example.com", "hunter2").await;

        let pair = h.auth.login("reader@example.com", "hunter2").await.unwrap();

        let claims = h
            .auth
            .tokens()
            .verify(&pair.access_token, Some(TokenKind::Access))
            .await
            .unwrap();
        assert_eq!(claims.user_id(), Some(user.id));

        h.auth
            .tokens()
            .verify(&pair.refresh_token, Some(TokenKind::Refresh))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let h = harness();
        seed_user(&h, "reader@example.com", "hunter2").await;

        let wrong_password = h
            .auth
            .login("reader@example.com", "wrong")
            .await
            .unwrap_err();
        let unknown_email = h.auth.login("ghost@example.com", "hunter2").await.unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert!(matches!(
            wrong_password,
            DomainError::Auth(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_admin_login_refuses_non_admins() {
        let h = harness();
        seed_user(&h, "reader@example.com", "hunter2").await;

        let error = h
            .auth
            .admin_login("reader@example.com", "hunter2")
            .await
            .unwrap_err();
        assert!(matches!(error, DomainError::Auth(AuthError::Forbidden)));

        let mut admin = seed_user(&h, "admin@example.com", "hunter2").await;
        admin.promote();
        h.users.replace(admin).await;
        assert!(h.auth.admin_login("admin@example.com", "hunter2").await.is_ok());
    }

    #[tokio::test]
    async fn test_logout_replay_fails_with_revoked() {
        let h = harness();
        seed_user(&h, "reader@example.com", "hunter2").await;

        let pair = h.auth.login("reader@example.com", "hunter2").await.unwrap();
        let claims = h
            .auth
            .tokens()
            .verify(&pair.access_token, None)
            .await
            .unwrap();

        h.auth.logout(&pair.access_token, &claims).await.unwrap();

        // Replaying the exact token is Revoked, not Unauthenticated.
        let error = h
            .auth
            .tokens()
            .verify(&pair.access_token, None)
            .await
            .unwrap_err();
        assert!(matches!(error, DomainError::Token(TokenError::Revoked)));
    }

    #[tokio::test]
    async fn test_refresh_rotation_revokes_old_token() {
        let h = harness();
        seed_user(&h, "reader@example.com", "hunter2").await;

        let pair = h.auth.login("reader@example.com", "hunter2").await.unwrap();
        let claims = h
            .auth
            .tokens()
            .verify(&pair.refresh_token, None)
            .await
            .unwrap();

        let rotated = h
            .auth
            .refresh_session(&pair.refresh_token, &claims)
            .await
            .unwrap();

        let error = h
            .auth
            .tokens()
            .verify(&pair.refresh_token, None)
            .await
            .unwrap_err();
        assert!(matches!(error, DomainError::Token(TokenError::Revoked)));
        assert!(h
            .auth
            .tokens()
            .verify(&rotated.refresh_token, Some(TokenKind::Refresh))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_reissue_access_reads_fresh_role_state() {
        let h = harness();
        let user = seed_user(&h, "reader@example.com", "hunter2").await;

        let pair = h.auth.login("reader@example.com", "hunter2").await.unwrap();
        let claims = h
            .auth
            .tokens()
            .verify(&pair.refresh_token, None)
            .await
            .unwrap();

        // Promote after issuance; the next access token must see it.
        let mut promoted = user.clone();
        promoted.promote();
        h.users.replace(promoted).await;

        let access = h.auth.reissue_access(&claims).await.unwrap();
        let access_claims = h.auth.tokens().verify(&access, None).await.unwrap();
        assert_eq!(access_claims.is_admin, Some(true));
    }

    #[tokio::test]
    async fn test_resolve_principal_fails_for_deleted_subject() {
        let h = harness();
        let user = seed_user(&h, "reader@example.com", "hunter2").await;

        let pair = h.auth.login("reader@example.com", "hunter2").await.unwrap();
        let claims = h
            .auth
            .tokens()
            .verify(&pair.access_token, None)
            .await
            .unwrap();

        h.users.delete_by_email(&user.email).await.unwrap();

        let error = h.auth.resolve_principal(&claims).await.unwrap_err();
        assert!(matches!(
            error,
            DomainError::Auth(AuthError::PrincipalNotFound)
        ));
    }

    #[tokio::test]
    async fn test_sign_up_and_confirm_creates_account() {
        let h = harness();

        h.auth.sign_up("new@example.com", "hunter2").await.unwrap();
        let message = h.mailer.last().await.unwrap();
        assert_eq!(message.to, "new@example.com");
        let token = token_from_link(&message);

        let user = h.auth.confirm_email(&token).await.unwrap();
        assert_eq!(user.email, "new@example.com");

        // The password survived the token round-trip as a hash.
        assert!(h.auth.login("new@example.com", "hunter2").await.is_ok());
    }

    #[tokio::test]
    async fn test_sign_up_existing_email_sends_notice_only() {
        let h = harness();
        seed_user(&h, "reader@example.com", "hunter2").await;

        h.auth.sign_up("reader@example.com", "other").await.unwrap();

        let message = h.mailer.last().await.unwrap();
        assert!(!message.body.contains("token="));
        assert!(message.subject.contains("attempt"));
    }

    #[tokio::test]
    async fn test_confirm_email_is_single_use() {
        let h = harness();

        h.auth.sign_up("new@example.com", "hunter2").await.unwrap();
        let token = token_from_link(&h.mailer.last().await.unwrap());

        h.auth.confirm_email(&token).await.unwrap();
        let error = h.auth.confirm_email(&token).await.unwrap_err();
        assert!(matches!(error, DomainError::Token(TokenError::Revoked)));
    }

    #[tokio::test]
    async fn test_reset_password_is_single_use_and_first_wins() {
        let h = harness();
        seed_user(&h, "reader@example.com", "old-password").await;

        h.auth
            .request_password_reset("reader@example.com")
            .await
            .unwrap();
        let token = token_from_link(&h.mailer.last().await.unwrap());

        h.auth.reset_password(&token, "first-new").await.unwrap();

        let error = h.auth.reset_password(&token, "second-new").await.unwrap_err();
        assert!(matches!(error, DomainError::Token(TokenError::Revoked)));

        // The password from the first redemption remains in effect.
        assert!(h.auth.login("reader@example.com", "first-new").await.is_ok());
        assert!(h.auth.login("reader@example.com", "second-new").await.is_err());
    }

    #[tokio::test]
    async fn test_close_account_deletes_user_once() {
        let h = harness();
        let user = seed_user(&h, "reader@example.com", "hunter2").await;

        h.auth.request_account_close(&user).await.unwrap();
        let token = token_from_link(&h.mailer.last().await.unwrap());

        let deleted = h.auth.close_account(&token).await.unwrap();
        assert_eq!(deleted.id, user.id);
        assert!(h
            .users
            .find_by_email("reader@example.com")
            .await
            .unwrap()
            .is_none());

        let error = h.auth.close_account(&token).await.unwrap_err();
        assert!(matches!(error, DomainError::Token(TokenError::Revoked)));
    }

    #[tokio::test]
    async fn test_failed_side_effect_still_burns_the_token() {
        let h = harness();

        h.auth.sign_up("new@example.com", "hunter2").await.unwrap();
        let token = token_from_link(&h.mailer.last().await.unwrap());

        // Make the side effect fail: the email gets taken in the meantime.
        seed_user(&h, "new@example.com", "unrelated").await;

        let error = h.auth.confirm_email(&token).await.unwrap_err();
        assert!(matches!(error, DomainError::Validation { .. }));

        // The failed redemption still consumed the token.
        let error = h.auth.confirm_email(&token).await.unwrap_err();
        assert!(matches!(error, DomainError::Token(TokenError::Revoked)));
    }

    #[tokio::test]
    async fn test_redeem_with_ledger_down_attempts_no_side_effect() {
        let h = harness();

        h.auth.sign_up("new@example.com", "hunter2").await.unwrap();
        let token = token_from_link(&h.mailer.last().await.unwrap());

        h.ledger.set_unavailable(true);
        let error = h.auth.confirm_email(&token).await.unwrap_err();
        assert!(matches!(error, DomainError::LedgerUnavailable { .. }));

        // Verification failed closed, so no account was created.
        h.ledger.set_unavailable(false);
        assert!(h
            .users
            .find_by_email("new@example.com")
            .await
            .unwrap()
            .is_none());
    }
}

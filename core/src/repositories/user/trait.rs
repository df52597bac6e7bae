//! User repository trait defining the interface to the user store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainResult;

/// Repository trait for the externally owned user store.
///
/// The token core only ever reads principals fresh: lookups happen on every
/// authenticated request and results are never cached across requests, so
/// role and ban changes take effect on the next call.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user
    ///
    /// Fails with a validation error when the email is already taken.
    async fn create(&self, user: User) -> DomainResult<User>;

    /// Find a user by id
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Replace the credential hash for the user with the given email
    ///
    /// Returns the updated user, or `None` when no such user exists.
    async fn update_password(
        &self,
        email: &str,
        password_hash: &str,
    ) -> DomainResult<Option<User>>;

    /// Delete the user with the given email
    ///
    /// Returns the deleted user, or `None` when no such user exists.
    async fn delete_by_email(&self, email: &str) -> DomainResult<Option<User>>;
}

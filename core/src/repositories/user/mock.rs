//! In-memory user repository for testing

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{DomainError, DomainResult};

use super::r#trait::UserRepository;

/// In-memory user store keyed by id
pub struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed the repository with a user (test setup helper)
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Overwrite an existing user in place (test helper for role changes)
    pub async fn replace(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

impl Default for MemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: User) -> DomainResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Validation {
                message: "email already in use".to_string(),
            });
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn update_password(
        &self,
        email: &str,
        password_hash: &str,
    ) -> DomainResult<Option<User>> {
        let mut users = self.users.write().await;

        match users.values_mut().find(|u| u.email == email) {
            Some(user) => {
                user.set_password_hash(password_hash.to_string());
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let mut users = self.users.write().await;

        let id = users
            .values()
            .find(|u| u.email == email)
            .map(|u| u.id);
        Ok(id.and_then(|id| users.remove(&id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let repo = MemoryUserRepository::new();
        let user = User::new("a@example.com".to_string(), "hash".to_string());
        repo.create(user).await.unwrap();

        let duplicate = User::new("a@example.com".to_string(), "other".to_string());
        assert!(matches!(
            repo.create(duplicate).await,
            Err(DomainError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_password() {
        let repo = MemoryUserRepository::new();
        let user = User::new("a@example.com".to_string(), "old".to_string());
        repo.create(user).await.unwrap();

        let updated = repo
            .update_password("a@example.com", "new")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.password_hash, "new");

        assert!(repo
            .update_password("missing@example.com", "new")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_by_email() {
        let repo = MemoryUserRepository::new();
        let user = User::new("a@example.com".to_string(), "hash".to_string());
        let id = user.id;
        repo.create(user).await.unwrap();

        let deleted = repo.delete_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(deleted.id, id);
        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }
}

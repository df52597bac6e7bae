//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ink_core::domain::entities::user::User;
use ink_core::errors::{DomainError, DomainResult};
use ink_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> DomainResult<User> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email: {}", e),
            })?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get password_hash: {}", e),
                })?,
            is_admin: row.try_get("is_admin").map_err(|e| DomainError::Internal {
                message: format!("Failed to get is_admin: {}", e),
            })?,
            is_banned: row.try_get("is_banned").map_err(|e| DomainError::Internal {
                message: format!("Failed to get is_banned: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
        })
    }

    fn internal(context: &str, e: sqlx::Error) -> DomainError {
        DomainError::Internal {
            message: format!("{}: {}", context, e),
        }
    }
}

const USER_COLUMNS: &str =
    "id, email, password_hash, is_admin, is_banned, created_at, updated_at";

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn create(&self, user: User) -> DomainResult<User> {
        let query = r#"
            INSERT INTO users (
                id, email, password_hash, is_admin, is_banned, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.is_admin)
            .bind(user.is_banned)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(user),
            // The unique index on email turns a duplicate into a domain
            // validation failure rather than an infrastructure fault.
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(DomainError::Validation {
                    message: "email already in use".to_string(),
                })
            }
            Err(e) => Err(Self::internal("Failed to create user", e)),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        let query = format!(
            "SELECT {} FROM users WHERE id = ? LIMIT 1",
            USER_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::internal("Failed to find user by id", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let query = format!(
            "SELECT {} FROM users WHERE email = ? LIMIT 1",
            USER_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::internal("Failed to find user by email", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn update_password(
        &self,
        email: &str,
        password_hash: &str,
    ) -> DomainResult<Option<User>> {
        let query = r#"
            UPDATE users
            SET password_hash = ?, updated_at = ?
            WHERE email = ?
        "#;

        let result = sqlx::query(query)
            .bind(password_hash)
            .bind(Utc::now())
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::internal("Failed to update password", e))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_email(email).await
    }

    async fn delete_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let existing = self.find_by_email(email).await?;

        let Some(user) = existing else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::internal("Failed to delete user", e))?;

        Ok(Some(user))
    }
}

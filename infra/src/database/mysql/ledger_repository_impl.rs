//! MySQL implementation of the RevocationLedger trait.
//!
//! Stores one row per recorded token hash with the retention deadline
//! copied from the token's own expiry. Every database failure maps to
//! `DomainError::LedgerUnavailable` so callers fail closed: a ledger
//! that cannot answer must never be read as "not revoked".

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use ink_core::domain::entities::token::RevokedToken;
use ink_core::errors::{DomainError, DomainResult};
use ink_core::repositories::RevocationLedger;

/// MySQL implementation of RevocationLedger
pub struct MySqlRevocationLedger {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRevocationLedger {
    /// Create a new MySQL revocation ledger
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn unavailable(context: &str, e: sqlx::Error) -> DomainError {
        DomainError::LedgerUnavailable {
            message: format!("{}: {}", context, e),
        }
    }
}

#[async_trait]
impl RevocationLedger for MySqlRevocationLedger {
    async fn record(&self, entry: RevokedToken) -> DomainResult<()> {
        // Re-recording the same hash keeps whichever retention deadline
        // is later, so an entry can never be shortened by a replay.
        let query = r#"
            INSERT INTO revoked_tokens (token_hash, expires_at)
            VALUES (?, ?)
            ON DUPLICATE KEY UPDATE
                expires_at = GREATEST(expires_at, VALUES(expires_at))
        "#;

        sqlx::query(query)
            .bind(&entry.token_hash)
            .bind(entry.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::unavailable("Failed to record revoked token", e))?;

        Ok(())
    }

    async fn is_revoked(&self, token_hash: &str) -> DomainResult<bool> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM revoked_tokens WHERE token_hash = ?
            ) AS revoked
        "#;

        let row = sqlx::query(query)
            .bind(token_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::unavailable("Failed to query revoked token", e))?;

        let revoked: i8 = row
            .try_get("revoked")
            .map_err(|e| Self::unavailable("Failed to read revocation result", e))?;

        Ok(revoked == 1)
    }

    async fn sweep(&self, now: DateTime<Utc>) -> DomainResult<usize> {
        // Strictly before the cutoff: an entry expiring exactly now is
        // still enforced.
        let query = "DELETE FROM revoked_tokens WHERE expires_at < ?";

        let result = sqlx::query(query)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::unavailable("Failed to sweep revoked tokens", e))?;

        Ok(result.rows_affected() as usize)
    }
}

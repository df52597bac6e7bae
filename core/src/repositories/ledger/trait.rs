//! Revocation ledger trait defining the durable store of invalidated tokens.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::RevokedToken;
use crate::errors::DomainResult;

/// Durable append-only set of consumed or invalidated tokens.
///
/// The ledger is the only shared mutable state in the token core and must be
/// backed by a store with atomic insert and consistent read: a read issued
/// after `record` returns must observe the entry. No caching layer may sit
/// in front of it.
///
/// Implementations translate store outages into
/// `DomainError::LedgerUnavailable`; callers treat that as "cannot confirm
/// validity" and abort the request (fail closed), never as "assume valid".
#[async_trait]
pub trait RevocationLedger: Send + Sync {
    /// Insert an entry for a consumed or invalidated token.
    ///
    /// Idempotent: recording a token hash that is already present must not
    /// error and must not shorten the retention of the existing entry.
    async fn record(&self, entry: RevokedToken) -> DomainResult<()>;

    /// Whether a token hash has been recorded.
    ///
    /// Read-after-write consistent with `record` from the same process.
    async fn is_revoked(&self, token_hash: &str) -> DomainResult<bool>;

    /// Delete all entries whose `expires_at` lies strictly before `now`.
    ///
    /// Entries removed here shadow tokens that are independently expired,
    /// so pruning can never turn a rejected token back into a valid one.
    /// Returns the number of deleted entries, for observability only.
    async fn sweep(&self, now: DateTime<Utc>) -> DomainResult<usize>;
}

//! In-memory revocation ledger for testing

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entities::token::RevokedToken;
use crate::errors::{DomainError, DomainResult};

use super::r#trait::RevocationLedger;

/// In-memory ledger keyed by token hash.
///
/// `set_unavailable` simulates a store outage so fail-closed behavior can be
/// exercised in tests.
pub struct MemoryRevocationLedger {
    entries: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
    unavailable: AtomicBool,
}

impl MemoryRevocationLedger {
    /// Create a new empty ledger
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Simulate (or clear) a store outage
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the ledger holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn check_available(&self) -> DomainResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::LedgerUnavailable {
                message: "simulated outage".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MemoryRevocationLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevocationLedger for MemoryRevocationLedger {
    async fn record(&self, entry: RevokedToken) -> DomainResult<()> {
        self.check_available()?;
        let mut entries = self.entries.write().await;

        // Duplicate inserts keep whichever expiry is later.
        entries
            .entry(entry.token_hash)
            .and_modify(|existing| {
                if entry.expires_at > *existing {
                    *existing = entry.expires_at;
                }
            })
            .or_insert(entry.expires_at);
        Ok(())
    }

    async fn is_revoked(&self, token_hash: &str) -> DomainResult<bool> {
        self.check_available()?;
        let entries = self.entries.read().await;
        Ok(entries.contains_key(token_hash))
    }

    async fn sweep(&self, now: DateTime<Utc>) -> DomainResult<usize> {
        self.check_available()?;
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, expires_at| *expires_at >= now);
        Ok(before - entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_record_then_is_revoked() {
        let ledger = MemoryRevocationLedger::new();
        let entry = RevokedToken::new("hash-a", Utc::now() + Duration::minutes(15));

        ledger.record(entry).await.unwrap();
        assert!(ledger.is_revoked("hash-a").await.unwrap());
        assert!(!ledger.is_revoked("hash-b").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_record_keeps_longest_retention() {
        let ledger = MemoryRevocationLedger::new();
        let later = Utc::now() + Duration::hours(2);
        let earlier = Utc::now() + Duration::hours(1);

        ledger
            .record(RevokedToken::new("hash-a", later))
            .await
            .unwrap();
        ledger
            .record(RevokedToken::new("hash-a", earlier))
            .await
            .unwrap();

        // Entry survives a sweep between the two expiries.
        let removed = ledger.sweep(earlier + Duration::minutes(1)).await.unwrap();
        assert_eq!(removed, 0);
        assert!(ledger.is_revoked("hash-a").await.unwrap());
    }

    #[tokio::test]
    async fn test_sweep_only_removes_expired() {
        let ledger = MemoryRevocationLedger::new();
        let now = Utc::now();

        ledger
            .record(RevokedToken::new("expired", now - Duration::minutes(1)))
            .await
            .unwrap();
        ledger
            .record(RevokedToken::new("live", now + Duration::minutes(1)))
            .await
            .unwrap();
        ledger
            .record(RevokedToken::new("boundary", now))
            .await
            .unwrap();

        let removed = ledger.sweep(now).await.unwrap();
        assert_eq!(removed, 1);
        assert!(!ledger.is_revoked("expired").await.unwrap());
        assert!(ledger.is_revoked("live").await.unwrap());
        // expires_at == now is not strictly before now and must survive
        assert!(ledger.is_revoked("boundary").await.unwrap());
    }

    #[tokio::test]
    async fn test_outage_errors_every_operation() {
        let ledger = MemoryRevocationLedger::new();
        ledger.set_unavailable(true);

        let entry = RevokedToken::new("hash-a", Utc::now());
        assert!(matches!(
            ledger.record(entry).await,
            Err(DomainError::LedgerUnavailable { .. })
        ));
        assert!(matches!(
            ledger.is_revoked("hash-a").await,
            Err(DomainError::LedgerUnavailable { .. })
        ));
        assert!(matches!(
            ledger.sweep(Utc::now()).await,
            Err(DomainError::LedgerUnavailable { .. })
        ));
    }
}

//! Background pruning sweep for the revocation ledger
//!
//! The sweep reclaims ledger rows whose tokens have independently expired.
//! It runs on its own timer, never from request handling, and only ever
//! deletes rows that the verifier's expiry check already rejects.

use std::sync::Arc;

use chrono::Utc;
use ink_shared::config::SweepConfig;
use tracing::{error, info, warn};

use crate::errors::DomainResult;
use crate::repositories::RevocationLedger;

/// Periodic pruner for the revocation ledger
pub struct LedgerSweeper<L: RevocationLedger + 'static> {
    ledger: Arc<L>,
    config: SweepConfig,
}

impl<L: RevocationLedger> LedgerSweeper<L> {
    /// Create a new sweeper over the given ledger
    pub fn new(ledger: Arc<L>, config: SweepConfig) -> Self {
        Self { ledger, config }
    }

    /// Run a single sweep cycle and return the number of pruned entries
    pub async fn run_sweep(&self) -> DomainResult<usize> {
        let removed = self.ledger.sweep(Utc::now()).await?;
        if removed > 0 {
            info!("Pruned {} expired ledger entries", removed);
        }
        Ok(removed)
    }

    /// Start the sweep as a background task on a fixed interval
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Ledger sweep is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                "Ledger sweep started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);
            // The immediate first tick would sweep at startup; skip it.
            interval_timer.tick().await;

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_sweep().await {
                    // A failed sweep only delays reclamation; nothing to do
                    // but report and retry on the next tick.
                    error!("Ledger sweep cycle failed: {}", e);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::token::RevokedToken;
    use crate::repositories::MemoryRevocationLedger;
    use chrono::Duration;

    #[tokio::test]
    async fn test_run_sweep_reports_pruned_count() {
        let ledger = Arc::new(MemoryRevocationLedger::new());
        ledger
            .record(RevokedToken::new(
                "stale",
                Utc::now() - Duration::minutes(5),
            ))
            .await
            .unwrap();
        ledger
            .record(RevokedToken::new("live", Utc::now() + Duration::hours(1)))
            .await
            .unwrap();

        let sweeper = LedgerSweeper::new(ledger.clone(), SweepConfig::default());
        assert_eq!(sweeper.run_sweep().await.unwrap(), 1);
        assert!(ledger.is_revoked("live").await.unwrap());
    }

    #[tokio::test]
    async fn test_run_sweep_propagates_ledger_outage() {
        let ledger = Arc::new(MemoryRevocationLedger::new());
        ledger.set_unavailable(true);

        let sweeper = LedgerSweeper::new(ledger, SweepConfig::default());
        assert!(sweeper.run_sweep().await.is_err());
    }
}

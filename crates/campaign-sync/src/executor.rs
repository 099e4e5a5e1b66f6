use std::sync::Arc;
use std::time::Duration;

use booking_core::StatusReconciler;
use chrono::Utc;
use postgres::PgCampaignStore;
use sqlx::PgPool;
use tokio::time::interval;
use tracing::{debug, error, info};

/// Configuration for the sync loop.
#[derive(Debug, Clone)]
pub struct SyncExecutorConfig {
    /// How often to run a reconciliation pass (default: 15 minutes)
    pub sync_interval: Duration,
}

impl Default for SyncExecutorConfig {
    fn default() -> Self {
        Self {
            sync_interval: Duration::from_secs(15 * 60),
        }
    }
}

/// Periodic driver for the status reconciler.
///
/// Reconciliation is idempotent and convergent, so an overlapping manual
/// trigger or a crashed pass needs no coordination; the next tick
/// converges to the same fixed point.
pub struct SyncExecutor {
    reconciler: StatusReconciler,
    config: SyncExecutorConfig,
}

impl SyncExecutor {
    /// Creates an executor over the given pool.
    pub fn new(pool: PgPool, config: Option<SyncExecutorConfig>) -> Self {
        let store = Arc::new(PgCampaignStore::new(pool));
        Self {
            reconciler: StatusReconciler::new(store),
            config: config.unwrap_or_default(),
        }
    }

    /// Runs the reconciliation loop until the task is aborted.
    pub async fn start(&self) {
        info!(
            interval_secs = self.config.sync_interval.as_secs(),
            "Starting campaign status sync loop"
        );

        let mut tick = interval(self.config.sync_interval);

        loop {
            tick.tick().await;

            match self.reconciler.run(Utc::now()).await {
                Ok(report) => {
                    debug!(
                        scanned = report.scanned,
                        updated = report.updated,
                        "Campaign status sync pass finished"
                    );
                }
                Err(e) => {
                    error!("Campaign status sync pass failed: {}", e);
                }
            }
        }
    }
}

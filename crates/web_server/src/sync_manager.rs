use sqlx::PgPool;
use tokio::task::JoinHandle;
use tracing::info;

use campaign_sync::{SyncExecutor, SyncExecutorConfig};

/// Manager for the background status sync loop.
/// Integrates with the web server to keep campaign statuses current
/// between requests.
pub struct SyncManager {
    pool: PgPool,
    executor_handle: Option<JoinHandle<()>>,
}

impl SyncManager {
    /// Create a new sync manager
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            executor_handle: None,
        }
    }

    /// Start the background sync loop
    pub fn start(&mut self, config: Option<SyncExecutorConfig>) {
        info!("Starting campaign status sync");

        let executor = SyncExecutor::new(self.pool.clone(), config);

        let handle = tokio::spawn(async move {
            executor.start().await;
        });

        self.executor_handle = Some(handle);
    }

    /// Stop the background sync loop
    pub async fn stop(&mut self) {
        info!("Stopping campaign status sync");

        if let Some(handle) = self.executor_handle.take() {
            handle.abort();
            let _ = handle.await;
        }
    }
}

impl Drop for SyncManager {
    fn drop(&mut self) {
        if let Some(handle) = self.executor_handle.take() {
            handle.abort();
        }
    }
}

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::BookingError;
use crate::status::{CampaignStatus, next_status};
use crate::store::CampaignStore;

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Campaigns examined, whether or not they changed.
    pub scanned: usize,
    /// Campaigns whose persisted status was updated.
    pub updated: usize,
}

/// Derives and persists the status each campaign should hold "as of now".
///
/// Trigger-agnostic: invoked opportunistically before availability-
/// sensitive reads and periodically by the background sync loop.
/// Idempotent for a fixed `now`, and safe to run concurrently since two
/// overlapping passes write the same derived value.
pub struct StatusReconciler {
    store: Arc<dyn CampaignStore>,
}

impl StatusReconciler {
    /// Creates a new reconciler over the given store.
    pub fn new(store: Arc<dyn CampaignStore>) -> Self {
        Self { store }
    }

    /// Scans APPROVED/LIVE/ENDED campaigns and persists any status the
    /// calendar has moved past. PENDING and REJECTED campaigns are never
    /// touched.
    ///
    /// Each update is applied independently; a failure mid-scan leaves
    /// earlier updates in place and a later run converges to the same
    /// fixed point.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<SyncReport, BookingError> {
        let today = now.date_naive();
        let campaigns = self
            .store
            .list_campaigns_with_status_in(&CampaignStatus::RECONCILABLE)
            .await?;

        let scanned = campaigns.len();
        let mut updated = 0;

        for campaign in campaigns {
            let next = next_status(campaign.status, &campaign.period, today);
            if next == campaign.status {
                continue;
            }

            debug!(
                campaign_id = %campaign.id,
                from = %campaign.status,
                to = %next,
                "reconciling campaign status"
            );
            self.store.update_campaign_status(campaign.id, next).await?;
            updated += 1;
        }

        if updated > 0 {
            info!(scanned, updated, "campaign statuses reconciled");
        }

        Ok(SyncReport { scanned, updated })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::DateRange;
    use crate::memory::MemoryStore;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn at(date: &str) -> DateTime<Utc> {
        let day = crate::dates::parse_date_only(date).unwrap();
        Utc.from_utc_datetime(&day.and_hms_opt(9, 30, 0).unwrap())
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::parse(start, end).unwrap()
    }

    fn seeded_store() -> (Arc<MemoryStore>, Uuid) {
        let store = Arc::new(MemoryStore::new());
        let location = store.add_screen(18);
        (store, location)
    }

    #[tokio::test]
    async fn promotes_approved_to_live_on_start_date() {
        let (store, location) = seeded_store();
        let id = store.add_campaign(
            location,
            CampaignStatus::Approved,
            range("2024-06-10", "2024-06-20"),
        );

        let reconciler = StatusReconciler::new(store.clone());
        let report = reconciler.run(at("2024-06-10")).await.unwrap();

        assert_eq!(report, SyncReport { scanned: 1, updated: 1 });
        assert_eq!(store.campaign_status(id), Some(CampaignStatus::Live));
    }

    #[tokio::test]
    async fn keeps_live_through_the_end_date() {
        let (store, location) = seeded_store();
        let id = store.add_campaign(
            location,
            CampaignStatus::Live,
            range("2024-06-10", "2024-06-20"),
        );

        let reconciler = StatusReconciler::new(store.clone());
        let report = reconciler.run(at("2024-06-20")).await.unwrap();

        assert_eq!(report.updated, 0);
        assert_eq!(store.campaign_status(id), Some(CampaignStatus::Live));
    }

    #[tokio::test]
    async fn ends_live_campaign_the_day_after_it_finishes() {
        let (store, location) = seeded_store();
        let id = store.add_campaign(
            location,
            CampaignStatus::Live,
            range("2024-06-10", "2024-06-20"),
        );

        let reconciler = StatusReconciler::new(store.clone());
        let report = reconciler.run(at("2024-06-21")).await.unwrap();

        assert_eq!(report.updated, 1);
        assert_eq!(store.campaign_status(id), Some(CampaignStatus::Ended));
    }

    #[tokio::test]
    async fn approved_before_start_date_stays_approved() {
        let (store, location) = seeded_store();
        let id = store.add_campaign(
            location,
            CampaignStatus::Approved,
            range("2024-06-10", "2024-06-20"),
        );

        let reconciler = StatusReconciler::new(store.clone());
        let report = reconciler.run(at("2024-06-09")).await.unwrap();

        assert_eq!(report, SyncReport { scanned: 1, updated: 0 });
        assert_eq!(store.campaign_status(id), Some(CampaignStatus::Approved));
    }

    #[tokio::test]
    async fn never_touches_pending_or_rejected() {
        let (store, location) = seeded_store();
        let pending = store.add_campaign(
            location,
            CampaignStatus::Pending,
            range("2020-01-01", "2020-01-05"),
        );
        let rejected = store.add_campaign(
            location,
            CampaignStatus::Rejected,
            range("2020-01-01", "2020-01-05"),
        );

        let reconciler = StatusReconciler::new(store.clone());
        let report = reconciler.run(at("2024-06-01")).await.unwrap();

        // Out of scope entirely, not even scanned.
        assert_eq!(report, SyncReport { scanned: 0, updated: 0 });
        assert_eq!(store.campaign_status(pending), Some(CampaignStatus::Pending));
        assert_eq!(
            store.campaign_status(rejected),
            Some(CampaignStatus::Rejected)
        );
    }

    #[tokio::test]
    async fn second_run_with_same_now_updates_nothing() {
        let (store, location) = seeded_store();
        store.add_campaign(
            location,
            CampaignStatus::Approved,
            range("2024-06-01", "2024-06-05"),
        );
        store.add_campaign(
            location,
            CampaignStatus::Approved,
            range("2024-06-10", "2024-06-12"),
        );

        let reconciler = StatusReconciler::new(store.clone());
        let now = at("2024-06-07");

        let first = reconciler.run(now).await.unwrap();
        assert_eq!(first, SyncReport { scanned: 2, updated: 1 });

        let second = reconciler.run(now).await.unwrap();
        assert_eq!(second, SyncReport { scanned: 2, updated: 0 });
    }
}

use uuid::Uuid;

use crate::dates::DateRange;
use crate::error::BookingError;
use crate::status::CampaignStatus;

/// A campaign's identity and schedule, as the reconciler sees it.
#[derive(Debug, Clone)]
pub struct CampaignSchedule {
    /// Campaign id.
    pub id: Uuid,
    /// Status currently persisted for the campaign.
    pub status: CampaignStatus,
    /// Booked date span, both boundaries inclusive.
    pub period: DateRange,
}

/// Persistence contract the core services require from their collaborator.
///
/// The web layer injects a Postgres-backed implementation; tests inject
/// [`crate::MemoryStore`]. The core never retries store failures.
#[async_trait::async_trait]
pub trait CampaignStore: Send + Sync {
    /// Returns the slot capacity of the location's screen, or `None` when
    /// the location has no screen record.
    async fn find_screen_capacity(&self, location_id: Uuid) -> Result<Option<i32>, BookingError>;

    /// Counts campaigns at the location whose status occupies a slot
    /// (APPROVED or LIVE) and whose booked span overlaps `period` under
    /// the closed-interval test.
    async fn count_overlapping_active_campaigns(
        &self,
        location_id: Uuid,
        period: &DateRange,
    ) -> Result<i64, BookingError>;

    /// Lists id, status and schedule for every campaign whose status is
    /// in `statuses`.
    async fn list_campaigns_with_status_in(
        &self,
        statuses: &[CampaignStatus],
    ) -> Result<Vec<CampaignSchedule>, BookingError>;

    /// Persists a new status for the campaign, keyed by id.
    async fn update_campaign_status(
        &self,
        id: Uuid,
        status: CampaignStatus,
    ) -> Result<(), BookingError>;
}

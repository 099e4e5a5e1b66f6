use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::dates::DateRange;
use crate::error::BookingError;
use crate::store::CampaignStore;

/// Slot availability for a location over a queried date range.
///
/// A point-in-time snapshot: no lock is held between this read and any
/// later write that books a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Availability {
    /// Fixed capacity of the screen's ad rotation.
    pub total_slots: i32,
    /// Active (APPROVED/LIVE) campaigns whose span overlaps the query.
    pub overlap_count: i64,
    /// Free slots, clamped at zero even when the screen is overbooked.
    pub available_slots: i32,
}

/// Computes slot availability by counting overlapping active bookings.
pub struct AvailabilityService {
    store: Arc<dyn CampaignStore>,
}

impl AvailabilityService {
    /// Creates a new availability service over the given store.
    pub fn new(store: Arc<dyn CampaignStore>) -> Self {
        Self { store }
    }

    /// Returns capacity, overlap count and free slots for the location
    /// over `period`.
    ///
    /// Fails with [`BookingError::ScreenNotConfigured`] when the location
    /// has no screen record, since capacity is undefined without one.
    /// Read-only and safe to call repeatedly or concurrently.
    pub async fn check(
        &self,
        location_id: Uuid,
        period: &DateRange,
    ) -> Result<Availability, BookingError> {
        let total_slots = self
            .store
            .find_screen_capacity(location_id)
            .await?
            .ok_or(BookingError::ScreenNotConfigured)?;

        let overlap_count = self
            .store
            .count_overlapping_active_campaigns(location_id, period)
            .await?;

        let available_slots = (i64::from(total_slots) - overlap_count).max(0) as i32;

        debug!(
            %location_id,
            total_slots, overlap_count, available_slots, "availability computed"
        );

        Ok(Availability {
            total_slots,
            overlap_count,
            available_slots,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::status::CampaignStatus;

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::parse(start, end).unwrap()
    }

    #[tokio::test]
    async fn fails_when_location_has_no_screen() {
        let store = Arc::new(MemoryStore::new());
        let service = AvailabilityService::new(store);

        let result = service
            .check(Uuid::new_v4(), &range("2024-01-01", "2024-01-05"))
            .await;

        assert!(matches!(result, Err(BookingError::ScreenNotConfigured)));
    }

    #[tokio::test]
    async fn counts_overlapping_active_campaigns() {
        let store = Arc::new(MemoryStore::new());
        let location = store.add_screen(2);
        store.add_campaign(
            location,
            CampaignStatus::Approved,
            range("2024-01-01", "2024-01-10"),
        );
        store.add_campaign(
            location,
            CampaignStatus::Approved,
            range("2024-01-05", "2024-01-20"),
        );

        let service = AvailabilityService::new(store);

        // Both bookings overlap the middle of January.
        let result = service
            .check(location, &range("2024-01-08", "2024-01-12"))
            .await
            .unwrap();
        assert_eq!(result.total_slots, 2);
        assert_eq!(result.overlap_count, 2);
        assert_eq!(result.available_slots, 0);

        // Only the second booking reaches late January.
        let result = service
            .check(location, &range("2024-01-15", "2024-01-25"))
            .await
            .unwrap();
        assert_eq!(result.overlap_count, 1);
        assert_eq!(result.available_slots, 1);
    }

    #[tokio::test]
    async fn pending_and_rejected_do_not_occupy_slots() {
        let store = Arc::new(MemoryStore::new());
        let location = store.add_screen(3);
        for status in [
            CampaignStatus::Pending,
            CampaignStatus::Rejected,
            CampaignStatus::Ended,
        ] {
            store.add_campaign(location, status, range("2024-01-01", "2024-01-31"));
        }

        let service = AvailabilityService::new(store);
        let result = service
            .check(location, &range("2024-01-10", "2024-01-15"))
            .await
            .unwrap();

        assert_eq!(result.overlap_count, 0);
        assert_eq!(result.available_slots, 3);
    }

    #[tokio::test]
    async fn available_slots_clamp_at_zero_when_overbooked() {
        let store = Arc::new(MemoryStore::new());
        let location = store.add_screen(3);
        for _ in 0..5 {
            store.add_campaign(
                location,
                CampaignStatus::Live,
                range("2024-01-01", "2024-01-31"),
            );
        }

        let service = AvailabilityService::new(store);
        let result = service
            .check(location, &range("2024-01-10", "2024-01-15"))
            .await
            .unwrap();

        assert_eq!(result.overlap_count, 5);
        assert_eq!(result.available_slots, 0);
    }

    #[tokio::test]
    async fn repeated_checks_are_stable_without_writes() {
        let store = Arc::new(MemoryStore::new());
        let location = store.add_screen(4);
        store.add_campaign(
            location,
            CampaignStatus::Live,
            range("2024-02-01", "2024-02-10"),
        );

        let service = AvailabilityService::new(store);
        let period = range("2024-02-05", "2024-02-05");

        let first = service.check(location, &period).await.unwrap();
        let second = service.check(location, &period).await.unwrap();
        assert_eq!(first, second);
    }
}

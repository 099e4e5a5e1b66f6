use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use crate::dates::DateRange;
use crate::error::BookingError;
use crate::status::CampaignStatus;
use crate::store::{CampaignSchedule, CampaignStore};

/// In-memory [`CampaignStore`] used as a test double.
///
/// Holds screens and campaigns behind a mutex; production code paths
/// never consult it.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    screens: HashMap<Uuid, i32>,
    campaigns: Vec<MemoryCampaign>,
}

struct MemoryCampaign {
    id: Uuid,
    location_id: Uuid,
    status: CampaignStatus,
    period: DateRange,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a screen with the given slot capacity and returns its
    /// location id.
    pub fn add_screen(&self, total_slots: i32) -> Uuid {
        let location_id = Uuid::new_v4();
        self.inner
            .lock()
            .unwrap()
            .screens
            .insert(location_id, total_slots);
        location_id
    }

    /// Adds a campaign and returns its id.
    pub fn add_campaign(
        &self,
        location_id: Uuid,
        status: CampaignStatus,
        period: DateRange,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().unwrap().campaigns.push(MemoryCampaign {
            id,
            location_id,
            status,
            period,
        });
        id
    }

    /// Current status of a campaign, if it exists.
    pub fn campaign_status(&self, id: Uuid) -> Option<CampaignStatus> {
        self.inner
            .lock()
            .unwrap()
            .campaigns
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.status)
    }
}

#[async_trait::async_trait]
impl CampaignStore for MemoryStore {
    async fn find_screen_capacity(&self, location_id: Uuid) -> Result<Option<i32>, BookingError> {
        Ok(self.inner.lock().unwrap().screens.get(&location_id).copied())
    }

    async fn count_overlapping_active_campaigns(
        &self,
        location_id: Uuid,
        period: &DateRange,
    ) -> Result<i64, BookingError> {
        let count = self
            .inner
            .lock()
            .unwrap()
            .campaigns
            .iter()
            .filter(|c| {
                c.location_id == location_id && c.status.is_active() && c.period.overlaps(period)
            })
            .count();
        Ok(count as i64)
    }

    async fn list_campaigns_with_status_in(
        &self,
        statuses: &[CampaignStatus],
    ) -> Result<Vec<CampaignSchedule>, BookingError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .campaigns
            .iter()
            .filter(|c| statuses.contains(&c.status))
            .map(|c| CampaignSchedule {
                id: c.id,
                status: c.status,
                period: c.period,
            })
            .collect())
    }

    async fn update_campaign_status(
        &self,
        id: Uuid,
        status: CampaignStatus,
    ) -> Result<(), BookingError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.campaigns.iter_mut().find(|c| c.id == id) {
            Some(campaign) => {
                campaign.status = status;
                Ok(())
            }
            None => Err(BookingError::store(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("campaign {id} not found"),
            ))),
        }
    }
}

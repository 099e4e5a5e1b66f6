use std::str::FromStr;

use booking_core::{BookingError, CampaignSchedule, CampaignStatus, CampaignStore, DateRange};
use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Database-backed [`CampaignStore`].
///
/// Availability is recomputed by counting overlapping rows on each read;
/// no lock spans the read and any later booking write.
#[derive(Clone)]
pub struct PgCampaignStore {
    pool: PgPool,
}

impl PgCampaignStore {
    /// Creates a new store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn parse_status(raw: &str) -> Result<CampaignStatus, BookingError> {
    CampaignStatus::from_str(raw).map_err(BookingError::store)
}

#[async_trait::async_trait]
impl CampaignStore for PgCampaignStore {
    async fn find_screen_capacity(&self, location_id: Uuid) -> Result<Option<i32>, BookingError> {
        let row = sqlx::query("SELECT total_slots FROM screens WHERE location_id = $1")
            .bind(location_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(BookingError::store)?;

        Ok(row.map(|row| row.get("total_slots")))
    }

    async fn count_overlapping_active_campaigns(
        &self,
        location_id: Uuid,
        period: &DateRange,
    ) -> Result<i64, BookingError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS overlap_count
            FROM campaigns
            WHERE location_id = $1
              AND status IN ('APPROVED', 'LIVE')
              AND start_date <= $2
              AND end_date >= $3
            "#,
        )
        .bind(location_id)
        .bind(period.end)
        .bind(period.start)
        .fetch_one(&self.pool)
        .await
        .map_err(BookingError::store)?;

        Ok(row.get("overlap_count"))
    }

    async fn list_campaigns_with_status_in(
        &self,
        statuses: &[CampaignStatus],
    ) -> Result<Vec<CampaignSchedule>, BookingError> {
        let status_strings: Vec<String> =
            statuses.iter().map(|s| s.as_str().to_string()).collect();

        let rows = sqlx::query(
            r#"
            SELECT id, status, start_date, end_date
            FROM campaigns
            WHERE status = ANY($1)
            "#,
        )
        .bind(&status_strings)
        .fetch_all(&self.pool)
        .await
        .map_err(BookingError::store)?;

        let mut campaigns = Vec::with_capacity(rows.len());
        for row in rows {
            let start: NaiveDate = row.get("start_date");
            let end: NaiveDate = row.get("end_date");
            campaigns.push(CampaignSchedule {
                id: row.get("id"),
                status: parse_status(row.get("status"))?,
                period: DateRange::new(start, end)?,
            });
        }

        Ok(campaigns)
    }

    async fn update_campaign_status(
        &self,
        id: Uuid,
        status: CampaignStatus,
    ) -> Result<(), BookingError> {
        sqlx::query("UPDATE campaigns SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(BookingError::store)?;

        Ok(())
    }
}

use std::str::FromStr;
use std::sync::Arc;

use booking_core::{AvailabilityService, CampaignStatus, DateRange};
use postgres::PgCampaignStore;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::types::{CampaignResponse, CreateCampaignRequest, MarketplaceError};

/// Service for campaign booking and moderation.
pub struct CampaignService {
    pool: PgPool,
}

impl CampaignService {
    /// Creates a new instance of `CampaignService` with the provided database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Books a campaign for the advertiser.
    ///
    /// Re-checks availability right before inserting; the check and the
    /// insert are separate statements, so two concurrent submissions can
    /// still both pass on the last free slot (accepted oversell window).
    pub async fn create_campaign(
        &self,
        advertiser_id: &Uuid,
        request: &CreateCampaignRequest,
    ) -> Result<CampaignResponse, MarketplaceError> {
        let period = DateRange::parse(&request.start_date, &request.end_date)?;

        let store = Arc::new(PgCampaignStore::new(self.pool.clone()));
        let availability = AvailabilityService::new(store)
            .check(request.location_id, &period)
            .await?;

        if availability.available_slots < 1 {
            return Err(MarketplaceError::NoSlotsAvailable);
        }

        let row = sqlx::query(
            r#"
            INSERT INTO campaigns (
                location_id, advertiser_id, business_name, phone, title,
                start_date, end_date, slot_count, media_type, media_path
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, 1, $8, $9)
            RETURNING id
            "#,
        )
        .bind(request.location_id)
        .bind(advertiser_id)
        .bind(request.business_name.trim())
        .bind(request.phone.trim())
        .bind(request.title.trim())
        .bind(period.start)
        .bind(period.end)
        .bind(&request.media_type)
        .bind(&request.media_path)
        .fetch_one(&self.pool)
        .await?;

        self.get_campaign(&row.get("id")).await
    }

    /// Gets a campaign by id, regardless of owner.
    pub async fn get_campaign(&self, id: &Uuid) -> Result<CampaignResponse, MarketplaceError> {
        let row = sqlx::query(&campaign_select("WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(campaign_from_row(&row)),
            None => Err(MarketplaceError::CampaignNotFound),
        }
    }

    /// Gets a campaign by id, verifying it belongs to the advertiser.
    pub async fn get_advertiser_campaign(
        &self,
        advertiser_id: &Uuid,
        id: &Uuid,
    ) -> Result<CampaignResponse, MarketplaceError> {
        let row = sqlx::query(&campaign_select("WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(MarketplaceError::CampaignNotFound)?;

        ensure_owner(row.get("advertiser_id"), advertiser_id, false)?;

        Ok(campaign_from_row(&row))
    }

    /// Lists the advertiser's campaigns, newest first.
    pub async fn list_advertiser_campaigns(
        &self,
        advertiser_id: &Uuid,
    ) -> Result<Vec<CampaignResponse>, MarketplaceError> {
        let rows = sqlx::query(&campaign_select(
            "WHERE c.advertiser_id = $1 ORDER BY c.created_at DESC",
        ))
        .bind(advertiser_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(campaign_from_row).collect())
    }

    /// Lists every campaign for the moderation panel, newest first.
    pub async fn list_all_campaigns(&self) -> Result<Vec<CampaignResponse>, MarketplaceError> {
        let rows = sqlx::query(&campaign_select("ORDER BY c.created_at DESC"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(campaign_from_row).collect())
    }

    /// Sets a campaign's status (moderator action). This is the only
    /// path that moves a campaign out of PENDING or REJECTED.
    pub async fn set_status(
        &self,
        id: &Uuid,
        status: &str,
    ) -> Result<CampaignResponse, MarketplaceError> {
        let status = parse_requested_status(status)?;

        let result = sqlx::query("UPDATE campaigns SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(MarketplaceError::CampaignNotFound);
        }

        self.get_campaign(id).await
    }

    /// Sets the status of several campaigns at once. Campaigns that do
    /// not exist are skipped; returns the number updated.
    pub async fn bulk_set_status(
        &self,
        ids: &[Uuid],
        status: &str,
    ) -> Result<u64, MarketplaceError> {
        let status = parse_requested_status(status)?;

        let result = sqlx::query("UPDATE campaigns SET status = $1, updated_at = NOW() WHERE id = ANY($2)")
            .bind(status.as_str())
            .bind(ids)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// Ownership guard shared by campaign and payment lookups. Admins may
/// act on any campaign; everyone else only on their own.
pub(crate) fn ensure_owner(
    owner: Uuid,
    caller: &Uuid,
    is_admin: bool,
) -> Result<(), MarketplaceError> {
    if is_admin || owner == *caller {
        Ok(())
    } else {
        Err(MarketplaceError::Forbidden)
    }
}

fn parse_requested_status(status: &str) -> Result<CampaignStatus, MarketplaceError> {
    CampaignStatus::from_str(status).map_err(|_| {
        MarketplaceError::Validation(format!("Unknown campaign status: {}", status))
    })
}

fn campaign_select(suffix: &str) -> String {
    format!(
        r#"
        SELECT
            c.id, c.location_id, c.advertiser_id, c.business_name, c.phone, c.title,
            c.start_date, c.end_date, c.slot_count, c.status, c.created_at,
            l.name AS location_name
        FROM campaigns c
        LEFT JOIN locations l ON c.location_id = l.id
        {}
        "#,
        suffix
    )
}

fn campaign_from_row(row: &sqlx::postgres::PgRow) -> CampaignResponse {
    CampaignResponse {
        id: row.get("id"),
        location_id: row.get("location_id"),
        location_name: row
            .get::<Option<String>, _>("location_name")
            .unwrap_or_else(|| "Unknown Location".to_string()),
        business_name: row.get("business_name"),
        phone: row.get("phone"),
        title: row.get("title"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        slot_count: row.get("slot_count"),
        status: row.get("status"),
        created_at: row.get("created_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_may_access_their_campaign() {
        let owner = Uuid::new_v4();
        assert!(ensure_owner(owner, &owner, false).is_ok());
        assert!(ensure_owner(owner, &owner, true).is_ok());
    }

    #[test]
    fn other_advertisers_are_forbidden() {
        let result = ensure_owner(Uuid::new_v4(), &Uuid::new_v4(), false);
        assert!(matches!(result, Err(MarketplaceError::Forbidden)));
    }

    #[test]
    fn admins_may_access_any_campaign() {
        assert!(ensure_owner(Uuid::new_v4(), &Uuid::new_v4(), true).is_ok());
    }
}

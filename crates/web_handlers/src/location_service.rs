use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::types::{LocationRequest, LocationResponse, MarketplaceError, ScreenSettings,
    ScreenSettingsRequest};

/// Default slot capacity for newly created screens.
pub const DEFAULT_TOTAL_SLOTS: i32 = 18;
/// Smallest slot capacity an admin may configure.
pub const MIN_TOTAL_SLOTS: i32 = 1;
/// Largest slot capacity an admin may configure.
pub const MAX_TOTAL_SLOTS: i32 = 48;

/// Service for venue and screen administration.
pub struct LocationService {
    pool: PgPool,
}

impl LocationService {
    /// Creates a new instance of `LocationService` with the provided database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists all locations with their screen settings, newest first.
    pub async fn list_locations(&self) -> Result<Vec<LocationResponse>, MarketplaceError> {
        let rows = sqlx::query(
            r#"
            SELECT
                l.id, l.name, l.address, l.description, l.foot_traffic_per_day,
                l.price_per_30_days, l.created_at,
                s.total_slots, s.loop_seconds, s.ad_seconds
            FROM locations l
            LEFT JOIN screens s ON s.location_id = l.id
            ORDER BY l.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(location_from_row).collect())
    }

    /// Gets a single location with its screen settings.
    pub async fn get_location(&self, id: Uuid) -> Result<LocationResponse, MarketplaceError> {
        let row = sqlx::query(
            r#"
            SELECT
                l.id, l.name, l.address, l.description, l.foot_traffic_per_day,
                l.price_per_30_days, l.created_at,
                s.total_slots, s.loop_seconds, s.ad_seconds
            FROM locations l
            LEFT JOIN screens s ON s.location_id = l.id
            WHERE l.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(location_from_row(&row)),
            None => Err(MarketplaceError::LocationNotFound),
        }
    }

    /// Creates a location together with a default screen.
    pub async fn create_location(
        &self,
        request: &LocationRequest,
    ) -> Result<LocationResponse, MarketplaceError> {
        let row = sqlx::query(
            r#"
            INSERT INTO locations (name, address, description, foot_traffic_per_day, price_per_30_days)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(request.name.trim())
        .bind(request.address.trim())
        .bind(request.description.trim())
        .bind(request.foot_traffic_per_day.max(1))
        .bind(request.price_per_30_days.max(1.0))
        .fetch_one(&self.pool)
        .await?;

        let id: Uuid = row.get("id");

        sqlx::query(
            "INSERT INTO screens (location_id, total_slots, loop_seconds, ad_seconds) VALUES ($1, $2, 60, 10)",
        )
        .bind(id)
        .bind(DEFAULT_TOTAL_SLOTS)
        .execute(&self.pool)
        .await?;

        self.get_location(id).await
    }

    /// Updates a location's listing fields.
    pub async fn update_location(
        &self,
        id: Uuid,
        request: &LocationRequest,
    ) -> Result<LocationResponse, MarketplaceError> {
        let result = sqlx::query(
            r#"
            UPDATE locations
            SET name = $1, address = $2, description = $3,
                foot_traffic_per_day = $4, price_per_30_days = $5
            WHERE id = $6
            "#,
        )
        .bind(request.name.trim())
        .bind(request.address.trim())
        .bind(request.description.trim())
        .bind(request.foot_traffic_per_day.max(1))
        .bind(request.price_per_30_days.max(1.0))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(MarketplaceError::LocationNotFound);
        }

        self.get_location(id).await
    }

    /// Deletes a location and, via cascade, its screen and campaigns.
    pub async fn delete_location(&self, id: Uuid) -> Result<(), MarketplaceError> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(MarketplaceError::LocationNotFound);
        }

        Ok(())
    }

    /// Upserts a location's screen settings with normalized values.
    pub async fn upsert_screen(
        &self,
        location_id: Uuid,
        request: &ScreenSettingsRequest,
    ) -> Result<ScreenSettings, MarketplaceError> {
        // Make sure the location exists before attaching a screen to it.
        let location = sqlx::query("SELECT id FROM locations WHERE id = $1")
            .bind(location_id)
            .fetch_optional(&self.pool)
            .await?;
        if location.is_none() {
            return Err(MarketplaceError::LocationNotFound);
        }

        let settings = normalize_screen_settings(request);

        sqlx::query(
            r#"
            INSERT INTO screens (location_id, total_slots, loop_seconds, ad_seconds)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (location_id) DO UPDATE SET
                total_slots = EXCLUDED.total_slots,
                loop_seconds = EXCLUDED.loop_seconds,
                ad_seconds = EXCLUDED.ad_seconds,
                updated_at = NOW()
            "#,
        )
        .bind(location_id)
        .bind(settings.total_slots)
        .bind(settings.loop_seconds)
        .bind(settings.ad_seconds)
        .execute(&self.pool)
        .await?;

        Ok(settings)
    }
}

/// Clamps screen settings to their allowed ranges: `total_slots` within
/// `[MIN_TOTAL_SLOTS, MAX_TOTAL_SLOTS]`, a loop of at least ten seconds,
/// and an ad no longer than the loop.
pub fn normalize_screen_settings(request: &ScreenSettingsRequest) -> ScreenSettings {
    let total_slots = request.total_slots.clamp(MIN_TOTAL_SLOTS, MAX_TOTAL_SLOTS);
    let loop_seconds = request.loop_seconds.max(10);
    let ad_seconds = request.ad_seconds.max(1).min(loop_seconds);

    ScreenSettings {
        total_slots,
        loop_seconds,
        ad_seconds,
    }
}

fn location_from_row(row: &sqlx::postgres::PgRow) -> LocationResponse {
    let screen = row
        .get::<Option<i32>, _>("total_slots")
        .map(|total_slots| ScreenSettings {
            total_slots,
            loop_seconds: row.get("loop_seconds"),
            ad_seconds: row.get("ad_seconds"),
        });

    LocationResponse {
        id: row.get("id"),
        name: row.get("name"),
        address: row.get("address"),
        description: row.get("description"),
        foot_traffic_per_day: row.get("foot_traffic_per_day"),
        price_per_30_days: row.get("price_per_30_days"),
        created_at: row.get("created_at"),
        screen,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_slots_are_clamped_to_the_configured_bounds() {
        let settings = normalize_screen_settings(&ScreenSettingsRequest {
            total_slots: 500,
            loop_seconds: 60,
            ad_seconds: 10,
        });
        assert_eq!(settings.total_slots, MAX_TOTAL_SLOTS);

        let settings = normalize_screen_settings(&ScreenSettingsRequest {
            total_slots: 0,
            loop_seconds: 60,
            ad_seconds: 10,
        });
        assert_eq!(settings.total_slots, MIN_TOTAL_SLOTS);
    }

    #[test]
    fn ad_length_cannot_exceed_the_loop() {
        let settings = normalize_screen_settings(&ScreenSettingsRequest {
            total_slots: 18,
            loop_seconds: 30,
            ad_seconds: 45,
        });
        assert_eq!(settings.loop_seconds, 30);
        assert_eq!(settings.ad_seconds, 30);
    }

    #[test]
    fn loop_has_a_ten_second_floor() {
        let settings = normalize_screen_settings(&ScreenSettingsRequest {
            total_slots: 18,
            loop_seconds: 3,
            ad_seconds: 1,
        });
        assert_eq!(settings.loop_seconds, 10);
        assert_eq!(settings.ad_seconds, 1);
    }
}

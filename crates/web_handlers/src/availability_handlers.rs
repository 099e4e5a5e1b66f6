use std::sync::Arc;

use actix_web::{HttpResponse, Result, web};
use booking_core::{AvailabilityService, DateRange, StatusReconciler};
use chrono::Utc;
use postgres::PgCampaignStore;
use sqlx::PgPool;

use crate::types::{AvailabilityQuery, MarketplaceError};

/// Checks slot availability for a location over a date range.
///
/// Reconciles campaign statuses first so counts reflect the calendar,
/// then returns the capacity snapshot. No slot is held by this call.
pub async fn check_availability(
    pool: web::Data<PgPool>,
    query: web::Query<AvailabilityQuery>,
) -> Result<HttpResponse, MarketplaceError> {
    let period = DateRange::parse(&query.start_date, &query.end_date)?;

    let store = Arc::new(PgCampaignStore::new(pool.get_ref().clone()));

    // Opportunistic reconciliation keeps ended campaigns from holding
    // slots; a failure here is logged and the check proceeds on stored
    // statuses.
    if let Err(e) = StatusReconciler::new(store.clone()).run(Utc::now()).await {
        log::warn!("Status reconciliation before availability check failed: {}", e);
    }

    let availability = AvailabilityService::new(store)
        .check(query.location_id, &period)
        .await?;

    Ok(HttpResponse::Ok().json(availability))
}

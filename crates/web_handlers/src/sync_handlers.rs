use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result, web};
use booking_core::StatusReconciler;
use chrono::Utc;
use postgres::PgCampaignStore;
use sqlx::PgPool;

use crate::types::{MarketplaceError, SyncResponse};

/// Runs a reconciliation pass over all non-pending campaigns.
///
/// Intended for an external scheduler. Guarded by `CRON_SECRET` via the
/// `x-cron-secret` header; when the variable is unset the endpoint is
/// open (local development).
pub async fn sync_statuses(
    pool: web::Data<PgPool>,
    request: HttpRequest,
) -> Result<HttpResponse, MarketplaceError> {
    if !is_authorized(&request) {
        return Ok(HttpResponse::Unauthorized().json(serde_json::json!({
            "error": "unauthorized",
            "message": "Invalid cron secret"
        })));
    }

    let store = Arc::new(PgCampaignStore::new(pool.get_ref().clone()));
    let now = Utc::now();
    let report = StatusReconciler::new(store).run(now).await?;

    Ok(HttpResponse::Ok().json(SyncResponse {
        scanned: report.scanned,
        updated: report.updated,
        synced_at: now,
    }))
}

fn is_authorized(request: &HttpRequest) -> bool {
    let secret = match std::env::var("CRON_SECRET") {
        Ok(secret) if !secret.is_empty() => secret,
        _ => return true,
    };

    request
        .headers()
        .get("x-cron-secret")
        .and_then(|h| h.to_str().ok())
        .is_some_and(|provided| provided == secret)
}

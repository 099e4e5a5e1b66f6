use actix_web::{HttpResponse, Result, web};
use auth_services::middleware::{AdminUser, AuthenticatedUser};
use notification_services::{CampaignEvent, NotificationService};
use sqlx::PgPool;
use validator::Validate;

use crate::campaign_service::CampaignService;
use crate::types::*;

/// Books a new campaign for the authenticated advertiser.
///
/// The campaign starts PENDING; a moderator approves or rejects it.
pub async fn create_campaign(
    pool: web::Data<PgPool>,
    notifications: web::Data<NotificationService>,
    user: AuthenticatedUser,
    request: web::Json<CreateCampaignRequest>,
) -> Result<HttpResponse, MarketplaceError> {
    request
        .validate()
        .map_err(|e| MarketplaceError::Validation(format!("Validation error: {}", e)))?;

    let service = CampaignService::new(pool.get_ref().clone());
    let campaign = service.create_campaign(&user.0, &request).await?;

    notifications
        .notify_campaign_event(&CampaignEvent {
            campaign_id: campaign.id,
            title: campaign.title.clone(),
            business_name: campaign.business_name.clone(),
            phone: campaign.phone.clone(),
            text: "New campaign submitted.".to_string(),
        })
        .await;

    Ok(HttpResponse::Created().json(campaign))
}

/// Lists the authenticated advertiser's campaigns.
pub async fn list_campaigns(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, MarketplaceError> {
    let service = CampaignService::new(pool.get_ref().clone());
    let campaigns = service.list_advertiser_campaigns(&user.0).await?;

    let response = ListCampaignsResponse {
        total: campaigns.len() as i64,
        campaigns,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Gets one of the advertiser's campaigns by id.
pub async fn get_campaign(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, MarketplaceError> {
    let service = CampaignService::new(pool.get_ref().clone());
    let campaign = service
        .get_advertiser_campaign(&user.0, &path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(campaign))
}

/// Lists every campaign for the moderation panel (admin only).
pub async fn list_all_campaigns(
    pool: web::Data<PgPool>,
    _admin: AdminUser,
) -> Result<HttpResponse, MarketplaceError> {
    let service = CampaignService::new(pool.get_ref().clone());
    let campaigns = service.list_all_campaigns().await?;

    let response = ListCampaignsResponse {
        total: campaigns.len() as i64,
        campaigns,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Sets a campaign's status (admin only).
pub async fn update_campaign_status(
    pool: web::Data<PgPool>,
    notifications: web::Data<NotificationService>,
    _admin: AdminUser,
    path: web::Path<uuid::Uuid>,
    request: web::Json<UpdateCampaignStatusRequest>,
) -> Result<HttpResponse, MarketplaceError> {
    let service = CampaignService::new(pool.get_ref().clone());
    let campaign = service.set_status(&path.into_inner(), &request.status).await?;

    notifications
        .notify_campaign_event(&CampaignEvent {
            campaign_id: campaign.id,
            title: campaign.title.clone(),
            business_name: campaign.business_name.clone(),
            phone: campaign.phone.clone(),
            text: format!("Campaign status updated to {}.", campaign.status),
        })
        .await;

    Ok(HttpResponse::Ok().json(campaign))
}

/// Sets the status of several campaigns at once (admin only).
pub async fn bulk_update_campaign_status(
    pool: web::Data<PgPool>,
    _admin: AdminUser,
    request: web::Json<BulkStatusRequest>,
) -> Result<HttpResponse, MarketplaceError> {
    let service = CampaignService::new(pool.get_ref().clone());
    let updated = service.bulk_set_status(&request.ids, &request.status).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "updated": updated
    })))
}

use actix_web::{HttpResponse, Result, web};
use auth_services::middleware::RequestIdentity;
use notification_services::{CampaignEvent, NotificationService};
use sqlx::PgPool;

use crate::payment_service::PaymentService;
use crate::types::*;

/// Processes a checkout: marks the payment PAID and issues an invoice.
pub async fn checkout(
    pool: web::Data<PgPool>,
    notifications: web::Data<NotificationService>,
    identity: RequestIdentity,
    request: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, MarketplaceError> {
    let service = PaymentService::new(pool.get_ref().clone());
    let outcome = service
        .checkout(
            &identity.advertiser_id,
            identity.is_admin(),
            &request.campaign_id,
            &request.method,
        )
        .await?;

    notifications
        .notify_campaign_event(&CampaignEvent {
            campaign_id: request.campaign_id,
            title: outcome.title,
            business_name: outcome.business_name,
            phone: outcome.phone,
            text: format!(
                "Payment received via {}. Invoice {} issued.",
                request.method.to_uppercase(),
                outcome.response.invoice_number
            ),
        })
        .await;

    Ok(HttpResponse::Ok().json(outcome.response))
}

/// Gets the invoice for a campaign.
pub async fn get_invoice(
    pool: web::Data<PgPool>,
    identity: RequestIdentity,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, MarketplaceError> {
    let service = PaymentService::new(pool.get_ref().clone());
    let invoice = service
        .get_invoice(
            &identity.advertiser_id,
            identity.is_admin(),
            &path.into_inner(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(invoice))
}

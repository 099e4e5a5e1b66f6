use booking_core::BookingError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Query parameters for an availability check
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// Location whose screen is being queried
    pub location_id: Uuid,
    /// First day of the range, `YYYY-MM-DD`
    pub start_date: String,
    /// Last day of the range (inclusive), `YYYY-MM-DD`
    pub end_date: String,
}

/// Request structure for booking a new campaign
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCampaignRequest {
    /// Location the campaign should run at
    pub location_id: Uuid,

    /// Advertiser's business name shown to moderators
    #[validate(length(min = 1, max = 255, message = "Business name is required"))]
    pub business_name: String,

    /// Contact phone for the campaign
    #[validate(length(min = 7, max = 20, message = "Phone number must be 7-20 characters"))]
    pub phone: String,

    /// Campaign title
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    /// First booked day, `YYYY-MM-DD`
    pub start_date: String,

    /// Last booked day (inclusive), `YYYY-MM-DD`
    pub end_date: String,

    /// MIME type of the uploaded creative, if any
    pub media_type: Option<String>,

    /// Storage path of the uploaded creative, if any
    pub media_path: Option<String>,
}

/// A campaign as returned to advertisers and moderators
#[derive(Debug, Serialize)]
pub struct CampaignResponse {
    /// Campaign id
    pub id: Uuid,
    /// Location the campaign runs at
    pub location_id: Uuid,
    /// Name of the location
    pub location_name: String,
    /// Advertiser's business name
    pub business_name: String,
    /// Contact phone
    pub phone: String,
    /// Campaign title
    pub title: String,
    /// First booked day
    pub start_date: NaiveDate,
    /// Last booked day (inclusive)
    pub end_date: NaiveDate,
    /// Slots occupied (always 1)
    pub slot_count: i32,
    /// Current status
    pub status: String,
    /// When the campaign was submitted
    pub created_at: DateTime<Utc>,
}

/// Response structure for listing campaigns
#[derive(Debug, Serialize)]
pub struct ListCampaignsResponse {
    /// Campaigns, newest first
    pub campaigns: Vec<CampaignResponse>,
    /// Total count
    pub total: i64,
}

/// Request structure for a moderation status change
#[derive(Debug, Deserialize)]
pub struct UpdateCampaignStatusRequest {
    /// New status, one of the uppercase status names
    pub status: String,
}

/// Request structure for a bulk moderation status change
#[derive(Debug, Deserialize)]
pub struct BulkStatusRequest {
    /// Campaigns to update
    pub ids: Vec<Uuid>,
    /// New status for all of them
    pub status: String,
}

/// Request structure for creating or updating a location
#[derive(Debug, Deserialize, Validate)]
pub struct LocationRequest {
    /// Venue name
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    /// Street address
    #[validate(length(min = 1, max = 512, message = "Address is required"))]
    pub address: String,

    /// Marketing description
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    /// Estimated daily foot traffic
    #[validate(range(min = 1, message = "Foot traffic must be positive"))]
    pub foot_traffic_per_day: i32,

    /// Price of a 30-day booking in USD
    #[validate(range(min = 1.0, message = "Price must be positive"))]
    pub price_per_30_days: f64,
}

/// Request structure for updating a location's screen settings
#[derive(Debug, Deserialize)]
pub struct ScreenSettingsRequest {
    /// Fixed capacity of the ad rotation
    pub total_slots: i32,
    /// Length of the full rotation loop in seconds
    pub loop_seconds: i32,
    /// Length of a single ad in seconds
    pub ad_seconds: i32,
}

/// Screen settings as returned in location responses
#[derive(Debug, Serialize)]
pub struct ScreenSettings {
    /// Fixed capacity of the ad rotation
    pub total_slots: i32,
    /// Length of the full rotation loop in seconds
    pub loop_seconds: i32,
    /// Length of a single ad in seconds
    pub ad_seconds: i32,
}

/// A location with its screen settings
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    /// Location id
    pub id: Uuid,
    /// Venue name
    pub name: String,
    /// Street address
    pub address: String,
    /// Marketing description
    pub description: String,
    /// Estimated daily foot traffic
    pub foot_traffic_per_day: i32,
    /// Price of a 30-day booking in USD
    pub price_per_30_days: f64,
    /// When the location was added
    pub created_at: DateTime<Utc>,
    /// Screen settings, absent when the venue has no screen configured
    pub screen: Option<ScreenSettings>,
}

/// Request structure for checkout
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    /// Campaign being paid for
    pub campaign_id: Uuid,
    /// Payment method: "card", "click" or "payme"
    pub method: String,
}

/// Response structure for checkout
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// Invoice issued for the payment
    pub invoice_number: String,
    /// Amount charged in USD
    pub amount_usd: f64,
}

/// An issued invoice
#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    /// Campaign the invoice belongs to
    pub campaign_id: Uuid,
    /// Amount in USD
    pub amount_usd: f64,
    /// Invoice number
    pub invoice_number: String,
    /// When the invoice was issued
    pub issued_at: DateTime<Utc>,
}

/// Response structure for the reconciliation trigger
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    /// Campaigns examined
    pub scanned: usize,
    /// Campaigns whose status changed
    pub updated: usize,
    /// When the pass ran
    pub synced_at: DateTime<Utc>,
}

/// Custom error type for marketplace operations
#[derive(Debug, thiserror::Error)]
pub enum MarketplaceError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Core booking error (validation, missing screen, store failure)
    #[error(transparent)]
    Booking(#[from] BookingError),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Campaign not found
    #[error("Campaign not found")]
    CampaignNotFound,

    /// Location not found
    #[error("Location not found")]
    LocationNotFound,

    /// Invoice not found
    #[error("Invoice not found")]
    InvoiceNotFound,

    /// Caller does not own the campaign
    #[error("Unauthorized access to campaign")]
    Forbidden,

    /// The requested range has no free slots
    #[error("No slots available for those dates")]
    NoSlotsAvailable,

    /// The campaign's status does not allow payment
    #[error("Campaign cannot be paid in current status")]
    NotPayable,

    /// Unknown payment method
    #[error("Unsupported payment method")]
    BadPaymentMethod,
}

impl actix_web::ResponseError for MarketplaceError {
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::HttpResponse;

        match self {
            MarketplaceError::Booking(BookingError::InvalidDate(_))
            | MarketplaceError::Booking(BookingError::InvalidRange) => {
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "invalid_date_range",
                    "message": "Invalid date range."
                }))
            }
            MarketplaceError::Booking(BookingError::ScreenNotConfigured) => {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": "screen_not_configured",
                    "message": "Screen settings not found for location"
                }))
            }
            MarketplaceError::Validation(msg) => HttpResponse::BadRequest().json(
                serde_json::json!({
                    "error": "validation_error",
                    "message": msg
                }),
            ),
            MarketplaceError::CampaignNotFound => HttpResponse::NotFound().json(
                serde_json::json!({
                    "error": "campaign_not_found",
                    "message": "Campaign not found"
                }),
            ),
            MarketplaceError::LocationNotFound => HttpResponse::NotFound().json(
                serde_json::json!({
                    "error": "location_not_found",
                    "message": "Location not found"
                }),
            ),
            MarketplaceError::InvoiceNotFound => HttpResponse::NotFound().json(
                serde_json::json!({
                    "error": "invoice_not_found",
                    "message": "Invoice not found"
                }),
            ),
            MarketplaceError::Forbidden => HttpResponse::Forbidden().json(serde_json::json!({
                "error": "forbidden",
                "message": "You are not authorized to access this campaign"
            })),
            MarketplaceError::NoSlotsAvailable => HttpResponse::Conflict().json(
                serde_json::json!({
                    "error": "no_slots_available",
                    "message": "No slots available for those dates. Please choose different dates."
                }),
            ),
            MarketplaceError::NotPayable => HttpResponse::Conflict().json(serde_json::json!({
                "error": "not_payable",
                "message": "Campaign cannot be paid in current status"
            })),
            MarketplaceError::BadPaymentMethod => HttpResponse::BadRequest().json(
                serde_json::json!({
                    "error": "bad_payment_method",
                    "message": "Payment method must be card, click or payme"
                }),
            ),
            _ => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "internal_error",
                "message": "An internal error occurred"
            })),
        }
    }
}

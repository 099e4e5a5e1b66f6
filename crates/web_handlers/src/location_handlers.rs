use actix_web::{HttpResponse, Result, web};
use auth_services::middleware::AdminUser;
use sqlx::PgPool;
use validator::Validate;

use crate::location_service::LocationService;
use crate::types::*;

/// Lists all venues with their screen settings.
pub async fn list_locations(pool: web::Data<PgPool>) -> Result<HttpResponse, MarketplaceError> {
    let service = LocationService::new(pool.get_ref().clone());
    let locations = service.list_locations().await?;

    Ok(HttpResponse::Ok().json(locations))
}

/// Gets a single venue by id.
pub async fn get_location(
    pool: web::Data<PgPool>,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, MarketplaceError> {
    let service = LocationService::new(pool.get_ref().clone());
    let location = service.get_location(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(location))
}

/// Creates a venue with a default screen (admin only).
pub async fn create_location(
    pool: web::Data<PgPool>,
    _admin: AdminUser,
    request: web::Json<LocationRequest>,
) -> Result<HttpResponse, MarketplaceError> {
    request
        .validate()
        .map_err(|e| MarketplaceError::Validation(format!("Validation error: {}", e)))?;

    let service = LocationService::new(pool.get_ref().clone());
    let location = service.create_location(&request).await?;

    log::info!("Location created: {}", location.id);

    Ok(HttpResponse::Created().json(location))
}

/// Updates a venue's listing fields (admin only).
pub async fn update_location(
    pool: web::Data<PgPool>,
    _admin: AdminUser,
    path: web::Path<uuid::Uuid>,
    request: web::Json<LocationRequest>,
) -> Result<HttpResponse, MarketplaceError> {
    request
        .validate()
        .map_err(|e| MarketplaceError::Validation(format!("Validation error: {}", e)))?;

    let service = LocationService::new(pool.get_ref().clone());
    let location = service.update_location(path.into_inner(), &request).await?;

    Ok(HttpResponse::Ok().json(location))
}

/// Deletes a venue and its campaigns (admin only).
pub async fn delete_location(
    pool: web::Data<PgPool>,
    _admin: AdminUser,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, MarketplaceError> {
    let service = LocationService::new(pool.get_ref().clone());
    service.delete_location(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Upserts a venue's screen settings (admin only). Values are clamped
/// to their allowed ranges rather than rejected.
pub async fn update_screen_settings(
    pool: web::Data<PgPool>,
    _admin: AdminUser,
    path: web::Path<uuid::Uuid>,
    request: web::Json<ScreenSettingsRequest>,
) -> Result<HttpResponse, MarketplaceError> {
    let service = LocationService::new(pool.get_ref().clone());
    let settings = service.upsert_screen(path.into_inner(), &request).await?;

    Ok(HttpResponse::Ok().json(settings))
}

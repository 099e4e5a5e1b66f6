use actix_web::{HttpResponse, Result, web};
use sqlx::PgPool;
use validator::Validate;

use auth_services::jwt::JwtService;
use auth_services::service::AuthService;
use auth_services::types::*;

/// Handles advertiser registration: validates the request, creates the
/// account and returns a bearer token with the advertiser info.
pub async fn register(
    pool: web::Data<PgPool>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::Validation(format!("Validation error: {}", e)))?;

    let auth_service = AuthService::new(pool.get_ref().clone());
    let jwt_service = JwtService::new();

    let advertiser = auth_service.create_advertiser(&request).await?;
    let access_token = jwt_service.generate_access_token(&advertiser)?;

    log::info!("New advertiser registered: {}", advertiser.id);

    let response = AuthResponse {
        access_token,
        advertiser: AdvertiserInfo::from(&advertiser),
    };

    Ok(HttpResponse::Created().json(response))
}

/// Handles advertiser login: verifies credentials and returns a bearer
/// token with the advertiser info.
pub async fn login(
    pool: web::Data<PgPool>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::Validation(format!("Validation error: {}", e)))?;

    let auth_service = AuthService::new(pool.get_ref().clone());
    let jwt_service = JwtService::new();

    let advertiser = auth_service
        .verify_credentials(&request.email, &request.password)
        .await?;
    let access_token = jwt_service.generate_access_token(&advertiser)?;

    let response = AuthResponse {
        access_token,
        advertiser: AdvertiserInfo::from(&advertiser),
    };

    Ok(HttpResponse::Ok().json(response))
}

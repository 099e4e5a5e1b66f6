use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Role granted to staff accounts.
pub const ROLE_ADMIN: &str = "admin";
/// Default role for self-registered accounts.
pub const ROLE_ADVERTISER: &str = "advertiser";

/// Request structure for advertiser registration
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Name of the advertiser
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    /// Email address of the advertiser
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,

    /// Contact phone number
    #[validate(length(min = 7, max = 20, message = "Phone number must be 7-20 characters"))]
    pub phone: String,

    /// Password for the account
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Request structure for advertiser login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address of the advertiser
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,

    /// Password for the account
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Advertiser account as stored in the database
#[derive(Debug)]
pub struct Advertiser {
    /// Unique identifier for the advertiser
    pub id: Uuid,
    /// Name of the advertiser
    pub name: String,
    /// Email address of the advertiser
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Hashed password
    pub password_hash: String,
    /// Role of the account ("advertiser" or "admin")
    pub role: String,
    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,
}

/// Advertiser information returned in responses
#[derive(Debug, Serialize)]
pub struct AdvertiserInfo {
    /// Unique identifier for the advertiser
    pub id: Uuid,
    /// Name of the advertiser
    pub name: String,
    /// Email address of the advertiser
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Role of the account
    pub role: String,
}

impl From<&Advertiser> for AdvertiserInfo {
    fn from(advertiser: &Advertiser) -> Self {
        Self {
            id: advertiser.id,
            name: advertiser.name.clone(),
            email: advertiser.email.clone(),
            phone: advertiser.phone.clone(),
            role: advertiser.role.clone(),
        }
    }
}

/// Response structure for registration and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests
    pub access_token: String,
    /// Advertiser information
    pub advertiser: AdvertiserInfo,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject of the token, the advertiser ID
    pub sub: String,
    /// Email address of the advertiser
    pub email: String,
    /// Role of the account
    pub role: String,
    /// Expiration timestamp of the token
    pub exp: usize,
    /// Issued at timestamp of the token
    pub iat: usize,
}

/// Custom error type for authentication-related errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The email address already exists in the system
    #[error("Email already exists")]
    EmailExists,

    /// The provided credentials are invalid
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The advertiser was not found in the system
    #[error("Advertiser not found")]
    AdvertiserNotFound,

    /// A database error occurred
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An error occurred while hashing the password
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// An error occurred while encoding or decoding a token
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// An error occurred while validating input data
    #[error("Validation error: {0}")]
    Validation(String),
}

impl actix_web::ResponseError for AuthError {
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::HttpResponse;

        match self {
            AuthError::EmailExists => HttpResponse::Conflict().json(serde_json::json!({
                "error": "email_exists",
                "message": "An account with this email already exists"
            })),
            AuthError::InvalidCredentials => HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "invalid_credentials",
                "message": "Invalid email or password"
            })),
            AuthError::AdvertiserNotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": "advertiser_not_found",
                "message": "Advertiser not found"
            })),
            AuthError::Validation(msg) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "validation_error",
                "message": msg
            })),
            _ => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "internal_error",
                "message": "An internal error occurred"
            })),
        }
    }
}

use bcrypt::{DEFAULT_COST, hash, verify};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::types::{Advertiser, AuthError, RegisterRequest};

/// A service for advertiser account operations: registration, lookup
/// and credential verification.
pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    /// Creates a new instance of `AuthService` with the provided database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a new advertiser account from a registration request.
    pub async fn create_advertiser(
        &self,
        request: &RegisterRequest,
    ) -> Result<Advertiser, AuthError> {
        // Check if email already exists
        let existing = sqlx::query("SELECT id FROM advertisers WHERE email = $1")
            .bind(request.email.to_lowercase())
            .fetch_optional(&self.pool)
            .await?;

        if existing.is_some() {
            return Err(AuthError::EmailExists);
        }

        let password_hash = hash(&request.password, DEFAULT_COST)?;

        let row = sqlx::query(
            r#"
            INSERT INTO advertisers (name, email, phone, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, phone, password_hash, role, created_at
            "#,
        )
        .bind(request.name.trim())
        .bind(request.email.to_lowercase().trim())
        .bind(request.phone.trim())
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(advertiser_from_row(&row))
    }

    /// Retrieves an advertiser by email, returning `None` if not found.
    pub async fn get_advertiser_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Advertiser>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, phone, password_hash, role, created_at
            FROM advertisers
            WHERE email = $1
            "#,
        )
        .bind(email.to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| advertiser_from_row(&row)))
    }

    /// Retrieves an advertiser by id.
    pub async fn get_advertiser_by_id(&self, id: &Uuid) -> Result<Advertiser, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, phone, password_hash, role, created_at
            FROM advertisers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(advertiser_from_row(&row)),
            None => Err(AuthError::AdvertiserNotFound),
        }
    }

    /// Verifies email/password credentials, returning the account on
    /// success. The same error covers unknown email and wrong password.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Advertiser, AuthError> {
        let advertiser = self
            .get_advertiser_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify(password, &advertiser.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(advertiser)
    }
}

fn advertiser_from_row(row: &sqlx::postgres::PgRow) -> Advertiser {
    Advertiser {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        password_hash: row.get("password_hash"),
        role: row.get("role"),
        created_at: row.get("created_at"),
    }
}

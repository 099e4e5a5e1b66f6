use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::types::{Advertiser, AuthError, Claims};

/// Issues and verifies bearer tokens for advertiser and admin sessions.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// Creates a service keyed from `JWT_SECRET`.
    pub fn new() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| "your-secret-key-change-this-in-production".to_string());

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    /// Generates an access token for the advertiser, valid for 30 days.
    pub fn generate_access_token(&self, advertiser: &Advertiser) -> Result<String, AuthError> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(Duration::days(30))
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims = Claims {
            sub: advertiser.id.to_string(),
            email: advertiser.email.clone(),
            role: advertiser.role.clone(),
            exp: expiration,
            iat: now.timestamp() as usize,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Verifies a token and returns its claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )?;

        Ok(token_data.claims)
    }
}

impl Claims {
    /// Advertiser id carried in the token subject.
    pub fn advertiser_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub).map_err(|_| {
            AuthError::Jwt(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidSubject,
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ROLE_ADVERTISER;

    fn advertiser() -> Advertiser {
        Advertiser {
            id: Uuid::new_v4(),
            name: "Test Advertiser".to_string(),
            email: "test@example.com".to_string(),
            phone: "+998900000000".to_string(),
            password_hash: String::new(),
            role: ROLE_ADVERTISER.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issued_token_round_trips() {
        let service = JwtService::new();
        let advertiser = advertiser();

        let token = service.generate_access_token(&advertiser).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.advertiser_id().unwrap(), advertiser.id);
        assert_eq!(claims.email, advertiser.email);
        assert_eq!(claims.role, ROLE_ADVERTISER);
    }

    #[test]
    fn garbage_token_is_rejected() {
        let service = JwtService::new();
        assert!(service.verify_token("not-a-token").is_err());
    }
}

//! Access token issuing and verification (HS256 JWT).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::config::Config;
use crate::domain::User;

#[cfg(test)]
use mockall::automock;

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token payload returned after successful authentication
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccessToken {
    /// Signed JWT to send as `Authorization: Bearer <token>`
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
}

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("token error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("token lifetime of {0} hours is out of range")]
    LifetimeOutOfRange(i64),
}

/// Signs and checks access tokens.
#[cfg_attr(test, automock)]
pub trait TokenIssuer: Send + Sync {
    /// Produce a signed, time-bounded token for the user
    fn issue(&self, user: &User) -> Result<AccessToken, TokenError>;

    /// Check signature and expiry, returning the embedded claims
    fn verify(&self, token: &str) -> Result<Claims, TokenError>;
}

/// HMAC-SHA256 JWT issuer keyed by the configured secret.
pub struct JwtIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime_hours: i64,
}

impl JwtIssuer {
    pub fn new(config: &Config) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret_bytes()),
            lifetime_hours: config.jwt_expiration_hours,
        }
    }
}

impl TokenIssuer for JwtIssuer {
    fn issue(&self, user: &User) -> Result<AccessToken, TokenError> {
        let now = Utc::now();
        let expires_at = Some(self.lifetime_hours)
            .filter(|hours| *hours > 0)
            .and_then(Duration::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(TokenError::LifetimeOutOfRange(self.lifetime_hours))?;

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(AccessToken { token })
    }

    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(token_data.claims)
    }
}

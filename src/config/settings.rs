//! Application settings loaded from environment variables.

use std::env;

use thiserror::Error;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEV_JWT_SECRET, MAX_JWT_EXPIRATION_HOURS,
    MIN_JWT_EXPIRATION_HOURS, MIN_JWT_SECRET_LENGTH,
};

/// Configuration loading failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JWT_SECRET environment variable must be set in production")]
    MissingJwtSecret,

    #[error("JWT_SECRET must be at least {} characters long", MIN_JWT_SECRET_LENGTH)]
    JwtSecretTooShort,

    #[error(
        "JWT_EXPIRATION_HOURS must be an integer between {} and {}, got {:?}",
        MIN_JWT_EXPIRATION_HOURS,
        MAX_JWT_EXPIRATION_HOURS,
        .0
    )]
    InvalidJwtExpiration(String),
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Debug builds fall back to an insecure development secret when
    /// `JWT_SECRET` is unset; release builds refuse to start.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            Err(_) => return Err(ConfigError::MissingJwtSecret),
        };

        let mut config = Self::with_secret(jwt_secret)?;

        if let Ok(url) = env::var("DATABASE_URL") {
            config.database_url = url;
        }
        if let Ok(raw) = env::var("JWT_EXPIRATION_HOURS") {
            config.jwt_expiration_hours = parse_expiration_hours(&raw)?;
        }

        Ok(config)
    }

    /// Build a configuration with defaults and the given signing secret.
    pub fn with_secret(jwt_secret: impl Into<String>) -> Result<Self, ConfigError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::JwtSecretTooShort);
        }

        Ok(Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt_secret,
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
        })
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }
}

/// Token lifetime in hours, bounded so issued tokens are neither born
/// expired nor overflow the clock.
fn parse_expiration_hours(raw: &str) -> Result<i64, ConfigError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|hours| (MIN_JWT_EXPIRATION_HOURS..=MAX_JWT_EXPIRATION_HOURS).contains(hours))
        .ok_or_else(|| ConfigError::InvalidJwtExpiration(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_secret_rejected() {
        let result = Config::with_secret("too-short");
        assert!(matches!(result, Err(ConfigError::JwtSecretTooShort)));
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::with_secret(DEV_JWT_SECRET).unwrap();
        assert_eq!(config.jwt_expiration_hours, DEFAULT_JWT_EXPIRATION_HOURS);
    }

    #[test]
    fn test_expiration_hours_within_bounds() {
        assert_eq!(parse_expiration_hours("1").unwrap(), 1);
        assert_eq!(parse_expiration_hours(" 48 ").unwrap(), 48);
        assert_eq!(
            parse_expiration_hours(&MAX_JWT_EXPIRATION_HOURS.to_string()).unwrap(),
            MAX_JWT_EXPIRATION_HOURS
        );
    }

    #[test]
    fn test_expiration_hours_out_of_bounds_rejected() {
        for raw in ["0", "-1", "8761", "1000000000000", "9223372036854775807", "soon"] {
            assert!(
                matches!(
                    parse_expiration_hours(raw),
                    Err(ConfigError::InvalidJwtExpiration(_))
                ),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::with_secret(DEV_JWT_SECRET).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains(DEV_JWT_SECRET));
        assert!(printed.contains("[REDACTED]"));
    }
}

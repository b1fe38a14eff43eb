//! Password value object - hashing and verification with Argon2.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

use crate::config::MIN_PASSWORD_LENGTH;

/// Password hashing and verification failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password must be at least {} characters", MIN_PASSWORD_LENGTH)]
    TooShort,

    /// The submitted password does not match the stored hash.
    #[error("password does not match")]
    Mismatch,

    #[error("invalid hash format: {0}")]
    MalformedHash(String),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("password verification failed: {0}")]
    Verification(String),
}

/// Password value object that handles hashing and verification.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a new password by hashing the plain text.
    ///
    /// # Errors
    /// Returns `TooShort` if the password is shorter than the minimum length.
    pub fn new(plain_text: &str) -> Result<Self, PasswordError> {
        if plain_text.len() < MIN_PASSWORD_LENGTH as usize {
            return Err(PasswordError::TooShort);
        }

        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Create a Password from an existing hash (from the store).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// Distinguishes a plain mismatch from a hash that cannot be checked at all.
    pub fn verify(&self, plain_text: &str) -> Result<(), PasswordError> {
        let parsed = PasswordHash::new(&self.hash)
            .map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        match Self::argon2().verify_password(plain_text.as_bytes(), &parsed) {
            Ok(()) => Ok(()),
            Err(argon2::password_hash::Error::Password) => Err(PasswordError::Mismatch),
            Err(e) => Err(PasswordError::Verification(e.to_string())),
        }
    }

    fn hash(plain_text: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| PasswordError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "SecurePassword123!";
        let password = Password::new(plain).unwrap();

        assert_eq!(password.verify(plain), Ok(()));
        assert_eq!(
            password.verify("WrongPassword123"),
            Err(PasswordError::Mismatch)
        );
    }

    #[test]
    fn test_password_from_hash() {
        let plain = "TestPassword123";
        let hash = Password::new(plain).unwrap().into_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify(plain).is_ok());
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "SamePassword123";
        let pass1 = Password::new(plain).unwrap();
        let pass2 = Password::new(plain).unwrap();

        assert!(pass1.verify(plain).is_ok());
        assert!(pass2.verify(plain).is_ok());
        assert_ne!(pass1.into_string(), pass2.into_string());
    }

    #[test]
    fn test_malformed_hash_is_not_a_mismatch() {
        let stored = Password::from_hash("definitely-not-a-phc-string");
        assert!(matches!(
            stored.verify("whatever123"),
            Err(PasswordError::MalformedHash(_))
        ));
    }

    #[test]
    fn test_password_too_short() {
        assert_eq!(Password::new("short").unwrap_err(), PasswordError::TooShort);
    }

    #[test]
    fn test_password_minimum_length() {
        assert!(Password::new("12345678").is_ok());
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = Password::new("12345678").unwrap();
        assert!(!format!("{:?}", password).contains("argon2"));
    }
}

//! JSON body decoding with validation.
//!
//! Bodies are taken as raw `Bytes` and decoded inside the handler, so a
//! handler can run its authorization check before looking at the body.

use axum::body::Bytes;
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Why a request body was rejected; the message is client-safe.
#[derive(Error, Debug)]
pub enum BodyError {
    #[error("{0}")]
    Malformed(#[from] serde_json::Error),

    #[error("{}", format_validation_errors(.0))]
    Invalid(#[from] ValidationErrors),
}

/// Decode a JSON body without validation rules.
pub fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, BodyError> {
    Ok(serde_json::from_slice(body)?)
}

/// A decoded and validated JSON body.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateUserRequest {
///     #[validate(length(min = 8))]
///     password: String,
/// }
///
/// let ValidatedJson(payload) = ValidatedJson::<CreateUserRequest>::from_bytes(&body)?;
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
{
    pub fn from_bytes(body: &Bytes) -> Result<Self, BodyError> {
        let value: T = parse_json(body)?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Format validation errors into a user-friendly string
fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

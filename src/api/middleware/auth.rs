//! Identity resolution and authorization rules.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::{BEARER_TOKEN_PREFIX, MSG_NOT_AUTHORIZED};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

/// The user making the request, or `None` for anonymous requests.
///
/// Populated by [`identity_middleware`]; extracting it never fails and
/// yields an anonymous identity when the middleware did not run.
#[derive(Clone, Debug, Default)]
pub struct Identity(pub Option<User>);

impl Identity {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Identity>().cloned().unwrap_or_default())
    }
}

/// Resolves the bearer token (if any) to an [`Identity`] before the handler runs.
///
/// A missing or unusable token yields an anonymous identity; handlers
/// decide whether that is acceptable.
pub async fn identity_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers()).map(str::to_owned);

    let identity = match token {
        Some(token) => Identity(state.auth_service.resolve_identity(&token).await?),
        None => Identity::anonymous(),
    };

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Require an authenticated identity.
pub fn require_user(identity: &Identity) -> AppResult<&User> {
    identity
        .user()
        .ok_or_else(|| AppError::unauthorized(MSG_NOT_AUTHORIZED, "no authenticated identity"))
}

/// Require an authenticated administrator.
pub fn require_admin(identity: &Identity) -> AppResult<&User> {
    match identity.user() {
        Some(user) if user.is_admin() => Ok(user),
        Some(user) => Err(AppError::unauthorized(
            MSG_NOT_AUTHORIZED,
            format!("user {} is not an administrator", user.id),
        )),
        None => Err(AppError::unauthorized(
            MSG_NOT_AUTHORIZED,
            "no authenticated identity",
        )),
    }
}

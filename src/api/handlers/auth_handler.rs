//! Authentication handlers.

use axum::{body::Bytes, extract::State, http::StatusCode, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use super::{render, HandlerResult};
use crate::api::extractors::parse_json;
use crate::api::middleware::Identity;
use crate::api::AppState;
use crate::config::MSG_BAD_REQUEST;
use crate::errors::AppError;
use crate::services::AccessToken;

/// Credential submission
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/authenticate", post(authenticate))
}

/// Check credentials and issue an access token
#[utoipa::path(
    post,
    path = "/authenticate",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = AccessToken),
        (status = 400, description = "Malformed body or invalid password"),
        (status = 404, description = "No user with this email"),
        (status = 500, description = "Store, hashing or signing failure")
    )
)]
pub async fn authenticate(
    State(state): State<AppState>,
    _identity: Identity,
    body: Bytes,
) -> HandlerResult<AccessToken> {
    let credentials: LoginRequest =
        parse_json(&body).map_err(|e| AppError::bad_request(MSG_BAD_REQUEST, e))?;

    let token = state
        .auth_service
        .authenticate(&credentials.email, &credentials.password)
        .await?;

    render(token, StatusCode::OK)
}

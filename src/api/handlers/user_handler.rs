//! User handlers: admin-only creation and self access.

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::{render, HandlerResult};
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, require_user, Identity};
use crate::api::AppState;
use crate::config::{MSG_INVALID_ID, MSG_UNAUTHORIZED};
use crate::domain::{UserResponse, UserRole};
use crate::errors::AppError;

/// New account submitted by an administrator
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// Email address; format and uniqueness are checked by the store
    #[validate(length(min = 1, message = "Email is required"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// Account role, `user` when omitted
    #[serde(rename = "type", default)]
    pub role: UserRole,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/me", get(get_current_user))
        .route("/:id", get(get_user))
}

/// Create a new user (admin only)
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Malformed body, validation failure or invalid email"),
        (status = 401, description = "Caller is not an administrator"),
        (status = 500, description = "Store failure")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_user(
    State(state): State<AppState>,
    identity: Identity,
    body: Bytes,
) -> HandlerResult<UserResponse> {
    // Authorization precedes decoding.
    let admin = require_admin(&identity)?;

    let ValidatedJson(payload) = ValidatedJson::<CreateUserRequest>::from_bytes(&body)
        .map_err(|e| AppError::bad_request(e.to_string(), e))?;

    let user = state
        .user_service
        .create_user(payload.email, &payload.password, payload.role)
        .await?;

    tracing::debug!(admin_id = admin.id, user_id = user.id, "account created by admin");

    render(UserResponse::from(user), StatusCode::OK)
}

/// Get a user by id; callers may only fetch themselves
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "The caller's own record", body = UserResponse),
        (status = 400, description = "Invalid id, or id is not the caller's"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    identity: Identity,
    path: Result<Path<String>, PathRejection>,
) -> HandlerResult<UserResponse> {
    let Path(raw_id) = path.map_err(|e| AppError::bad_request(MSG_INVALID_ID, e))?;
    let id: i64 = raw_id
        .parse()
        .map_err(|e| AppError::bad_request(MSG_INVALID_ID, e))?;

    let user = require_user(&identity)?;

    // Self access only; mismatches answer 400 to stay compatible with existing clients.
    if user.id != id {
        return Err(AppError::bad_request(
            MSG_UNAUTHORIZED,
            format!("user {} requested user {}", user.id, id),
        ));
    }

    render(UserResponse::from(user.clone()), StatusCode::OK)
}

/// Get the currently authenticated user
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "The caller's record", body = UserResponse),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_current_user(identity: Identity) -> HandlerResult<UserResponse> {
    let user = require_user(&identity)?;

    render(UserResponse::from(user.clone()), StatusCode::OK)
}

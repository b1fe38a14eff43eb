//! HTTP request handlers.
//!
//! Every handler has the same shape: it takes the resolved
//! [`Identity`](crate::api::middleware::Identity), plus the shared state and
//! raw request parts it needs, and returns either a rendered body with its
//! status or an [`AppError`](crate::errors::AppError).

use axum::{http::StatusCode, Json};
use serde::Serialize;

use crate::errors::AppResult;

pub mod auth_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use user_handler::user_routes;

/// Outcome of every handler: a JSON body with its status, or a structured error.
pub type HandlerResult<T> = AppResult<(StatusCode, Json<T>)>;

/// Render a JSON body with the given status.
pub fn render<T: Serialize>(body: T, status: StatusCode) -> HandlerResult<T> {
    Ok((status, Json(body)))
}

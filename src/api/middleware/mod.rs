//! API middleware.

mod auth;

pub use auth::{identity_middleware, require_admin, require_user, Identity};

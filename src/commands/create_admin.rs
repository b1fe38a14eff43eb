//! Create-admin command - Bootstrap an administrator account.
//!
//! Account creation over HTTP requires an administrator, so the first one
//! has to come from here (or from `serve --admin-email`).

use std::sync::Arc;

use crate::cli::args::AdminArgs;
use crate::config::{Config, MSG_RETRIEVING_USER};
use crate::domain::{User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, StoreError, UserRepository, UserStore};
use crate::services::{UserManager, UserService};

/// Execute the create-admin command
pub async fn execute(args: AdminArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config)
        .await
        .map_err(|e| AppError::internal("database connection failed", e))?;

    let users: Arc<dyn UserRepository> = Arc::new(UserStore::new(db.get_connection()));
    let admin = ensure_admin(users, args.email, &args.password).await?;

    tracing::info!(user_id = admin.id, email = %admin.email, "administrator ready");

    Ok(())
}

/// Return the administrator with this email, creating it if absent.
///
/// Fails if the email belongs to an ordinary account.
pub async fn ensure_admin(
    users: Arc<dyn UserRepository>,
    email: String,
    password: &str,
) -> AppResult<User> {
    match users.find_by_email(&email).await {
        Ok(existing) if existing.is_admin() => {
            tracing::info!(user_id = existing.id, "administrator already exists");
            return Ok(existing);
        }
        Ok(existing) => {
            return Err(AppError::bad_request(
                "account exists and is not an administrator",
                format!("user {} has role {}", existing.id, existing.role),
            ))
        }
        Err(StoreError::NotFound) => {}
        Err(e) => return Err(AppError::internal(MSG_RETRIEVING_USER, e)),
    }

    UserManager::new(users)
        .create_user(email, password, UserRole::Admin)
        .await
}

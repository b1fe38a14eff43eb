//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use super::create_admin::ensure_admin;
use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, InMemoryUserStore, UserRepository, UserStore};

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    let users: Arc<dyn UserRepository> = if args.in_memory {
        tracing::warn!("Using in-memory user store; accounts are lost on shutdown");
        Arc::new(InMemoryUserStore::new())
    } else {
        let db = Database::connect(&config)
            .await
            .map_err(|e| AppError::internal("database connection failed", e))?;
        Arc::new(UserStore::new(db.get_connection()))
    };

    if let (Some(email), Some(password)) = (args.admin_email, args.admin_password) {
        ensure_admin(users.clone(), email, &password).await?;
    }

    let app = create_router(AppState::from_config(users, &config));

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("failed to bind to {}", addr), e))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal("server error", e))?;

    Ok(())
}

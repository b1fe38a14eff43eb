//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::UserRepository;
use crate::services::{AuthService, Authenticator, JwtIssuer, UserManager, UserService};

/// Application state shared by every request.
///
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
}

impl AppState {
    /// Wire the default services over the given user store.
    pub fn from_config(users: Arc<dyn UserRepository>, config: &Config) -> Self {
        let tokens = Arc::new(JwtIssuer::new(config));

        Self {
            auth_service: Arc::new(Authenticator::new(users.clone(), tokens)),
            user_service: Arc::new(UserManager::new(users)),
        }
    }

    /// Create application state with manually injected services.
    pub fn new(auth_service: Arc<dyn AuthService>, user_service: Arc<dyn UserService>) -> Self {
        Self {
            auth_service,
            user_service,
        }
    }
}

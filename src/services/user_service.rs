//! User service - account creation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::MSG_SAVING_USER;
use crate::domain::{NewUser, Password, PasswordError, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::{StoreError, UserRepository};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Hash the password and persist a new account.
    ///
    /// Callers are responsible for checking that the requester may create users.
    async fn create_user(&self, email: String, password: &str, role: UserRole) -> AppResult<User>;
}

/// Concrete UserService over a user store.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
}

impl UserManager {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, email: String, password: &str, role: UserRole) -> AppResult<User> {
        let password_hash = match Password::new(password) {
            Ok(password) => password.into_string(),
            Err(e @ PasswordError::TooShort) => return Err(AppError::bad_request(e.to_string(), e)),
            Err(e) => return Err(AppError::internal(MSG_SAVING_USER, e)),
        };

        let new_user = NewUser {
            email,
            password_hash,
            role,
        };

        match self.users.create(new_user).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, role = %user.role, "user created");
                Ok(user)
            }
            Err(StoreError::InvalidEmail(message)) => {
                let cause = StoreError::InvalidEmail(message.clone());
                Err(AppError::bad_request(message, cause))
            }
            Err(e) => Err(AppError::internal(MSG_SAVING_USER, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::Utc;
    use sea_orm::DbErr;

    use crate::config::{MSG_EMAIL_TAKEN, MSG_INVALID_EMAIL};
    use crate::infra::MockUserRepository;

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .withf(|u| u.email == "new@example.com" && u.role == UserRole::Admin)
            .times(1)
            .returning(|u| {
                Ok(User {
                    id: 10,
                    email: u.email,
                    password_hash: u.password_hash,
                    role: u.role,
                    created_at: Utc::now(),
                })
            });

        let user = UserManager::new(Arc::new(repo))
            .create_user("new@example.com".to_string(), "long-enough", UserRole::Admin)
            .await
            .unwrap();

        assert_eq!(user.id, 10);
        assert_ne!(user.password_hash, "long-enough");
        assert!(Password::from_hash(user.password_hash).verify("long-enough").is_ok());
    }

    #[tokio::test]
    async fn test_short_password_rejected_before_store() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().never();

        let err = UserManager::new(Arc::new(repo))
            .create_user("new@example.com".to_string(), "short", UserRole::User)
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_email_is_bad_request_with_store_message() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .returning(|_| Err(StoreError::InvalidEmail(MSG_INVALID_EMAIL.to_string())));

        let err = UserManager::new(Arc::new(repo))
            .create_user("nope".to_string(), "long-enough", UserRole::User)
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), MSG_INVALID_EMAIL);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_bad_request() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .returning(|_| Err(StoreError::InvalidEmail(MSG_EMAIL_TAKEN.to_string())));

        let err = UserManager::new(Arc::new(repo))
            .create_user("dup@example.com".to_string(), "long-enough", UserRole::User)
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), MSG_EMAIL_TAKEN);
    }

    #[tokio::test]
    async fn test_store_failure_is_internal() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .returning(|_| Err(StoreError::Database(DbErr::Custom("disk full".into()))));

        let err = UserManager::new(Arc::new(repo))
            .create_user("new@example.com".to_string(), "long-enough", UserRole::User)
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), MSG_SAVING_USER);
        assert!(!err.message().contains("disk full"));
    }
}

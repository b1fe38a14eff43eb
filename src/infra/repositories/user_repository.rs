//! User repository: the store seam used by the auth and user services.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    Set, SqlErr,
};
use thiserror::Error;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::config::{MSG_EMAIL_TAKEN, MSG_INVALID_EMAIL};
use crate::domain::{is_valid_email, NewUser, User};

#[cfg(test)]
use mockall::automock;

/// Store outcomes other than a found or saved record.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("user not found")]
    NotFound,

    /// Malformed or already-registered email; the message is client-safe.
    #[error("{0}")]
    InvalidEmail(String),

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// User repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email address
    async fn find_by_email(&self, email: &str) -> Result<User, StoreError>;

    /// Find a user by id
    async fn find_by_id(&self, id: i64) -> Result<User, StoreError>;

    /// Persist a new user, assigning its id.
    ///
    /// Rejects malformed and duplicate emails with `StoreError::InvalidEmail`.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;
}

/// PostgreSQL-backed UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_email(&self, email: &str) -> Result<User, StoreError> {
        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(User::from)
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_id(&self, id: i64) -> Result<User, StoreError> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(User::from)
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        if !is_valid_email(&user.email) {
            return Err(StoreError::InvalidEmail(MSG_INVALID_EMAIL.to_string()));
        }

        let active_model = ActiveModel {
            id: NotSet,
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            role: Set(user.role.to_string()),
            created_at: Set(Utc::now()),
        };

        match active_model.insert(&self.db).await {
            Ok(model) => Ok(User::from(model)),
            // Uniqueness is enforced by the index on users.email
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(StoreError::InvalidEmail(MSG_EMAIL_TAKEN.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

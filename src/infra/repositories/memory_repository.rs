//! In-process UserRepository.
//!
//! Backs `serve --in-memory` and the HTTP integration tests. Same
//! validation and uniqueness rules as the PostgreSQL store.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::user_repository::{StoreError, UserRepository};
use crate::config::{MSG_EMAIL_TAKEN, MSG_INVALID_EMAIL};
use crate::domain::{is_valid_email, NewUser, User};

#[derive(Default)]
struct Table {
    rows: Vec<User>,
    next_id: i64,
}

/// Mutex-guarded user table with sequential ids starting at 1.
#[derive(Default)]
pub struct InMemoryUserStore {
    table: Mutex<Table>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<User, StoreError> {
        let table = self.table.lock().await;
        table
            .rows
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_id(&self, id: i64) -> Result<User, StoreError> {
        let table = self.table.lock().await;
        table
            .rows
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        if !is_valid_email(&user.email) {
            return Err(StoreError::InvalidEmail(MSG_INVALID_EMAIL.to_string()));
        }

        // Uniqueness check and insert happen under one lock.
        let mut table = self.table.lock().await;
        if table.rows.iter().any(|u| u.email == user.email) {
            return Err(StoreError::InvalidEmail(MSG_EMAIL_TAKEN.to_string()));
        }

        table.next_id += 1;
        let created = User {
            id: table.next_id,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        table.rows.push(created.clone());

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::User,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = InMemoryUserStore::new();
        let first = store.create(new_user("a@example.com")).await.unwrap();
        let second = store.create(new_user("b@example.com")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_lookup_by_email_and_id() {
        let store = InMemoryUserStore::new();
        let created = store.create(new_user("a@example.com")).await.unwrap();

        assert_eq!(store.find_by_email("a@example.com").await.unwrap(), created);
        assert_eq!(store.find_by_id(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let store = InMemoryUserStore::new();

        assert!(matches!(
            store.find_by_email("nobody@example.com").await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(store.find_by_id(42).await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        let store = InMemoryUserStore::new();
        let err = store.create(new_user("not-an-email")).await.unwrap_err();

        assert!(matches!(err, StoreError::InvalidEmail(ref m) if m == MSG_INVALID_EMAIL));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryUserStore::new();
        store.create(new_user("a@example.com")).await.unwrap();
        let err = store.create(new_user("a@example.com")).await.unwrap_err();

        assert!(matches!(err, StoreError::InvalidEmail(ref m) if m == MSG_EMAIL_TAKEN));
    }
}

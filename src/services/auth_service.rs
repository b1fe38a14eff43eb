//! Authentication service - login and bearer-token identity resolution.

use async_trait::async_trait;
use std::sync::Arc;

use super::token::{AccessToken, TokenIssuer};
use crate::config::{
    MSG_CHECKING_PASSWORD, MSG_CREATING_TOKEN, MSG_INVALID_PASSWORD, MSG_RESOLVING_IDENTITY,
    MSG_RETRIEVING_USER, MSG_USER_NOT_FOUND,
};
use crate::domain::{Password, PasswordError, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{StoreError, UserRepository};

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check an email/password pair and issue an access token.
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<AccessToken>;

    /// Map a bearer token to the user it was issued for.
    ///
    /// Invalid or expired tokens and tokens for unknown users resolve to
    /// `None`; only store failures are errors.
    async fn resolve_identity(&self, token: &str) -> AppResult<Option<User>>;
}

/// Concrete AuthService over a user store and a token issuer.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenIssuer>,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { users, tokens }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<AccessToken> {
        let user = match self.users.find_by_email(email).await {
            Ok(user) => user,
            Err(e @ StoreError::NotFound) => {
                return Err(AppError::not_found(MSG_USER_NOT_FOUND, e))
            }
            Err(e) => return Err(AppError::internal(MSG_RETRIEVING_USER, e)),
        };

        match Password::from_hash(user.password_hash.as_str()).verify(password) {
            Ok(()) => {}
            Err(e @ PasswordError::Mismatch) => {
                return Err(AppError::bad_request(MSG_INVALID_PASSWORD, e))
            }
            Err(e) => return Err(AppError::internal(MSG_CHECKING_PASSWORD, e)),
        }

        let token = self
            .tokens
            .issue(&user)
            .map_err(|e| AppError::internal(MSG_CREATING_TOKEN, e))?;

        tracing::info!(user_id = user.id, "user authenticated");

        Ok(token)
    }

    async fn resolve_identity(&self, token: &str) -> AppResult<Option<User>> {
        let claims = match self.tokens.verify(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "bearer token rejected");
                return Ok(None);
            }
        };

        match self.users.find_by_id(claims.sub).await {
            Ok(user) => Ok(Some(user)),
            Err(StoreError::NotFound) => {
                tracing::debug!(user_id = claims.sub, "token subject no longer exists");
                Ok(None)
            }
            Err(e) => Err(AppError::internal(MSG_RESOLVING_IDENTITY, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::Utc;
    use jsonwebtoken::errors::ErrorKind;
    use sea_orm::DbErr;

    use crate::domain::UserRole;
    use crate::infra::MockUserRepository;
    use crate::services::token::{Claims, MockTokenIssuer, TokenError};

    const PASSWORD: &str = "correct-horse-battery";

    fn stored_user(password_hash: String) -> User {
        User {
            id: 3,
            email: "ada@example.com".to_string(),
            password_hash,
            role: UserRole::User,
            created_at: Utc::now(),
        }
    }

    fn hashed() -> String {
        Password::new(PASSWORD).unwrap().into_string()
    }

    fn claims_for(sub: i64) -> Claims {
        Claims {
            sub,
            email: "ada@example.com".to_string(),
            role: "user".to_string(),
            exp: Utc::now().timestamp() + 3600,
            iat: Utc::now().timestamp(),
        }
    }

    fn service(repo: MockUserRepository, tokens: MockTokenIssuer) -> Authenticator {
        Authenticator::new(Arc::new(repo), Arc::new(tokens))
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let user = stored_user(hashed());
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(user.clone()));
        let mut tokens = MockTokenIssuer::new();
        tokens.expect_issue().times(1).returning(|u| {
            Ok(AccessToken {
                token: format!("token-for-{}", u.id),
            })
        });

        let token = service(repo, tokens)
            .authenticate("ada@example.com", PASSWORD)
            .await
            .unwrap();

        assert_eq!(token.token, "token-for-3");
    }

    #[tokio::test]
    async fn test_unknown_email_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Err(StoreError::NotFound));
        let mut tokens = MockTokenIssuer::new();
        tokens.expect_issue().never();

        let err = service(repo, tokens)
            .authenticate("nobody@example.com", PASSWORD)
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), MSG_USER_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_and_hides_cause() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Err(StoreError::Database(DbErr::Custom("pool exhausted".into()))));

        let err = service(repo, MockTokenIssuer::new())
            .authenticate("ada@example.com", PASSWORD)
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), MSG_RETRIEVING_USER);
        assert!(err.cause().to_string().contains("pool exhausted"));
    }

    #[tokio::test]
    async fn test_wrong_password_is_bad_request_with_distinct_message() {
        let user = stored_user(hashed());
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(user.clone()));
        let mut tokens = MockTokenIssuer::new();
        tokens.expect_issue().never();

        let err = service(repo, tokens)
            .authenticate("ada@example.com", "wrong-password")
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), MSG_INVALID_PASSWORD);
        assert_ne!(err.message(), MSG_USER_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_stored_hash_is_internal() {
        let user = stored_user("plaintext-oops".to_string());
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(user.clone()));

        let err = service(repo, MockTokenIssuer::new())
            .authenticate("ada@example.com", PASSWORD)
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), MSG_CHECKING_PASSWORD);
    }

    #[tokio::test]
    async fn test_token_failure_is_internal() {
        let user = stored_user(hashed());
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(user.clone()));
        let mut tokens = MockTokenIssuer::new();
        tokens
            .expect_issue()
            .returning(|_| Err(TokenError::from(jsonwebtoken::errors::Error::from(ErrorKind::InvalidKeyFormat))));

        let err = service(repo, tokens)
            .authenticate("ada@example.com", PASSWORD)
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), MSG_CREATING_TOKEN);
    }

    #[tokio::test]
    async fn test_resolve_identity_valid_token() {
        let user = stored_user(hashed());
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(user.clone()));
        let mut tokens = MockTokenIssuer::new();
        tokens.expect_verify().returning(|_| Ok(claims_for(3)));

        let identity = service(repo, tokens).resolve_identity("t").await.unwrap();

        assert_eq!(identity.map(|u| u.id), Some(3));
    }

    #[tokio::test]
    async fn test_resolve_identity_invalid_token_is_anonymous() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().never();
        let mut tokens = MockTokenIssuer::new();
        tokens
            .expect_verify()
            .returning(|_| Err(TokenError::from(jsonwebtoken::errors::Error::from(ErrorKind::ExpiredSignature))));

        let identity = service(repo, tokens).resolve_identity("t").await.unwrap();

        assert!(identity.is_none());
    }

    #[tokio::test]
    async fn test_resolve_identity_deleted_subject_is_anonymous() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Err(StoreError::NotFound));
        let mut tokens = MockTokenIssuer::new();
        tokens.expect_verify().returning(|_| Ok(claims_for(99)));

        let identity = service(repo, tokens).resolve_identity("t").await.unwrap();

        assert!(identity.is_none());
    }

    #[tokio::test]
    async fn test_resolve_identity_store_failure_is_internal() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Err(StoreError::Database(DbErr::Custom("timeout".into()))));
        let mut tokens = MockTokenIssuer::new();
        tokens.expect_verify().returning(|_| Ok(claims_for(3)));

        let err = service(repo, tokens).resolve_identity("t").await.unwrap_err();

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), MSG_RESOLVING_IDENTITY);
    }
}

//! Authentication service for bearer session tokens.

use hmac::{Hmac, Mac};
use rand::Rng;
use rand::distr::Alphanumeric;
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::repositories::SessionRepository;
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Length of generated raw session tokens.
const TOKEN_LENGTH: usize = 40;

/// Service authenticating requests via bearer session tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before
/// storage and comparison. An attacker with read-only access to the database
/// cannot verify or forge tokens without the server-side secret.
pub struct AuthService<R: SessionRepository> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: SessionRepository> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - session repository for DB operations
    /// - `signing_secret` - HMAC key; must match the value used when sessions were issued
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    pub fn token_hash(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Authenticates a raw token and returns the principal's user id.
    ///
    /// On successful authentication, updates the `last_used_at` timestamp for
    /// monitoring and audit purposes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or revoked.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<i64, AppError> {
        let token_hash = self.token_hash(token);

        let user_id = self.repository.resolve_user(&token_hash).await?;

        let Some(user_id) = user_id else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid or revoked token"}),
            ));
        };

        let _ = self.repository.touch(&token_hash).await;

        Ok(user_id)
    }

    /// Issues a new session for a user and returns the raw token.
    ///
    /// The raw token is shown exactly once; only its hash is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn issue(&self, user_id: i64, name: Option<&str>) -> Result<String, AppError> {
        let token: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect();

        self.repository
            .create(user_id, &self.token_hash(&token), name)
            .await?;

        Ok(token)
    }

    /// Revokes a session by raw token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the token is unknown or already revoked.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn revoke(&self, token: &str) -> Result<(), AppError> {
        let revoked = self.repository.revoke(&self.token_hash(token)).await?;

        if !revoked {
            return Err(AppError::not_found("Session not found", json!({})));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockSessionRepository;

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    fn compute_expected_hash(token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(test_secret().as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut mock_repo = MockSessionRepository::new();

        let token = "valid-token";
        let expected_hash = compute_expected_hash(token);

        mock_repo
            .expect_resolve_user()
            .withf(move |hash| hash == expected_hash)
            .times(1)
            .returning(|_| Ok(Some(42)));

        mock_repo.expect_touch().times(1).returning(|_| Ok(()));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let user_id = service.authenticate(token).await.unwrap();

        assert_eq!(user_id, 42);
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token() {
        let mut mock_repo = MockSessionRepository::new();

        mock_repo
            .expect_resolve_user()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let result = service.authenticate("invalid-token").await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_issue_stores_hash_not_token() {
        let mut mock_repo = MockSessionRepository::new();

        mock_repo
            .expect_create()
            .withf(|_, hash, _| hash.len() == 64 && hash.chars().all(|c| c.is_ascii_hexdigit()))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let token = service.issue(1, Some("CLI")).await.unwrap();

        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_revoke_unknown_session() {
        let mut mock_repo = MockSessionRepository::new();

        mock_repo.expect_revoke().times(1).returning(|_| Ok(false));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let result = service.revoke("gone").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_hash_token_consistency() {
        let mock_repo = MockSessionRepository::new();
        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let hash1 = service.token_hash("test-token");
        let hash2 = service.token_hash("test-token");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[tokio::test]
    async fn test_hash_token_secret_matters() {
        let svc1 = AuthService::new(Arc::new(MockSessionRepository::new()), "secret-a".to_string());
        let svc2 = AuthService::new(Arc::new(MockSessionRepository::new()), "secret-b".to_string());

        assert_ne!(svc1.token_hash("token"), svc2.token_hash("token"));
    }
}

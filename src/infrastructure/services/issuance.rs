//! Issuance service
//!
//! Orchestrates the only multi-entity mutating workflow: atomically
//! creating a user together with its first API key. Validation happens
//! before the store is touched; atomicity is the store's contract.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::api_key::{validate_key, ApiKey, ExpiryPolicy};
use crate::domain::store::CredentialStore;
use crate::domain::user::{validate_email, validate_first_name, NewUser, User};
use crate::domain::DomainError;

/// Request for issuing a new user with its first API key
#[derive(Debug, Clone)]
pub struct IssuanceRequest {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub key: String,
}

/// Service coordinating atomic user + key creation
#[derive(Debug, Clone)]
pub struct IssuanceService {
    store: Arc<dyn CredentialStore>,
    expiry: ExpiryPolicy,
}

impl IssuanceService {
    pub fn new(store: Arc<dyn CredentialStore>, expiry: ExpiryPolicy) -> Self {
        Self { store, expiry }
    }

    /// Issue a new user with its first API key
    ///
    /// Either both entities persist or neither does; the system never
    /// observes a user without its key as a result of this call.
    pub async fn issue(&self, request: IssuanceRequest) -> Result<(User, ApiKey), DomainError> {
        validate_first_name(&request.first_name)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_key(&request.key).map_err(|e| DomainError::validation(e.to_string()))?;

        let expires_at = self.expiry.compute_expiry(Utc::now());

        let (user, api_key) = self
            .store
            .create_user_with_key(
                NewUser::new(request.first_name, request.last_name, request.email),
                &request.key,
                expires_at,
            )
            .await?;

        info!(
            user_id = %user.id(),
            key_id = %api_key.id(),
            expires_at = %api_key.expires_at(),
            "Issued new user with API key"
        );

        Ok((user, api_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::InMemoryCredentialStore;

    fn service() -> IssuanceService {
        IssuanceService::new(
            Arc::new(InMemoryCredentialStore::new()),
            ExpiryPolicy::new(),
        )
    }

    fn request(email: &str, key: &str) -> IssuanceRequest {
        IssuanceRequest {
            first_name: "Ada".to_string(),
            last_name: Some("Lovelace".to_string()),
            email: email.to_string(),
            key: key.to_string(),
        }
    }

    #[tokio::test]
    async fn test_issue_creates_user_and_bound_key() {
        let service = service();

        let (user, key) = service
            .issue(request("ada@x.com", "sk-co-vi-abc.XYZ"))
            .await
            .unwrap();

        assert_eq!(user.email(), "ada@x.com");
        assert_eq!(key.key(), "sk-co-vi-abc.XYZ");
        assert_eq!(key.owner_id(), user.id());
    }

    #[tokio::test]
    async fn test_issue_expiry_is_one_calendar_year_out() {
        use chrono::Datelike;

        let service = service();
        let before = Utc::now();

        let (_, key) = service
            .issue(request("ada@x.com", "sk-co-vi-abc.XYZ"))
            .await
            .unwrap();

        assert!(key.expires_at() > before);
        assert_eq!(key.expires_at().year(), before.year() + 1);
    }

    #[tokio::test]
    async fn test_issue_rejects_empty_first_name() {
        let service = service();
        let mut req = request("ada@x.com", "sk-co-vi-abc.XYZ");
        req.first_name = "  ".to_string();

        let err = service.issue(req).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_issue_rejects_empty_email_and_key() {
        let service = service();

        let err = service
            .issue(request("", "sk-co-vi-abc.XYZ"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));

        let err = service.issue(request("ada@x.com", "")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_issue_last_name_is_optional() {
        let service = service();
        let mut req = request("ada@x.com", "sk-co-vi-abc.XYZ");
        req.last_name = None;

        let (user, _) = service.issue(req).await.unwrap();
        assert_eq!(user.last_name(), None);
    }

    #[tokio::test]
    async fn test_issue_duplicate_email_fails_second_call() {
        let service = service();

        service
            .issue(request("ada@x.com", "sk-co-vi-abc.ONE"))
            .await
            .unwrap();

        let err = service
            .issue(request("ada@x.com", "sk-co-vi-abc.TWO"))
            .await
            .unwrap_err();

        assert!(err.is_duplicate());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_issue_same_key_admits_exactly_one() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let service = IssuanceService::new(store.clone(), ExpiryPolicy::new());

        let first = tokio::spawn({
            let service = service.clone();
            async move { service.issue(request("ada@x.com", "sk-co-vi-abc.SHARED")).await }
        });
        let second = tokio::spawn({
            let service = service.clone();
            async move { service.issue(request("grace@x.com", "sk-co-vi-abc.SHARED")).await }
        });

        let (first, second) = tokio::join!(first, second);
        let (first, second) = (first.unwrap(), second.unwrap());

        assert_eq!(first.is_ok() as usize + second.is_ok() as usize, 1);
        let err = first.err().or(second.err()).unwrap();
        assert!(err.is_duplicate());

        // The loser left nothing behind: exactly one complete pair exists.
        let users = store.list_users_with_keys().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].api_keys.len(), 1);
        assert_eq!(store.list_api_keys_with_owner_email().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_issue_same_email_admits_exactly_one() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let service = IssuanceService::new(store.clone(), ExpiryPolicy::new());

        let first = tokio::spawn({
            let service = service.clone();
            async move { service.issue(request("ada@x.com", "sk-co-vi-abc.ONE")).await }
        });
        let second = tokio::spawn({
            let service = service.clone();
            async move { service.issue(request("ada@x.com", "sk-co-vi-abc.TWO")).await }
        });

        let (first, second) = tokio::join!(first, second);
        let (first, second) = (first.unwrap(), second.unwrap());

        assert_eq!(first.is_ok() as usize + second.is_ok() as usize, 1);
        assert!(first.err().or(second.err()).unwrap().is_duplicate());

        let users = store.list_users_with_keys().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].api_keys.len(), 1);
    }

    #[tokio::test]
    async fn test_validation_failure_touches_nothing() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let service = IssuanceService::new(store.clone(), ExpiryPolicy::new());

        service.issue(request("ada@x.com", " ")).await.unwrap_err();

        assert!(store.list_users_with_keys().await.unwrap().is_empty());
    }
}

//! Revocation service
//!
//! Deletes a user and relies on the store's cascade guarantee to remove
//! all owned API keys atomically.

use std::sync::Arc;

use tracing::info;

use crate::domain::store::CredentialStore;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Outcome of a successful revocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revocation {
    pub deleted_user_id: UserId,
    /// Number of API keys removed along with the user; informational only
    pub cascade_count: u64,
}

/// Service coordinating cascading user deletion
#[derive(Debug, Clone)]
pub struct RevocationService {
    store: Arc<dyn CredentialStore>,
}

impl RevocationService {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Delete a user and all API keys it owns
    pub async fn revoke_user(&self, id: UserId) -> Result<Revocation, DomainError> {
        let user = self
            .store
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        // The user may disappear between lookup and delete; treat that
        // the same as not finding it in the first place.
        let cascade_count = self
            .store
            .delete_user(user.id())
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        info!(
            user_id = %user.id(),
            email = %user.email(),
            cascade_count,
            "Revoked user and cascaded key deletion"
        );

        Ok(Revocation {
            deleted_user_id: user.id(),
            cascade_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::api_key::NewApiKey;
    use crate::domain::user::NewUser;
    use crate::infrastructure::store::InMemoryCredentialStore;
    use chrono::Utc;

    #[tokio::test]
    async fn test_revoke_missing_user_is_not_found() {
        let service = RevocationService::new(Arc::new(InMemoryCredentialStore::new()));

        let err = service.revoke_user(UserId::new(7)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_revoke_reports_exact_cascade_count() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let service = RevocationService::new(store.clone());

        let expires = Utc::now() + chrono::Duration::days(365);
        let (user, _) = store
            .create_user_with_key(
                NewUser::new("Ada", None, "ada@x.com"),
                "sk-co-vi-a.1",
                expires,
            )
            .await
            .unwrap();
        store
            .create_api_key(NewApiKey::new("sk-co-vi-a.2", expires, user.id()))
            .await
            .unwrap();
        store
            .create_api_key(NewApiKey::new("sk-co-vi-a.3", expires, user.id()))
            .await
            .unwrap();

        let revocation = service.revoke_user(user.id()).await.unwrap();

        assert_eq!(revocation.deleted_user_id, user.id());
        assert_eq!(revocation.cascade_count, 3);
        assert!(store.find_user_by_id(user.id()).await.unwrap().is_none());
        assert!(store
            .list_api_keys_with_owner_email()
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_revoke_leaves_other_users_untouched() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let service = RevocationService::new(store.clone());

        let expires = Utc::now() + chrono::Duration::days(365);
        let (victim, _) = store
            .create_user_with_key(NewUser::new("Ada", None, "ada@x.com"), "sk-co-vi-a.1", expires)
            .await
            .unwrap();
        store
            .create_user_with_key(
                NewUser::new("Grace", None, "grace@x.com"),
                "sk-co-vi-g.1",
                expires,
            )
            .await
            .unwrap();

        service.revoke_user(victim.id()).await.unwrap();

        let remaining = store.list_users_with_keys().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].user.email(), "grace@x.com");
        assert_eq!(remaining[0].api_keys.len(), 1);
    }
}

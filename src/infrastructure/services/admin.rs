//! Admin registration and login
//!
//! Login compares the supplied password against the stored value with
//! plain equality, preserving current behavior. Storing clear-text
//! passwords is a known weakness of this system; replacing it with a
//! salted hash is a policy change outside this service's contract.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::admin::{Admin, NewAdmin};
use crate::domain::store::CredentialStore;
use crate::domain::user::validate_email;
use crate::domain::DomainError;

/// Service for admin account management
#[derive(Debug, Clone)]
pub struct AdminService {
    store: Arc<dyn CredentialStore>,
}

impl AdminService {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Register a new admin, enforcing email uniqueness
    pub async fn register(&self, email: &str, password: &str) -> Result<Admin, DomainError> {
        validate_email(email).map_err(|e| DomainError::validation(e.to_string()))?;

        if password.is_empty() {
            return Err(DomainError::validation("Password is required"));
        }

        let admin = self
            .store
            .create_admin(NewAdmin::new(email, password))
            .await?;

        info!(admin_id = %admin.id(), email = %admin.email(), "Registered admin");

        Ok(admin)
    }

    /// Authenticate an admin by email and password
    ///
    /// Returns `None` for an unknown email or a wrong password; the two
    /// cases are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<Admin>, DomainError> {
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::validation("Email and password are required"));
        }

        let admin = match self.store.find_admin_by_email(email).await? {
            Some(admin) => admin,
            None => {
                warn!(email, "Admin login failed: unknown email");
                return Ok(None);
            }
        };

        if admin.password() != password {
            warn!(email, "Admin login failed: wrong password");
            return Ok(None);
        }

        Ok(Some(admin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::InMemoryCredentialStore;

    fn service() -> AdminService {
        AdminService::new(Arc::new(InMemoryCredentialStore::new()))
    }

    #[tokio::test]
    async fn test_register_and_login_round_trip() {
        let service = service();

        let registered = service.register("ops@x.com", "secret").await.unwrap();
        let logged_in = service.login("ops@x.com", "secret").await.unwrap();

        assert_eq!(logged_in.unwrap().id(), registered.id());
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let service = service();

        service.register("ops@x.com", "secret").await.unwrap();
        let err = service.register("ops@x.com", "other").await.unwrap_err();

        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn test_register_rejects_missing_fields() {
        let service = service();

        assert!(matches!(
            service.register("", "secret").await.unwrap_err(),
            DomainError::Validation { .. }
        ));
        assert!(matches!(
            service.register("ops@x.com", "").await.unwrap_err(),
            DomainError::Validation { .. }
        ));
    }

    #[tokio::test]
    async fn test_login_wrong_password_and_unknown_email_look_alike() {
        let service = service();
        service.register("ops@x.com", "secret").await.unwrap();

        assert!(service.login("ops@x.com", "wrong").await.unwrap().is_none());
        assert!(service
            .login("nobody@x.com", "secret")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_login_rejects_empty_input() {
        let service = service();

        let err = service.login("", "").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }
}

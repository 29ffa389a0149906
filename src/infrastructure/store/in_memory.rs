//! In-memory credential store
//!
//! Useful for testing and development. Data is lost when the process
//! terminates. A single write lock over the whole state makes every
//! multi-entity operation atomic, mirroring the transactional guarantees
//! of the PostgreSQL store.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::admin::{Admin, AdminId, NewAdmin};
use crate::domain::api_key::{ApiKey, ApiKeyId, NewApiKey};
use crate::domain::store::{ApiKeyWithOwner, CredentialStore, KeySummary, UserWithKeys};
use crate::domain::user::{NewUser, User, UserId};
use crate::domain::{DomainError, DuplicateField};

#[derive(Debug, Default)]
struct Inner {
    users: BTreeMap<i64, User>,
    api_keys: BTreeMap<i64, ApiKey>,
    admins: BTreeMap<i64, Admin>,
    next_user_id: i64,
    next_key_id: i64,
    next_admin_id: i64,
}

impl Inner {
    fn email_taken(&self, email: &str) -> bool {
        self.users.values().any(|u| u.email() == email)
    }

    fn key_taken(&self, key: &str) -> bool {
        self.api_keys.values().any(|k| k.key() == key)
    }

    fn insert_user(&mut self, user: NewUser) -> User {
        self.next_user_id += 1;
        let user = User::new(
            UserId::new(self.next_user_id),
            user.first_name,
            user.last_name,
            user.email,
            Utc::now(),
        );
        self.users.insert(user.id().get(), user.clone());
        user
    }

    fn insert_api_key(&mut self, api_key: NewApiKey) -> ApiKey {
        self.next_key_id += 1;
        let api_key = ApiKey::new(
            ApiKeyId::new(self.next_key_id),
            api_key.key,
            api_key.expires_at,
            api_key.owner_id,
            Utc::now(),
        );
        self.api_keys.insert(api_key.id().get(), api_key.clone());
        api_key
    }
}

/// Thread-safe in-memory implementation of [`CredentialStore`]
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    inner: RwLock<Inner>,
}

impl InMemoryCredentialStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>, DomainError> {
        self.inner
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>, DomainError> {
        self.inner
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create_user(&self, user: NewUser) -> Result<User, DomainError> {
        let mut inner = self.write()?;

        if inner.email_taken(&user.email) {
            return Err(DomainError::duplicate(
                DuplicateField::Email,
                format!("Email '{}' is already registered", user.email),
            ));
        }

        Ok(inner.insert_user(user))
    }

    async fn create_api_key(&self, api_key: NewApiKey) -> Result<ApiKey, DomainError> {
        let mut inner = self.write()?;

        if !inner.users.contains_key(&api_key.owner_id.get()) {
            return Err(DomainError::foreign_key(format!(
                "Owner '{}' does not exist",
                api_key.owner_id
            )));
        }

        if inner.key_taken(&api_key.key) {
            return Err(DomainError::duplicate(
                DuplicateField::Key,
                "API key is already registered",
            ));
        }

        Ok(inner.insert_api_key(api_key))
    }

    async fn create_user_with_key(
        &self,
        user: NewUser,
        key: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(User, ApiKey), DomainError> {
        let mut inner = self.write()?;

        // Both uniqueness checks run before either insert so a failure
        // persists neither entity.
        if inner.email_taken(&user.email) {
            return Err(DomainError::duplicate(
                DuplicateField::Email,
                format!("Email '{}' is already registered", user.email),
            ));
        }

        if inner.key_taken(key) {
            return Err(DomainError::duplicate(
                DuplicateField::Key,
                "API key is already registered",
            ));
        }

        let user = inner.insert_user(user);
        let api_key = inner.insert_api_key(NewApiKey::new(key, expires_at, user.id()));

        Ok((user, api_key))
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let inner = self.read()?;
        Ok(inner.users.get(&id.get()).cloned())
    }

    async fn list_users_with_keys(&self) -> Result<Vec<UserWithKeys>, DomainError> {
        let inner = self.read()?;

        // BTreeMap iteration gives ascending id order for both levels.
        let result = inner
            .users
            .values()
            .map(|user| UserWithKeys {
                user: user.clone(),
                api_keys: inner
                    .api_keys
                    .values()
                    .filter(|k| k.owner_id() == user.id())
                    .map(|k| KeySummary {
                        key: k.key().to_string(),
                        expires_at: k.expires_at(),
                    })
                    .collect(),
            })
            .collect();

        Ok(result)
    }

    async fn list_api_keys_with_owner_email(
        &self,
    ) -> Result<Vec<ApiKeyWithOwner>, DomainError> {
        let inner = self.read()?;

        let mut result = Vec::with_capacity(inner.api_keys.len());

        for api_key in inner.api_keys.values() {
            let owner = inner.users.get(&api_key.owner_id().get()).ok_or_else(|| {
                DomainError::storage(format!(
                    "API key '{}' references missing owner '{}'",
                    api_key.id(),
                    api_key.owner_id()
                ))
            })?;

            result.push(ApiKeyWithOwner {
                api_key: api_key.clone(),
                owner_email: owner.email().to_string(),
            });
        }

        Ok(result)
    }

    async fn delete_user(&self, id: UserId) -> Result<Option<u64>, DomainError> {
        let mut inner = self.write()?;

        if inner.users.remove(&id.get()).is_none() {
            return Ok(None);
        }

        let owned: Vec<i64> = inner
            .api_keys
            .values()
            .filter(|k| k.owner_id() == id)
            .map(|k| k.id().get())
            .collect();

        for key_id in &owned {
            inner.api_keys.remove(key_id);
        }

        Ok(Some(owned.len() as u64))
    }

    async fn create_admin(&self, admin: NewAdmin) -> Result<Admin, DomainError> {
        let mut inner = self.write()?;

        if inner.admins.values().any(|a| a.email() == admin.email) {
            return Err(DomainError::duplicate(
                DuplicateField::Email,
                format!("Admin email '{}' is already registered", admin.email),
            ));
        }

        inner.next_admin_id += 1;
        let admin = Admin::new(
            AdminId::new(inner.next_admin_id),
            admin.email,
            admin.password,
            Utc::now(),
        );
        inner.admins.insert(admin.id().get(), admin.clone());

        Ok(admin)
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, DomainError> {
        let inner = self.read()?;
        Ok(inner.admins.values().find(|a| a.email() == email).cloned())
    }
}

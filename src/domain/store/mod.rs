//! Credential store trait
//!
//! The single shared mutable resource of the system. All mutation goes
//! through these constraint-checked operations; multi-entity mutations are
//! transactional inside the implementation so callers never observe partial
//! state.

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::admin::{Admin, NewAdmin};
use crate::domain::api_key::{ApiKey, NewApiKey};
use crate::domain::user::{NewUser, User, UserId};
use crate::domain::DomainError;

/// Projection of an API key as seen in the per-user listing: the key string
/// and its expiry, nothing else.
#[derive(Debug, Clone, Serialize)]
pub struct KeySummary {
    pub key: String,
    pub expires_at: DateTime<Utc>,
}

/// A user joined with the summaries of all keys it owns
#[derive(Debug, Clone, Serialize)]
pub struct UserWithKeys {
    #[serde(flatten)]
    pub user: User,
    pub api_keys: Vec<KeySummary>,
}

/// An API key joined with the email of its owning user
#[derive(Debug, Clone)]
pub struct ApiKeyWithOwner {
    pub api_key: ApiKey,
    pub owner_email: String,
}

/// Durable persistence of users, API keys and admins with constraint
/// enforcement
///
/// Invariants every implementation must uphold:
/// - `users.email` and `api_keys.key` are unique; violations are rejected
///   with [`DomainError::Duplicate`], never silently overwritten.
/// - Every key's `owner_id` references an existing user at all times;
///   deleting a user atomically deletes all owned keys.
/// - `create_user_with_key` is all-or-nothing: a failure on either entity
///   persists neither.
#[async_trait]
pub trait CredentialStore: Send + Sync + Debug {
    /// Create a user, enforcing email uniqueness
    async fn create_user(&self, user: NewUser) -> Result<User, DomainError>;

    /// Create an API key, enforcing key uniqueness and owner existence
    async fn create_api_key(&self, api_key: NewApiKey) -> Result<ApiKey, DomainError>;

    /// Atomically create a user together with its first API key
    ///
    /// Any constraint violation or storage failure rolls back both inserts.
    async fn create_user_with_key(
        &self,
        user: NewUser,
        key: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(User, ApiKey), DomainError>;

    /// Look up a user by id
    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// List all users joined with their key summaries, ordered by ascending
    /// user id (keys ordered by ascending key id within each user)
    async fn list_users_with_keys(&self) -> Result<Vec<UserWithKeys>, DomainError>;

    /// List all API keys joined with their owner's email, ordered by
    /// ascending key id
    async fn list_api_keys_with_owner_email(&self)
        -> Result<Vec<ApiKeyWithOwner>, DomainError>;

    /// Delete a user and cascade to all owned API keys as one atomic
    /// operation
    ///
    /// Returns `Some(cascaded_key_count)` when the user existed, `None`
    /// otherwise.
    async fn delete_user(&self, id: UserId) -> Result<Option<u64>, DomainError>;

    /// Create an admin, enforcing email uniqueness
    async fn create_admin(&self, admin: NewAdmin) -> Result<Admin, DomainError>;

    /// Look up an admin by email
    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, DomainError>;
}

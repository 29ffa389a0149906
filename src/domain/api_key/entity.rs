//! API key entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;

/// API key identifier - numeric, assigned by the store on creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKeyId(i64);

impl ApiKeyId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner numeric value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ApiKeyId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ApiKeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Derived status of an API key
///
/// Never persisted - always recomputed from `expires_at` and the current
/// time so that stored state cannot drift from the expiry rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStatus {
    Active,
    Inactive,
}

impl KeyStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

/// API key entity - a credential bound to exactly one user
///
/// The key string is immutable once issued. The key carries no stored
/// status field; see [`KeyStatus`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKey {
    id: ApiKeyId,
    key: String,
    expires_at: DateTime<Utc>,
    owner_id: UserId,
    created_at: DateTime<Utc>,
}

impl ApiKey {
    /// Reconstruct an API key from stored fields
    pub fn new(
        id: ApiKeyId,
        key: impl Into<String>,
        expires_at: DateTime<Utc>,
        owner_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            key: key.into(),
            expires_at,
            owner_id,
            created_at,
        }
    }

    pub fn id(&self) -> ApiKeyId {
        self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Fields for an API key that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewApiKey {
    pub key: String,
    pub expires_at: DateTime<Utc>,
    pub owner_id: UserId,
}

impl NewApiKey {
    pub fn new(key: impl Into<String>, expires_at: DateTime<Utc>, owner_id: UserId) -> Self {
        Self {
            key: key.into(),
            expires_at,
            owner_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_status_serialization() {
        assert_eq!(
            serde_json::to_string(&KeyStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&KeyStatus::Inactive).unwrap(),
            "\"inactive\""
        );
    }

    #[test]
    fn test_key_status_display() {
        assert_eq!(KeyStatus::Active.to_string(), "active");
        assert_eq!(KeyStatus::Inactive.to_string(), "inactive");
        assert!(KeyStatus::Active.is_active());
        assert!(!KeyStatus::Inactive.is_active());
    }

    #[test]
    fn test_api_key_getters() {
        let now = Utc::now();
        let key = ApiKey::new(
            ApiKeyId::new(3),
            "sk-co-vi-abc.XYZ",
            now + chrono::Duration::days(365),
            UserId::new(1),
            now,
        );

        assert_eq!(key.id().get(), 3);
        assert_eq!(key.key(), "sk-co-vi-abc.XYZ");
        assert_eq!(key.owner_id().get(), 1);
        assert_eq!(key.created_at(), now);
    }
}

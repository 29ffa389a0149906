//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identifier - numeric, assigned by the store on creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner numeric value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User entity - an identity owning zero or more API keys
///
/// Immutable after creation; the only lifecycle transitions are creation
/// through issuance and deletion through revocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    email: String,
    created_at: DateTime<Utc>,
}

impl User {
    /// Reconstruct a user from stored fields
    pub fn new(
        id: UserId,
        first_name: impl Into<String>,
        last_name: Option<String>,
        email: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name,
            email: email.into(),
            created_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Fields for a user that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
}

impl NewUser {
    pub fn new(
        first_name: impl Into<String>,
        last_name: Option<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name,
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_display() {
        assert_eq!(UserId::new(42).to_string(), "42");
        assert_eq!(UserId::from(7).get(), 7);
    }

    #[test]
    fn test_user_getters() {
        let user = User::new(
            UserId::new(1),
            "Ada",
            Some("Lovelace".to_string()),
            "ada@x.com",
            Utc::now(),
        );

        assert_eq!(user.id().get(), 1);
        assert_eq!(user.first_name(), "Ada");
        assert_eq!(user.last_name(), Some("Lovelace"));
        assert_eq!(user.email(), "ada@x.com");
    }

    #[test]
    fn test_user_without_last_name_serializes_compact() {
        let user = User::new(UserId::new(1), "Ada", None, "ada@x.com", Utc::now());
        let json = serde_json::to_string(&user).unwrap();

        assert!(!json.contains("last_name"));
        assert!(json.contains("\"email\":\"ada@x.com\""));
    }
}

//! Admin entity
//!
//! An operator credential pair, independent of the user/key graph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Admin identifier - numeric, assigned by the store on creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminId(i64);

impl AdminId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for AdminId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Admin entity
///
/// The password is stored and compared as clear text per current behavior.
/// This is a flagged weakness, not a design choice to build on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    id: AdminId,
    email: String,
    #[serde(skip_serializing)]
    password: String,
    created_at: DateTime<Utc>,
}

impl Admin {
    /// Reconstruct an admin from stored fields
    pub fn new(
        id: AdminId,
        email: impl Into<String>,
        password: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            password: password.into(),
            created_at,
        }
    }

    pub fn id(&self) -> AdminId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Fields for an admin that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub email: String,
    pub password: String,
}

impl NewAdmin {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

//! Domain layer - Core business logic and entities

pub mod admin;
pub mod api_key;
pub mod error;
pub mod store;
pub mod user;

pub use admin::{Admin, AdminId, NewAdmin};
pub use api_key::{ApiKey, ApiKeyId, ExpiryPolicy, KeyStatus, NewApiKey};
pub use error::{DomainError, DuplicateField};
pub use store::{ApiKeyWithOwner, CredentialStore, KeySummary, UserWithKeys};
pub use user::{NewUser, User, UserId};

//! API key domain
//!
//! Entity types, expiry policy and validation for issued API keys.

mod entity;
mod expiry;
mod validation;

pub use entity::{ApiKey, ApiKeyId, KeyStatus, NewApiKey};
pub use expiry::ExpiryPolicy;
pub use validation::{validate_key, ApiKeyValidationError};

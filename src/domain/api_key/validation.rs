//! API key string validation

use thiserror::Error;

/// Errors that can occur during API key validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiKeyValidationError {
    #[error("API key cannot be empty")]
    EmptyKey,

    #[error("API key exceeds maximum length of {0} characters")]
    KeyTooLong(usize),
}

const MAX_KEY_LENGTH: usize = 255;

/// Validate an API key string supplied at issuance
///
/// The key is opaque: callers may supply their own strings, so only
/// emptiness and storage bounds are checked here. Collision safety comes
/// from the store's unique constraint.
pub fn validate_key(key: &str) -> Result<(), ApiKeyValidationError> {
    if key.trim().is_empty() {
        return Err(ApiKeyValidationError::EmptyKey);
    }

    if key.len() > MAX_KEY_LENGTH {
        return Err(ApiKeyValidationError::KeyTooLong(MAX_KEY_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_key() {
        assert!(validate_key("sk-co-vi-abc.XYZ").is_ok());
    }

    #[test]
    fn test_empty_key() {
        assert_eq!(validate_key(""), Err(ApiKeyValidationError::EmptyKey));
        assert_eq!(validate_key("  "), Err(ApiKeyValidationError::EmptyKey));
    }

    #[test]
    fn test_key_too_long() {
        let long = "k".repeat(256);
        assert_eq!(
            validate_key(&long),
            Err(ApiKeyValidationError::KeyTooLong(255))
        );
    }
}

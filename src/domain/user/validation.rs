//! User field validation

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("First name is required")]
    EmptyFirstName,

    #[error("First name exceeds maximum length of {0} characters")]
    FirstNameTooLong(usize),

    #[error("Email is required")]
    EmptyEmail,

    #[error("Email exceeds maximum length of {0} characters")]
    EmailTooLong(usize),

    #[error("Email must contain a '@'")]
    MalformedEmail,
}

const MAX_NAME_LENGTH: usize = 255;
const MAX_EMAIL_LENGTH: usize = 255;

/// Validate a first name
///
/// Rules:
/// - Cannot be empty or whitespace-only
/// - Maximum 255 characters
pub fn validate_first_name(first_name: &str) -> Result<(), UserValidationError> {
    if first_name.trim().is_empty() {
        return Err(UserValidationError::EmptyFirstName);
    }

    if first_name.len() > MAX_NAME_LENGTH {
        return Err(UserValidationError::FirstNameTooLong(MAX_NAME_LENGTH));
    }

    Ok(())
}

/// Validate an email address
///
/// Only a shallow shape check; the store's unique constraint is the real
/// gatekeeper and full RFC validation is out of scope.
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.trim().is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(UserValidationError::EmailTooLong(MAX_EMAIL_LENGTH));
    }

    if !email.contains('@') {
        return Err(UserValidationError::MalformedEmail);
    }

    Ok(())
}

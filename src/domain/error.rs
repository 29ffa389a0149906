use thiserror::Error;

/// Which unique column a duplicate credential collided on.
///
/// The store cannot always tell (some backends only report "unique constraint
/// violated"), so `Unknown` is a valid outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    Email,
    Key,
    Unknown,
}

impl std::fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Key => write!(f, "key"),
            Self::Unknown => write!(f, "email or key"),
        }
    }
}

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Duplicate credential ({field}): {message}")]
    Duplicate {
        field: DuplicateField,
        message: String,
    },

    #[error("Foreign key violation: {message}")]
    ForeignKey { message: String },

    #[error("Key generation error: {message}")]
    Generation { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn duplicate(field: DuplicateField, message: impl Into<String>) -> Self {
        Self::Duplicate {
            field,
            message: message.into(),
        }
    }

    pub fn foreign_key(message: impl Into<String>) -> Self {
        Self::ForeignKey {
            message: message.into(),
        }
    }

    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Whether this error is a duplicate-credential conflict
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("User '42' not found");
        assert_eq!(error.to_string(), "Not found: User '42' not found");
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("First name is required");
        assert_eq!(
            error.to_string(),
            "Validation error: First name is required"
        );
    }

    #[test]
    fn test_duplicate_error_carries_field() {
        let error = DomainError::duplicate(DuplicateField::Email, "email already registered");
        assert!(error.is_duplicate());
        assert_eq!(
            error.to_string(),
            "Duplicate credential (email): email already registered"
        );
    }

    #[test]
    fn test_duplicate_unknown_field() {
        let error = DomainError::duplicate(DuplicateField::Unknown, "value already registered");
        assert_eq!(
            error.to_string(),
            "Duplicate credential (email or key): value already registered"
        );
    }
}

//! Custom error types for MileMark
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. The due calculator itself never fails; these
//! errors come from the store, identity and reminder collaborators and from
//! input validation in the service layer.

use thiserror::Error;

/// The main error type for MileMark operations
#[derive(Error, Debug)]
pub enum MileMarkError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Sign-in rejected
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// An operation needed a signed-in user
    #[error("Not logged in. Run 'milemark auth login' first.")]
    NotAuthenticated,

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Reminder scheduling errors
    #[error("Notification error: {0}")]
    Notification(String),
}

impl MileMarkError {
    /// Create a "not found" error for cars
    pub fn car_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Car",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for maintenance types
    pub fn maintenance_type_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Maintenance type",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for MileMarkError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MileMarkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for MileMark operations
pub type MileMarkResult<T> = Result<T, MileMarkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MileMarkError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = MileMarkError::car_not_found("Honda Civic");
        assert_eq!(err.to_string(), "Car not found: Honda Civic");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_duplicate_error() {
        let err = MileMarkError::Duplicate {
            entity_type: "Maintenance type",
            identifier: "Oil Change".into(),
        };
        assert_eq!(
            err.to_string(),
            "Maintenance type already exists: Oil Change"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MileMarkError = io_err.into();
        assert!(matches!(err, MileMarkError::Io(_)));
    }
}

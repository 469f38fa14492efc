//! Error types for the ChosungMarket application.

use thiserror::Error;

/// A shared error type for every layer of the application.
///
/// The variants exist so callers and tests can tell failures apart. The
/// presentation layer collapses all of them into a single display string.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChosungError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// An operation that needs a signed-in user was called without one
    #[error("not logged in")]
    NotLoggedIn,

    /// Data access error (document store layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "document", "JSON", "TOML"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Input rejected before reaching the store
    #[error("Validation error: {0}")]
    Validation(String),

    /// The current user is not allowed to perform the operation
    #[error("Security error: {0}")]
    Security(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChosungError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates a Serialization error for a stored document
    pub fn document(collection: &str, id: &str, message: impl std::fmt::Display) -> Self {
        Self::Serialization {
            format: "document".to_string(),
            message: format!("{}/{}: {}", collection, id, message),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Security error
    pub fn security(message: impl Into<String>) -> Self {
        Self::Security(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a NotLoggedIn error
    pub fn is_not_logged_in(&self) -> bool {
        matches!(self, Self::NotLoggedIn)
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ChosungError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ChosungError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ChosungError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ChosungError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ChosungError>`.
pub type Result<T> = std::result::Result<T, ChosungError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_logged_in_message() {
        assert_eq!(ChosungError::NotLoggedIn.to_string(), "not logged in");
    }

    #[test]
    fn test_document_error_names_location() {
        let err = ChosungError::document("quizGroups", "g-1", "missing field `title`");
        assert!(err.is_serialization());
        assert!(err.to_string().contains("quizGroups/g-1"));
    }

    #[test]
    fn test_not_found_check() {
        let err = ChosungError::not_found("quiz_result", "r-1");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }
}

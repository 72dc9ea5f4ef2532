//! Error types for the entity index
//!
//! Loading can fail structurally (`Malformed`), lookups can miss
//! (`NotFound`), and deferred member lists can fail to load (`Loader`).

use thiserror::Error;

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Main error type for refsite-index
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    /// The raw index violates the nested-list wire format
    #[error("Malformed index at {path}: {message}")]
    Malformed { path: String, message: String },

    /// No entity exists at the requested path
    #[error("Entity not found: {path}")]
    NotFound { path: String },

    /// A deferred member list could not be loaded
    #[error("Failed to load member list '{reference}': {message}")]
    Loader { reference: String, message: String },
}

impl IndexError {
    /// Create a malformed-index error
    pub fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        IndexError::Malformed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(path: impl Into<String>) -> Self {
        IndexError::NotFound { path: path.into() }
    }

    /// Create a loader error
    pub fn loader(reference: impl Into<String>, message: impl Into<String>) -> Self {
        IndexError::Loader {
            reference: reference.into(),
            message: message.into(),
        }
    }

    /// Whether this is the expected outcome of a missed lookup
    pub fn is_not_found(&self) -> bool {
        matches!(self, IndexError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let err = IndexError::malformed("crab::opt", "node has neither target nor children");
        let msg = err.to_string();
        assert!(msg.contains("crab::opt"));
        assert!(msg.contains("neither target nor children"));
    }

    #[test]
    fn test_not_found() {
        let err = IndexError::not_found("A::C");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Entity not found: A::C");
        assert!(!IndexError::loader("x", "y").is_not_found());
    }
}

//! Error types for rehydration
//!
//! `HighlightError` is per container and never escapes a page: the container
//! keeps its plain rendition. `RehydrateError` covers page-level failures
//! (bad selectors in the options, HTML the rewriter cannot process).

use thiserror::Error;

/// Result type for page-level rehydration
pub type RehydrateResult<T> = Result<T, RehydrateError>;

/// Failure of the highlighting capability for one source fragment
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HighlightError {
    /// No grammar is registered for the language tag
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    /// The engine failed while processing the input
    #[error("Highlighting engine error: {0}")]
    Engine(String),

    /// The highlighting capability is not available
    #[error("Highlighter unavailable: {0}")]
    Unavailable(String),
}

impl HighlightError {
    /// Create an engine error
    pub fn engine(message: impl Into<String>) -> Self {
        HighlightError::Engine(message.into())
    }

    /// Create an unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        HighlightError::Unavailable(message.into())
    }
}

/// Page-level rehydration error
#[derive(Debug, Error)]
pub enum RehydrateError {
    /// A configured CSS selector does not parse
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// The HTML rewriter failed
    #[error("HTML rewriting failed: {0}")]
    Rewrite(#[from] lol_html::errors::RewritingError),
}

impl RehydrateError {
    /// Create a selector error
    pub fn selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        RehydrateError::Selector {
            selector: selector.into(),
            message: message.into(),
        }
    }
}

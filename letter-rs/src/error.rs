//! Error types for letter-rs

use thiserror::Error;

/// Result type alias for composition and rendering
pub type Result<T> = std::result::Result<T, ComposeError>;

/// Composition error types
///
/// Every variant is a deterministic function of the input: retrying the same
/// render yields the same error.
#[derive(Error, Debug)]
pub enum ComposeError {
    /// Unknown theme, reserved theme name or unusable configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Action with a label but no usable URL, or the reverse
    #[error("Malformed action: {0}")]
    MalformedAction(String),

    /// Template rendering failure
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

//! Error type for the host seams.

use thiserror::Error;

/// Errors raised at the host seams (storage, configuration, host bindings).
///
/// Controllers never hand these to the page. A failed write is logged and
/// the visual state is applied anyway.
#[derive(Debug, Error)]
pub enum UiError {
    /// The key-value store rejected a read or write.
    #[error("storage error: {0}")]
    Storage(String),

    /// The page-supplied configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The host environment is missing something it should provide.
    #[error("host error: {0}")]
    Host(String),
}

/// Convenience alias used across the crate.
pub type Result<T, E = UiError> = std::result::Result<T, E>;

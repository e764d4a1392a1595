//! Error types for storefront-core
//!
//! Fetch and normalization errors live next to the code that produces them
//! (`fetch::FetchError`, `product::NormalizeError`, `config::ConfigError`).

use thiserror::Error;

/// Errors that can occur while reading or writing the key-value store
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error while touching the backing file
    #[error("I/O error: {0}")]
    Io(String),

    /// Error during serialization
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl StoreError {
    /// Create a new Serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }
}

/// Shared state was read outside the scope that provides it.
///
/// This is a contract violation rather than a runtime condition: the
/// panicking hooks format this error as their panic message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// A hook ran in a component tree with no matching provider above it
    #[error("{hook} must be used within a {provider}")]
    OutsideProvider {
        /// Name of the hook that was called
        hook: &'static str,
        /// Name of the provider component it requires
        provider: &'static str,
    },
}

impl ScopeError {
    /// Create an OutsideProvider error
    pub fn outside(hook: &'static str, provider: &'static str) -> Self {
        Self::OutsideProvider { hook, provider }
    }
}

/// Errors that can occur when opening a session
#[derive(Debug, Error)]
pub enum SessionError {
    /// Controllers schedule timers and need a tokio runtime to be entered
    #[error("no tokio runtime is active; sessions must be opened inside one")]
    NoRuntime,

    /// The backing store could not be opened
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

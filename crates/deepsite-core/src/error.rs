//! Error types and handling for deepsite-core operations.
//!
//! Every fallible operation in the generation pipeline returns
//! [`Result<T, Error>`](Result). Errors are categorized so that callers (the
//! CLI in particular) can map them to user-facing messages and exit codes.
//!
//! ## Error Categories
//!
//! - **Validation**: the prompt was empty or whitespace-only
//! - **Auth**: no authenticated user was supplied
//! - **Storage**: the persistence backend rejected a read or write
//! - **Not found**: an artifact lookup missed
//! - **Transport**: the generation step failed in a way the fallback could
//!   not absorb
//! - **Ambient**: network, I/O, configuration and serialization failures
//!
//! ## Propagation
//!
//! Failures of the remote generation service are never surfaced: the
//! [`ContentGenerator`](crate::generator::ContentGenerator) replaces them
//! with fallback content. Everything else propagates unchanged.
//!
//! ```rust
//! use deepsite_core::{Error, Prompt};
//!
//! match Prompt::new("   ") {
//!     Err(Error::Validation(msg)) => assert!(msg.contains("prompt")),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use thiserror::Error;

/// The main error type for deepsite-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller input failed validation.
    ///
    /// Raised before any generation or persistence work happens, most
    /// commonly for an empty prompt.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No authenticated user was supplied.
    ///
    /// The caller should redirect to its authentication flow.
    #[error("Authentication required: {0}")]
    AuthRequired(String),

    /// The persistence backend rejected the operation.
    ///
    /// ## Common Causes
    ///
    /// - Constraint violations or row-level policy denials
    /// - Connectivity loss to the remote store
    /// - Unwritable data directory for the file store
    #[error("Storage error: {0}")]
    Storage(String),

    /// Requested artifact was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The generation step failed catastrophically.
    ///
    /// Only produced when the generation task itself dies (panic or
    /// cancellation). Ordinary backend failures are absorbed by fallback.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Network operation failed.
    ///
    /// The underlying `reqwest::Error` is preserved for detailed connection
    /// information.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL is malformed or uses an unsupported scheme.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Check if the error might be recoverable through a retry.
    ///
    /// The pipeline itself never retries; this is a hint for callers that
    /// want to offer a "try again" action.
    ///
    /// ```rust
    /// use deepsite_core::Error;
    ///
    /// assert!(!Error::Validation("empty prompt".into()).is_recoverable());
    /// assert!(!Error::NotFound("abc".into()).is_recoverable());
    /// ```
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            Self::Transport(_) => true,
            _ => false,
        }
    }

    /// Get the error category as a static string identifier.
    ///
    /// - `"validation"`, `"auth"`, `"storage"`, `"not_found"`, `"transport"`
    /// - `"network"`, `"io"`, `"config"`, `"invalid_url"`, `"serialization"`
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::AuthRequired(_) => "auth",
            Self::Storage(_) => "storage",
            Self::NotFound(_) => "not_found",
            Self::Transport(_) => "transport",
            Self::Network(_) => "network",
            Self::Io(_) => "io",
            Self::Config(_) => "config",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

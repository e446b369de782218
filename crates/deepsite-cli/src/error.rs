//! CLI error handling with semantic exit codes.
//!
//! Errors are categorized so shell scripts can react to the kind of failure
//! without parsing messages.
//!
//! # Exit Code Categories
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Command completed successfully |
//! | 1 | `Internal` | Unexpected/internal error |
//! | 2 | `Usage` | Invalid prompt, arguments or configuration |
//! | 3 | `NotFound` | Requested website not found |
//! | 4 | `Auth` | No user supplied, or credentials rejected |
//! | 5 | `Storage` | The store rejected a read or write |
//! | 6 | `Network` | Generation transport or network failure |
//!
//! # Usage
//!
//! ```bash
//! deepsite generate "a bakery"
//! case $? in
//!     0) echo "Saved" ;;
//!     4) echo "Set DEEPSITE_USER first" ;;
//!     *) echo "Other error" ;;
//! esac
//! ```

use std::fmt;

use deepsite_core::Error as CoreError;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,

    /// Invalid prompt, arguments or configuration (exit code 2).
    Usage = 2,

    /// Requested website not found (exit code 3).
    NotFound = 3,

    /// Authentication required or rejected (exit code 4).
    Auth = 4,

    /// Persistence failure (exit code 5).
    Storage = 5,

    /// Transport or network failure (exit code 6).
    Network = 6,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::NotFound => "not found",
            Self::Auth => "authentication required",
            Self::Storage => "storage error",
            Self::Network => "network error",
        }
    }

    /// Category for a core pipeline error.
    #[must_use]
    pub const fn from_core(err: &CoreError) -> Self {
        match err {
            CoreError::Validation(_) | CoreError::Config(_) | CoreError::InvalidUrl(_) => {
                Self::Usage
            },
            CoreError::NotFound(_) => Self::NotFound,
            CoreError::AuthRequired(_) => Self::Auth,
            CoreError::Storage(_) => Self::Storage,
            CoreError::Transport(_) | CoreError::Network(_) => Self::Network,
            CoreError::Io(_) | CoreError::Serialization(_) => Self::Internal,
        }
    }

    /// Infer the error category from an error message.
    ///
    /// Heuristic fallback for errors that were never categorized.
    #[must_use]
    pub fn infer_from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("not found")
            || msg_lower.contains("no such")
            || msg_lower.contains("does not exist")
        {
            return Self::NotFound;
        }

        if msg_lower.contains("authentication")
            || msg_lower.contains("unauthorized")
            || msg_lower.contains("sign in")
        {
            return Self::Auth;
        }

        if msg_lower.contains("network")
            || msg_lower.contains("connection")
            || msg_lower.contains("timed out")
            || msg_lower.contains("unreachable")
        {
            return Self::Network;
        }

        if msg_lower.contains("invalid argument")
            || msg_lower.contains("invalid value")
            || msg_lower.contains("already exists")
        {
            return Self::Usage;
        }

        Self::Internal
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A CLI error with a semantic category for exit code mapping.
///
/// Wraps an `anyhow::Error` with an `ErrorCategory` while preserving the
/// full error chain.
#[derive(Debug)]
pub struct CliError {
    /// The semantic category of this error.
    pub category: ErrorCategory,
    /// The underlying error with full context.
    pub source: anyhow::Error,
}

impl CliError {
    /// Create a new CLI error with explicit category.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }

    /// Create a usage error.
    pub fn usage(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Usage, source)
    }

    /// Create an authentication error.
    pub fn auth(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Auth, source)
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.category.exit_code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Determine the exit code from an `anyhow::Error`.
///
/// Explicit `CliError` categories win, then core error variants anywhere in
/// the chain, then message inference.
#[must_use]
pub fn exit_code_from_error(err: &anyhow::Error) -> u8 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }

    if let Some(core_err) = err.chain().find_map(|e| e.downcast_ref::<CoreError>()) {
        return ErrorCategory::from_core(core_err).exit_code();
    }

    ErrorCategory::infer_from_message(&err.to_string()).exit_code()
}

//! Error types for groupkit.
//!
//! Errors fall into two families: file-local failures (a malformed or
//! unreadable catalog) that the resolver absorbs and logs, and request-global
//! failures that abort a whole search and are reported to the job sink.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the groupkit library.
#[derive(Debug, Error)]
pub enum GroupkitError {
    // Catalog errors
    #[error("Malformed catalog {source_name}: {message}")]
    MalformedDocument {
        source_name: String,
        message: String,
    },

    // Repository errors
    #[error("Failed to scan repositories: {message}")]
    RepoDiscoveryFailed { message: String },

    #[error("Failed to find any repos")]
    RepoNotFound,

    // Package index errors
    #[error("Failed to build package index for {filter}: {message}")]
    IndexBuildFailed { filter: String, message: String },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Search cancelled")]
    Cancelled,

    #[error("Lock poisoned: {what}")]
    LockPoisoned { what: String },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for groupkit operations.
pub type Result<T> = std::result::Result<T, GroupkitError>;

/// Error kinds surfaced through [`crate::backend::JobSink::report_error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    RepoNotFound,
    RepoDiscoveryFailed,
    IndexBuildFailed,
    TransactionCancelled,
    InternalError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::RepoNotFound => "repo-not-found",
            ErrorKind::RepoDiscoveryFailed => "repo-configuration-error",
            ErrorKind::IndexBuildFailed => "failed-initialization",
            ErrorKind::TransactionCancelled => "transaction-cancelled",
            ErrorKind::InternalError => "internal-error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl GroupkitError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        GroupkitError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Map to the kind reported to the job sink.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GroupkitError::RepoNotFound => ErrorKind::RepoNotFound,
            GroupkitError::RepoDiscoveryFailed { .. } => ErrorKind::RepoDiscoveryFailed,
            GroupkitError::IndexBuildFailed { .. } => ErrorKind::IndexBuildFailed,
            GroupkitError::Cancelled => ErrorKind::TransactionCancelled,
            _ => ErrorKind::InternalError,
        }
    }

    /// Whether this error aborts the whole request.
    ///
    /// Malformed and unreadable catalogs only cost their own contribution.
    pub fn is_request_fatal(&self) -> bool {
        !matches!(
            self,
            GroupkitError::MalformedDocument { .. } | GroupkitError::Io { .. }
        )
    }
}

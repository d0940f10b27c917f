//! Cooperative cancellation for group searches.
//!
//! Cancellation is only observed between catalog files and between parser
//! invocations, never in the middle of a parse.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Anything that can be polled for a cancellation request.
///
/// Implemented by [`CancellationToken`] and by job sinks, so the resolver can
/// poll whichever the caller has.
pub trait CancelCheck {
    /// Check if cancellation has been requested.
    fn is_cancelled(&self) -> bool;

    /// Return an error if cancellation has been requested.
    fn check(&self) -> Result<(), CancelledError> {
        if self.is_cancelled() {
            Err(CancelledError)
        } else {
            Ok(())
        }
    }
}

/// A cancellation flag that can be cloned and shared across threads.
///
/// When `cancel()` is called on any clone, all clones observe it.
///
/// ```
/// use groupkit::cancel::{CancelCheck, CancellationToken};
///
/// let token = CancellationToken::new();
/// let job_side = token.clone();
///
/// token.cancel();
/// assert!(job_side.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

impl CancelCheck for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// A check that never reports cancellation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelCheck for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Error returned when an operation is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelledError;

impl std::fmt::Display for CancelledError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Operation was cancelled")
    }
}

impl std::error::Error for CancelledError {}

impl From<CancelledError> for crate::error::GroupkitError {
    fn from(_: CancelledError) -> Self {
        crate::error::GroupkitError::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_token_not_cancelled() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
        assert!(token.check().is_ok());
    }

    #[test]
    fn test_clone_shares_state() {
        let token1 = CancellationToken::new();
        let token2 = token1.clone();

        token1.cancel();

        assert!(token1.is_cancelled());
        assert!(token2.is_cancelled());
        assert_eq!(token2.check(), Err(CancelledError));
    }

    #[test]
    fn test_never_cancel() {
        assert!(NeverCancel.check().is_ok());
    }

    #[test]
    fn test_cancelled_error_converts() {
        let err: crate::error::GroupkitError = CancelledError.into();
        assert!(matches!(err, crate::error::GroupkitError::Cancelled));
    }
}

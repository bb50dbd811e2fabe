//! Error types for queue backend operations.

use thiserror::Error;

/// Failure reported by a [`QueueBackend`](crate::QueueBackend)
///
/// An empty queue is not an error; backends report it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The backend cannot serve the request right now (lock contention,
    /// lost connection, update in progress).
    #[error("Queue unavailable: {message}")]
    Unavailable { message: String },

    /// The backend failed in a way a retry will not fix.
    #[error("Queue backend failure: {message}")]
    Backend { message: String },
}

impl QueueError {
    /// Check if error is transient and the caller should retry
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Unavailable { .. } => true,
            Self::Backend { .. } => false,
        }
    }

    /// Suggested delay before retrying, in seconds
    pub fn retry_after_seconds(&self) -> Option<u64> {
        match self {
            Self::Unavailable { .. } => Some(1),
            Self::Backend { .. } => None,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

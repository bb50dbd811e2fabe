//! Capabilities injected into a transport.
//!
//! A transport never reaches for a global queue. Everything its handlers
//! need arrives through [`Ports`] when the transport is constructed, which
//! keeps handlers stateless and lets tests swap in doubles.

use crate::{Item, QueueResult};
use async_trait::async_trait;
use std::{fmt, sync::Arc};

/// The queue a transport hands items out of
///
/// Implementations own their own concurrency discipline; the server calls
/// `try_fetch_next` concurrently from as many request tasks as are in
/// flight.
#[async_trait]
pub trait QueueBackend: Send + Sync {
    /// Remove and return the next item
    ///
    /// Returns `Ok(None)` when the queue is empty.
    async fn try_fetch_next(&self) -> QueueResult<Option<Item>>;
}

/// Capability bundle shared read-only with a transport
#[derive(Clone, Default)]
pub struct Ports {
    queue: Option<Arc<dyn QueueBackend>>,
}

impl Ports {
    /// Create an empty bundle with no collaborators attached
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bundle backed by the given queue
    pub fn with_queue(queue: Arc<dyn QueueBackend>) -> Self {
        Self { queue: Some(queue) }
    }

    /// The attached queue backend, if any
    pub fn queue(&self) -> Option<&Arc<dyn QueueBackend>> {
        self.queue.as_ref()
    }

    /// Whether a queue backend is attached
    pub fn has_queue(&self) -> bool {
        self.queue.is_some()
    }
}

impl fmt::Debug for Ports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ports")
            .field("queue", &self.queue.as_ref().map(|_| "<QueueBackend>"))
            .finish()
    }
}

#[cfg(test)]
#[path = "ports_tests.rs"]
mod tests;

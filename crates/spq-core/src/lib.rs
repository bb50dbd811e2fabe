//! # SPQ Core
//!
//! Domain types shared by every SPQ server transport.
//!
//! The server itself owns no queue: items are handed out by an external
//! queue backend, reached through the [`Ports`] bundle that each transport
//! receives at construction.
//!
//! ## Module Organization
//!
//! - [`error`] - Errors reported by queue backends
//! - [`item`] - The unit of work a queue hands back
//! - [`ports`] - The [`QueueBackend`] seam and the [`Ports`] bundle
//!
//! ## Usage
//!
//! ```rust
//! use spq_core::{Item, Ports};
//!
//! let ports = Ports::default();
//! assert!(!ports.has_queue());
//!
//! let item = Item::new("job-42");
//! assert_eq!(item.value(), "job-42");
//! ```

pub mod error;
pub mod item;
pub mod ports;

pub use error::QueueError;
pub use item::Item;
pub use ports::{Ports, QueueBackend};

/// Standard result type for queue backend operations
pub type QueueResult<T> = Result<T, QueueError>;

//! The unit of work handed out by a queue.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An item dequeued from a queue backend
///
/// Items are opaque strings to the server; the backend decides what they
/// mean.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    value: String,
}

impl Item {
    /// Create an item wrapping the given value
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Borrow the item's value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consume the item and return its value
    pub fn into_value(self) -> String {
        self.value
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<String> for Item {
    fn from(value: String) -> Self {
        Self { value }
    }
}

impl From<&str> for Item {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod tests;

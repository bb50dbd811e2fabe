//! Response bodies served by the HTTP transport.

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spq_core::Item;

/// Body of a successful `GET /items/next`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextItemResponse {
    pub item: Item,
}

/// JSON error body shared by every failing handler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status: status.as_u16(),
            timestamp: Utc::now(),
        }
    }
}

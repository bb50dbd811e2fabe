//! Error types for startup and request handling

use crate::{config::ServerType, responses::ErrorResponse};
use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use spq_core::QueueError;
use std::path::PathBuf;
use tracing::{error, warn};

/// Configuration loading errors
///
/// Both variants are fatal to startup; there is no retry and no partial
/// configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file {} could not be read: {source}", .path.display())]
    NotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration from {origin} is malformed: {message}")]
    Malformed { origin: String, message: String },
}

/// The configured transport cannot be started
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnsupportedTransportError {
    #[error("invalid service type, supported types are GRPC and HTTP (got '{value}')")]
    Unrecognized { value: String },

    #[error("{transport} transport is not implemented")]
    NotImplemented { transport: ServerType },
}

/// Startup-phase failures
///
/// Every variant is unrecoverable. The bootstrap returns them instead of
/// aborting so the process entry point can pick the exit code.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unsupported transport: {0}")]
    UnsupportedTransport(#[from] UnsupportedTransportError),

    #[error("Failed to bind to address {address}: {source}")]
    BindFailed {
        address: String,
        source: std::io::Error,
    },

    #[error("Server failed: {message}")]
    ServerFailed { message: String },
}

impl StartupError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::BindFailed { .. } => 1,
            Self::ServerFailed { .. } => 2,
            Self::Config(_) => 3,
            Self::UnsupportedTransport(_) => 4,
        }
    }
}

/// `/items/next` handler errors with HTTP status code mapping
///
/// - `404 Not Found`: the queue is empty
/// - `503 Service Unavailable`: the backend failed transiently; carries
///   `Retry-After`
/// - `500 Internal Server Error`: the backend failed permanently; the
///   detail is logged, not returned
#[derive(Debug, thiserror::Error)]
pub enum ItemsHandlerError {
    #[error("Queue is empty")]
    QueueEmpty,

    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),
}

impl IntoResponse for ItemsHandlerError {
    fn into_response(self) -> Response {
        let (status, message, retry_after) = match self {
            Self::QueueEmpty => (StatusCode::NOT_FOUND, self.to_string(), None),
            Self::Queue(ref e) if e.is_transient() => {
                warn!(error = %e, "Queue backend temporarily unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    self.to_string(),
                    e.retry_after_seconds(),
                )
            }
            Self::Queue(ref e) => {
                error!(error = %e, "Queue backend failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error occurred. Please try again later.".to_string(),
                    None,
                )
            }
        };

        let mut response = (status, Json(ErrorResponse::new(status, message))).into_response();

        if let Some(retry_seconds) = retry_after {
            if let Ok(header_value) = HeaderValue::from_str(&retry_seconds.to_string()) {
                response.headers_mut().insert("Retry-After", header_value);
            }
        }

        response
    }
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

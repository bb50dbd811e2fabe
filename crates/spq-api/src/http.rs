//! HTTP transport.
//!
//! The routing table is an [`axum::Router`] owned by the transport instance
//! and built exactly once in [`HttpTransport::new`], so any number of
//! transports can coexist in one process (tests rely on this).
//!
//! Lifecycle:
//!
//! ```text
//! HttpTransport ──bind()──▶ BoundHttpTransport ──serve()──▶ serving
//! ```
//!
//! Serving ends on SIGINT/SIGTERM or a fatal error.

use crate::{
    config::HttpConfig,
    errors::{ItemsHandlerError, StartupError},
    responses::NextItemResponse,
};
use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use spq_core::Ports;
use std::{future::Future, net::SocketAddr};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, instrument, Level};

/// Header carrying the per-request correlation ID
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

// ============================================================================
// Routing
// ============================================================================

/// Create the HTTP router with all endpoints
pub fn create_router(ports: Ports) -> Router {
    Router::new()
        .route("/health", get(handle_health_check))
        .route("/items/next", get(handle_next_item))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logging_middleware))
                .into_inner(),
        )
        .with_state(ports)
}

/// Liveness probe; checks no dependencies.
#[instrument]
async fn handle_health_check() -> StatusCode {
    StatusCode::OK
}

/// Hand out the next queued item
///
/// Without an attached queue backend this answers `200` with an empty
/// body, whatever the request carries.
#[instrument(skip(ports))]
async fn handle_next_item(State(ports): State<Ports>) -> Result<Response, ItemsHandlerError> {
    let Some(queue) = ports.queue() else {
        debug!("No queue backend attached");
        return Ok(StatusCode::OK.into_response());
    };

    match queue.try_fetch_next().await? {
        Some(item) => {
            debug!(item = %item, "Fetched next item");
            Ok(Json(NextItemResponse { item }).into_response())
        }
        None => Err(ItemsHandlerError::QueueEmpty),
    }
}

/// Log level for a completed request, chosen by status class
fn completion_level(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

/// Tags each request with a correlation ID and logs its outcome
///
/// An incoming `x-correlation-id` is kept; otherwise a UUID is generated.
/// The ID is echoed on the response. Method, URI and ID live on the span,
/// so the completion event only adds status and duration.
#[instrument(skip(request, next), fields(
    method = %request.method(),
    uri = %request.uri(),
    correlation_id
))]
async fn request_logging_middleware(mut request: Request, next: Next) -> Response {
    let start = std::time::Instant::now();

    let correlation_id = request
        .headers()
        .get(CORRELATION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    tracing::Span::current().record("correlation_id", correlation_id.as_str());
    request.extensions_mut().insert(correlation_id.clone());

    let mut response = next.run(request).await;

    if let Ok(header_value) = HeaderValue::from_str(&correlation_id) {
        response
            .headers_mut()
            .insert(CORRELATION_ID_HEADER, header_value);
    }

    let status = response.status();
    let duration_ms = start.elapsed().as_millis() as u64;

    // event! needs a constant level at each callsite.
    macro_rules! completed {
        ($level:expr) => {
            tracing::event!(
                $level,
                status = status.as_u16(),
                duration_ms,
                "Request completed"
            )
        };
    }

    let level = completion_level(status);
    if level == Level::ERROR {
        completed!(Level::ERROR);
    } else if level == Level::WARN {
        completed!(Level::WARN);
    } else {
        completed!(Level::INFO);
    }

    response
}

// ============================================================================
// Transport
// ============================================================================

/// HTTP transport that has not opened its socket yet
#[derive(Debug)]
pub struct HttpTransport {
    config: HttpConfig,
    ports: Ports,
    router: Router,
}

impl HttpTransport {
    /// Build the transport and its routing table
    pub fn new(config: HttpConfig, ports: Ports) -> Self {
        let router = create_router(ports.clone());
        Self {
            config,
            ports,
            router,
        }
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    pub fn ports(&self) -> &Ports {
        &self.ports
    }

    /// A handle to the routing table, for driving requests without a socket
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Open the listening socket
    ///
    /// # Errors
    ///
    /// [`StartupError::BindFailed`] if the address is in use or the host
    /// does not resolve.
    pub async fn bind(self) -> Result<BoundHttpTransport, StartupError> {
        let address = self.config.address();

        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| StartupError::BindFailed {
                address: address.clone(),
                source,
            })?;

        let local_addr = listener
            .local_addr()
            .map_err(|source| StartupError::BindFailed {
                address: address.clone(),
                source,
            })?;

        info!(address = %address, local_addr = %local_addr, "HTTP transport bound");

        Ok(BoundHttpTransport {
            listener,
            local_addr,
            router: self.router,
        })
    }

    /// Bind and serve until a shutdown signal or a fatal error
    pub async fn serve(self) -> Result<(), StartupError> {
        self.bind().await?.serve().await
    }
}

/// HTTP transport with an open listening socket
#[derive(Debug)]
pub struct BoundHttpTransport {
    listener: TcpListener,
    local_addr: SocketAddr,
    router: Router,
}

impl BoundHttpTransport {
    /// Address the socket actually bound to (resolves port `0`)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until SIGINT/SIGTERM or a fatal error
    pub async fn serve(self) -> Result<(), StartupError> {
        self.serve_with_shutdown(shutdown_signal()).await
    }

    /// Serve until `signal` resolves or a fatal error
    ///
    /// In-flight requests are allowed to finish once `signal` fires.
    pub async fn serve_with_shutdown<F>(self, signal: F) -> Result<(), StartupError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(address = %self.local_addr, "Starting HTTP server");

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await
            .map_err(|e| StartupError::ServerFailed {
                message: e.to_string(),
            })?;

        info!("HTTP server shutdown complete");
        Ok(())
    }
}

/// Resolves on SIGINT or (on unix) SIGTERM
///
/// If a handler cannot be installed that signal is ignored and the other
/// one still applies.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        },
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;

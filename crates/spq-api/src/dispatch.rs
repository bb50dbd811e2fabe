//! Transport selection.
//!
//! The `ServerType` discriminator is resolved into a closed enum first and
//! then matched exhaustively, so adding a transport is a compile error until
//! every dispatch site handles it.

use crate::{
    config::{Configuration, HttpConfig, ServerType},
    errors::{StartupError, UnsupportedTransportError},
    http::HttpTransport,
};
use spq_core::Ports;
use tracing::{error, info};

/// A constructed, not yet serving, transport
#[derive(Debug)]
pub enum Transport {
    Http(HttpTransport),
}

impl Transport {
    /// The discriminator this transport was selected by
    pub fn server_type(&self) -> ServerType {
        match self {
            Self::Http(_) => ServerType::Http,
        }
    }

    /// Serve until shutdown or a fatal error
    pub async fn serve(self) -> Result<(), StartupError> {
        match self {
            Self::Http(transport) => transport.serve().await,
        }
    }
}

/// Construct the transport named by `config`
///
/// No socket is opened here; a rejected configuration never binds.
///
/// # Errors
///
/// [`StartupError::UnsupportedTransport`] when `ServerType` is not
/// recognized, or names a transport that is reserved but not implemented
/// (`GRPC`).
pub fn select_transport(config: &Configuration, ports: Ports) -> Result<Transport, StartupError> {
    let server_type = config.transport().inspect_err(|e| {
        error!(server_type = %config.server_type, error = %e, "Rejecting configured transport");
    })?;

    match server_type {
        ServerType::Http => {
            let http_config = HttpConfig::from(config);
            info!(
                host = %http_config.host,
                port = http_config.port,
                queue_attached = ports.has_queue(),
                "Selected HTTP transport"
            );
            Ok(Transport::Http(HttpTransport::new(http_config, ports)))
        }
        ServerType::Grpc => {
            error!("GRPC transport requested but not implemented");
            Err(UnsupportedTransportError::NotImplemented {
                transport: server_type,
            }
            .into())
        }
    }
}

/// Select the configured transport and serve on it
///
/// Does not return under normal operation; it returns after a shutdown
/// signal or with the fatal error that stopped startup or serving.
pub async fn run_transport(config: Configuration, ports: Ports) -> Result<(), StartupError> {
    select_transport(&config, ports)?.serve().await
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;

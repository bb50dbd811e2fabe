//! # SPQ API
//!
//! Startup path of the SPQ server: load a configuration document, pick the
//! transport it names, and serve.
//!
//! ```text
//! load_config ──▶ select_transport ──▶ HttpTransport::serve
//!                        │
//!                        └──▶ GRPC (reserved, rejected)
//! ```
//!
//! Every startup failure comes back as a [`StartupError`]; deciding how to
//! log it and which exit code to use is left to the binary.

pub mod config;
pub mod dispatch;
pub mod errors;
pub mod http;
pub mod responses;

pub use config::{load_config, Configuration, HttpConfig, ServerType};
pub use dispatch::{run_transport, select_transport, Transport};
pub use errors::{ConfigError, ItemsHandlerError, StartupError, UnsupportedTransportError};
pub use http::{create_router, BoundHttpTransport, HttpTransport};
pub use responses::{ErrorResponse, NextItemResponse};

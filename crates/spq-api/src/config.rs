//! Configuration document loading.
//!
//! The document names the address to bind and the transport to expose:
//!
//! ```json
//! { "Host": "localhost", "Port": 8080, "ServerType": "HTTP" }
//! ```
//!
//! Nothing is defaulted. A missing or mistyped field is a hard error because
//! it means the operator wrote a broken file, and starting on a guessed
//! address would hide that.

use crate::errors::{ConfigError, UnsupportedTransportError};
use serde::{Deserialize, Serialize};
use std::{fmt, path::Path, str::FromStr};
use tracing::debug;

/// Process configuration, loaded once at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Host to bind to
    #[serde(rename = "Host", alias = "host")]
    pub host: String,

    /// Port to listen on
    #[serde(rename = "Port", alias = "port")]
    pub port: u16,

    /// Transport discriminator, resolved by [`Configuration::transport`]
    #[serde(rename = "ServerType", alias = "server_type")]
    pub server_type: String,
}

impl Configuration {
    /// Decode a JSON configuration document held in memory
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        decode(document, DocumentFormat::Json, "<inline>")
    }

    /// Resolve the transport this configuration asks for
    pub fn transport(&self) -> Result<ServerType, UnsupportedTransportError> {
        self.server_type.parse()
    }
}

/// Transports the server knows how to name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerType {
    Http,
    Grpc,
}

impl ServerType {
    /// The discriminator string used in configuration documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "HTTP",
            Self::Grpc => "GRPC",
        }
    }
}

impl fmt::Display for ServerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServerType {
    type Err = UnsupportedTransportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HTTP" => Ok(Self::Http),
            "GRPC" => Ok(Self::Grpc),
            other => Err(UnsupportedTransportError::Unrecognized {
                value: other.to_string(),
            }),
        }
    }
}

/// Address settings for the HTTP transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

impl HttpConfig {
    /// `host:port` string suitable for binding; IPv6 literals get brackets.
    pub fn address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl From<&Configuration> for HttpConfig {
    fn from(config: &Configuration) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
        }
    }
}

/// Load the configuration document at `path`
///
/// The format follows the file extension: `.toml`, `.yaml`/`.yml`, and
/// JSON for everything else.
///
/// # Errors
///
/// - [`ConfigError::NotFound`] when the file cannot be opened or read
/// - [`ConfigError::Malformed`] when the contents do not decode into a
///   complete [`Configuration`]
pub fn load_config(path: impl AsRef<Path>) -> Result<Configuration, ConfigError> {
    let path = path.as_ref();

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let config = decode(
        &contents,
        DocumentFormat::from_path(path),
        &path.display().to_string(),
    )?;

    debug!(
        path = %path.display(),
        host = %config.host,
        port = config.port,
        server_type = %config.server_type,
        "Loaded configuration"
    );

    Ok(config)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Json,
    Toml,
    Yaml,
}

impl DocumentFormat {
    fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("toml") => Self::Toml,
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

fn decode(
    document: &str,
    format: DocumentFormat,
    origin: &str,
) -> Result<Configuration, ConfigError> {
    let malformed = |message: String| ConfigError::Malformed {
        origin: origin.to_string(),
        message,
    };

    match format {
        DocumentFormat::Json => {
            serde_json::from_str(document).map_err(|e| malformed(e.to_string()))
        }
        DocumentFormat::Toml => toml::from_str(document).map_err(|e| malformed(e.to_string())),
        DocumentFormat::Yaml => {
            serde_yaml::from_str(document).map_err(|e| malformed(e.to_string()))
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

//! Common test utilities for SPQ integration tests
//!
//! This module provides:
//! - Queue backend doubles
//! - Configuration fixtures
//! - Helpers for starting a real server on an ephemeral port

use async_trait::async_trait;
use spq_api::{Configuration, HttpConfig, HttpTransport};
use spq_core::{Item, Ports, QueueBackend, QueueError, QueueResult};
use std::{
    collections::VecDeque,
    io::Write,
    net::SocketAddr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};
use tokio::{sync::oneshot, task::JoinHandle};

// ============================================================================
// Queue doubles
// ============================================================================

/// In-memory FIFO queue double that counts fetch calls
#[allow(dead_code)]
pub struct MockQueue {
    items: Mutex<VecDeque<Item>>,
    fetch_calls: AtomicUsize,
}

#[allow(dead_code)]
impl MockQueue {
    pub fn new() -> Self {
        Self::with_items(&[])
    }

    pub fn with_items(items: &[&str]) -> Self {
        Self {
            items: Mutex::new(items.iter().map(|v| Item::new(*v)).collect()),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    pub fn push(&self, value: &str) {
        self.items.lock().unwrap().push_back(Item::new(value));
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueueBackend for MockQueue {
    async fn try_fetch_next(&self) -> QueueResult<Option<Item>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.items.lock().unwrap().pop_front())
    }
}

/// Queue double that always fails with a preset error
#[allow(dead_code)]
pub struct FailingQueue {
    error: QueueError,
}

#[allow(dead_code)]
impl FailingQueue {
    pub fn unavailable() -> Self {
        Self {
            error: QueueError::Unavailable {
                message: "Update in progress please retry".to_string(),
            },
        }
    }

    pub fn broken() -> Self {
        Self {
            error: QueueError::Backend {
                message: "storage corrupted".to_string(),
            },
        }
    }
}

#[async_trait]
impl QueueBackend for FailingQueue {
    async fn try_fetch_next(&self) -> QueueResult<Option<Item>> {
        Err(self.error.clone())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Configuration for the given transport on an ephemeral loopback port
#[allow(dead_code)]
pub fn loopback_config(server_type: &str) -> Configuration {
    Configuration {
        host: "127.0.0.1".to_string(),
        port: 0,
        server_type: server_type.to_string(),
    }
}

/// Write `contents` to a temporary file with the given suffix
#[allow(dead_code)]
pub fn write_config_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp config file");
    file.write_all(contents.as_bytes())
        .expect("write temp config file");
    file
}

// ============================================================================
// Running servers
// ============================================================================

/// A server serving on a real socket until dropped or shut down
#[allow(dead_code)]
pub struct RunningServer {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<Result<(), spq_api::StartupError>>>,
}

#[allow(dead_code)]
impl RunningServer {
    /// Bind on an ephemeral loopback port and start serving
    pub async fn start(ports: Ports) -> Self {
        let config = HttpConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        };
        let bound = HttpTransport::new(config, ports)
            .bind()
            .await
            .expect("bind test server");
        let addr = bound.local_addr();
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(bound.serve_with_shutdown(async move {
            let _ = rx.await;
        }));

        Self {
            addr,
            shutdown: Some(tx),
            handle: Some(handle),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Signal graceful shutdown and wait for the serve loop to finish
    pub async fn shutdown(mut self) -> Result<(), spq_api::StartupError> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        match self.handle.take() {
            Some(handle) => handle.await.expect("server task panicked"),
            None => Ok(()),
        }
    }
}

impl Drop for RunningServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

//! Server core
//!
//! Binds the command socket and accepts connections, spawning one task per
//! connection.

use log::{error, info};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use crate::account::{MemoryAccountStore, SharedAccountStore};
use crate::client::{ConnectionRegistry, handle_client};
use crate::error::ServerError;
use crate::middleware::logging;
use crate::server::config::ServerConfig;

pub struct Server {
    registry: Arc<Mutex<ConnectionRegistry>>,
    store: SharedAccountStore,
    listener: TcpListener,
    config: Arc<ServerConfig>,
}

impl Server {
    /// Binds with the in-memory reference account store.
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        Self::bind_with_store(config, Arc::new(MemoryAccountStore::new())).await
    }

    /// Binds with a caller-provided account store backend.
    pub async fn bind_with_store(
        config: ServerConfig,
        store: SharedAccountStore,
    ) -> Result<Self, ServerError> {
        let addr = config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;
        info!("Server bound to {}", addr);

        Ok(Self {
            registry: Arc::new(Mutex::new(ConnectionRegistry::new())),
            store,
            listener,
            config: Arc::new(config),
        })
    }

    pub async fn run(&self) {
        info!(
            "Starting session host on {} (max {} clients)",
            self.config.socket_addr(),
            self.config.max_clients
        );

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    logging::log_connection(&addr);

                    let registry = Arc::clone(&self.registry);
                    let store = Arc::clone(&self.store);
                    let config = Arc::clone(&self.config);

                    // Spawn a task for each connection so the accept loop
                    // doesn't block
                    tokio::spawn(async move {
                        handle_client(stream, addr, registry, store, config).await;
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }
}

use crate::{
    server::{FleetHandle, FleetServer},
    ServerConfig,
};

/// A server that owns the lamp fleet, flies the replacement drone, and
/// pushes snapshots to every connected viewer
pub struct Server {
    config: ServerConfig,
    fleet: FleetServer,
    handle: FleetHandle,
}

impl Server {
    /// Create a new Server
    pub fn new(config: ServerConfig) -> Self {
        let (fleet, handle) = FleetServer::new(&config);
        Self {
            config,
            fleet,
            handle,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Handle to the store; stays usable once the store is running
    pub fn handle(&self) -> FleetHandle {
        self.handle.clone()
    }

    /// Starts the store on the current tokio runtime without any transport
    pub fn spawn(self) -> FleetHandle {
        tokio::spawn(self.fleet.run());
        self.handle
    }

    /// Starts the store and serves viewers over WebSocket at the configured
    /// address until the listener fails
    #[cfg(feature = "transport_websocket")]
    pub async fn listen(self) -> Result<(), crate::LampFleetServerError> {
        let listen_addr = self.config.listen_addr;
        let listener = tokio::net::TcpListener::bind(listen_addr)
            .await
            .map_err(|error| crate::LampFleetServerError::Bind {
                address: listen_addr,
                reason: error.to_string(),
            })?;
        let handle = self.spawn();
        crate::transport::websocket::serve(listener, handle).await
    }
}

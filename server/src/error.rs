use std::net::SocketAddr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LampFleetServerError {
    /// Could not bind the viewer listener
    #[error("Failed to bind viewer listener on {address}: {reason}")]
    Bind { address: SocketAddr, reason: String },

    /// Listener stopped accepting connections
    #[error("Viewer listener failed: {reason}")]
    Listener { reason: String },

    /// The store task has stopped; its mailbox is closed
    #[error("Fleet store is not running")]
    StoreUnavailable,
}

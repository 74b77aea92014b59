use thiserror::Error;

#[derive(Debug, Error)]
pub enum LampFleetClientError {
    /// The WebSocket handshake with the server failed
    #[error("Failed to connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    /// Commands are queued faster than the socket takes them
    #[error("Outgoing queue is full")]
    SendQueueFull,

    /// The connection to the server is gone
    #[error("Connection to the server is closed")]
    ConnectionClosed,
}

use thiserror::Error;

/// Errors raised while decoding a payload at the transport boundary.
///
/// Receivers log these and drop the payload; nothing is sent back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// Payload is not JSON, or its fields do not match the message kind
    #[error("Malformed payload: {reason}")]
    Malformed { reason: String },

    /// Payload is a JSON object without a string `type` field
    #[error("Payload has no `type` field")]
    MissingType,

    /// Payload names a message kind this side does not handle
    #[error("Unknown message type '{kind}'")]
    UnknownType { kind: String },

    /// Server message without its `data` snapshot
    #[error("Message of type '{kind}' carries no `data`")]
    MissingData { kind: String },

    /// Failed to serialize an outgoing message
    #[error("Failed to encode message: {reason}")]
    Encode { reason: String },
}

impl MessageError {
    pub(crate) fn malformed(error: serde_json::Error) -> Self {
        MessageError::Malformed {
            reason: error.to_string(),
        }
    }
}

use serde_json::Value;

use crate::{ClientCommand, MessageError, ServerMessage};

pub fn encode_server_message(message: &ServerMessage) -> Result<String, MessageError> {
    serde_json::to_string(message).map_err(|error| MessageError::Encode {
        reason: error.to_string(),
    })
}

pub fn encode_command(command: &ClientCommand) -> Result<String, MessageError> {
    serde_json::to_string(command).map_err(|error| MessageError::Encode {
        reason: error.to_string(),
    })
}

/// Validates and decodes a Client -> Server payload
pub fn decode_command(payload: &str) -> Result<ClientCommand, MessageError> {
    let value = parse_object(payload)?;
    let kind = message_kind(&value, &ClientCommand::KINDS)?;
    log::trace!("decoding '{}' command", kind);
    serde_json::from_value(value).map_err(MessageError::malformed)
}

/// Validates and decodes a Server -> Client payload
pub fn decode_server_message(payload: &str) -> Result<ServerMessage, MessageError> {
    let value = parse_object(payload)?;
    let kind = message_kind(&value, &ServerMessage::KINDS)?;
    if value.get("data").map_or(true, Value::is_null) {
        return Err(MessageError::MissingData {
            kind: kind.to_string(),
        });
    }
    serde_json::from_value(value).map_err(MessageError::malformed)
}

fn parse_object(payload: &str) -> Result<Value, MessageError> {
    let value: Value = serde_json::from_str(payload).map_err(MessageError::malformed)?;
    if !value.is_object() {
        return Err(MessageError::Malformed {
            reason: "payload is not a JSON object".to_string(),
        });
    }
    Ok(value)
}

fn message_kind<'v>(value: &'v Value, known: &[&str]) -> Result<&'v str, MessageError> {
    let Some(kind) = value.get("type").and_then(Value::as_str) else {
        return Err(MessageError::MissingType);
    };
    if !known.contains(&kind) {
        return Err(MessageError::UnknownType {
            kind: kind.to_string(),
        });
    }
    Ok(kind)
}

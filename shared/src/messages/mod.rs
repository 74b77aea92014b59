mod client_command;
mod codec;
mod error;
mod server_message;

pub use client_command::ClientCommand;
pub use codec::{decode_command, decode_server_message, encode_command, encode_server_message};
pub use error::MessageError;
pub use server_message::ServerMessage;

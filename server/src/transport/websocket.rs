use std::{net::SocketAddr, sync::Arc};

use futures_util::{SinkExt, StreamExt};
use log::{debug, info, warn};
use tokio::{
    net::{TcpListener, TcpStream},
    sync::mpsc,
};
use tokio_tungstenite::{
    accept_async,
    tungstenite::{Error as WsError, Message},
};

use lampfleet_shared::decode_command;

use crate::{server::FleetHandle, store::SubscriberKey, LampFleetServerError};

/// Snapshots queued for one viewer before it is considered stalled
const OUTBOUND_CAPACITY: usize = 64;

/// Accepts viewers until the listener fails. Each connection gets its own
/// task; a connection closing only tears down its own subscription.
pub async fn serve(listener: TcpListener, handle: FleetHandle) -> Result<(), LampFleetServerError> {
    match listener.local_addr() {
        Ok(address) => info!("Listening for viewers on ws://{}", address),
        Err(error) => warn!("Listening for viewers on an unknown address: {}", error),
    }

    loop {
        let (stream, address) = listener
            .accept()
            .await
            .map_err(|error| LampFleetServerError::Listener {
                reason: error.to_string(),
            })?;
        tokio::spawn(handle_connection(stream, address, handle.clone()));
    }
}

async fn handle_connection(stream: TcpStream, address: SocketAddr, handle: FleetHandle) {
    let socket = match accept_async(stream).await {
        Ok(socket) => socket,
        Err(error) => {
            warn!("WebSocket handshake with {} failed: {}", address, error);
            return;
        }
    };
    let (mut write, mut read) = socket.split();

    let (outbound, mut outbound_queue) = mpsc::channel::<Arc<str>>(OUTBOUND_CAPACITY);
    let key = match handle.connect(outbound).await {
        Ok(key) => key,
        Err(error) => {
            warn!("Could not subscribe {}: {}", address, error);
            return;
        }
    };
    info!("Viewer {} connected as {:?}", address, key);

    // ends when the socket fails or the store drops a stalled viewer
    let mut writer = tokio::spawn(async move {
        while let Some(payload) = outbound_queue.recv().await {
            if write.send(Message::Text(payload.to_string())).await.is_err() {
                break;
            }
        }
        let _ = write.close().await;
    });

    loop {
        tokio::select! {
            frame = read.next() => {
                if !receive_frame(&handle, key, frame) {
                    break;
                }
            }
            _ = &mut writer => {
                info!("Viewer {} stopped keeping up, closing", address);
                break;
            }
        }
    }

    handle.disconnect(key);
    writer.abort();
    info!("Viewer {} disconnected", address);
}

/// Returns false once the connection is finished
fn receive_frame(
    handle: &FleetHandle,
    key: SubscriberKey,
    frame: Option<Result<Message, WsError>>,
) -> bool {
    match frame {
        Some(Ok(Message::Text(text))) => dispatch(handle, key, &text),
        Some(Ok(Message::Binary(bytes))) => match std::str::from_utf8(&bytes) {
            Ok(text) => dispatch(handle, key, text),
            Err(_) => debug!("Dropping non UTF-8 frame from {:?}", key),
        },
        Some(Ok(Message::Close(_))) | None => return false,
        Some(Ok(_)) => {}
        Some(Err(error)) => {
            debug!("Connection error from {:?}: {}", key, error);
            return false;
        }
    }
    true
}

fn dispatch(handle: &FleetHandle, key: SubscriberKey, payload: &str) {
    match decode_command(payload) {
        Ok(command) => {
            if let Err(error) = handle.send_command(key, command) {
                warn!("Command from {:?} lost: {}", key, error);
            }
        }
        Err(error) => debug!("Dropping payload from {:?}: {}", key, error),
    }
}

use futures_util::{SinkExt, StreamExt};
use log::{debug, info};
use tokio::{
    sync::mpsc::{
        self,
        error::{TryRecvError, TrySendError},
    },
    task::JoinHandle,
};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::{reconciler::LampScene, FleetClient, LampFleetClientError};

/// Frames buffered in each direction. A full inbound queue holds back the
/// socket until the viewer polls again.
const QUEUE_CAPACITY: usize = 64;

/// A live WebSocket connection to a lampfleet server. Reading and writing
/// run on their own tasks; frames are exchanged through queues so the
/// viewer can poll once per frame.
pub struct Connection {
    outbound: mpsc::Sender<String>,
    inbound: mpsc::Receiver<String>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

/// Connects to `url` (e.g. `ws://127.0.0.1:3000`)
pub async fn connect(url: &str) -> Result<Connection, LampFleetClientError> {
    let (socket, _) = connect_async(url)
        .await
        .map_err(|error| LampFleetClientError::Connect {
            url: url.to_string(),
            reason: error.to_string(),
        })?;
    info!("Connected to {}", url);
    let (mut write, mut read) = socket.split();

    let (outbound, mut outbound_queue) = mpsc::channel::<String>(QUEUE_CAPACITY);
    let (inbound_queue, inbound) = mpsc::channel::<String>(QUEUE_CAPACITY);

    let writer = tokio::spawn(async move {
        while let Some(payload) = outbound_queue.recv().await {
            if write.send(Message::Text(payload)).await.is_err() {
                break;
            }
        }
        let _ = write.close().await;
    });

    let reader = tokio::spawn(async move {
        while let Some(frame) = read.next().await {
            let payload = match frame {
                Ok(Message::Text(text)) => text,
                Ok(Message::Binary(bytes)) => match String::from_utf8(bytes) {
                    Ok(text) => text,
                    Err(_) => continue,
                },
                Ok(Message::Close(_)) => break,
                Ok(_) => continue,
                Err(error) => {
                    debug!("Connection error: {}", error);
                    break;
                }
            };
            if inbound_queue.send(payload).await.is_err() {
                break;
            }
        }
        info!("Disconnected from server");
    });

    Ok(Connection {
        outbound,
        inbound,
        reader,
        writer,
    })
}

impl Connection {
    pub fn send(&self, payload: String) -> Result<(), LampFleetClientError> {
        self.outbound.try_send(payload).map_err(|error| match error {
            TrySendError::Full(_) => LampFleetClientError::SendQueueFull,
            TrySendError::Closed(_) => LampFleetClientError::ConnectionClosed,
        })
    }

    /// Next received payload, without waiting
    pub fn try_recv(&mut self) -> Result<Option<String>, LampFleetClientError> {
        match self.inbound.try_recv() {
            Ok(payload) => Ok(Some(payload)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(LampFleetClientError::ConnectionClosed),
        }
    }

    /// Waits for the next payload; `None` once the server is gone
    pub async fn recv(&mut self) -> Option<String> {
        self.inbound.recv().await
    }

    /// Feeds every received payload to `client` and sends everything it has
    /// queued. Returns how many payloads were received.
    pub fn pump<S: LampScene>(
        &mut self,
        client: &mut FleetClient<S>,
    ) -> Result<usize, LampFleetClientError> {
        let mut received = 0;
        while let Some(payload) = self.try_recv()? {
            client.receive(&payload);
            received += 1;
        }
        for payload in client.take_outgoing() {
            self.send(payload)?;
        }
        Ok(received)
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.reader.abort();
        self.writer.abort();
    }
}

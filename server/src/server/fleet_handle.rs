use tokio::sync::{mpsc, oneshot};

use lampfleet_shared::{ClientCommand, Snapshot};

use crate::{
    server::StoreEvent,
    store::{SnapshotSink, SubscriberKey},
    LampFleetServerError,
};

/// Cloneable front door to a running [`crate::FleetServer`].
///
/// Everything sent through a handle is queued and applied by the store in
/// arrival order.
#[derive(Clone)]
pub struct FleetHandle {
    sender: mpsc::UnboundedSender<StoreEvent>,
}

impl FleetHandle {
    pub(crate) fn new(sender: mpsc::UnboundedSender<StoreEvent>) -> Self {
        Self { sender }
    }

    /// Subscribes a viewer. The sink receives the `initial` snapshot first.
    pub async fn connect<S: SnapshotSink + 'static>(
        &self,
        sink: S,
    ) -> Result<SubscriberKey, LampFleetServerError> {
        let (reply, response) = oneshot::channel();
        self.send(StoreEvent::Connect {
            sink: Box::new(sink),
            reply,
        })?;
        response
            .await
            .map_err(|_| LampFleetServerError::StoreUnavailable)
    }

    pub fn disconnect(&self, key: SubscriberKey) {
        // a store that is already gone has nothing left to tear down
        let _ = self.send(StoreEvent::Disconnect(key));
    }

    pub fn send_command(
        &self,
        key: SubscriberKey,
        command: ClientCommand,
    ) -> Result<(), LampFleetServerError> {
        self.send(StoreEvent::Command(key, command))
    }

    /// The store's current snapshot, taken after everything queued so far
    pub async fn snapshot(&self) -> Result<Snapshot, LampFleetServerError> {
        let (reply, response) = oneshot::channel();
        self.send(StoreEvent::Snapshot(reply))?;
        response
            .await
            .map_err(|_| LampFleetServerError::StoreUnavailable)
    }

    pub fn shutdown(&self) {
        let _ = self.send(StoreEvent::Shutdown);
    }

    fn send(&self, event: StoreEvent) -> Result<(), LampFleetServerError> {
        self.sender
            .send(event)
            .map_err(|_| LampFleetServerError::StoreUnavailable)
    }
}

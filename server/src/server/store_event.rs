use tokio::sync::oneshot;

use lampfleet_shared::{ClientCommand, Snapshot};

use crate::store::{FlightKey, SnapshotSink, SubscriberKey};

/// Work items for the store, processed strictly one at a time
pub(crate) enum StoreEvent {
    Connect {
        sink: Box<dyn SnapshotSink>,
        reply: oneshot::Sender<SubscriberKey>,
    },
    Disconnect(SubscriberKey),
    Command(SubscriberKey, ClientCommand),
    Tick(SubscriberKey),
    FlightStep(FlightKey),
    Snapshot(oneshot::Sender<Snapshot>),
    Shutdown,
}

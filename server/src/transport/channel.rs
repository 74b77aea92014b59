use std::sync::{mpsc, Arc};

use tokio::sync::mpsc as tokio_mpsc;

use crate::store::{SinkClosed, SnapshotSink};

impl SnapshotSink for tokio_mpsc::UnboundedSender<Arc<str>> {
    fn deliver(&self, payload: &Arc<str>) -> Result<(), SinkClosed> {
        self.send(payload.clone()).map_err(|_| SinkClosed)
    }
}

/// A full queue counts as closed: a viewer that is that far behind is
/// dropped instead of buffering snapshots without limit.
impl SnapshotSink for tokio_mpsc::Sender<Arc<str>> {
    fn deliver(&self, payload: &Arc<str>) -> Result<(), SinkClosed> {
        self.try_send(payload.clone()).map_err(|_| SinkClosed)
    }
}

impl SnapshotSink for mpsc::Sender<Arc<str>> {
    fn deliver(&self, payload: &Arc<str>) -> Result<(), SinkClosed> {
        self.send(payload.clone()).map_err(|_| SinkClosed)
    }
}

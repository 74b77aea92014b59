use std::{collections::HashMap, sync::Arc};

use log::warn;

use lampfleet_shared::{encode_server_message, ServerMessage};

/// Identifies one connected viewer
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct SubscriberKey(u64);

impl SubscriberKey {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// The receiving end of a viewer has gone away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkClosed;

/// Anything that can carry encoded server messages to one viewer
pub trait SnapshotSink: Send {
    fn deliver(&self, payload: &Arc<str>) -> Result<(), SinkClosed>;
}

/// Connected viewers, fanned out to on every publish
pub struct Subscribers {
    sinks: HashMap<SubscriberKey, Box<dyn SnapshotSink>>,
    next_key: u64,
}

impl Subscribers {
    pub fn new() -> Self {
        Self {
            sinks: HashMap::new(),
            next_key: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn contains(&self, key: &SubscriberKey) -> bool {
        self.sinks.contains_key(key)
    }

    pub fn insert(&mut self, sink: Box<dyn SnapshotSink>) -> SubscriberKey {
        self.next_key += 1;
        let key = SubscriberKey(self.next_key);
        self.sinks.insert(key, sink);
        key
    }

    pub fn remove(&mut self, key: &SubscriberKey) -> bool {
        self.sinks.remove(key).is_some()
    }

    /// Sends to one subscriber; a closed sink is dropped
    pub fn send_to(&mut self, key: &SubscriberKey, message: &ServerMessage) {
        let Some(payload) = encode(message) else {
            return;
        };
        let closed = match self.sinks.get(key) {
            Some(sink) => sink.deliver(&payload).is_err(),
            None => false,
        };
        if closed {
            warn!("Subscriber {:?} closed, dropping it", key);
            self.sinks.remove(key);
        }
    }

    /// Encodes once and sends to every subscriber; closed sinks are dropped
    pub fn publish(&mut self, message: &ServerMessage) {
        if self.sinks.is_empty() {
            return;
        }
        let Some(payload) = encode(message) else {
            return;
        };
        self.sinks.retain(|key, sink| match sink.deliver(&payload) {
            Ok(()) => true,
            Err(SinkClosed) => {
                warn!("Subscriber {:?} closed, dropping it", key);
                false
            }
        });
    }
}

impl Default for Subscribers {
    fn default() -> Self {
        Self::new()
    }
}

fn encode(message: &ServerMessage) -> Option<Arc<str>> {
    match encode_server_message(message) {
        Ok(payload) => Some(payload.into()),
        Err(error) => {
            log::error!("Could not encode snapshot: {}", error);
            None
        }
    }
}

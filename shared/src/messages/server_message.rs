use serde::{Deserialize, Serialize};

use crate::Snapshot;

/// Server -> Client push. The snapshot is always the full fleet state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Sent once, right after a viewer connects
    Initial(Snapshot),
    /// Sent after every mutation and on every periodic tick
    Update(Snapshot),
}

impl ServerMessage {
    pub const KINDS: [&'static str; 2] = ["initial", "update"];

    pub fn snapshot(&self) -> &Snapshot {
        match self {
            ServerMessage::Initial(snapshot) | ServerMessage::Update(snapshot) => snapshot,
        }
    }

    pub fn into_snapshot(self) -> Snapshot {
        match self {
            ServerMessage::Initial(snapshot) | ServerMessage::Update(snapshot) => snapshot,
        }
    }
}

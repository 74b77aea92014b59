use serde::{Deserialize, Serialize};

use crate::{FaultStatus, LampId, TaskId};

/// Client -> Server request. There is no reply; the effect (if any) shows
/// up in the next snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientCommand {
    StartReplacement {
        #[serde(rename = "lampId")]
        lamp_id: LampId,
    },
    CancelReplacement {
        #[serde(rename = "taskId")]
        task_id: TaskId,
    },
    SetLampFault {
        #[serde(rename = "lampId")]
        lamp_id: LampId,
        #[serde(default)]
        status: FaultStatus,
    },
    /// Carries no persisted effect, only triggers a rebroadcast
    UpdateDronePosition {
        #[serde(default)]
        position: serde_json::Value,
    },
}

impl ClientCommand {
    pub const KINDS: [&'static str; 4] = [
        "startReplacement",
        "cancelReplacement",
        "setLampFault",
        "updateDronePosition",
    ];

    pub fn kind(&self) -> &'static str {
        match self {
            ClientCommand::StartReplacement { .. } => Self::KINDS[0],
            ClientCommand::CancelReplacement { .. } => Self::KINDS[1],
            ClientCommand::SetLampFault { .. } => Self::KINDS[2],
            ClientCommand::UpdateDronePosition { .. } => Self::KINDS[3],
        }
    }
}

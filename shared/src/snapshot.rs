use serde::{Deserialize, Serialize};

use crate::{DroneStatus, Lamp, LampId, ReplacementTask};

/// The full state of the fleet at one instant
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub lamps: Vec<Lamp>,
    #[serde(default)]
    pub replacement_tasks: Vec<ReplacementTask>,
    pub drone_status: DroneStatus,
    #[serde(default)]
    pub active_target_lamp_id: Option<LampId>,
}

impl Snapshot {
    pub fn lamp(&self, id: LampId) -> Option<&Lamp> {
        self.lamps.iter().find(|lamp| lamp.id == id)
    }

    /// The task the drone is currently working on, if any
    pub fn active_task(&self) -> Option<&ReplacementTask> {
        self.replacement_tasks
            .iter()
            .find(|task| !task.is_completed())
    }
}

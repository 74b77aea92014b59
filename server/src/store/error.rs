use thiserror::Error;

use lampfleet_shared::{DroneStatus, LampId, TaskId};

/// Reasons a fleet command was not applied.
///
/// Commands that fail are no-ops: nothing changes and nothing is broadcast.
/// These are surfaced to the caller for logging and testing, never to the
/// viewer that sent the command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Referenced lamp is not part of the fleet
    #[error("Lamp {lamp_id} does not exist")]
    UnknownLamp { lamp_id: LampId },

    /// Referenced task is not in the task list
    #[error("Replacement task {task_id} does not exist")]
    UnknownTask { task_id: TaskId },

    /// Single-drone admission control: only an idle drone takes new work
    #[error("Drone is {status}, replacement of lamp {lamp_id} refused")]
    DroneBusy { status: DroneStatus, lamp_id: LampId },

    /// A flight step referenced a task that is not the one being flown
    #[error("Replacement task {task_id} is not the active flight")]
    TaskNotActive { task_id: TaskId },
}

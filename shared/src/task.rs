use serde::{Deserialize, Serialize};

use crate::{LampId, TaskId, TaskStatus};

/// A request to swap the lamp module of one lamp.
///
/// Timestamps are milliseconds since the UNIX epoch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplacementTask {
    pub id: TaskId,
    pub lamp_id: LampId,
    pub status: TaskStatus,
    pub started_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<u64>,
}

impl ReplacementTask {
    pub fn new(id: TaskId, lamp_id: LampId, started_at: u64) -> Self {
        Self {
            id,
            lamp_id,
            status: TaskStatus::Flying,
            started_at,
            completed_at: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    pub fn complete(&mut self, completed_at: u64) {
        self.status = TaskStatus::Completed;
        self.completed_at = Some(completed_at);
    }
}

use std::collections::HashSet;

use lampfleet_shared::{ReplacementTask, TaskId};

/// The viewer's task list, newest first. Completed tasks can be dismissed
/// locally; the server keeps them, so dismissals are remembered across
/// snapshots.
#[derive(Clone, Debug, Default)]
pub struct TaskBoard {
    entries: Vec<ReplacementTask>,
    all: Vec<ReplacementTask>,
    dismissed: HashSet<TaskId>,
}

impl TaskBoard {
    pub fn entries(&self) -> &[ReplacementTask] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_dismissed(&self, task_id: TaskId) -> bool {
        self.dismissed.contains(&task_id)
    }

    /// Hides a completed task. Tasks still in progress stay visible.
    pub fn dismiss(&mut self, task_id: TaskId) -> bool {
        let completed = self
            .all
            .iter()
            .any(|task| task.id == task_id && task.is_completed());
        if !completed {
            return false;
        }
        self.dismissed.insert(task_id);
        self.rebuild();
        true
    }

    pub(crate) fn sync(&mut self, tasks: &[ReplacementTask]) {
        self.all = tasks.to_vec();
        // forget dismissals of tasks the server no longer has
        let present: HashSet<TaskId> = tasks.iter().map(|task| task.id).collect();
        self.dismissed.retain(|task_id| present.contains(task_id));
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let mut entries: Vec<ReplacementTask> = self
            .all
            .iter()
            .filter(|task| !self.dismissed.contains(&task.id))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.started_at.cmp(&a.started_at).then(b.id.cmp(&a.id)));
        self.entries = entries;
    }
}

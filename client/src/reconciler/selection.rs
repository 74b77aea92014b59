use std::collections::BTreeSet;

use lampfleet_shared::LampId;

/// Viewer-local selections. Never sent upstream as state, only as the
/// parameter of a command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    broken: Option<LampId>,
    replace: Option<LampId>,
    focused: Option<LampId>,
}

impl Selection {
    /// Lamp picked in the "mark broken" selector
    pub fn selected_broken(&self) -> Option<LampId> {
        self.broken
    }

    /// Lamp picked in the "replace" selector
    pub fn selected_replace(&self) -> Option<LampId> {
        self.replace
    }

    /// Lamp last clicked in the scene
    pub fn focused(&self) -> Option<LampId> {
        self.focused
    }

    pub(crate) fn select_broken(&mut self, lamp_id: LampId) {
        self.broken = Some(lamp_id);
    }

    pub(crate) fn select_replace(&mut self, lamp_id: LampId) {
        self.replace = Some(lamp_id);
    }

    /// Clicking a lamp selects it everywhere
    pub(crate) fn select_lamp(&mut self, lamp_id: LampId) {
        self.broken = Some(lamp_id);
        self.replace = Some(lamp_id);
        self.focused = Some(lamp_id);
    }

    /// Keeps selections that still exist. A selector whose lamp is gone
    /// falls back to the lowest remaining id; focus is simply dropped.
    pub(crate) fn retain(&mut self, ids: &BTreeSet<LampId>) {
        let lowest = ids.iter().next().copied();
        for selected in [&mut self.broken, &mut self.replace] {
            if !selected.is_some_and(|id| ids.contains(&id)) {
                *selected = lowest;
            }
        }
        if !self.focused.is_some_and(|id| ids.contains(&id)) {
            self.focused = None;
        }
    }
}

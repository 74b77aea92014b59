use lampfleet_shared::{DroneStatus, LampId, LampStatus};

/// One entry of the lamp selectors
#[derive(Clone, Debug, PartialEq)]
pub struct LampRow {
    pub id: LampId,
    pub status: LampStatus,
    pub temperature: f64,
    pub needs_replacement: bool,
    /// Flagged, faulty, or picked in the "mark broken" selector
    pub is_broken: bool,
    pub is_selected_for_replace: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FleetCounters {
    pub total: usize,
    /// Lamps that are on
    pub active: usize,
    /// Lamps flagged for replacement or reporting a fault
    pub fault: usize,
}

/// Derived panel state, recomputed after every reconciliation
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanelView {
    /// Sorted ascending by id
    pub rows: Vec<LampRow>,
    pub counters: FleetCounters,
    pub drone_status: DroneStatus,
    pub active_target: Option<LampId>,
    /// The drone only takes new work while idle
    pub can_start_replacement: bool,
    pub drone_label: String,
}

impl PanelView {
    pub fn row(&self, lamp_id: LampId) -> Option<&LampRow> {
        self.rows.iter().find(|row| row.id == lamp_id)
    }

    pub fn contains(&self, lamp_id: LampId) -> bool {
        self.row(lamp_id).is_some()
    }
}

pub(crate) fn drone_label(status: DroneStatus, target: Option<LampId>) -> String {
    match target {
        Some(lamp_id) => format!("Drone: {} -> lamp {}", status, lamp_id),
        None => format!("Drone: {}", status),
    }
}

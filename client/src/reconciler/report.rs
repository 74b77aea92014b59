use lampfleet_shared::LampId;

/// What one reconciliation did to the scene
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub spawned: Vec<LampId>,
    pub updated: Vec<LampId>,
    pub despawned: Vec<LampId>,
}

impl ReconcileReport {
    /// No entity was created or removed
    pub fn is_stable(&self) -> bool {
        self.spawned.is_empty() && self.despawned.is_empty()
    }
}

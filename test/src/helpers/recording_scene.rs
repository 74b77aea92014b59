use std::collections::BTreeMap;

use lampfleet_client::{LampScene, LampVisual};
use lampfleet_shared::LampId;

/// Handle the reconciler holds for each lamp
#[derive(Debug)]
pub struct SceneEntity {
    pub handle: u64,
    pub lamp_id: LampId,
}

/// A scene that records every call it receives and keeps the last visual
/// drawn for each live entity
#[derive(Default)]
pub struct RecordingScene {
    next_handle: u64,
    live: BTreeMap<u64, LampVisual>,
    pub spawns: usize,
    pub updates: usize,
    pub despawns: usize,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of live entities drawing `lamp_id`
    pub fn entities_for(&self, lamp_id: LampId) -> usize {
        self.live
            .values()
            .filter(|visual| visual.id == lamp_id)
            .count()
    }

    pub fn visual(&self, lamp_id: LampId) -> Option<&LampVisual> {
        self.live.values().find(|visual| visual.id == lamp_id)
    }

    pub fn live_ids(&self) -> Vec<LampId> {
        let mut ids: Vec<LampId> = self.live.values().map(|visual| visual.id).collect();
        ids.sort();
        ids
    }

    pub fn reset_counters(&mut self) {
        self.spawns = 0;
        self.updates = 0;
        self.despawns = 0;
    }
}

impl LampScene for RecordingScene {
    type Entity = SceneEntity;

    fn spawn_lamp(&mut self, visual: &LampVisual) -> SceneEntity {
        self.next_handle += 1;
        self.spawns += 1;
        self.live.insert(self.next_handle, visual.clone());
        SceneEntity {
            handle: self.next_handle,
            lamp_id: visual.id,
        }
    }

    fn update_lamp(&mut self, entity: &mut SceneEntity, visual: &LampVisual) {
        assert_eq!(entity.lamp_id, visual.id, "entity reused for another lamp");
        self.updates += 1;
        let drawn = self
            .live
            .get_mut(&entity.handle)
            .expect("update on a despawned entity");
        *drawn = visual.clone();
    }

    fn despawn_lamp(&mut self, entity: SceneEntity) {
        self.despawns += 1;
        assert!(
            self.live.remove(&entity.handle).is_some(),
            "entity despawned twice"
        );
    }
}

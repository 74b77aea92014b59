use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use lampfleet_shared::{DroneStatus, Lamp, LampId, LampStatus, ReplacementTask, Snapshot, TaskId};

use crate::{
    projection::{GeoProjection, ScenePoint},
    reconciler::{
        panel::{drone_label, FleetCounters, LampRow, PanelView},
        LampScene, LampVisual, ReconcileReport, Selection, TaskBoard,
    },
};

/// Keeps a scene in step with the snapshots pushed by the server.
///
/// Each lamp id maps to exactly one scene entity for as long as the id
/// keeps appearing in snapshots; entities are updated in place and only
/// built or disposed when a lamp appears or disappears.
pub struct Reconciler<S: LampScene> {
    scene: S,
    projection: GeoProjection,
    entities: BTreeMap<LampId, S::Entity>,
    lamps: BTreeMap<LampId, Lamp>,
    tasks: Vec<ReplacementTask>,
    drone_status: DroneStatus,
    active_target: Option<LampId>,
    selection: Selection,
    task_board: TaskBoard,
    panel: PanelView,
}

impl<S: LampScene> Reconciler<S> {
    pub fn new(scene: S, projection: GeoProjection) -> Self {
        Self {
            scene,
            projection,
            entities: BTreeMap::new(),
            lamps: BTreeMap::new(),
            tasks: Vec::new(),
            drone_status: DroneStatus::Idle,
            active_target: None,
            selection: Selection::default(),
            task_board: TaskBoard::default(),
            panel: PanelView {
                drone_label: drone_label(DroneStatus::Idle, None),
                can_start_replacement: true,
                ..PanelView::default()
            },
        }
    }

    // Accessors

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn entity(&self, lamp_id: LampId) -> Option<&S::Entity> {
        self.entities.get(&lamp_id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn lamp(&self, lamp_id: LampId) -> Option<&Lamp> {
        self.lamps.get(&lamp_id)
    }

    pub fn lamps(&self) -> impl Iterator<Item = &Lamp> {
        self.lamps.values()
    }

    pub fn tasks(&self) -> &[ReplacementTask] {
        &self.tasks
    }

    pub fn drone_status(&self) -> DroneStatus {
        self.drone_status
    }

    pub fn active_target(&self) -> Option<LampId> {
        self.active_target
    }

    /// Scene position of the lamp the drone is working on, if that lamp is known
    pub fn target_point(&self) -> Option<ScenePoint> {
        self.active_target
            .and_then(|lamp_id| self.lamps.get(&lamp_id))
            .map(|lamp| self.projection.project(lamp.position))
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn panel(&self) -> &PanelView {
        &self.panel
    }

    pub fn task_board(&self) -> &TaskBoard {
        &self.task_board
    }

    // Reconciliation

    /// Converges the scene and all derived state onto `snapshot`.
    /// Applying the same snapshot twice spawns and despawns nothing the
    /// second time.
    pub fn apply(&mut self, snapshot: &Snapshot) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        // mirrors first, so highlights below see this snapshot's selection
        let incoming: BTreeSet<LampId> = snapshot.lamps.iter().map(|lamp| lamp.id).collect();
        self.lamps.retain(|lamp_id, _| incoming.contains(lamp_id));
        for lamp in &snapshot.lamps {
            self.lamps.insert(lamp.id, lamp.clone());
        }
        self.tasks = snapshot.replacement_tasks.clone();
        self.drone_status = snapshot.drone_status;
        self.active_target = snapshot.active_target_lamp_id;
        self.selection.retain(&incoming);
        self.task_board.sync(&self.tasks);

        // spawn or update
        for lamp_id in &incoming {
            let visual = self.visual(*lamp_id);
            let Some(visual) = visual else {
                continue;
            };
            match self.entities.get_mut(lamp_id) {
                Some(entity) => {
                    self.scene.update_lamp(entity, &visual);
                    report.updated.push(*lamp_id);
                }
                None => {
                    let entity = self.scene.spawn_lamp(&visual);
                    self.entities.insert(*lamp_id, entity);
                    report.spawned.push(*lamp_id);
                }
            }
        }

        // despawn
        let gone: Vec<LampId> = self
            .entities
            .keys()
            .filter(|lamp_id| !incoming.contains(lamp_id))
            .copied()
            .collect();
        for lamp_id in gone {
            if let Some(entity) = self.entities.remove(&lamp_id) {
                self.scene.despawn_lamp(entity);
                report.despawned.push(lamp_id);
            }
        }

        self.rebuild_panel();

        if !report.is_stable() {
            debug!(
                "Reconciled snapshot: spawned {:?}, despawned {:?}",
                report.spawned, report.despawned
            );
        }
        report
    }

    // Local interaction

    /// Picks the lamp for "mark broken". Unknown ids are ignored.
    pub fn select_broken(&mut self, lamp_id: LampId) -> bool {
        if !self.lamps.contains_key(&lamp_id) {
            return false;
        }
        self.selection.select_broken(lamp_id);
        self.refresh_highlights();
        true
    }

    /// Picks the lamp for "replace". Unknown ids are ignored.
    pub fn select_replace(&mut self, lamp_id: LampId) -> bool {
        if !self.lamps.contains_key(&lamp_id) {
            return false;
        }
        self.selection.select_replace(lamp_id);
        self.refresh_highlights();
        true
    }

    /// A click on a lamp in the scene selects it in both selectors
    pub fn select_lamp(&mut self, lamp_id: LampId) -> bool {
        if !self.lamps.contains_key(&lamp_id) {
            return false;
        }
        self.selection.select_lamp(lamp_id);
        self.refresh_highlights();
        true
    }

    pub fn dismiss_task(&mut self, task_id: TaskId) -> bool {
        self.task_board.dismiss(task_id)
    }

    // Private

    fn visual(&self, lamp_id: LampId) -> Option<LampVisual> {
        let lamp = self.lamps.get(&lamp_id)?;
        Some(LampVisual::new(
            lamp,
            self.projection.project(lamp.position),
            self.is_broken(lamp),
            self.selection.selected_replace() == Some(lamp_id),
            self.active_target == Some(lamp_id),
        ))
    }

    fn is_broken(&self, lamp: &Lamp) -> bool {
        lamp.is_broken() || self.selection.selected_broken() == Some(lamp.id)
    }

    /// Pushes selection changes to the scene without a new snapshot
    fn refresh_highlights(&mut self) {
        let lamp_ids: Vec<LampId> = self.entities.keys().copied().collect();
        for lamp_id in lamp_ids {
            let Some(visual) = self.visual(lamp_id) else {
                continue;
            };
            if let Some(entity) = self.entities.get_mut(&lamp_id) {
                self.scene.update_lamp(entity, &visual);
            }
        }
        self.rebuild_panel();
    }

    fn rebuild_panel(&mut self) {
        let rows: Vec<LampRow> = self
            .lamps
            .values()
            .map(|lamp| LampRow {
                id: lamp.id,
                status: lamp.status,
                temperature: lamp.temperature,
                needs_replacement: lamp.needs_replacement,
                is_broken: self.is_broken(lamp),
                is_selected_for_replace: self.selection.selected_replace() == Some(lamp.id),
            })
            .collect();

        let counters = FleetCounters {
            total: self.lamps.len(),
            active: self
                .lamps
                .values()
                .filter(|lamp| lamp.status == LampStatus::On)
                .count(),
            fault: self.lamps.values().filter(|lamp| lamp.is_broken()).count(),
        };

        self.panel = PanelView {
            rows,
            counters,
            drone_status: self.drone_status,
            active_target: self.active_target,
            can_start_replacement: self.drone_status.is_idle(),
            drone_label: drone_label(self.drone_status, self.active_target),
        };
    }
}

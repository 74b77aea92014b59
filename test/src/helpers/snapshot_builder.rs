use lampfleet_server::seed_lamps;
use lampfleet_shared::{
    encode_server_message, DroneStatus, GeoPoint, Lamp, LampId, LampStatus, ReplacementTask,
    ServerMessage, Snapshot, TaskId, TaskStatus,
};

/// Builds snapshots the way the server would push them
#[derive(Default)]
pub struct SnapshotBuilder {
    snapshot: Snapshot,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the fleet a fresh server boots with
    pub fn seeded() -> Self {
        Self {
            snapshot: Snapshot {
                lamps: seed_lamps(),
                ..Snapshot::default()
            },
        }
    }

    /// Adds a lamp on a small grid near the default projection origin
    pub fn lamp(self, id: u32, status: LampStatus) -> Self {
        let offset = f64::from(id) * 0.001;
        self.lamp_at(id, GeoPoint::new(55.75 + offset, 37.61 + offset), status, 25.0)
    }

    pub fn lamp_at(
        mut self,
        id: u32,
        position: GeoPoint,
        status: LampStatus,
        temperature: f64,
    ) -> Self {
        self.snapshot.lamps.retain(|lamp| lamp.id != LampId::new(id));
        self.snapshot
            .lamps
            .push(Lamp::new(LampId::new(id), position, status, temperature, false));
        self
    }

    pub fn without_lamp(mut self, id: u32) -> Self {
        self.snapshot.lamps.retain(|lamp| lamp.id != LampId::new(id));
        self
    }

    pub fn task(mut self, id: u64, lamp_id: u32, status: TaskStatus) -> Self {
        let mut task = ReplacementTask::new(TaskId::new(id), LampId::new(lamp_id), id);
        match status {
            TaskStatus::Completed => task.complete(id + 10_000),
            other => task.status = other,
        }
        self.snapshot.replacement_tasks.push(task);
        self
    }

    pub fn drone(mut self, status: DroneStatus, target: Option<u32>) -> Self {
        self.snapshot.drone_status = status;
        self.snapshot.active_target_lamp_id = target.map(LampId::new);
        self
    }

    pub fn build(self) -> Snapshot {
        self.snapshot
    }

    pub fn update_payload(self) -> String {
        encode_server_message(&ServerMessage::Update(self.snapshot))
            .expect("snapshot always encodes")
    }
}

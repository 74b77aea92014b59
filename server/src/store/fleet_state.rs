use lampfleet_shared::{
    DroneStatus, FaultStatus, Lamp, LampId, LampStatus, ReplacementTask, Snapshot, TaskId,
    TaskStatus, FAULT_TEMPERATURE, REPAIRED_TEMPERATURE,
};

use crate::store::CommandError;

// Drone

/// The single replacement drone. `active_target` is set iff the drone is not idle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Drone {
    status: DroneStatus,
    active_target: Option<LampId>,
}

impl Drone {
    pub fn status(&self) -> DroneStatus {
        self.status
    }

    pub fn active_target(&self) -> Option<LampId> {
        self.active_target
    }

    fn launch(&mut self, lamp_id: LampId) {
        self.status = DroneStatus::Flying;
        self.active_target = Some(lamp_id);
    }

    fn begin_replacing(&mut self) {
        if self.active_target.is_some() {
            self.status = DroneStatus::Replacing;
        }
    }

    fn begin_return(&mut self) {
        if self.active_target.is_some() {
            self.status = DroneStatus::Returning;
        }
    }

    fn land(&mut self) {
        self.status = DroneStatus::Idle;
        self.active_target = None;
    }
}

/// Lamp fields touched when a replacement is dispatched, kept so a recall
/// can put the unrepaired lamp back the way it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LampRestore {
    pub lamp_id: LampId,
    pub status: LampStatus,
    pub needs_replacement: bool,
}

/// Result of an accepted replacement request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dispatch {
    pub task_id: TaskId,
    pub restore: LampRestore,
}

// FleetState

/// Authoritative lamps, tasks and drone. All mutation goes through the
/// methods below, each of which either applies fully or not at all.
#[derive(Clone, Debug)]
pub struct FleetState {
    lamps: Vec<Lamp>,
    tasks: Vec<ReplacementTask>,
    drone: Drone,
    last_task_id: u64,
}

impl FleetState {
    pub fn new(lamps: Vec<Lamp>) -> Self {
        Self {
            lamps,
            tasks: Vec::new(),
            drone: Drone::default(),
            last_task_id: 0,
        }
    }

    pub fn lamps(&self) -> &[Lamp] {
        &self.lamps
    }

    pub fn lamp(&self, lamp_id: LampId) -> Option<&Lamp> {
        self.lamps.iter().find(|lamp| lamp.id == lamp_id)
    }

    pub fn tasks(&self) -> &[ReplacementTask] {
        &self.tasks
    }

    pub fn task(&self, task_id: TaskId) -> Option<&ReplacementTask> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub fn drone(&self) -> &Drone {
        &self.drone
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            lamps: self.lamps.clone(),
            replacement_tasks: self.tasks.clone(),
            drone_status: self.drone.status,
            active_target_lamp_id: self.drone.active_target,
        }
    }

    // Commands

    /// Accepts a replacement only while the drone is idle. The lamp's
    /// replacement flag is cleared; a faulty lamp is parked `off` until its
    /// new module is in.
    pub fn request_replacement(
        &mut self,
        lamp_id: LampId,
        now: u64,
    ) -> Result<Dispatch, CommandError> {
        if !self.drone.status.is_idle() {
            return Err(CommandError::DroneBusy {
                status: self.drone.status,
                lamp_id,
            });
        }
        let task_id = self.next_task_id(now);
        let lamp = self.lamp_mut(lamp_id)?;

        let restore = LampRestore {
            lamp_id,
            status: lamp.status,
            needs_replacement: lamp.needs_replacement,
        };
        lamp.needs_replacement = false;
        if lamp.status == LampStatus::Fault {
            lamp.status = LampStatus::Off;
        }

        self.tasks.push(ReplacementTask::new(task_id, lamp_id, now));
        self.last_task_id = task_id.value();
        self.drone.launch(lamp_id);

        Ok(Dispatch { task_id, restore })
    }

    pub fn mark_lamp_fault(
        &mut self,
        lamp_id: LampId,
        requested: FaultStatus,
    ) -> Result<(), CommandError> {
        let lamp = self.lamp_mut(lamp_id)?;
        lamp.status = requested.into();
        lamp.needs_replacement = true;
        if requested == FaultStatus::Fault {
            lamp.temperature = lamp.temperature.max(FAULT_TEMPERATURE);
        }
        Ok(())
    }

    /// Removes a task from the list and hands it back
    pub fn remove_task(&mut self, task_id: TaskId) -> Result<ReplacementTask, CommandError> {
        let index = self
            .tasks
            .iter()
            .position(|task| task.id == task_id)
            .ok_or(CommandError::UnknownTask { task_id })?;
        Ok(self.tasks.remove(index))
    }

    // Flight transitions

    pub fn enter_replacing(&mut self, task_id: TaskId) -> Result<(), CommandError> {
        let task = self.active_task_mut(task_id)?;
        task.status = TaskStatus::Replacing;
        self.drone.begin_replacing();
        Ok(())
    }

    /// New module installed: lamp back on at 25°C, task completed, drone
    /// heads home.
    pub fn complete_replacement(
        &mut self,
        task_id: TaskId,
        now: u64,
    ) -> Result<LampId, CommandError> {
        let task = self.active_task_mut(task_id)?;
        let lamp_id = task.lamp_id;
        task.complete(now);

        if let Ok(lamp) = self.lamp_mut(lamp_id) {
            lamp.status = LampStatus::On;
            lamp.temperature = REPAIRED_TEMPERATURE;
            lamp.needs_replacement = false;
        }
        self.drone.begin_return();
        Ok(lamp_id)
    }

    /// Sends the drone home without finishing its job
    pub fn recall_drone(&mut self, restore: &LampRestore) {
        if let Ok(lamp) = self.lamp_mut(restore.lamp_id) {
            lamp.needs_replacement |= restore.needs_replacement;
            if restore.status == LampStatus::Fault && lamp.status == LampStatus::Off {
                lamp.status = LampStatus::Fault;
                lamp.temperature = lamp.temperature.max(FAULT_TEMPERATURE);
            }
            if lamp.status == LampStatus::Fault {
                lamp.needs_replacement = true;
            }
        }
        self.drone.begin_return();
    }

    pub fn finish_return(&mut self) {
        self.drone.land();
    }

    /// One step of the temperature random walk for every lit lamp.
    /// `step` yields values in `[0, 1)`.
    pub fn drift_temperatures(&mut self, mut step: impl FnMut() -> f64) {
        for lamp in self.lamps.iter_mut().filter(|lamp| lamp.is_active()) {
            lamp.temperature += step() * 2.0 - 1.0;
            lamp.clamp_temperature();
        }
    }

    // Private

    fn lamp_mut(&mut self, lamp_id: LampId) -> Result<&mut Lamp, CommandError> {
        self.lamps
            .iter_mut()
            .find(|lamp| lamp.id == lamp_id)
            .ok_or(CommandError::UnknownLamp { lamp_id })
    }

    fn active_task_mut(&mut self, task_id: TaskId) -> Result<&mut ReplacementTask, CommandError> {
        self.tasks
            .iter_mut()
            .find(|task| task.id == task_id && !task.is_completed())
            .ok_or(CommandError::TaskNotActive { task_id })
    }

    fn next_task_id(&self, now: u64) -> TaskId {
        TaskId::new(now.max(self.last_task_id + 1))
    }
}

use log::{debug, info, warn};

use lampfleet_shared::{
    ClientCommand, DroneStatus, FaultStatus, Lamp, LampId, ServerMessage, Snapshot, TaskId,
};

use crate::store::{
    flight::{ActiveFlight, FlightKeyGenerator},
    CommandError, FleetState, FlightKey, FlightPhase, FlightSchedule, FlightTimer, SnapshotSink,
    SubscriberKey, Subscribers,
};

/// Single source of truth for the fleet.
///
/// The store is synchronous: every method runs to completion, mutations
/// that succeed end in exactly one publish, and mutations that fail leave
/// state untouched and publish nothing. Timed flight transitions are handed
/// back as [`FlightTimer`]s for the caller to arm; at most one is live at a
/// time.
pub struct FleetStore {
    state: FleetState,
    subscribers: Subscribers,
    schedule: FlightSchedule,
    flight: Option<ActiveFlight>,
    flight_keys: FlightKeyGenerator,
    rng: fastrand::Rng,
}

impl FleetStore {
    pub fn new(lamps: Vec<Lamp>, schedule: FlightSchedule, rng: fastrand::Rng) -> Self {
        Self {
            state: FleetState::new(lamps),
            subscribers: Subscribers::new(),
            schedule,
            flight: None,
            flight_keys: FlightKeyGenerator::new(),
            rng,
        }
    }

    pub fn state(&self) -> &FleetState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn drone_status(&self) -> DroneStatus {
        self.state.drone().status()
    }

    pub fn schedule(&self) -> &FlightSchedule {
        &self.schedule
    }

    /// Key of the one timer whose firing is still meaningful
    pub fn pending_flight_key(&self) -> Option<FlightKey> {
        self.flight.as_ref().map(|flight| flight.pending)
    }

    // Subscribers

    /// Registers a viewer and sends it the `initial` snapshot
    pub fn subscribe(&mut self, sink: Box<dyn SnapshotSink>) -> SubscriberKey {
        let key = self.subscribers.insert(sink);
        let initial = ServerMessage::Initial(self.snapshot());
        self.subscribers.send_to(&key, &initial);
        key
    }

    pub fn unsubscribe(&mut self, key: &SubscriberKey) -> bool {
        self.subscribers.remove(key)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    // Commands

    /// Dispatches a decoded client command. A returned timer must be armed.
    pub fn handle_command(
        &mut self,
        command: ClientCommand,
        now: u64,
    ) -> Result<Option<FlightTimer>, CommandError> {
        match command {
            ClientCommand::StartReplacement { lamp_id } => {
                self.request_replacement(lamp_id, now).map(Some)
            }
            ClientCommand::CancelReplacement { task_id } => self.cancel_replacement(task_id),
            ClientCommand::SetLampFault { lamp_id, status } => {
                self.mark_lamp_fault(lamp_id, status).map(|()| None)
            }
            ClientCommand::UpdateDronePosition { .. } => {
                self.rebroadcast();
                Ok(None)
            }
        }
    }

    pub fn request_replacement(
        &mut self,
        lamp_id: LampId,
        now: u64,
    ) -> Result<FlightTimer, CommandError> {
        let dispatch = self.state.request_replacement(lamp_id, now)?;
        info!(
            "Drone dispatched to lamp {} for task {}",
            lamp_id, dispatch.task_id
        );

        let key = self.flight_keys.generate();
        self.flight = Some(ActiveFlight {
            pending: key,
            phase: FlightPhase::Outbound,
            task_id: Some(dispatch.task_id),
            lamp_id,
            restore: dispatch.restore,
        });
        self.publish();

        Ok(FlightTimer {
            key,
            delay: self.schedule.flying,
        })
    }

    pub fn mark_lamp_fault(
        &mut self,
        lamp_id: LampId,
        requested: FaultStatus,
    ) -> Result<(), CommandError> {
        self.state.mark_lamp_fault(lamp_id, requested)?;
        info!("Lamp {} reported {:?}", lamp_id, requested);
        self.publish();
        Ok(())
    }

    /// Removes a task. Cancelling the task the drone is working on recalls
    /// the drone: the pending timer is invalidated and a single return leg
    /// is scheduled in its place.
    pub fn cancel_replacement(
        &mut self,
        task_id: TaskId,
    ) -> Result<Option<FlightTimer>, CommandError> {
        let task = self.state.remove_task(task_id)?;

        let mut timer = None;
        if let Some(flight) = self.flight.as_mut() {
            if !task.is_completed() && flight.task_id == Some(task_id) {
                info!(
                    "Replacement task {} cancelled, drone recalled from lamp {}",
                    task_id, flight.lamp_id
                );
                let key = self.flight_keys.generate();
                flight.pending = key;
                flight.phase = FlightPhase::Returning;
                flight.task_id = None;
                self.state.recall_drone(&flight.restore);
                timer = Some(FlightTimer {
                    key,
                    delay: self.schedule.cancel_return,
                });
            }
        }
        if timer.is_none() {
            debug!("Replacement task {} removed from the list", task_id);
        }

        self.publish();
        Ok(timer)
    }

    /// Accepted but without persisted effect
    pub fn rebroadcast(&mut self) {
        self.publish();
    }

    // Timers

    /// Runs the flight transition a fired timer stands for. Stale keys are
    /// ignored. Returns the next leg's timer, if any.
    pub fn advance_flight(&mut self, key: FlightKey, now: u64) -> Option<FlightTimer> {
        let Some(flight) = self.flight.as_mut() else {
            debug!("Ignoring flight timer {:?}, no flight active", key);
            return None;
        };
        if flight.pending != key {
            debug!("Ignoring stale flight timer {:?}", key);
            return None;
        }

        let next = match (flight.phase, flight.task_id) {
            (FlightPhase::Outbound, Some(task_id)) => self
                .state
                .enter_replacing(task_id)
                .map(|()| (FlightPhase::Replacing, self.schedule.replacing)),
            (FlightPhase::Replacing, Some(task_id)) => self
                .state
                .complete_replacement(task_id, now)
                .map(|_| (FlightPhase::Returning, self.schedule.returning)),
            // the task is gone once the drone heads home
            (FlightPhase::Returning, _) | (_, None) => {
                self.state.finish_return();
                self.flight = None;
                info!("Drone back at base");
                self.publish();
                return None;
            }
        };

        let timer = match next {
            Ok((phase, delay)) => {
                let key = self.flight_keys.generate();
                if let Some(flight) = self.flight.as_mut() {
                    flight.pending = key;
                    flight.phase = phase;
                    if phase == FlightPhase::Returning {
                        flight.task_id = None;
                    }
                }
                info!("Drone is now {}", self.state.drone().status());
                Some(FlightTimer { key, delay })
            }
            Err(error) => {
                warn!("Aborting flight: {}", error);
                self.state.finish_return();
                self.flight = None;
                None
            }
        };

        self.publish();
        timer
    }

    /// One periodic step: lit lamps drift in temperature, then everyone
    /// gets the new snapshot.
    pub fn tick(&mut self) {
        let rng = &mut self.rng;
        self.state.drift_temperatures(|| rng.f64());
        self.publish();
    }

    // Private

    fn publish(&mut self) {
        let update = ServerMessage::Update(self.snapshot());
        self.subscribers.publish(&update);
    }
}

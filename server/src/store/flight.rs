use std::time::Duration;

use lampfleet_shared::{LampId, TaskId};

use crate::store::LampRestore;

/// Identifies one armed flight timer. Only the most recently armed key is
/// live; timers that fire with any other key are stale and ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FlightKey(u64);

impl FlightKey {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// A timer the runtime must arm: after `delay`, feed `key` back into
/// [`crate::FleetStore::advance_flight`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlightTimer {
    pub key: FlightKey,
    pub delay: Duration,
}

/// Durations of each leg of a replacement flight
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlightSchedule {
    /// Time from dispatch until the drone starts replacing the module
    pub flying: Duration,
    /// Time spent swapping the module
    pub replacing: Duration,
    /// Time to fly home after a completed replacement
    pub returning: Duration,
    /// Time to fly home after a cancelled replacement
    pub cancel_return: Duration,
}

impl Default for FlightSchedule {
    fn default() -> Self {
        Self {
            flying: Duration::from_secs(3),
            replacing: Duration::from_secs(5),
            returning: Duration::from_secs(2),
            cancel_return: Duration::from_secs(2),
        }
    }
}

/// Leg of the flight that ends when the pending timer fires
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlightPhase {
    Outbound,
    Replacing,
    Returning,
}

pub(crate) struct ActiveFlight {
    pub pending: FlightKey,
    pub phase: FlightPhase,
    /// Cleared once the task is completed or cancelled
    pub task_id: Option<TaskId>,
    pub lamp_id: LampId,
    pub restore: LampRestore,
}

pub(crate) struct FlightKeyGenerator {
    next: u64,
}

impl FlightKeyGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn generate(&mut self) -> FlightKey {
        let key = FlightKey(self.next);
        self.next = self.next.wrapping_add(1);
        key
    }
}

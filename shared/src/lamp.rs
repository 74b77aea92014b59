use serde::{Deserialize, Serialize};

use crate::{GeoPoint, LampId, LampStatus};

/// Lower bound of the temperature random walk, in °C
pub const TEMPERATURE_MIN: f64 = 20.0;
/// Upper bound of the temperature random walk, in °C
pub const TEMPERATURE_MAX: f64 = 60.0;
/// A lamp marked as `fault` runs at least this hot
pub const FAULT_TEMPERATURE: f64 = 45.0;
/// Temperature of a freshly installed lamp module
pub const REPAIRED_TEMPERATURE: f64 = 25.0;

/// A street lamp. Its id and position are fixed for the whole session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lamp {
    pub id: LampId,
    #[serde(flatten)]
    pub position: GeoPoint,
    pub status: LampStatus,
    pub temperature: f64,
    pub needs_replacement: bool,
}

impl Lamp {
    pub fn new(
        id: LampId,
        position: GeoPoint,
        status: LampStatus,
        temperature: f64,
        needs_replacement: bool,
    ) -> Self {
        Self {
            id,
            position,
            status,
            temperature,
            // a faulty lamp always needs replacing
            needs_replacement: needs_replacement || status == LampStatus::Fault,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == LampStatus::On
    }

    /// Whether the lamp shows up as broken on the panel: flagged for
    /// replacement, or reporting a fault.
    pub fn is_broken(&self) -> bool {
        self.needs_replacement || self.status == LampStatus::Fault
    }

    pub fn clamp_temperature(&mut self) {
        self.temperature = self.temperature.clamp(TEMPERATURE_MIN, TEMPERATURE_MAX);
    }
}

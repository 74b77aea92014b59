use lampfleet_shared::{Lamp, LampId, LampStatus};

use crate::projection::ScenePoint;

/// Temperature bands the lamp's indicator is colored by
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemperatureBand {
    /// Below 30°C
    Normal,
    /// 30°C up to 45°C
    Warm,
    /// 45°C and up
    Hot,
}

impl TemperatureBand {
    pub fn of(temperature: f64) -> Self {
        if temperature < 30.0 {
            TemperatureBand::Normal
        } else if temperature < 45.0 {
            TemperatureBand::Warm
        } else {
            TemperatureBand::Hot
        }
    }
}

/// Everything a renderer needs to draw one lamp
#[derive(Clone, Debug, PartialEq)]
pub struct LampVisual {
    pub id: LampId,
    pub position: ScenePoint,
    pub status: LampStatus,
    /// Module glows
    pub lit: bool,
    /// Module body drawn in the fault color
    pub faulted: bool,
    pub temperature: f64,
    pub temperature_band: TemperatureBand,
    pub is_broken: bool,
    pub is_selected_for_replace: bool,
    pub is_drone_target: bool,
    pub label: String,
}

impl LampVisual {
    pub(crate) fn new(
        lamp: &Lamp,
        position: ScenePoint,
        is_broken: bool,
        is_selected_for_replace: bool,
        is_drone_target: bool,
    ) -> Self {
        let status = match lamp.status {
            LampStatus::On => "on",
            LampStatus::Off => "off",
            LampStatus::Fault => "fault",
        };
        Self {
            id: lamp.id,
            position,
            status: lamp.status,
            lit: lamp.status == LampStatus::On,
            faulted: lamp.status == LampStatus::Fault,
            temperature: lamp.temperature,
            temperature_band: TemperatureBand::of(lamp.temperature),
            is_broken,
            is_selected_for_replace,
            is_drone_target,
            label: format!(
                "ID: {} | {} | {}°C",
                lamp.id.value(),
                status,
                lamp.temperature.round()
            ),
        }
    }
}

/// The renderer seam. The reconciler owns one `Entity` per lamp id and
/// drives it through these calls; it never rebuilds an entity whose lamp
/// is still present.
pub trait LampScene {
    type Entity;

    /// Fully constructs the entity for a lamp seen for the first time
    fn spawn_lamp(&mut self, visual: &LampVisual) -> Self::Entity;

    /// Updates an existing entity in place
    fn update_lamp(&mut self, entity: &mut Self::Entity, visual: &LampVisual);

    /// Disposes the entity of a lamp that left the fleet
    fn despawn_lamp(&mut self, entity: Self::Entity);
}

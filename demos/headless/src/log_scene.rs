use log::info;

use lampfleet_client::{shared::LampId, LampScene, LampVisual};

/// Renders lamps as log lines
pub struct LogScene;

pub struct LogLamp {
    lamp_id: LampId,
    label: String,
}

impl LampScene for LogScene {
    type Entity = LogLamp;

    fn spawn_lamp(&mut self, visual: &LampVisual) -> LogLamp {
        info!(
            "+ lamp {} at ({:.2}, {:.2}): {}",
            visual.id, visual.position.x, visual.position.z, visual.label
        );
        LogLamp {
            lamp_id: visual.id,
            label: visual.label.clone(),
        }
    }

    fn update_lamp(&mut self, entity: &mut LogLamp, visual: &LampVisual) {
        // only report what a viewer would notice
        if entity.label != visual.label {
            info!("~ lamp {}: {}", entity.lamp_id, visual.label);
            entity.label = visual.label.clone();
        }
    }

    fn despawn_lamp(&mut self, entity: LogLamp) {
        info!("- lamp {}", entity.lamp_id);
    }
}

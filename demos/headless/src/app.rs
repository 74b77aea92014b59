use log::info;

use lampfleet_client::{
    shared::{DroneStatus, LampId},
    transport::websocket::{self, Connection},
    ClientConfig, FleetClient, LampFleetClientError,
};

use crate::log_scene::LogScene;

pub struct App {
    client: FleetClient<LogScene>,
    connection: Connection,
    replace: Option<LampId>,
    last_drone_status: DroneStatus,
    frame: u64,
}

impl App {
    pub async fn connect(url: &str, replace: Option<u32>) -> Result<Self, LampFleetClientError> {
        info!("Lampfleet Headless Demo started");
        let connection = websocket::connect(url).await?;
        Ok(Self {
            client: FleetClient::new(ClientConfig::default(), LogScene),
            connection,
            replace: replace.map(LampId::new),
            last_drone_status: DroneStatus::Idle,
            frame: 0,
        })
    }

    /// One frame: take in snapshots, animate the drone, send commands
    pub fn update(&mut self, dt: f64) -> Result<(), LampFleetClientError> {
        self.frame += 1;
        self.connection.pump(&mut self.client)?;

        if self.client.snapshots_received() > 0 {
            if let Some(lamp_id) = self.replace.take() {
                if self.client.reconciler_mut().select_replace(lamp_id)
                    && self.client.start_replacement()
                {
                    info!("Requested replacement of lamp {}", lamp_id);
                } else {
                    info!("Could not request replacement of lamp {}", lamp_id);
                }
            }
        }

        let position = self.client.advance_frame(dt);
        let status = self.client.reconciler().drone_status();
        if status != self.last_drone_status {
            info!("{}", self.client.panel().drone_label);
            self.last_drone_status = status;
        }
        if self.frame % 60 == 0 && !status.is_idle() {
            info!(
                "drone at ({:.2}, {:.2}, {:.2})",
                position.x, position.y, position.z
            );
        }
        Ok(())
    }

    pub fn summary(&self) {
        let counters = &self.client.panel().counters;
        info!(
            "{} lamps, {} on, {} broken, {} tasks listed",
            counters.total,
            counters.active,
            counters.fault,
            self.client.reconciler().task_board().entries().len()
        );
    }
}

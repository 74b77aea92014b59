use std::collections::VecDeque;

use log::{debug, warn};

use lampfleet_shared::{
    decode_server_message, encode_command, ClientCommand, FaultStatus, LampId, TaskId,
};

use crate::{
    drone_motion::DroneMotion,
    projection::ScenePoint,
    reconciler::{LampScene, PanelView, ReconcileReport, Reconciler, Selection},
    ClientConfig,
};

/// A viewer of the lamp fleet.
///
/// Incoming server payloads are handed to [`FleetClient::receive`];
/// commands are queued locally and drained with
/// [`FleetClient::take_outgoing`] by whatever transport is in use. The
/// drone animation is advanced separately, once per frame.
pub struct FleetClient<S: LampScene> {
    reconciler: Reconciler<S>,
    drone: DroneMotion,
    outgoing: VecDeque<ClientCommand>,
    snapshots_received: u64,
}

impl<S: LampScene> FleetClient<S> {
    pub fn new(config: ClientConfig, scene: S) -> Self {
        Self {
            reconciler: Reconciler::new(scene, config.projection),
            drone: DroneMotion::new(config.motion),
            outgoing: VecDeque::new(),
            snapshots_received: 0,
        }
    }

    pub fn reconciler(&self) -> &Reconciler<S> {
        &self.reconciler
    }

    pub fn reconciler_mut(&mut self) -> &mut Reconciler<S> {
        &mut self.reconciler
    }

    pub fn panel(&self) -> &PanelView {
        self.reconciler.panel()
    }

    pub fn selection(&self) -> &Selection {
        self.reconciler.selection()
    }

    pub fn snapshots_received(&self) -> u64 {
        self.snapshots_received
    }

    // Incoming

    /// Decodes and applies one server payload. Malformed payloads are
    /// dropped without touching any state.
    pub fn receive(&mut self, payload: &str) -> Option<ReconcileReport> {
        match decode_server_message(payload) {
            Ok(message) => {
                self.snapshots_received += 1;
                Some(self.reconciler.apply(message.snapshot()))
            }
            Err(error) => {
                debug!("Dropping server payload: {}", error);
                None
            }
        }
    }

    // Outgoing

    /// Asks for the lamp picked in the "replace" selector to be replaced.
    /// Refused locally while the drone is busy.
    pub fn start_replacement(&mut self) -> bool {
        if !self.panel().can_start_replacement {
            debug!("Drone is {}, not requesting replacement", self.panel().drone_status);
            return false;
        }
        let Some(lamp_id) = self.selection().selected_replace() else {
            return false;
        };
        self.outgoing
            .push_back(ClientCommand::StartReplacement { lamp_id });
        true
    }

    /// Reports the lamp picked in the "mark broken" selector
    pub fn mark_selected_broken(&mut self, status: FaultStatus) -> bool {
        let Some(lamp_id) = self.selection().selected_broken() else {
            return false;
        };
        self.mark_broken(lamp_id, status)
    }

    pub fn mark_broken(&mut self, lamp_id: LampId, status: FaultStatus) -> bool {
        if self.reconciler.lamp(lamp_id).is_none() {
            return false;
        }
        self.outgoing
            .push_back(ClientCommand::SetLampFault { lamp_id, status });
        true
    }

    pub fn cancel_replacement(&mut self, task_id: TaskId) -> bool {
        if !self
            .reconciler
            .tasks()
            .iter()
            .any(|task| task.id == task_id)
        {
            return false;
        }
        self.outgoing
            .push_back(ClientCommand::CancelReplacement { task_id });
        true
    }

    /// Shares where the drone is drawn; the server only rebroadcasts
    pub fn report_drone_position(&mut self) {
        let position = self.drone.position();
        self.outgoing.push_back(ClientCommand::UpdateDronePosition {
            position: serde_json::json!({
                "x": position.x,
                "y": position.y,
                "z": position.z,
            }),
        });
    }

    pub fn has_outgoing(&self) -> bool {
        !self.outgoing.is_empty()
    }

    /// Drains queued commands as encoded frames
    pub fn take_outgoing(&mut self) -> Vec<String> {
        self.outgoing
            .drain(..)
            .filter_map(|command| match encode_command(&command) {
                Ok(payload) => Some(payload),
                Err(error) => {
                    warn!("Could not encode '{}': {}", command.kind(), error);
                    None
                }
            })
            .collect()
    }

    // Animation

    /// Advances the drone by `dt` seconds from the last known status
    pub fn advance_frame(&mut self, dt: f64) -> ScenePoint {
        let target = self.reconciler.target_point();
        self.drone
            .advance(dt, self.reconciler.drone_status(), target)
    }

    pub fn drone_position(&self) -> ScenePoint {
        self.drone.position()
    }
}

//! # Lampfleet Client
//! Provides a client that reconciles the lamp fleet snapshots pushed by
//! lampfleet-server into a live, mutable scene, keeps the viewer's own
//! selections stable across snapshots, animates the drone between updates,
//! and sends replacement commands back.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

#[macro_use]
extern crate cfg_if;

pub mod transport;
pub mod shared {
    pub use lampfleet_shared::{
        ClientCommand, DroneStatus, FaultStatus, GeoPoint, Lamp, LampId, LampStatus,
        ReplacementTask, ServerMessage, Snapshot, TaskId, TaskStatus,
    };
}

mod client;
mod client_config;
mod drone_motion;
mod error;
mod projection;
mod reconciler;

pub use client::FleetClient;
pub use client_config::ClientConfig;
pub use drone_motion::{DroneMotion, MotionConfig};
pub use error::LampFleetClientError;
pub use projection::{GeoProjection, ScenePoint};
pub use reconciler::{
    FleetCounters, LampRow, LampScene, LampVisual, PanelView, ReconcileReport, Reconciler,
    Selection, TaskBoard, TemperatureBand,
};

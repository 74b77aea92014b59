//! # Lampfleet Server
//! A server that owns the authoritative lamp fleet, runs the replacement
//! drone's flight schedule, and pushes full-state snapshots to every
//! connected viewer, both periodically and after every change.

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
        ClientCommand, DroneStatus, FaultStatus, Lamp, LampId, LampStatus, ReplacementTask,
        ServerMessage, Snapshot, TaskId, TaskStatus,
    };
}

mod error;
mod seed;
mod server;
mod store;

pub use error::LampFleetServerError;
pub use seed::seed_lamps;
pub use server::{FleetHandle, FleetServer, Server, ServerConfig};
pub use store::{
    CommandError, Dispatch, Drone, FleetState, FleetStore, FlightKey, FlightPhase,
    FlightSchedule, FlightTimer, LampRestore, SinkClosed, SnapshotSink, SubscriberKey,
    Subscribers,
};

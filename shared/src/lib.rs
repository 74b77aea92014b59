//! # Lampfleet Shared
//! Common functionality shared between lampfleet-server & lampfleet-client crates.
//!
//! Holds the fleet data model (lamps, replacement tasks, drone status), the
//! full-state [`Snapshot`] that the server pushes to viewers, and the JSON
//! envelope both sides speak.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod backends;
mod lamp;
mod messages;
mod snapshot;
mod task;
mod types;

pub use backends::{TimeError, Timestamp};
pub use lamp::{
    Lamp, FAULT_TEMPERATURE, REPAIRED_TEMPERATURE, TEMPERATURE_MAX, TEMPERATURE_MIN,
};
pub use messages::{
    decode_command, decode_server_message, encode_command, encode_server_message, ClientCommand,
    MessageError, ServerMessage,
};
pub use snapshot::Snapshot;
pub use task::ReplacementTask;
pub use types::{DroneStatus, FaultStatus, GeoPoint, LampId, LampStatus, TaskId, TaskStatus};

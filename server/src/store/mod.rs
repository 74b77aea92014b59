mod error;
mod fleet_state;
mod fleet_store;
mod flight;
mod subscribers;

pub use error::CommandError;
pub use fleet_state::{Dispatch, Drone, FleetState, LampRestore};
pub use fleet_store::FleetStore;
pub use flight::{FlightKey, FlightPhase, FlightSchedule, FlightTimer};
pub use subscribers::{SinkClosed, SnapshotSink, SubscriberKey, Subscribers};

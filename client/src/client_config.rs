use crate::{drone_motion::MotionConfig, projection::GeoProjection};

/// Contains Config properties which will be used by a FleetClient
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// How lamp coordinates are laid out in the scene
    pub projection: GeoProjection,
    /// Speeds and waypoints of the drone's visual flight
    pub motion: MotionConfig,
}

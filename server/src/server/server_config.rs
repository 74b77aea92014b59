use std::{net::SocketAddr, time::Duration};

use lampfleet_shared::Lamp;

use crate::{seed::seed_lamps, store::FlightSchedule};

/// Contains Config properties which will be used by the Server
#[derive(Clone)]
pub struct ServerConfig {
    /// Address the viewer listener binds to
    pub listen_addr: SocketAddr,
    /// How often each connected viewer's timer advances the temperature
    /// walk and rebroadcasts the fleet; at least 1 ms
    pub tick_interval: Duration,
    /// Durations of the drone's flight legs
    pub flight: FlightSchedule,
    /// Lamps the fleet starts with
    pub seed_lamps: Vec<Lamp>,
    /// Fixes the temperature walk, mostly for tests
    pub rng_seed: Option<u64>,
}

impl ServerConfig {
    pub(crate) fn rng(&self) -> fastrand::Rng {
        match self.rng_seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            tick_interval: Duration::from_secs(5),
            flight: FlightSchedule::default(),
            seed_lamps: seed_lamps(),
            rng_seed: None,
        }
    }
}

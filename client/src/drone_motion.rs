use lampfleet_shared::DroneStatus;

use crate::projection::ScenePoint;

/// Tuning for the drone's cosmetic flight
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionConfig {
    /// Where the drone parks when idle
    pub home: ScenePoint,
    /// Altitude held while flying out to a lamp
    pub cruise_altitude: f64,
    /// Altitude of the orbit while swapping a module
    pub orbit_altitude: f64,
    pub orbit_radius: f64,
    /// Radians per second
    pub orbit_angular_speed: f64,
    /// Scene units per second, per state
    pub idle_speed: f64,
    pub flying_speed: f64,
    pub replacing_speed: f64,
    pub returning_speed: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            home: ScenePoint::new(0.0, 5.0, 0.0),
            cruise_altitude: 8.0,
            orbit_altitude: 5.6,
            orbit_radius: 0.8,
            orbit_angular_speed: 1.5,
            idle_speed: 3.0,
            flying_speed: 6.0,
            replacing_speed: 2.0,
            returning_speed: 5.0,
        }
    }
}

/// Free-running visual state of the drone. Advanced every frame from the
/// last known status only, so missed or late snapshots just mean it keeps
/// heading for the last known goal.
#[derive(Clone, Debug)]
pub struct DroneMotion {
    config: MotionConfig,
    position: ScenePoint,
    orbit_angle: f64,
}

impl DroneMotion {
    pub fn new(config: MotionConfig) -> Self {
        Self {
            position: config.home,
            config,
            orbit_angle: 0.0,
        }
    }

    pub fn position(&self) -> ScenePoint {
        self.position
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Point the drone is currently heading for
    pub fn goal(&self, status: DroneStatus, target: Option<ScenePoint>) -> ScenePoint {
        let config = &self.config;
        match (status, target) {
            (DroneStatus::Flying, Some(target)) => {
                ScenePoint::new(target.x, config.cruise_altitude, target.z)
            }
            (DroneStatus::Replacing, Some(target)) => ScenePoint::new(
                target.x + self.orbit_angle.cos() * config.orbit_radius,
                config.orbit_altitude,
                target.z + self.orbit_angle.sin() * config.orbit_radius,
            ),
            _ => config.home,
        }
    }

    /// Advances by `dt` seconds. A target that is unknown sends the drone home.
    pub fn advance(
        &mut self,
        dt: f64,
        status: DroneStatus,
        target: Option<ScenePoint>,
    ) -> ScenePoint {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let speed = match (status, target) {
            (DroneStatus::Flying, Some(_)) => self.config.flying_speed,
            (DroneStatus::Replacing, Some(_)) => {
                self.orbit_angle = (self.orbit_angle + self.config.orbit_angular_speed * dt)
                    % std::f64::consts::TAU;
                self.config.replacing_speed
            }
            (DroneStatus::Returning, _) => self.config.returning_speed,
            _ => self.config.idle_speed,
        };

        let goal = self.goal(status, target);
        self.position = self.position.step_toward(goal, speed * dt);
        self.position
    }
}

impl Default for DroneMotion {
    fn default() -> Self {
        Self::new(MotionConfig::default())
    }
}

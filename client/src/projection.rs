use std::ops::{Add, Mul, Sub};

use lampfleet_shared::GeoPoint;

/// A point in scene space. `y` is up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScenePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ScenePoint {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance(&self, other: ScenePoint) -> f64 {
        (other - *self).length()
    }

    /// Moves at most `max_step` toward `goal`, landing exactly on it rather
    /// than overshooting
    pub fn step_toward(&self, goal: ScenePoint, max_step: f64) -> ScenePoint {
        let offset = goal - *self;
        let distance = offset.length();
        if distance <= max_step.max(0.0) || distance == 0.0 {
            return goal;
        }
        *self + offset * (max_step.max(0.0) / distance)
    }
}

impl Add for ScenePoint {
    type Output = ScenePoint;

    fn add(self, rhs: ScenePoint) -> ScenePoint {
        ScenePoint::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for ScenePoint {
    type Output = ScenePoint;

    fn sub(self, rhs: ScenePoint) -> ScenePoint {
        ScenePoint::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for ScenePoint {
    type Output = ScenePoint;

    fn mul(self, rhs: f64) -> ScenePoint {
        ScenePoint::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Flat projection from lat/lng onto the scene's ground plane
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoProjection {
    /// Lat/lng that lands on the scene origin
    pub origin: GeoPoint,
    /// Scene units per degree
    pub scale: f64,
}

impl GeoProjection {
    pub fn project(&self, point: GeoPoint) -> ScenePoint {
        ScenePoint::new(
            (point.lat - self.origin.lat) * self.scale,
            0.0,
            (point.lng - self.origin.lng) * self.scale,
        )
    }
}

impl Default for GeoProjection {
    fn default() -> Self {
        Self {
            origin: GeoPoint::new(55.7527, 37.6199),
            scale: 1000.0,
        }
    }
}

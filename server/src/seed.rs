use lampfleet_shared::{GeoPoint, Lamp, LampId, LampStatus};

/// The fleet every server process starts with
pub fn seed_lamps() -> Vec<Lamp> {
    vec![
        Lamp::new(
            LampId::new(1),
            GeoPoint::new(55.751244, 37.618423),
            LampStatus::On,
            25.0,
            false,
        ),
        Lamp::new(
            LampId::new(2),
            GeoPoint::new(55.752244, 37.619423),
            LampStatus::Off,
            18.0,
            true,
        ),
        Lamp::new(
            LampId::new(3),
            GeoPoint::new(55.753244, 37.620423),
            LampStatus::On,
            22.0,
            false,
        ),
        Lamp::new(
            LampId::new(4),
            GeoPoint::new(55.754244, 37.621423),
            LampStatus::Fault,
            45.0,
            true,
        ),
    ]
}

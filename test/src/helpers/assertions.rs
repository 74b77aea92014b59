/// Assert that the scene draws every lamp of the snapshot exactly once and
/// nothing else
#[macro_export]
macro_rules! assert_scene_matches {
    ($scene:expr, $snapshot:expr) => {
        let mut expected: Vec<_> = $snapshot.lamps.iter().map(|lamp| lamp.id).collect();
        expected.sort();
        expected.dedup();
        assert_eq!(
            $scene.live_ids(),
            expected,
            "scene entities do not match snapshot lamps"
        );
    };
}

/// Assert that at most one replacement task is still in progress
#[macro_export]
macro_rules! assert_single_active_task {
    ($snapshot:expr) => {
        let active = $snapshot
            .replacement_tasks
            .iter()
            .filter(|task| !task.is_completed())
            .count();
        assert!(active <= 1, "{} replacement tasks in progress", active);
    };
}

/// Assert that every faulty lamp is flagged for replacement
#[macro_export]
macro_rules! assert_faults_flagged {
    ($snapshot:expr) => {
        for lamp in &$snapshot.lamps {
            if lamp.status == lampfleet_shared::LampStatus::Fault {
                assert!(
                    lamp.needs_replacement,
                    "lamp {} is faulty but not flagged",
                    lamp.id
                );
            }
        }
    };
}

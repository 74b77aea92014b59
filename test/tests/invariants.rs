/// PROPERTY-BASED TESTS: fleet and reconciler invariants
///
/// Random command sequences are run against the store, and random snapshot
/// sequences against the reconciler.
///
/// Key invariants:
/// 1. A faulty lamp is always flagged for replacement
/// 2. At most one replacement task is in progress, and only while the drone is out
/// 3. Stale flight timers never change state
/// 4. The scene always draws each snapshot lamp exactly once

use std::sync::{mpsc, Arc};

use proptest::prelude::*;

use lampfleet_client::{GeoProjection, Reconciler};
use lampfleet_server::{seed_lamps, FleetStore, FlightKey, FlightSchedule, FlightTimer};
use lampfleet_shared::{
    ClientCommand, DroneStatus, FaultStatus, LampId, LampStatus, TaskId, TEMPERATURE_MAX,
    TEMPERATURE_MIN,
};
use lampfleet_test::{
    assert_faults_flagged, assert_scene_matches, assert_single_active_task, RecordingScene,
    SnapshotBuilder,
};

const NOW: u64 = 1_700_000_000_000;

#[derive(Clone, Debug)]
enum Step {
    Start(u32),
    CancelNewest,
    CancelUnknown,
    Fault(u32, FaultStatus),
    FireTimer,
    FireStaleTimer,
    Tick,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (1u32..6).prop_map(Step::Start),
        Just(Step::CancelNewest),
        Just(Step::CancelUnknown),
        (1u32..6, prop_oneof![Just(FaultStatus::Fault), Just(FaultStatus::Off)])
            .prop_map(|(lamp_id, status)| Step::Fault(lamp_id, status)),
        Just(Step::FireTimer),
        Just(Step::FireStaleTimer),
        Just(Step::Tick),
    ]
}

fn snapshot_strategy() -> impl Strategy<Value = Vec<(u32, LampStatus)>> {
    prop::collection::vec(
        (
            1u32..9,
            prop_oneof![
                Just(LampStatus::On),
                Just(LampStatus::Off),
                Just(LampStatus::Fault)
            ],
        ),
        0..8,
    )
}

proptest! {
    #[test]
    fn prop_fleet_invariants_hold(steps in prop::collection::vec(step_strategy(), 1..60)) {
        let mut store = FleetStore::new(
            seed_lamps(),
            FlightSchedule::default(),
            fastrand::Rng::with_seed(3),
        );
        let (sink, _receiver) = mpsc::channel::<Arc<str>>();
        store.subscribe(Box::new(sink));

        let mut pending: Option<FlightTimer> = None;
        let mut retired: Vec<FlightKey> = Vec::new();
        let mut now = NOW;

        for step in steps {
            now += 500;
            let armed = match step {
                Step::Start(lamp_id) => store
                    .handle_command(ClientCommand::StartReplacement { lamp_id: LampId::new(lamp_id) }, now)
                    .ok()
                    .flatten(),
                Step::CancelNewest => {
                    let newest = store.snapshot().replacement_tasks.last().map(|task| task.id);
                    newest.and_then(|task_id| store.cancel_replacement(task_id).ok().flatten())
                }
                Step::CancelUnknown => {
                    let before = store.snapshot();
                    prop_assert!(store.cancel_replacement(TaskId::new(1)).is_err());
                    prop_assert_eq!(store.snapshot(), before);
                    None
                }
                Step::Fault(lamp_id, status) => {
                    let _ = store.mark_lamp_fault(LampId::new(lamp_id), status);
                    None
                }
                Step::FireTimer => match pending.take() {
                    Some(timer) => {
                        retired.push(timer.key);
                        store.advance_flight(timer.key, now)
                    }
                    None => None,
                },
                Step::FireStaleTimer => {
                    if let Some(key) = retired.last().copied() {
                        let before = store.snapshot();
                        prop_assert!(store.advance_flight(key, now).is_none());
                        prop_assert_eq!(store.snapshot(), before);
                    }
                    None
                }
                Step::Tick => {
                    store.tick();
                    for lamp in store.snapshot().lamps.iter().filter(|lamp| lamp.is_active()) {
                        prop_assert!(lamp.temperature >= TEMPERATURE_MIN);
                        prop_assert!(lamp.temperature <= TEMPERATURE_MAX);
                    }
                    None
                }
            };
            if let Some(timer) = armed {
                if let Some(previous) = pending.replace(timer) {
                    retired.push(previous.key);
                }
            }
            prop_assert_eq!(store.pending_flight_key(), pending.map(|timer| timer.key));

            let snapshot = store.snapshot();
            assert_faults_flagged!(snapshot);
            assert_single_active_task!(snapshot);
            match snapshot.drone_status {
                DroneStatus::Idle => {
                    prop_assert!(snapshot.active_task().is_none());
                    prop_assert_eq!(snapshot.active_target_lamp_id, None);
                }
                DroneStatus::Flying | DroneStatus::Replacing => {
                    let task = snapshot.active_task();
                    prop_assert!(task.is_some());
                    prop_assert_eq!(task.map(|task| task.lamp_id), snapshot.active_target_lamp_id);
                }
                DroneStatus::Returning => prop_assert!(snapshot.active_task().is_none()),
            }
        }
    }

    #[test]
    fn prop_reconciler_converges(snapshots in prop::collection::vec(snapshot_strategy(), 1..12)) {
        let mut reconciler = Reconciler::new(RecordingScene::new(), GeoProjection::default());

        for lamps in snapshots {
            let snapshot = lamps
                .iter()
                .fold(SnapshotBuilder::new(), |builder, (lamp_id, status)| builder.lamp(*lamp_id, *status))
                .build();
            reconciler.apply(&snapshot);

            assert_scene_matches!(reconciler.scene(), snapshot);
            for lamp in &snapshot.lamps {
                prop_assert_eq!(reconciler.scene().entities_for(lamp.id), 1);
            }
            prop_assert_eq!(reconciler.panel().rows.len(), snapshot.lamps.len());
            let selected = reconciler.selection().selected_replace();
            prop_assert_eq!(selected.is_some(), !snapshot.lamps.is_empty());
            if let Some(lamp_id) = selected {
                prop_assert!(snapshot.lamp(lamp_id).is_some());
            }

            let spawned = reconciler.scene().spawns;
            prop_assert!(reconciler.apply(&snapshot).is_stable());
            prop_assert_eq!(reconciler.scene().spawns, spawned);
        }
    }
}

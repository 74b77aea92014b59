use serde_json::Value;

use lampfleet_client::{ClientConfig, FleetClient};
use lampfleet_shared::{
    decode_command, ClientCommand, DroneStatus, FaultStatus, LampId, LampStatus, TaskId,
    TaskStatus,
};
use lampfleet_test::{RecordingScene, SnapshotBuilder};

fn client() -> FleetClient<RecordingScene> {
    FleetClient::new(ClientConfig::default(), RecordingScene::new())
}

fn commands(client: &mut FleetClient<RecordingScene>) -> Vec<ClientCommand> {
    client
        .take_outgoing()
        .iter()
        .map(|payload| decode_command(payload).unwrap())
        .collect()
}

#[test]
fn malformed_payloads_change_nothing() {
    let mut client = client();
    client.receive(&SnapshotBuilder::seeded().update_payload()).unwrap();

    assert!(client.receive("{not json").is_none());
    assert!(client.receive(r#"{"type":"update"}"#).is_none());
    assert!(client.receive(r#"{"type":"teleport","data":{}}"#).is_none());

    assert_eq!(client.snapshots_received(), 1);
    assert_eq!(client.reconciler().entity_count(), 4);
}

#[test]
fn replacement_request_uses_selected_lamp() {
    let mut client = client();
    client.receive(&SnapshotBuilder::seeded().update_payload());
    client.reconciler_mut().select_replace(LampId::new(4));

    assert!(client.start_replacement());

    assert_eq!(
        commands(&mut client),
        vec![ClientCommand::StartReplacement {
            lamp_id: LampId::new(4)
        }]
    );
}

#[test]
fn busy_drone_blocks_replacement_locally() {
    let mut client = client();
    let busy = SnapshotBuilder::seeded()
        .task(1_700_000_000_000, 4, TaskStatus::Flying)
        .drone(DroneStatus::Flying, Some(4))
        .update_payload();
    client.receive(&busy);

    assert!(!client.start_replacement());
    assert!(!client.has_outgoing());
}

#[test]
fn mark_broken_and_cancel() {
    let mut client = client();
    client.receive(
        &SnapshotBuilder::seeded()
            .task(1_700_000_000_000, 4, TaskStatus::Flying)
            .drone(DroneStatus::Flying, Some(4))
            .update_payload(),
    );
    client.reconciler_mut().select_broken(LampId::new(3));

    assert!(client.mark_selected_broken(FaultStatus::Off));
    assert!(client.cancel_replacement(TaskId::new(1_700_000_000_000)));
    assert!(!client.cancel_replacement(TaskId::new(42)));
    assert!(!client.mark_broken(LampId::new(99), FaultStatus::Fault));

    assert_eq!(
        commands(&mut client),
        vec![
            ClientCommand::SetLampFault {
                lamp_id: LampId::new(3),
                status: FaultStatus::Off,
            },
            ClientCommand::CancelReplacement {
                task_id: TaskId::new(1_700_000_000_000)
            },
        ]
    );
}

#[test]
fn drone_position_report_carries_coordinates() {
    let mut client = client();
    client.report_drone_position();

    let sent = client.take_outgoing();
    let value: Value = serde_json::from_str(&sent[0]).unwrap();
    assert_eq!(value["type"], "updateDronePosition");
    assert_eq!(value["position"]["y"], 5.0);
}

#[test]
fn drone_heads_for_target_then_home() {
    let mut client = client();
    client.receive(
        &SnapshotBuilder::seeded()
            .lamp(4, LampStatus::Off)
            .task(1_700_000_000_000, 4, TaskStatus::Flying)
            .drone(DroneStatus::Flying, Some(4))
            .update_payload(),
    );
    let home = client.drone_position();
    let target = client.reconciler().target_point().unwrap();

    for _ in 0..600 {
        client.advance_frame(1.0 / 60.0);
    }
    let position = client.drone_position();
    assert!((position.x - target.x).abs() < 1e-6);
    assert!((position.z - target.z).abs() < 1e-6);

    client.receive(&SnapshotBuilder::seeded().update_payload());
    for _ in 0..600 {
        client.advance_frame(1.0 / 60.0);
    }
    assert!(client.drone_position().distance(home) < 1e-6);
}

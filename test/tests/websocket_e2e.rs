use std::time::Duration;

use tokio::{net::TcpListener, time::timeout};

use lampfleet_client::{transport::websocket, ClientConfig, FleetClient};
use lampfleet_server::{transport::websocket::serve, FlightSchedule, Server, ServerConfig};
use lampfleet_shared::{DroneStatus, LampId, LampStatus, TaskStatus};
use lampfleet_test::RecordingScene;

const WAIT: Duration = Duration::from_secs(5);

fn quick_config() -> ServerConfig {
    let leg = Duration::from_millis(50);
    ServerConfig {
        tick_interval: Duration::from_secs(60),
        flight: FlightSchedule {
            flying: leg,
            replacing: leg,
            returning: leg,
            cancel_return: leg,
        },
        rng_seed: Some(5),
        ..ServerConfig::default()
    }
}

async fn start_server() -> String {
    let _ = env_logger::builder().is_test(true).try_init();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let handle = Server::new(quick_config()).spawn();
    tokio::spawn(serve(listener, handle));
    format!("ws://{}", address)
}

/// Feeds received payloads to the client until `done` holds
async fn receive_until<F>(
    connection: &mut websocket::Connection,
    client: &mut FleetClient<RecordingScene>,
    done: F,
) where
    F: Fn(&FleetClient<RecordingScene>) -> bool,
{
    timeout(WAIT, async {
        while !done(client) {
            let payload = connection.recv().await.expect("server went away");
            client.receive(&payload);
        }
    })
    .await
    .expect("timed out waiting for snapshot");
}

#[tokio::test]
async fn viewer_watches_a_full_replacement() {
    let url = start_server().await;
    let mut connection = websocket::connect(&url).await.unwrap();
    let mut client = FleetClient::new(ClientConfig::default(), RecordingScene::new());

    receive_until(&mut connection, &mut client, |client| client.snapshots_received() > 0).await;
    assert_eq!(client.reconciler().entity_count(), 4);

    client.reconciler_mut().select_replace(LampId::new(4));
    assert!(client.start_replacement());
    connection.pump(&mut client).unwrap();

    receive_until(&mut connection, &mut client, |client| {
        client.reconciler().drone_status() != DroneStatus::Idle
    })
    .await;
    assert_eq!(client.reconciler().active_target(), Some(LampId::new(4)));

    receive_until(&mut connection, &mut client, |client| {
        client.reconciler().drone_status() == DroneStatus::Idle
    })
    .await;
    let tasks = client.reconciler().tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].status, TaskStatus::Completed);
    let lamp = client.reconciler().lamp(LampId::new(4)).unwrap();
    assert_eq!(lamp.status, LampStatus::On);
    assert!(!lamp.needs_replacement);

    // the lamp was redrawn, never rebuilt
    assert_eq!(client.reconciler().scene().spawns, 4);
    assert_eq!(client.reconciler().scene().entities_for(LampId::new(4)), 1);
}

#[tokio::test]
async fn commands_from_one_viewer_reach_another() {
    let url = start_server().await;
    let mut reporter = websocket::connect(&url).await.unwrap();
    let mut watcher = websocket::connect(&url).await.unwrap();
    let mut reporting = FleetClient::new(ClientConfig::default(), RecordingScene::new());
    let mut watching = FleetClient::new(ClientConfig::default(), RecordingScene::new());

    receive_until(&mut reporter, &mut reporting, |client| client.snapshots_received() > 0).await;
    receive_until(&mut watcher, &mut watching, |client| client.snapshots_received() > 0).await;

    reporting.reconciler_mut().select_broken(LampId::new(1));
    assert!(reporting.mark_selected_broken(Default::default()));
    reporter.pump(&mut reporting).unwrap();

    receive_until(&mut watcher, &mut watching, |client| {
        client
            .reconciler()
            .lamp(LampId::new(1))
            .is_some_and(|lamp| lamp.status == LampStatus::Fault)
    })
    .await;
    let row = watching.panel().row(LampId::new(1)).unwrap();
    assert!(row.needs_replacement);
    assert_eq!(watching.panel().counters.fault, 3);
}

#[tokio::test]
async fn garbage_frames_do_not_drop_the_connection() {
    let url = start_server().await;
    let mut connection = websocket::connect(&url).await.unwrap();
    let mut client = FleetClient::new(ClientConfig::default(), RecordingScene::new());
    receive_until(&mut connection, &mut client, |client| client.snapshots_received() > 0).await;

    connection.send("definitely not json".to_string()).unwrap();
    connection
        .send(r#"{"type":"launchMissiles"}"#.to_string())
        .unwrap();
    connection
        .send(r#"{"type":"startReplacement","lampId":99}"#.to_string())
        .unwrap();
    client.report_drone_position();
    connection.pump(&mut client).unwrap();

    // the position report is answered with a rebroadcast
    receive_until(&mut connection, &mut client, |client| client.snapshots_received() > 1).await;
    assert_eq!(client.reconciler().drone_status(), DroneStatus::Idle);
    assert!(client.reconciler().tasks().is_empty());
}

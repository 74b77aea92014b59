use std::{collections::HashMap, time::Duration};

use log::{debug, info};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, sleep, Instant},
};

use lampfleet_shared::Timestamp;

use crate::{
    server::{FleetHandle, StoreEvent},
    store::{FleetStore, FlightTimer, SubscriberKey},
    ServerConfig,
};

/// Shortest period a viewer's tick timer runs at
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Owns the [`FleetStore`] and drives it from a single mailbox: viewer
/// commands, per-viewer ticks and flight timers are all applied one at a
/// time, in arrival order.
pub struct FleetServer {
    store: FleetStore,
    tick_interval: Duration,
    mailbox: mpsc::UnboundedReceiver<StoreEvent>,
    sender: mpsc::UnboundedSender<StoreEvent>,
    tick_timers: HashMap<SubscriberKey, JoinHandle<()>>,
    flight_timer: Option<JoinHandle<()>>,
}

impl FleetServer {
    pub fn new(config: &ServerConfig) -> (Self, FleetHandle) {
        let (sender, mailbox) = mpsc::unbounded_channel();
        let store = FleetStore::new(config.seed_lamps.clone(), config.flight, config.rng());
        let server = Self {
            store,
            tick_interval: config.tick_interval.max(MIN_TICK_INTERVAL),
            mailbox,
            sender: sender.clone(),
            tick_timers: HashMap::new(),
            flight_timer: None,
        };
        (server, FleetHandle::new(sender))
    }

    /// Processes events until shut down. Must run inside a tokio runtime.
    pub async fn run(mut self) {
        info!("Fleet store running with {} lamps", self.store.state().lamps().len());
        while let Some(event) = self.mailbox.recv().await {
            if !self.handle_event(event) {
                break;
            }
        }

        for (_, timer) in self.tick_timers.drain() {
            timer.abort();
        }
        if let Some(timer) = self.flight_timer.take() {
            timer.abort();
        }
        info!("Fleet store stopped");
    }

    fn handle_event(&mut self, event: StoreEvent) -> bool {
        match event {
            StoreEvent::Connect { sink, reply } => {
                let key = self.store.subscribe(sink);
                self.start_tick_timer(key);
                info!("Subscriber {:?} connected", key);
                if reply.send(key).is_err() {
                    // caller gave up before the reply
                    self.disconnect(key);
                }
            }
            StoreEvent::Disconnect(key) => self.disconnect(key),
            StoreEvent::Command(key, command) => {
                let kind = command.kind();
                match self.store.handle_command(command, Timestamp::now_millis()) {
                    Ok(Some(timer)) => self.arm_flight_timer(timer),
                    Ok(None) => {}
                    Err(error) => debug!("Ignoring '{}' from {:?}: {}", kind, key, error),
                }
            }
            StoreEvent::Tick(key) => {
                if self.tick_timers.contains_key(&key) {
                    self.store.tick();
                }
            }
            StoreEvent::FlightStep(flight_key) => {
                if let Some(timer) = self
                    .store
                    .advance_flight(flight_key, Timestamp::now_millis())
                {
                    self.arm_flight_timer(timer);
                }
            }
            StoreEvent::Snapshot(reply) => {
                let _ = reply.send(self.store.snapshot());
            }
            StoreEvent::Shutdown => return false,
        }
        true
    }

    fn disconnect(&mut self, key: SubscriberKey) {
        if let Some(timer) = self.tick_timers.remove(&key) {
            timer.abort();
        }
        if self.store.unsubscribe(&key) {
            info!("Subscriber {:?} disconnected", key);
        }
    }

    fn start_tick_timer(&mut self, key: SubscriberKey) {
        let sender = self.sender.clone();
        let period = self.tick_interval;
        let timer = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                if sender.send(StoreEvent::Tick(key)).is_err() {
                    break;
                }
            }
        });
        self.tick_timers.insert(key, timer);
    }

    /// Replaces whatever flight timer was armed; only one chain is ever live
    fn arm_flight_timer(&mut self, timer: FlightTimer) {
        if let Some(previous) = self.flight_timer.take() {
            previous.abort();
        }
        let sender = self.sender.clone();
        self.flight_timer = Some(tokio::spawn(async move {
            sleep(timer.delay).await;
            let _ = sender.send(StoreEvent::FlightStep(timer.key));
        }));
    }
}

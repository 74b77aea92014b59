use std::{net::SocketAddr, process::ExitCode, time::Duration};

use clap::Parser;
use log::{error, info};

use lampfleet_server::{FlightSchedule, Server, ServerConfig};

/// Serves the simulated lamp fleet to WebSocket viewers
#[derive(Parser, Debug)]
#[command(name = "lampfleet-server", version, about)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    listen: SocketAddr,

    /// Milliseconds between periodic snapshots, per viewer
    #[arg(long, default_value_t = 5000)]
    tick_ms: u64,

    /// Scales every flight leg (1.0 = 3s/5s/2s)
    #[arg(long, default_value_t = 1.0)]
    flight_scale: f64,

    /// Seed for the temperature random walk
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let defaults = FlightSchedule::default();
    let scale = if args.flight_scale.is_finite() {
        args.flight_scale.clamp(0.0, 1000.0)
    } else {
        1.0
    };
    let config = ServerConfig {
        listen_addr: args.listen,
        tick_interval: Duration::from_millis(args.tick_ms.max(1)),
        flight: FlightSchedule {
            flying: defaults.flying.mul_f64(scale),
            replacing: defaults.replacing.mul_f64(scale),
            returning: defaults.returning.mul_f64(scale),
            cancel_return: defaults.cancel_return.mul_f64(scale),
        },
        rng_seed: args.seed,
        ..ServerConfig::default()
    };

    info!("Lamp fleet server starting on {}", config.listen_addr);
    match Server::new(config).listen().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

mod app;
mod log_scene;

use std::{process::ExitCode, time::Duration};

use clap::Parser;
use log::{error, info};

use app::App;

/// Watches a lampfleet server from the terminal
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Server to connect to
    #[arg(long, default_value = "ws://127.0.0.1:3000")]
    url: String,
    /// Request replacement of this lamp once connected
    #[arg(long)]
    replace: Option<u32>,
    /// Stop after this many frames; runs until disconnected otherwise
    #[arg(long)]
    frames: Option<u64>,
}

const FRAME: Duration = Duration::from_micros(16_667);

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut app = match App::connect(&args.url, args.replace).await {
        Ok(app) => app,
        Err(error) => {
            error!("{}", error);
            return ExitCode::FAILURE;
        }
    };

    let mut ticker = tokio::time::interval(FRAME);
    let mut frame = 0;
    loop {
        ticker.tick().await;
        if let Err(error) = app.update(FRAME.as_secs_f64()) {
            info!("{}", error);
            break;
        }
        frame += 1;
        if args.frames.is_some_and(|frames| frame >= frames) {
            break;
        }
    }

    app.summary();
    ExitCode::SUCCESS
}

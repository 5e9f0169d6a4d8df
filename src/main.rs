//! Dasher headless driver
//!
//! Runs one race with the autopilot at a fixed 60 Hz frame time and prints
//! the final frame as JSON. Usage: `dasher [config.json] [max_frames]`

use std::process::ExitCode;

use dasher::consts::FRAME_DT;
use dasher::sim::{TickInput, World, tick};
use dasher::{ConfigError, GameConfig};

const DEFAULT_MAX_FRAMES: u64 = 3600;

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);

    let config = match args.next() {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let max_frames = match args.next() {
        Some(n) => n
            .parse::<u64>()
            .map_err(|e| ConfigError::Invalid(format!("max_frames {n:?}: {e}")))?,
        None => DEFAULT_MAX_FRAMES,
    };

    let mut world = World::new(config)?;
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    for _ in 0..max_frames {
        if tick(&mut world, &input, FRAME_DT).is_over() {
            break;
        }
    }

    if !world.outcome().is_over() {
        log::info!("Stopped after {} frames with the race still running", world.time_ticks);
    }

    let json = serde_json::to_string_pretty(&world.snapshot())?;
    println!("{json}");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Dasher (headless) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("dasher: {e}");
            ExitCode::FAILURE
        }
    }
}

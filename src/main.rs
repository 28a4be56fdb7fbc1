//! ClockStorm entry point
//!
//! Headless demo: runs an autopilot session until game over (or the tick
//! cap), prints the game-over summary and quits. A run still live at the
//! cap is abandoned, not recorded. Rendering front-ends drive
//! the same `Session` API.

use std::env;
use std::path::PathBuf;

use clockstorm::consts::*;
use clockstorm::ledger::DEFAULT_LEDGER_PATH;
use clockstorm::platform::SharedInput;
use clockstorm::sim::{GameEvent, SessionMode};
use clockstorm::{FileLedger, Session, Tuning};

/// Ten simulated minutes
const DEFAULT_MAX_TICKS: u64 = 10 * 60 * TICKS_PER_SECOND as u64;

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

fn main() {
    env_logger::init();
    log::info!("ClockStorm (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let tuning = match env::var_os("CLOCKSTORM_TUNING") {
        Some(path) => Tuning::load_or_default(&PathBuf::from(path)),
        None => Tuning::default(),
    };
    let ledger_path = env::var_os("CLOCKSTORM_LEDGER")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LEDGER_PATH));
    let seed = env_parse::<u64>("CLOCKSTORM_SEED").unwrap_or_else(rand::random);
    let max_ticks = env_parse::<u64>("CLOCKSTORM_TICKS").unwrap_or(DEFAULT_MAX_TICKS);

    let mut session = Session::start(
        DEFAULT_ARENA_WIDTH,
        DEFAULT_ARENA_HEIGHT,
        tuning,
        FileLedger::new(ledger_path),
        seed,
    )?;

    let input = SharedInput::new();
    input.set_autopilot(true);

    let mut collected = 0u32;
    let mut ticks = 0u64;
    while session.mode() != SessionMode::GameOver && ticks < max_ticks {
        let snapshot = session.tick(&input.sample())?;
        collected += snapshot
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Collected { .. }))
            .count() as u32;
        ticks += 1;
    }

    let state = session.state();
    println!(
        "Survived {} ticks ({:.1}s), collected {} orbs, {} hazards live",
        state.time_ticks,
        state.time_ticks as f32 / TICKS_PER_SECOND as f32,
        collected,
        state.hazards.len()
    );

    if session.mode() == SessionMode::GameOver {
        let summary = session.summary()?;
        if let Some(cause) = summary.cause {
            println!("{}", cause.message());
        }
        println!("Final Score: {}", summary.final_score);
        println!("High Score: {}", summary.high_score);
        println!("Average Score: {:.2}", summary.average_score);
        if summary.new_high_score {
            println!("New high score!");
        }
    } else {
        log::info!("Tick cap of {} reached", max_ticks);
    }

    let final_score = session.quit()?;
    if final_score.abandoned {
        println!("Run abandoned at score {}, not recorded", final_score.score);
    } else {
        println!("Final score recorded: {}", final_score.score);
    }
    Ok(())
}

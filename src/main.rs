//! Polar Asteroids headless driver
//!
//! Plays one round with a scripted pilot at the fixed tick rate (as fast as
//! possible, no window), then records the result and prints the listing.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use polar_asteroids::sim::{FrameSnapshot, GameEvent, GamePhase, GameState, TickInput, tick};
use polar_asteroids::{ArenaConfig, Leaderboard, ResultsFile, ScoreRecord};

#[derive(Parser)]
#[command(name = "polar-asteroids")]
#[command(about = "Run one headless asteroid arena round and record the score")]
struct Args {
    /// RNG seed for the round
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Give up after this many ticks (60 per simulated second)
    #[arg(long, default_value_t = 60 * 60)]
    ticks: u64,
    /// JSON arena config; defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Results file (`name,score` per line)
    #[arg(long, default_value = "results.txt")]
    results: PathBuf,
    /// Name entered on the game over screen
    #[arg(long, default_value = "pilot")]
    name: String,
    /// Print the final frame as JSON
    #[arg(long)]
    snapshot: bool,
}

/// Spin slowly, fire on a fixed cadence, nudge forward now and then
fn pilot_input(frame: u64) -> TickInput {
    TickInput {
        rotate_left: frame % 3 == 0,
        thrust_forward: frame % 90 < 20,
        fire: frame % 12 == 0,
        ..Default::default()
    }
}

fn run(args: &Args) -> polar_asteroids::Result<()> {
    let config = match &args.config {
        Some(path) => ArenaConfig::load(path)?,
        None => ArenaConfig::default(),
    };
    let results = ResultsFile::new(&args.results);
    let mut state = GameState::new(config, args.seed);

    log::info!("Round started with seed {}", args.seed);
    while state.phase == GamePhase::Playing && state.time_ticks < args.ticks {
        let input = pilot_input(state.time_ticks);
        tick(&mut state, &input);
        for event in state.drain_events() {
            log::debug!("{event:?}");
        }
    }

    let record = if state.phase == GamePhase::GameOver {
        enter_name(&mut state, &args.name)
    } else {
        log::info!("Tick limit reached, ship survived");
        ScoreRecord::new(&args.name, state.score)
    };
    let previous = Leaderboard::from_records(results.load()?);
    match previous.potential_rank(record.score) {
        Some(rank) => println!("{} placed #{rank} with {}", record.name, record.score),
        None => println!("{} scored {}, not enough to place", record.name, record.score),
    }
    if let Some(best) = previous.top_score() {
        if record.score > best {
            log::info!("New best score: {} beats {best}", record.score);
        }
    }
    results.append(&record)?;

    state.show_results(results.load()?);
    state.phase = GamePhase::Results;

    let frame = FrameSnapshot::capture(&state);
    for line in frame.info_lines() {
        println!("{line}");
    }
    println!("--- Results ---");
    for (rank, entry) in frame.results.iter().enumerate() {
        println!("{:>2}. {:<16} {}", rank + 1, entry.name, entry.score);
    }
    if args.snapshot {
        match serde_json::to_string_pretty(&frame) {
            Ok(json) => println!("{json}"),
            Err(e) => log::warn!("Could not serialize snapshot: {e}"),
        }
    }
    Ok(())
}

/// Type the name one character per tick, confirm, and return the emitted record
fn enter_name(state: &mut GameState, name: &str) -> ScoreRecord {
    for c in name.chars() {
        let input = TickInput {
            typed: Some(c),
            ..Default::default()
        };
        tick(state, &input);
    }
    let confirm = TickInput {
        confirm: true,
        ..Default::default()
    };
    tick(state, &confirm);

    state
        .drain_events()
        .into_iter()
        .find_map(|event| match event {
            GameEvent::RoundFinished(record) => Some(record),
            _ => None,
        })
        .unwrap_or_else(|| ScoreRecord::new(&state.player_name, state.score))
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

//! Maze Chase entry point
//!
//! Native headless runner: plays demo sessions with the autopilot at a fixed
//! frame rate and records finished games on the leaderboard.
//!
//! Usage: `maze-chase [--seed N] [--frames N] [--tuning FILE] [--scores FILE]`

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use maze_chase::consts::FRAME_MS;
use maze_chase::highscores::now_timestamp;
use maze_chase::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use maze_chase::{HighScores, Tuning};

/// Ten minutes of simulated play at 60 fps
const DEFAULT_FRAMES: u64 = 36_000;

/// Headless autopilot runner for Maze Chase
#[derive(Parser, Debug)]
#[command(name = "maze-chase", version, about)]
struct Args {
    /// Session seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of 60 fps frames to simulate
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    frames: u64,

    /// Tuning JSON file
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Leaderboard JSON file
    #[arg(long, default_value = "maze_chase_highscores.json")]
    scores: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Maze Chase (headless) starting...");

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| now_timestamp() as u64);
    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("failed to load tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    let mut scores = match HighScores::load(&args.scores) {
        Ok(scores) => scores,
        Err(e) => {
            log::warn!("Ignoring unreadable leaderboard: {}", e);
            HighScores::new()
        }
    };
    let best = scores.top_score().unwrap_or(0);

    log::info!("Seed {}, {} frames", seed, args.frames);
    let mut state = GameState::with_config(tuning, Default::default(), seed, best);
    log::info!(
        "Maze {}x{} with {} pellets",
        state.layout().width(),
        state.layout().height(),
        state.pellets_remaining
    );
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut games = 0u32;
    for _ in 0..args.frames {
        tick(&mut state, &input, FRAME_MS);

        for event in state.drain_events() {
            match event {
                GameEvent::PelletEaten | GameEvent::PowerPelletEaten => {}
                GameEvent::GameOver { score } => {
                    games += 1;
                    let rank = scores.add_score(score, state.level, now_timestamp());
                    match rank {
                        Some(rank) => println!("Game {}: {} points, rank #{}", games, score, rank),
                        None => println!("Game {}: {} points", games, score),
                    }
                    if let Err(e) = scores.save(&args.scores) {
                        log::error!("Failed to save leaderboard: {}", e);
                    }
                }
                other => log::debug!("{:?}", other),
            }
        }

        if state.phase == GamePhase::GameOver {
            state.restart();
        }
    }

    println!(
        "Stopped at level {} with {} points, {} lives ({} games finished, best {})",
        state.level, state.score, state.lives, games, state.best_score
    );
    Ok(())
}

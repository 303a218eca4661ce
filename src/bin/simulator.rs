//! Flappy Headless Simulator
//!
//! Runs the tick loop without any UI, letting the autopilot fly, and reports
//! how far each run got. Uses the exact same `advance()` function as the game.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]

use anyhow::{Context, Result};
use clap::Parser;
use flappy::autopilot;
use flappy::core::tick::{advance, flap, start, TickEvent, TickStatus};
use flappy::{Collision, Difficulty, FlappyGame, GameConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// ── CLI Configuration ────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "simulator", version, about = "Flappy headless simulator")]
struct SimConfig {
    /// Number of runs with incrementing seeds
    #[arg(long, default_value_t = 1)]
    runs: u32,

    /// RNG seed of the first run
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Stop a run that is still alive after this many ticks
    #[arg(long, default_value_t = 36_000)]
    max_ticks: u64,

    #[arg(long, default_value = "novice")]
    difficulty: Difficulty,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Only the final summary
    #[arg(long)]
    quiet: bool,
}

// ── Simulation Statistics ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
struct RunStats {
    seed: u64,
    ticks: u64,
    score: u32,
    level: u32,
    flaps: u64,
    pipes_spawned: u64,
    level_up_ticks: Vec<u64>,
    /// None when the run hit `max_ticks`.
    crash: Option<Collision>,
}

impl RunStats {
    fn new(seed: u64) -> Self {
        Self {
            seed,
            ticks: 0,
            score: 0,
            level: 1,
            flaps: 0,
            pipes_spawned: 0,
            level_up_ticks: Vec::new(),
            crash: None,
        }
    }

    fn cause(&self) -> &'static str {
        match self.crash {
            Some(collision) => collision.describe(),
            None => "survived",
        }
    }
}

#[derive(Debug, Serialize)]
struct Report {
    difficulty: Difficulty,
    max_ticks: u64,
    runs: Vec<RunStats>,
    summary: Summary,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    min_score: u32,
    avg_score: f64,
    max_score: u32,
    avg_ticks: f64,
    pipe_crashes: u32,
    ground_crashes: u32,
    ceiling_crashes: u32,
    survived: u32,
}

impl Summary {
    fn from_runs(runs: &[RunStats]) -> Self {
        if runs.is_empty() {
            return Self::default();
        }
        let n = runs.len() as f64;
        let mut summary = Self {
            min_score: runs.iter().map(|r| r.score).min().unwrap_or(0),
            max_score: runs.iter().map(|r| r.score).max().unwrap_or(0),
            avg_score: runs.iter().map(|r| r.score as f64).sum::<f64>() / n,
            avg_ticks: runs.iter().map(|r| r.ticks as f64).sum::<f64>() / n,
            ..Self::default()
        };
        for run in runs {
            match run.crash {
                Some(Collision::Pipe { .. }) => summary.pipe_crashes += 1,
                Some(Collision::Ground) => summary.ground_crashes += 1,
                Some(Collision::Ceiling) => summary.ceiling_crashes += 1,
                None => summary.survived += 1,
            }
        }
        summary
    }
}

// ── Core Simulation Loop ─────────────────────────────────────────────

fn run_simulation(config: &SimConfig, seed: u64) -> RunStats {
    let mut game = FlappyGame::new(GameConfig::for_difficulty(config.difficulty));
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut stats = RunStats::new(seed);

    start(&mut game);

    while game.tick_count < config.max_ticks {
        if autopilot::should_flap(&game) && flap(&mut game) {
            stats.flaps += 1;
        }

        let outcome = advance(&mut game, &mut rng);
        for event in &outcome.events {
            match event {
                TickEvent::PipeSpawned { .. } => stats.pipes_spawned += 1,
                TickEvent::LevelUp(level_up) => {
                    debug!(seed, tick = game.tick_count, level = level_up.level, "level up");
                    stats.level_up_ticks.push(game.tick_count);
                }
                _ => {}
            }
        }

        if let TickStatus::Terminal(collision) = outcome.status {
            stats.crash = Some(collision);
            break;
        }
    }

    stats.ticks = game.tick_count;
    stats.score = game.progression.score;
    stats.level = game.progression.level;
    stats
}

/// Seed of the `run`-th run. Wraps so `--seed` can be any u64.
fn run_seed(base: u64, run: u32) -> u64 {
    base.wrapping_add(run as u64)
}

// ── Report Output ────────────────────────────────────────────────────

fn print_run_line(run: &RunStats, index: u32) {
    println!(
        "  Run {:>3} (seed={}): score={} level={} ticks={} flaps={} -> {}",
        index + 1,
        run.seed,
        run.score,
        run.level,
        run.ticks,
        run.flaps,
        run.cause(),
    );
}

fn print_summary(report: &Report) {
    let s = &report.summary;
    println!("============================================================");
    println!(
        "  Flappy Simulation Report  ({} runs, {})",
        report.runs.len(),
        report.difficulty.name()
    );
    println!("============================================================");
    println!();
    println!("{:<16} {:>8} {:>8.1} {:>8}", "Score", s.min_score, s.avg_score, s.max_score);
    println!("Average ticks: {:.1}", s.avg_ticks);
    println!();
    println!("--- Outcomes ---");
    println!("  Pipe crashes:    {}", s.pipe_crashes);
    println!("  Ground crashes:  {}", s.ground_crashes);
    println!("  Ceiling crashes: {}", s.ceiling_crashes);
    println!("  Survived {} ticks: {}", report.max_ticks, s.survived);
    println!();
}

// ── Main ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = SimConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        runs = config.runs,
        seed = config.seed,
        max_ticks = config.max_ticks,
        difficulty = config.difficulty.name(),
        "simulation starting"
    );

    let mut runs = Vec::with_capacity(config.runs as usize);
    for run in 0..config.runs {
        let seed = run_seed(config.seed, run);
        let stats = run_simulation(&config, seed);
        if !config.quiet && !config.json {
            print_run_line(&stats, run);
        }
        runs.push(stats);
    }

    let report = Report {
        difficulty: config.difficulty,
        max_ticks: config.max_ticks,
        summary: Summary::from_runs(&runs),
        runs,
    };

    if config.json {
        let json = serde_json::to_string_pretty(&report).context("could not encode report")?;
        println!("{json}");
    } else {
        if !config.quiet {
            println!();
        }
        print_summary(&report);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim_config(seed: u64, max_ticks: u64) -> SimConfig {
        SimConfig {
            runs: 1,
            seed,
            max_ticks,
            difficulty: Difficulty::Novice,
            json: false,
            quiet: true,
        }
    }

    #[test]
    fn test_run_seed_increments() {
        assert_eq!(run_seed(42, 0), 42);
        assert_eq!(run_seed(42, 3), 45);
    }

    #[test]
    fn test_run_seed_wraps_at_max() {
        assert_eq!(run_seed(u64::MAX, 0), u64::MAX);
        assert_eq!(run_seed(u64::MAX, 1), 0);
        assert_eq!(run_seed(u64::MAX - 1, 3), 1);
    }

    #[test]
    fn test_run_at_max_seed_completes() {
        let config = sim_config(u64::MAX, 200);
        let stats = run_simulation(&config, run_seed(config.seed, 1));
        assert_eq!(stats.seed, 0);
        assert!(stats.ticks <= 200);
    }

    #[test]
    fn test_summary_counts_outcomes() {
        let mut survived = RunStats::new(1);
        survived.score = 4;
        let mut crashed = RunStats::new(2);
        crashed.score = 2;
        crashed.crash = Some(Collision::Ground);

        let summary = Summary::from_runs(&[survived, crashed]);
        assert_eq!(summary.min_score, 2);
        assert_eq!(summary.max_score, 4);
        assert!((summary.avg_score - 3.0).abs() < f64::EPSILON);
        assert_eq!(summary.survived, 1);
        assert_eq!(summary.ground_crashes, 1);
    }
}

//! Simulation state.
//!
//! [`FlappyGame`] is the whole mutable state of one run. Nothing lives in
//! globals, so any number of simulations can run side by side.

use super::config::GameConfig;
use serde::{Deserialize, Serialize};

/// The player-controlled entity. Only `y`, `velocity` and `frame` change
/// during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    pub x: f64,
    /// Top edge (y grows downward).
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Vertical velocity in units per tick (positive = downward).
    pub velocity: f64,
    pub gravity: f64,
    pub lift: f64,
    /// Animation frame index.
    pub frame: u32,
}

impl Bird {
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// A pipe pair. The passable gap spans `top..bottom`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge, decreasing every tick.
    pub x: f64,
    pub width: f64,
    /// Bottom edge of the upper segment.
    pub top: f64,
    /// Top edge of the lower segment, always `top + gap` at spawn time.
    pub bottom: f64,
}

impl Pipe {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn gap(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Score and difficulty counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    /// Pipes that have left the screen.
    pub score: u32,
    pub level: u32,
    /// Pipe speed in units per tick.
    pub game_speed: f64,
    /// Gap used for the next spawned pipe.
    pub gap: f64,
}

/// What ended a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    /// Hit the pipe at this index of `FlappyGame::pipes`.
    Pipe { index: usize },
    Ground,
    Ceiling,
}

impl Collision {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Pipe { .. } => "hit a pipe",
            Self::Ground => "hit the ground",
            Self::Ceiling => "flew into the ceiling",
        }
    }
}

/// Run lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Reset state, waiting for `start()`. Ticks are ignored.
    Ready,
    Running,
    /// Terminal. The state is frozen until `reset()`.
    Over(Collision),
}

/// Complete state of one simulation.
#[derive(Debug, Clone)]
pub struct FlappyGame {
    pub config: GameConfig,
    pub phase: Phase,
    pub bird: Bird,
    /// Live pipes in spawn order (oldest first).
    pub pipes: Vec<Pipe>,
    pub progression: Progression,
    /// Ticks since the last reset.
    pub tick_count: u64,
    /// Wall-clock milliseconds not yet consumed by a fixed step.
    pub accumulated_time_ms: u64,
}

impl FlappyGame {
    /// Fresh game in the `Ready` phase.
    ///
    /// `config` is taken as is; call [`GameConfig::validate`] first when it
    /// comes from outside. Zero spawn or animation intervals only disable
    /// those features, but other invalid values give a non-physical run.
    pub fn new(config: GameConfig) -> Self {
        Self {
            phase: Phase::Ready,
            bird: initial_bird(&config),
            pipes: Vec::new(),
            progression: initial_progression(&config),
            tick_count: 0,
            accumulated_time_ms: 0,
            config,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Over(_))
    }

    /// The collision that ended the run, if it has ended.
    pub fn collision(&self) -> Option<Collision> {
        match self.phase {
            Phase::Over(collision) => Some(collision),
            _ => None,
        }
    }
}

pub(crate) fn initial_bird(config: &GameConfig) -> Bird {
    Bird {
        x: config.bird.x,
        y: config.playfield.height / 2.0,
        width: config.bird.width,
        height: config.bird.height,
        velocity: 0.0,
        gravity: config.bird.gravity,
        lift: config.bird.lift,
        frame: 0,
    }
}

pub(crate) fn initial_progression(config: &GameConfig) -> Progression {
    Progression {
        score: 0,
        level: 1,
        game_speed: config.leveling.initial_speed,
        gap: config.leveling.initial_gap,
    }
}

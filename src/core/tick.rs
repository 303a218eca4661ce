//! Per-tick orchestration and the run lifecycle.
//!
//! [`advance`] processes exactly one tick and returns a [`TickOutcome`]
//! describing what happened, so hosts can draw, log or record scores without
//! the simulation knowing about any of them. The core never schedules itself:
//! the host decides when the next tick runs.
//!
//! Tick order:
//! 1. tick counter
//! 2. physics
//! 3. wing animation (every `cadence_ticks`)
//! 4. pipe spawn (every `spawn_interval`)
//! 5. per pipe, oldest first: move, collide, evict + score + level
//! 6. ground, then ceiling (only with `CeilingPolicy::Terminal`)
//!
//! A pipe collision short-circuits the rest of the tick, so a bird touching a
//! pipe and the ground at once is reported as a pipe collision.

use super::collision::{self, Hitbox};
use super::config::CeilingPolicy;
use super::leveling::{self, LevelUp};
use super::physics;
use super::pipes;
use super::types::{initial_bird, initial_progression, Collision, FlappyGame, Phase};
use rand::Rng;
use tracing::{debug, info};

/// Something noteworthy that happened during a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    PipeSpawned { top: f64, bottom: f64 },
    /// A pipe left the screen; `score` is the new total.
    PipePassed { score: u32 },
    LevelUp(LevelUp),
    Crashed { collision: Collision, score: u32 },
}

/// Whether the host should keep ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// The game is not running; nothing was simulated.
    Idle,
    Continue,
    Terminal(Collision),
}

/// Result of one or more ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// Ticks actually simulated.
    pub steps: u32,
    pub status: TickStatus,
    pub events: Vec<TickEvent>,
}

impl TickOutcome {
    pub fn idle() -> Self {
        Self {
            steps: 0,
            status: TickStatus::Idle,
            events: Vec::new(),
        }
    }

    pub fn should_continue(&self) -> bool {
        self.status == TickStatus::Continue
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.status, TickStatus::Terminal(_))
    }

    /// Fold a later outcome into this one.
    pub fn absorb(&mut self, later: TickOutcome) {
        self.steps += later.steps;
        self.events.extend(later.events);
        if later.status != TickStatus::Idle {
            self.status = later.status;
        }
    }

    pub fn passed_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TickEvent::PipePassed { .. }))
            .count()
    }
}

/// Reinitialise every part of the run and return to `Ready`.
pub fn reset(game: &mut FlappyGame) {
    game.phase = Phase::Ready;
    game.bird = initial_bird(&game.config);
    game.pipes.clear();
    game.progression = initial_progression(&game.config);
    game.tick_count = 0;
    game.accumulated_time_ms = 0;
    info!(difficulty = game.config.difficulty.name(), "game reset");
}

/// Begin a run from the reset state.
pub fn start(game: &mut FlappyGame) {
    reset(game);
    game.phase = Phase::Running;
    info!(difficulty = game.config.difficulty.name(), "run started");
}

/// Flap input. Ignored unless the run is in progress.
///
/// Returns true if the velocity was changed.
pub fn flap(game: &mut FlappyGame) -> bool {
    if !game.is_running() {
        return false;
    }
    physics::apply_lift(&mut game.bird);
    true
}

/// Simulate a single tick.
pub fn advance<R: Rng>(game: &mut FlappyGame, rng: &mut R) -> TickOutcome {
    if !game.is_running() {
        return TickOutcome::idle();
    }

    let mut outcome = TickOutcome {
        steps: 1,
        status: TickStatus::Continue,
        events: Vec::new(),
    };

    game.tick_count += 1;
    physics::integrate(&mut game.bird, game.config.ceiling);
    physics::animate(
        &mut game.bird,
        game.tick_count,
        game.config.animation.cadence_ticks,
        game.config.animation.frames,
    );

    if pipes::should_spawn(game.tick_count, game.config.pipes.spawn_interval) {
        let pipe = pipes::spawn_pipe(&game.config, game.progression.gap, rng);
        debug!(tick = game.tick_count, top = pipe.top, bottom = pipe.bottom, "pipe spawned");
        outcome.events.push(TickEvent::PipeSpawned {
            top: pipe.top,
            bottom: pipe.bottom,
        });
        game.pipes.push(pipe);
    }

    // Every pipe moves by the speed in effect when the tick began, even if a
    // level-up happens partway through the list.
    let speed = game.progression.game_speed;
    let hitbox = Hitbox::for_bird(&game.bird, game.config.hitbox_inset);
    let mut index = 0;
    while index < game.pipes.len() {
        let pipe = &mut game.pipes[index];
        pipes::move_pipe(pipe, speed);

        if hitbox.hits_pipe(pipe) {
            end_run(game, Collision::Pipe { index }, &mut outcome);
            return outcome;
        }

        if pipes::is_offscreen(pipe) {
            game.pipes.remove(index);
            pass_pipe(game, &mut outcome);
            continue;
        }
        index += 1;
    }

    if collision::hits_ground(&game.bird, &game.config.playfield) {
        end_run(game, Collision::Ground, &mut outcome);
    } else if game.config.ceiling == CeilingPolicy::Terminal && collision::hits_ceiling(&game.bird)
    {
        end_run(game, Collision::Ceiling, &mut outcome);
    }

    outcome
}

fn pass_pipe(game: &mut FlappyGame, outcome: &mut TickOutcome) {
    let level_up = leveling::record_pass(&mut game.progression, &game.config.leveling);
    outcome.events.push(TickEvent::PipePassed {
        score: game.progression.score,
    });

    if let Some(level_up) = level_up {
        debug!(
            level = level_up.level,
            speed = level_up.game_speed,
            gap = level_up.gap,
            "level up"
        );
        outcome.events.push(TickEvent::LevelUp(level_up));
    }
}

fn end_run(game: &mut FlappyGame, collision: Collision, outcome: &mut TickOutcome) {
    game.phase = Phase::Over(collision);
    outcome.status = TickStatus::Terminal(collision);
    outcome.events.push(TickEvent::Crashed {
        collision,
        score: game.progression.score,
    });
    debug!(
        tick = game.tick_count,
        score = game.progression.score,
        cause = collision.describe(),
        "run over"
    );
}

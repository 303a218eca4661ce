//! Flappy - a Flappy Bird simulation core with a terminal front end.
//!
//! The `core` module is a pure, deterministic-per-input state machine: the
//! host feeds it flap inputs and ticks, and reads back [`RenderFrame`]
//! snapshots. Everything else (terminal UI, score files) sits around it.

pub mod autopilot;
pub mod core;
pub mod scores;
pub mod utils;

// The terminal UI is used by the `flappy` binary; exposed so it can be tested.
pub mod ui;

pub use crate::core::{
    advance, flap, reset, start, tick_flappy, CeilingPolicy, Collision, Difficulty, FlappyGame,
    GameConfig, Phase, Pipe, RenderFrame, TickEvent, TickOutcome, TickStatus,
};

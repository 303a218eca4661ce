//! Simulation core: state, physics, pipes, collisions, leveling and the tick
//! loop. Nothing in here knows about terminals, files or clocks.

pub mod collision;
pub mod config;
pub mod constants;
pub mod game_loop;
pub mod leveling;
pub mod physics;
pub mod pipes;
pub mod render;
pub mod tick;
pub mod types;

pub use config::{CeilingPolicy, ConfigError, Difficulty, GameConfig};
pub use game_loop::tick_flappy;
pub use render::RenderFrame;
pub use tick::{advance, flap, reset, start, TickEvent, TickOutcome, TickStatus};
pub use types::{Bird, Collision, FlappyGame, Phase, Pipe, Progression};

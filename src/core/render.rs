//! Snapshot handed to the presentation layer once per frame.
//!
//! Everything a renderer needs is copied out of [`FlappyGame`] so drawing code
//! never touches simulation state.

use super::types::{FlappyGame, Phase};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirdView {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub velocity: f64,
    pub frame: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipeView {
    pub x: f64,
    pub width: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Scalar values for the heads-up display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u32,
    pub level: u32,
    pub speed: f64,
    pub gap: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub width: f64,
    pub height: f64,
    /// y coordinate where the ground band begins.
    pub ground_line: f64,
    pub phase: Phase,
    pub bird: BirdView,
    /// Oldest first.
    pub pipes: Vec<PipeView>,
    pub hud: Hud,
}

impl RenderFrame {
    pub fn capture(game: &FlappyGame) -> Self {
        let bird = &game.bird;
        let progression = &game.progression;
        Self {
            width: game.config.playfield.width,
            height: game.config.playfield.height,
            ground_line: game.config.playfield.ground_line(),
            phase: game.phase,
            bird: BirdView {
                x: bird.x,
                y: bird.y,
                width: bird.width,
                height: bird.height,
                velocity: bird.velocity,
                frame: bird.frame,
            },
            pipes: game
                .pipes
                .iter()
                .map(|p| PipeView {
                    x: p.x,
                    width: p.width,
                    top: p.top,
                    bottom: p.bottom,
                })
                .collect(),
            hud: Hud {
                score: progression.score,
                level: progression.level,
                speed: progression.game_speed,
                gap: progression.gap,
            },
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Over(_))
    }
}

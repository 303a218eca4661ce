//! Heuristic pilot used by the headless simulator.
//!
//! Aims the bird's hitbox just above the lower edge of the next gap it still
//! has to clear and flaps whenever the next tick would sink below that line.

use crate::core::collision::Hitbox;
use crate::core::types::{FlappyGame, Pipe};

/// Distance kept between the hitbox bottom and the gap bottom.
const SAFETY_MARGIN: f64 = 12.0;

/// The first pipe whose right edge is still ahead of the bird's hitbox.
pub fn next_pipe(game: &FlappyGame) -> Option<&Pipe> {
    let hitbox = Hitbox::for_bird(&game.bird, game.config.hitbox_inset);
    game.pipes.iter().find(|p| p.right() > hitbox.left)
}

/// y the hitbox bottom should stay above.
pub fn target_line(game: &FlappyGame) -> f64 {
    match next_pipe(game) {
        Some(pipe) => pipe.bottom - SAFETY_MARGIN,
        None => game.config.playfield.ground_line() * 0.6,
    }
}

pub fn should_flap(game: &FlappyGame) -> bool {
    if !game.is_running() {
        return false;
    }
    let bird = &game.bird;
    let hitbox = Hitbox::for_bird(bird, game.config.hitbox_inset);
    let predicted_bottom = hitbox.bottom + bird.velocity + bird.gravity;
    predicted_bottom > target_line(game)
}

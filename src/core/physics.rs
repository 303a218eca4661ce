//! Vertical motion of the bird.

use super::config::CeilingPolicy;
use super::types::Bird;

/// One semi-implicit Euler step: velocity first, then position with the new
/// velocity. `CeilingPolicy::Clamp` keeps the bird from leaving the top.
pub fn integrate(bird: &mut Bird, ceiling: CeilingPolicy) {
    bird.velocity += bird.gravity;
    bird.y += bird.velocity;

    if ceiling == CeilingPolicy::Clamp && bird.y < 0.0 {
        bird.y = 0.0;
    }
}

/// Overwrite velocity with the lift constant. Not additive.
pub fn apply_lift(bird: &mut Bird) {
    bird.velocity = bird.lift;
}

/// Advance the wing animation on cadence ticks. A zero cadence or frame count
/// leaves the frame alone.
pub fn animate(bird: &mut Bird, tick_count: u64, cadence_ticks: u64, frames: u32) {
    if cadence_ticks == 0 || frames == 0 {
        return;
    }
    if tick_count % cadence_ticks == 0 {
        bird.frame = (bird.frame + 1) % frames;
    }
}

//! Fixed-timestep driver for real-time hosts.
//!
//! Hosts call [`tick_flappy`] once per rendered frame with the wall-clock
//! time since the previous call. The simulation itself always advances in
//! whole ticks of `timestep.step_ms`, so its behaviour does not depend on the
//! display refresh rate.

use super::tick::{advance, TickOutcome};
use super::types::FlappyGame;
use rand::Rng;

/// Consume `dt_ms` of wall-clock time, running as many fixed ticks as fit.
///
/// The delta is clamped to `timestep.max_frame_ms` so a long stall (window
/// dragged, process suspended) cannot dump a burst of ticks at once. Stops at
/// the first terminal tick and drops any leftover time.
pub fn tick_flappy<R: Rng>(game: &mut FlappyGame, dt_ms: u64, rng: &mut R) -> TickOutcome {
    if !game.is_running() {
        return TickOutcome::idle();
    }

    let step_ms = game.config.timestep.step_ms;
    game.accumulated_time_ms += dt_ms.min(game.config.timestep.max_frame_ms);

    let mut total = TickOutcome::idle();
    while game.accumulated_time_ms >= step_ms {
        game.accumulated_time_ms -= step_ms;
        let outcome = advance(game, rng);
        let terminal = outcome.is_terminal();
        total.absorb(outcome);

        if terminal {
            game.accumulated_time_ms = 0;
            break;
        }
    }

    total
}

/// Ticks of simulated time per second of wall-clock time.
pub fn ticks_per_second(step_ms: u64) -> f64 {
    1000.0 / step_ms as f64
}

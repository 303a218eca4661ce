//! Pipe spawning, scrolling and eviction.

use super::config::GameConfig;
use super::types::Pipe;
use rand::Rng;

/// True on ticks where a new pipe should enter. An interval of 0 never spawns.
pub fn should_spawn(tick_count: u64, spawn_interval: u64) -> bool {
    spawn_interval != 0 && tick_count % spawn_interval == 0
}

/// Build a pipe at the right edge with a random gap of height `gap`.
///
/// The gap top is uniform in `[0, height * split_factor]`.
pub fn spawn_pipe<R: Rng>(config: &GameConfig, gap: f64, rng: &mut R) -> Pipe {
    let max_top = config.playfield.height * config.pipes.split_factor;
    let top = rng.gen_range(0.0..=max_top);
    Pipe {
        x: config.playfield.width,
        width: config.pipes.width,
        top,
        bottom: top + gap,
    }
}

/// Scroll a pipe left by `speed`.
pub fn move_pipe(pipe: &mut Pipe, speed: f64) {
    pipe.x -= speed;
}

/// A pipe leaves the active set once its right edge is past the left boundary.
pub fn is_offscreen(pipe: &Pipe) -> bool {
    pipe.right() < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_spawn_at_right_edge_with_gap() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let pipe = spawn_pipe(&config, 180.0, &mut rng);
            assert_eq!(pipe.x, 800.0);
            assert_eq!(pipe.width, 80.0);
            assert!(pipe.top >= 0.0 && pipe.top <= 270.0);
            assert!((pipe.gap() - 180.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_should_spawn_on_interval() {
        assert!(!should_spawn(1, 100));
        assert!(!should_spawn(99, 100));
        assert!(should_spawn(100, 100));
        assert!(should_spawn(200, 100));
        assert!(!should_spawn(0, 0));
        assert!(!should_spawn(100, 0));
    }

    #[test]
    fn test_move_is_linear_in_ticks() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut pipe = spawn_pipe(&config, 180.0, &mut rng);
        for _ in 0..150 {
            move_pipe(&mut pipe, 2.0);
        }
        assert_eq!(pipe.x, 800.0 - 150.0 * 2.0);
    }

    #[test]
    fn test_offscreen_uses_right_edge() {
        let mut pipe = Pipe {
            x: 0.0,
            width: 80.0,
            top: 100.0,
            bottom: 280.0,
        };
        assert!(!is_offscreen(&pipe));
        pipe.x = -80.0;
        assert!(!is_offscreen(&pipe)); // right edge exactly at 0
        pipe.x = -80.5;
        assert!(is_offscreen(&pipe));
    }
}

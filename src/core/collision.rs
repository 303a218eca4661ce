//! Collision tests between the bird, pipes and the playfield bounds.

use super::config::Playfield;
use super::types::{Bird, Pipe};

/// Axis-aligned box used for pipe tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Hitbox {
    /// The bird's box shrunk by `inset` on every side.
    pub fn for_bird(bird: &Bird, inset: f64) -> Self {
        Self {
            left: bird.x + inset,
            top: bird.y + inset,
            right: bird.x + bird.width - inset,
            bottom: bird.y + bird.height - inset,
        }
    }

    pub fn overlaps_horizontally(&self, pipe: &Pipe) -> bool {
        self.right > pipe.x && self.left < pipe.right()
    }

    /// Within the pipe's columns, the box must sit fully inside the gap.
    pub fn hits_pipe(&self, pipe: &Pipe) -> bool {
        self.overlaps_horizontally(pipe) && (self.top < pipe.top || self.bottom > pipe.bottom)
    }
}

/// Ground contact uses the raw sprite box, not the inset hitbox.
pub fn hits_ground(bird: &Bird, playfield: &Playfield) -> bool {
    bird.bottom() >= playfield.ground_line()
}

pub fn hits_ceiling(bird: &Bird) -> bool {
    bird.y <= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::core::types::initial_bird;

    const EPS: f64 = 0.01;

    fn bird_at(y: f64) -> Bird {
        let mut bird = initial_bird(&GameConfig::default());
        bird.y = y;
        bird
    }

    fn pipe_at(x: f64, top: f64, bottom: f64) -> Pipe {
        Pipe {
            x,
            width: 80.0,
            top,
            bottom,
        }
    }

    #[test]
    fn test_inset_shrinks_box() {
        let bird = bird_at(300.0);
        let hb = Hitbox::for_bird(&bird, 8.0);
        assert_eq!(hb.left, 158.0);
        assert_eq!(hb.right, 192.0);
        assert_eq!(hb.top, 308.0);
        assert_eq!(hb.bottom, 332.0);
    }

    #[test]
    fn test_no_horizontal_overlap_no_collision() {
        let hb = Hitbox::for_bird(&bird_at(0.0), 0.0);
        // Bird spans 150..200; pipe spans 200..280 (touching is not overlap)
        let pipe = pipe_at(200.0, 300.0, 480.0);
        assert!(!hb.hits_pipe(&pipe));
        let pipe = pipe_at(70.0, 300.0, 480.0);
        assert!(!hb.hits_pipe(&pipe));
    }

    #[test]
    fn test_bottom_edge_boundary() {
        let pipe = pipe_at(140.0, 100.0, 400.0);
        // Bird 40 tall, no inset: bottom edge = y + 40
        let just_above = Hitbox::for_bird(&bird_at(400.0 - 40.0 - EPS), 0.0);
        assert!(!just_above.hits_pipe(&pipe));
        let just_below = Hitbox::for_bird(&bird_at(400.0 - 40.0 + EPS), 0.0);
        assert!(just_below.hits_pipe(&pipe));
    }

    #[test]
    fn test_top_edge_boundary() {
        let pipe = pipe_at(140.0, 100.0, 400.0);
        let just_inside = Hitbox::for_bird(&bird_at(100.0 + EPS), 0.0);
        assert!(!just_inside.hits_pipe(&pipe));
        let just_outside = Hitbox::for_bird(&bird_at(100.0 - EPS), 0.0);
        assert!(just_outside.hits_pipe(&pipe));
    }

    #[test]
    fn test_inset_is_forgiving() {
        let pipe = pipe_at(140.0, 100.0, 400.0);
        // Raw sprite pokes 5 units into the lower segment
        let bird = bird_at(365.0);
        assert!(Hitbox::for_bird(&bird, 0.0).hits_pipe(&pipe));
        assert!(!Hitbox::for_bird(&bird, 8.0).hits_pipe(&pipe));
    }

    #[test]
    fn test_inset_narrows_horizontal_reach() {
        // Pipe right edge at 155: raw bird (150..200) overlaps, inset bird (158..192) does not
        let pipe = pipe_at(75.0, 400.0, 500.0);
        let bird = bird_at(100.0);
        assert!(Hitbox::for_bird(&bird, 0.0).hits_pipe(&pipe));
        assert!(!Hitbox::for_bird(&bird, 8.0).hits_pipe(&pipe));
    }

    #[test]
    fn test_ground_contact_at_line() {
        let playfield = GameConfig::default().playfield;
        // Ground line = 540; bird is 40 tall
        assert!(hits_ground(&bird_at(500.0), &playfield));
        assert!(!hits_ground(&bird_at(500.0 - EPS), &playfield));
    }

    #[test]
    fn test_ceiling_contact() {
        assert!(hits_ceiling(&bird_at(0.0)));
        assert!(hits_ceiling(&bird_at(-3.0)));
        assert!(!hits_ceiling(&bird_at(EPS)));
    }
}

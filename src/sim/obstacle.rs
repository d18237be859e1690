//! Obstacle entities and the shape-preset catalog
//!
//! Obstacles are axis-aligned boxes resting on the ground line. The collision
//! test approximates the runner's body with fixed margins around its point
//! position.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Player, Viewport};
use crate::consts::*;

/// Width/height presets obstacles spawn with, chosen uniformly
pub const SHAPE_PRESETS: [(f32, f32); 4] =
    [(30.0, 30.0), (40.0, 60.0), (70.0, 40.0), (20.0, 80.0)];

#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub w: f32,
    pub h: f32,
    /// Prevents duplicate scoring once the obstacle is behind the runner
    pub passed: bool,
}

impl Obstacle {
    /// Spawn just past the right edge of the viewport with a random preset
    pub fn spawn(viewport: Viewport, rng: &mut Pcg32) -> Self {
        let (w, h) = SHAPE_PRESETS[rng.random_range(0..SHAPE_PRESETS.len())];
        Self {
            pos: Vec2::new(
                viewport.width + SPAWN_LEAD,
                viewport.ground_y() - h + OBSTACLE_SINK,
            ),
            w,
            h,
            passed: false,
        }
    }

    /// Scroll left by the current speed
    pub fn advance(&mut self, speed: f32) {
        self.pos.x -= speed;
    }

    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.pos.x + self.w
    }

    /// Fully scrolled off the left edge; safe to prune
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.right_edge() < 0.0
    }

    /// Bounding-box overlap against the runner's margin box
    /// (±10 horizontal, +10 below / -40 above its point position)
    pub fn overlaps_player(&self, player: &Player) -> bool {
        player.pos.x - PLAYER_HALF_WIDTH < self.right_edge()
            && player.pos.x + PLAYER_HALF_WIDTH > self.pos.x
            && player.pos.y + PLAYER_FOOT_MARGIN > self.pos.y
            && player.pos.y - PLAYER_HEAD_MARGIN < self.pos.y + self.h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const GROUND_Y: f32 = 500.0;

    fn obstacle_at(x: f32, w: f32, h: f32) -> Obstacle {
        Obstacle {
            pos: Vec2::new(x, GROUND_Y - h + OBSTACLE_SINK),
            w,
            h,
            passed: false,
        }
    }

    #[test]
    fn test_spawn_position_and_preset() {
        let viewport = Viewport::new(800.0, GROUND_Y + GROUND_MARGIN);
        let mut rng = Pcg32::seed_from_u64(7);

        let o = Obstacle::spawn(viewport, &mut rng);
        assert_eq!(o.pos.x, 840.0);
        assert!(SHAPE_PRESETS.contains(&(o.w, o.h)));
        // Resting on the ground line, sunk in by the fixed offset
        assert_eq!(o.pos.y, GROUND_Y - o.h + OBSTACLE_SINK);
        assert!(!o.passed);
    }

    #[test]
    fn test_overlap_grounded_runner() {
        // Player at x=140 on the ground, obstacle at x=145, 30x30
        let player = Player::new(GROUND_Y);
        let o = Obstacle {
            pos: Vec2::new(145.0, GROUND_Y - 20.0),
            w: 30.0,
            h: 30.0,
            passed: false,
        };
        assert!(o.overlaps_player(&player));
    }

    #[test]
    fn test_no_overlap_when_cleared_vertically() {
        let mut player = Player::new(GROUND_Y);
        player.pos.y = GROUND_Y - 150.0; // well above the tallest preset
        let o = obstacle_at(140.0, 30.0, 30.0);
        assert!(!o.overlaps_player(&player));
    }

    #[test]
    fn test_no_overlap_when_behind() {
        let player = Player::new(GROUND_Y);
        let o = obstacle_at(80.0, 30.0, 30.0);
        assert!(o.right_edge() < player.pos.x - PLAYER_HALF_WIDTH);
        assert!(!o.overlaps_player(&player));
    }

    #[test]
    fn test_offscreen_predicate() {
        let mut o = obstacle_at(10.0, 30.0, 30.0);
        assert!(!o.is_offscreen());
        o.advance(45.0);
        assert!(o.is_offscreen());
    }
}

//! Axis-aligned collision between the player and obstacles
//!
//! Sprite frames carry transparent padding, so each frame rectangle is shrunk
//! by a per-entity inset before the overlap test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in pixel space (y grows downward)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of size `w`x`h` with its top-left corner at `pos`
    pub fn at(pos: Vec2, w: f32, h: f32) -> Self {
        Self::new(pos.x, pos.y, w, h)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Shrink by `inset` on every side. Size never goes below zero.
    pub fn inset(&self, inset: f32) -> Self {
        Self {
            x: self.x + inset,
            y: self.y + inset,
            w: (self.w - 2.0 * inset).max(0.0),
            h: (self.h - 2.0 * inset).max(0.0),
        }
    }

    /// Strict overlap: rectangles that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Padded hitbox for a sprite drawn at `pos` with a `w`x`h` frame
pub fn hitbox(pos: Vec2, w: f32, h: f32, inset: f32) -> Rect {
    Rect::at(pos, w, h).inset(inset)
}

/// Player-vs-obstacles overlap test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionJudge {
    pub player_inset: f32,
    pub obstacle_inset: f32,
}

impl CollisionJudge {
    pub fn new(player_inset: f32, obstacle_inset: f32) -> Self {
        Self {
            player_inset,
            obstacle_inset,
        }
    }

    /// Index of the first obstacle whose padded box overlaps the padded
    /// player box. Obstacles are checked in order; later ones are skipped.
    pub fn first_hit<I>(&self, player: Rect, obstacles: I) -> Option<usize>
    where
        I: IntoIterator<Item = Rect>,
    {
        let player = player.inset(self.player_inset);
        obstacles
            .into_iter()
            .position(|obstacle| player.intersects(&obstacle.inset(self.obstacle_inset)))
    }

    /// True if the player overlaps any obstacle
    pub fn collides<I>(&self, player: Rect, obstacles: I) -> bool
    where
        I: IntoIterator<Item = Rect>,
    {
        self.first_hit(player, obstacles).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(20.0, 0.0, 10.0, 10.0)));
        // Touching edges do not count
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_inset() {
        let r = Rect::new(100.0, 200.0, 100.0, 100.0).inset(50.0);
        assert_eq!(r, Rect::new(150.0, 250.0, 0.0, 0.0));

        let r = Rect::new(0.0, 0.0, 128.0, 128.0).inset(1.0);
        assert_eq!(r, Rect::new(1.0, 1.0, 126.0, 126.0));
    }

    #[test]
    fn test_inset_never_negative() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0).inset(20.0);
        assert_eq!(r.w, 0.0);
        assert_eq!(r.h, 0.0);
    }

    #[test]
    fn test_overlap_inside_padding_is_not_a_hit() {
        let judge = CollisionJudge::new(1.0, 20.0);
        let player = Rect::new(0.0, 0.0, 100.0, 100.0);
        // Raw frames overlap by 15px horizontally, padding trims 21px
        let obstacle = Rect::new(85.0, 0.0, 100.0, 100.0);
        assert!(player.intersects(&obstacle));
        assert!(!judge.collides(player, [obstacle]));
    }

    #[test]
    fn test_overlap_past_padding_is_a_hit() {
        let judge = CollisionJudge::new(1.0, 20.0);
        let player = Rect::new(0.0, 0.0, 100.0, 100.0);
        let obstacle = Rect::new(60.0, 0.0, 100.0, 100.0);
        assert!(judge.collides(player, [obstacle]));
    }

    #[test]
    fn test_first_hit_short_circuits_in_order() {
        let judge = CollisionJudge::new(0.0, 0.0);
        let player = Rect::new(0.0, 0.0, 10.0, 10.0);
        let obstacles = [
            Rect::new(50.0, 0.0, 10.0, 10.0),
            Rect::new(5.0, 0.0, 10.0, 10.0),
            Rect::new(0.0, 0.0, 10.0, 10.0),
        ];

        let mut visited = 0;
        let hit = judge.first_hit(
            player,
            obstacles.iter().inspect(|_| visited += 1).copied(),
        );
        assert_eq!(hit, Some(1));
        assert_eq!(visited, 2);
    }

    #[test]
    fn test_no_obstacles_no_hit() {
        let judge = CollisionJudge::new(1.0, 50.0);
        assert!(!judge.collides(Rect::new(0.0, 0.0, 10.0, 10.0), std::iter::empty()));
    }
}

//! Player jump physics
//!
//! The player never moves horizontally. Each frame:
//! 1. Grounded (at or below ground level): velocity is zeroed, and a held
//!    jump key assigns the jump impulse. Airborne: gravity accumulates.
//! 2. Position integrates the velocity from step 1 (explicit Euler).
//! 3. The run cycle advances only if the frame started grounded.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, hitbox};
use super::sprite::AnimatedSprite;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerController {
    pub sprite: AnimatedSprite,
    /// Top-left corner of the drawn frame
    pub pos: Vec2,
    /// Vertical velocity (pixels/s, negative is up)
    pub vel_y: f32,
    /// Resting y: window height minus sprite height
    ground_y: f32,
    gravity: f32,
    jump_velocity: f32,
}

impl PlayerController {
    /// Place the player horizontally centred and standing on the ground
    pub fn new(
        sprite: AnimatedSprite,
        window_width: f32,
        window_height: f32,
        gravity: f32,
        jump_velocity: f32,
    ) -> Self {
        let ground_y = window_height - sprite.height();
        let pos = Vec2::new(window_width / 2.0 - sprite.width() / 2.0, ground_y);
        Self {
            sprite,
            pos,
            vel_y: 0.0,
            ground_y,
            gravity,
            jump_velocity,
        }
    }

    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.ground_y
    }

    /// Derived from position; there is no separate airborne flag to get out of sync
    #[inline]
    pub fn is_airborne(&self) -> bool {
        self.pos.y < self.ground_y
    }

    /// Frame rectangle in screen space
    pub fn bounds(&self) -> Rect {
        Rect::at(self.pos, self.sprite.width(), self.sprite.height())
    }

    /// Screen-space hitbox shrunk by `inset`
    pub fn hitbox(&self, inset: f32) -> Rect {
        hitbox(self.pos, self.sprite.width(), self.sprite.height(), inset)
    }

    /// Advance one frame. Returns true if a jump started this frame.
    pub fn update(&mut self, dt: f32, jump_held: bool) -> bool {
        let grounded = !self.is_airborne();
        let mut jumped = false;

        if grounded {
            self.vel_y = 0.0;
            if jump_held {
                self.vel_y = self.jump_velocity;
                jumped = true;
            }
        } else {
            self.vel_y += self.gravity * dt;
        }

        self.pos.y += self.vel_y * dt;

        if grounded {
            self.sprite.advance(dt);
        }

        jumped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SheetConfig;
    use crate::consts::*;

    fn player() -> PlayerController {
        let sprite = AnimatedSprite::new(SheetConfig::player(), TARGET_FPS).expect("valid sheet");
        PlayerController::new(
            sprite,
            WINDOW_WIDTH as f32,
            WINDOW_HEIGHT as f32,
            GRAVITY,
            JUMP_VELOCITY,
        )
    }

    #[test]
    fn test_spawns_centred_on_ground() {
        let p = player();
        assert_eq!(p.pos, Vec2::new(192.0, 252.0));
        assert_eq!(p.ground_y(), 252.0);
        assert!(!p.is_airborne());
        assert_eq!(p.vel_y, 0.0);
    }

    #[test]
    fn test_jump_sets_impulse_same_frame() {
        let mut p = player();
        assert!(p.update(FRAME_DT, true));
        assert_eq!(p.vel_y, JUMP_VELOCITY);
        assert!(p.is_airborne());
        assert!(p.pos.y < p.ground_y());
    }

    #[test]
    fn test_no_double_jump() {
        let mut p = player();
        p.update(FRAME_DT, true);
        let vel_after_jump = p.vel_y;

        // Holding jump while airborne only applies gravity
        assert!(!p.update(FRAME_DT, true));
        assert!((p.vel_y - (vel_after_jump + GRAVITY * FRAME_DT)).abs() < 1e-3);
    }

    #[test]
    fn test_gravity_before_position() {
        let mut p = player();
        p.pos.y = 100.0;
        p.vel_y = 0.0;
        p.update(0.1, false);
        // v = 1200 * 0.1 = 120, y += 120 * 0.1
        assert!((p.vel_y - 120.0).abs() < 1e-3);
        assert!((p.pos.y - 112.0).abs() < 1e-3);
    }

    #[test]
    fn test_lands_and_can_jump_again() {
        let mut p = player();
        p.update(FRAME_DT, true);

        let mut frames = 0;
        while p.is_airborne() {
            p.update(FRAME_DT, true);
            frames += 1;
            assert!(frames < 200, "player never landed");
        }
        // Next grounded frame zeroes velocity and honours the held key
        assert!(p.update(FRAME_DT, true));
        assert_eq!(p.vel_y, JUMP_VELOCITY);
    }

    #[test]
    fn test_animation_frozen_while_airborne() {
        let mut p = player();
        p.update(FRAME_DT, true);
        let frame = p.sprite.frame();
        let running = p.sprite.running_time();
        for _ in 0..10 {
            p.update(FRAME_DT, false);
        }
        assert!(p.is_airborne());
        assert_eq!(p.sprite.frame(), frame);
        assert_eq!(p.sprite.running_time(), running);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut p = player();
        let before = p.clone();
        p.update(0.0, false);
        assert_eq!(p, before);
    }

    #[test]
    fn test_hitbox_inset() {
        let p = player();
        assert_eq!(p.hitbox(1.0), Rect::new(193.0, 253.0, 126.0, 126.0));
        assert_eq!(p.bounds(), Rect::new(192.0, 252.0, 128.0, 128.0));
    }
}

//! Obstacles scrolling toward the player
//!
//! A fixed set of obstacles share one sheet layout but animate and move
//! independently. An obstacle that leaves the left edge is moved back past
//! the right edge with a random gap, never closer than `respawn_min_gap`
//! behind the trailing obstacle. None are ever created or destroyed.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, hitbox};
use super::sprite::AnimatedSprite;
use crate::config::GameConfig;

/// A single obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub sprite: AnimatedSprite,
    /// Top-left corner of the drawn frame
    pub pos: Vec2,
}

impl Obstacle {
    #[inline]
    pub fn width(&self) -> f32 {
        self.sprite.width()
    }

    pub fn bounds(&self) -> Rect {
        Rect::at(self.pos, self.sprite.width(), self.sprite.height())
    }

    pub fn hitbox(&self, inset: f32) -> Rect {
        hitbox(self.pos, self.sprite.width(), self.sprite.height(), inset)
    }

    /// Fully past the left screen edge
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.width() < 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
    /// Leftward speed (pixels/s)
    pub speed: f32,
    window_width: f32,
    /// Respawn gap is `k * width` for `k` in `0..respawn_slots`
    respawn_slots: u32,
    /// Floor on the distance behind the trailing obstacle, 0 when off
    respawn_min_gap: f32,
}

impl ObstacleField {
    /// Line up `config.obstacle_count` obstacles on the ground, the first at
    /// the right screen edge and each next one `obstacle_spacing` further
    /// right. `config` must already be validated.
    pub fn new(sprite: AnimatedSprite, config: &GameConfig) -> Self {
        debug_assert!(config.respawn_offset_slots > 0);

        let window_width = config.window_width as f32;
        let y = config.window_height as f32 - sprite.height();
        let obstacles = (0..config.obstacle_count)
            .map(|i| Obstacle {
                sprite: sprite.clone(),
                pos: Vec2::new(window_width + i as f32 * config.obstacle_spacing, y),
            })
            .collect();

        Self {
            obstacles,
            speed: config.obstacle_speed,
            window_width,
            respawn_slots: config.respawn_offset_slots,
            respawn_min_gap: config.respawn_min_gap,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Smallest x an obstacle can respawn at
    #[inline]
    pub fn respawn_min_x(&self, width: f32) -> f32 {
        self.window_width + width
    }

    /// Largest x the random offset alone can give. The gap floor may push a
    /// respawn further right.
    #[inline]
    pub fn respawn_max_x(&self, width: f32) -> f32 {
        self.window_width + width + (self.respawn_slots - 1) as f32 * width
    }

    /// x of the right-most obstacle
    pub fn trailing_x(&self) -> f32 {
        self.obstacles
            .iter()
            .map(|o| o.pos.x)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    fn respawn_x<R: Rng>(&self, width: f32, rng: &mut R) -> f32 {
        let slot = rng.random_range(0..self.respawn_slots);
        let x = self.window_width + width + slot as f32 * width;
        if self.respawn_min_gap > 0.0 {
            x.max(self.trailing_x() + self.respawn_min_gap)
        } else {
            x
        }
    }

    /// Move every obstacle, respawn any that left the screen, then animate.
    /// Returns how many respawned this frame.
    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) -> usize {
        for o in &mut self.obstacles {
            o.pos.x -= self.speed * dt;
        }

        let mut respawned = 0;
        for i in 0..self.obstacles.len() {
            if self.obstacles[i].is_off_screen() {
                let x = self.respawn_x(self.obstacles[i].width(), rng);
                log::debug!("Obstacle {} respawned at x={:.1}", i, x);
                self.obstacles[i].pos.x = x;
                respawned += 1;
            }

            self.obstacles[i].sprite.advance(dt);
        }

        respawned
    }

    /// Padded hitboxes in field order
    pub fn hitboxes(&self, inset: f32) -> impl Iterator<Item = Rect> + '_ {
        self.obstacles.iter().map(move |o| o.hitbox(inset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn field_with(config: GameConfig) -> ObstacleField {
        let sprite = AnimatedSprite::new(config.obstacle_sheet, config.fps).expect("valid sheet");
        ObstacleField::new(sprite, &config)
    }

    fn field() -> ObstacleField {
        field_with(GameConfig::default())
    }

    /// Respawn purely from the random offset
    fn unfloored_field() -> ObstacleField {
        field_with(GameConfig {
            respawn_min_gap: 0.0,
            ..Default::default()
        })
    }

    #[test]
    fn test_initial_layout() {
        let field = field();
        assert_eq!(field.len(), OBSTACLE_COUNT);
        let xs: Vec<f32> = field.obstacles.iter().map(|o| o.pos.x).collect();
        assert_eq!(xs, vec![512.0, 962.0, 1412.0]);
        assert!(field.obstacles.iter().all(|o| o.pos.y == 252.0));
        assert_eq!(field.trailing_x(), 1412.0);
    }

    #[test]
    fn test_moves_left() {
        let mut field = field();
        let mut rng = Pcg32::seed_from_u64(1);
        field.update(0.25, &mut rng);
        assert_eq!(field.obstacles[0].pos.x, 412.0);
        assert_eq!(field.obstacles[2].pos.x, 1312.0);
    }

    #[test]
    fn test_respawn_same_frame() {
        let mut field = unfloored_field();
        let mut rng = Pcg32::seed_from_u64(42);
        field.obstacles[0].pos.x = -125.0;

        let respawned = field.update(FRAME_DT, &mut rng);
        assert_eq!(respawned, 1);

        let o = &field.obstacles[0];
        assert!(o.pos.x >= field.respawn_min_x(o.width()));
        assert!(o.pos.x <= field.respawn_max_x(o.width()));
    }

    #[test]
    fn test_edge_still_visible_is_not_respawned() {
        let mut field = field();
        let mut rng = Pcg32::seed_from_u64(42);
        field.obstacles[0].pos.x = -118.0;
        // -118 - 400/60 = -124.67, right edge still at +3.3
        assert_eq!(field.update(FRAME_DT, &mut rng), 0);
        assert!(field.obstacles[0].pos.x < 0.0);
    }

    #[test]
    fn test_respawn_offsets_are_width_multiples() {
        let mut field = unfloored_field();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..200 {
            field.obstacles[0].pos.x = -1000.0;
            field.update(0.0, &mut rng);
            let gap = field.obstacles[0].pos.x - (WINDOW_WIDTH as f32 + 128.0);
            assert_eq!(gap % 128.0, 0.0);
            assert!((0.0..=7.0 * 128.0).contains(&gap));
            seen.insert(gap as u32);
        }
        assert_eq!(seen.len(), RESPAWN_OFFSET_SLOTS as usize);
    }

    #[test]
    fn test_respawn_keeps_min_gap() {
        let mut field = field();
        let mut rng = Pcg32::seed_from_u64(5);
        field.obstacles[0].pos.x = -200.0;

        assert_eq!(field.update(0.0, &mut rng), 1);
        // Largest random spot is 512 + 128 + 7 * 128 = 1536, short of 1412 + 450
        assert_eq!(field.obstacles[0].pos.x, 1862.0);
        assert_eq!(field.trailing_x(), 1862.0);
    }

    #[test]
    fn test_obstacles_animate_independently() {
        let mut field = field();
        let mut rng = Pcg32::seed_from_u64(3);
        field.obstacles[1].sprite.advance(0.1);
        field.update(0.1, &mut rng);
        assert_eq!(field.obstacles[0].sprite.frame(), 0);
        assert_eq!(field.obstacles[1].sprite.frame(), 1);
    }

    proptest! {
        #[test]
        fn prop_never_left_off_screen(
            seed in any::<u64>(),
            dts in prop::collection::vec(0.0f32..0.2, 1..300),
        ) {
            let mut field = field();
            let mut rng = Pcg32::seed_from_u64(seed);
            for dt in dts {
                field.update(dt, &mut rng);
                for o in &field.obstacles {
                    prop_assert!(!o.is_off_screen());
                }
            }
        }

        #[test]
        fn prop_gaps_never_below_floor(
            seed in any::<u64>(),
            dts in prop::collection::vec(0.0f32..0.1, 1..300),
        ) {
            let mut field = field();
            let mut rng = Pcg32::seed_from_u64(seed);
            for dt in dts {
                field.update(dt, &mut rng);
                let mut xs: Vec<f32> = field.obstacles.iter().map(|o| o.pos.x).collect();
                xs.sort_by(f32::total_cmp);
                for pair in xs.windows(2) {
                    prop_assert!(pair[1] - pair[0] >= RESPAWN_MIN_GAP - 0.01);
                }
            }
        }
    }
}

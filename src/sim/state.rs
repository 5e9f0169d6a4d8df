//! World state and render snapshot
//!
//! Everything the per-frame step mutates lives in [`World`]. The renderer
//! reads a [`FrameSnapshot`] and never touches the world directly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::{CollisionJudge, Rect};
use super::layer::ScrollingLayer;
use super::obstacles::ObstacleField;
use super::player::PlayerController;
use super::race::{RaceOutcome, RaceState};
use super::sprite::AnimatedSprite;
use crate::config::GameConfig;
use crate::error::ConfigError;

/// Complete simulation state for one race
#[derive(Debug, Clone)]
pub struct World {
    pub config: GameConfig,
    pub player: PlayerController,
    pub obstacles: ObstacleField,
    /// Back to front
    pub layers: Vec<ScrollingLayer>,
    pub judge: CollisionJudge,
    pub race: RaceState,
    /// Result of the most recent collision test
    pub last_collision: bool,
    /// Frames with a positive elapsed time simulated while the race was
    /// running
    pub time_ticks: u64,
    /// Seconds simulated while the race was running
    pub elapsed: f32,
    /// Respawn RNG, seeded from the config
    pub rng: Pcg32,
}

impl World {
    /// Validate `config` and lay out a fresh race
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let window_w = config.window_width as f32;
        let window_h = config.window_height as f32;

        let player_sprite = AnimatedSprite::new(config.player_sheet, config.fps)?;
        let player = PlayerController::new(
            player_sprite,
            window_w,
            window_h,
            config.gravity,
            config.jump_velocity,
        );

        let obstacle_sprite = AnimatedSprite::new(config.obstacle_sheet, config.fps)?;
        let obstacles = ObstacleField::new(obstacle_sprite, &config);

        let layers = config.layers.iter().map(ScrollingLayer::new).collect();

        log::info!(
            "World ready: {}x{} window, {} obstacles, finish at {}px, seed {}",
            config.window_width,
            config.window_height,
            config.obstacle_count,
            config.finish_distance,
            config.seed
        );

        Ok(Self {
            judge: CollisionJudge::new(config.player_inset, config.obstacle_inset),
            race: RaceState::new(config.finish_distance),
            rng: Pcg32::seed_from_u64(config.seed),
            player,
            obstacles,
            layers,
            last_collision: false,
            time_ticks: 0,
            elapsed: 0.0,
            config,
        })
    }

    #[inline]
    pub fn outcome(&self) -> RaceOutcome {
        self.race.outcome()
    }

    /// Everything the renderer and HUD need for this frame
    pub fn snapshot(&self) -> FrameSnapshot {
        let outcome = self.outcome();
        FrameSnapshot {
            player: SpriteView {
                frame: self.player.sprite.frame(),
                source: self.player.sprite.rect(),
                pos: self.player.pos,
            },
            obstacles: self
                .obstacles
                .obstacles
                .iter()
                .map(|o| SpriteView {
                    frame: o.sprite.frame(),
                    source: o.sprite.rect(),
                    pos: o.pos,
                })
                .collect(),
            layers: self
                .layers
                .iter()
                .map(|l| LayerView {
                    texture: l.texture.clone(),
                    copies: l.copy_positions(),
                    scale: l.render_scale,
                })
                .collect(),
            outcome,
            hud_text: outcome.hud_text(),
            collided: self.last_collision,
            remaining_distance: self.race.remaining_distance(),
            finish_line_x: self.race.finish_line_x(self.player.pos.x),
            time_ticks: self.time_ticks,
            elapsed: self.elapsed,
        }
    }
}

/// One sprite draw call: source rect in the sheet, destination position on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpriteView {
    pub frame: u32,
    pub source: Rect,
    pub pos: Vec2,
}

/// One parallax band: the same texture drawn at two x positions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerView {
    pub texture: String,
    pub copies: [f32; 2],
    pub scale: f32,
}

/// Per-frame output of the simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub player: SpriteView,
    pub obstacles: Vec<SpriteView>,
    pub layers: Vec<LayerView>,
    pub outcome: RaceOutcome,
    pub hud_text: Option<&'static str>,
    pub collided: bool,
    pub remaining_distance: f32,
    pub finish_line_x: f32,
    pub time_ticks: u64,
    pub elapsed: f32,
}

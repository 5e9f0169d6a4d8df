//! Static game configuration
//!
//! Loaded once at startup (JSON) and validated before a world is built.
//! Every field has a default, so a config file only needs to name the values
//! it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::sprite::frame_duration;

/// Pixel size and frame grid of a sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetConfig {
    pub width: u32,
    pub height: u32,
    /// Frames per row (the animated axis)
    pub frames_x: u32,
    pub frames_y: u32,
}

impl SheetConfig {
    pub fn player() -> Self {
        Self {
            width: PLAYER_SHEET_WIDTH,
            height: PLAYER_SHEET_HEIGHT,
            frames_x: PLAYER_FRAMES_X,
            frames_y: PLAYER_FRAMES_Y,
        }
    }

    pub fn obstacle() -> Self {
        Self {
            width: OBSTACLE_SHEET_WIDTH,
            height: OBSTACLE_SHEET_HEIGHT,
            frames_x: OBSTACLE_FRAMES_X,
            frames_y: OBSTACLE_FRAMES_Y,
        }
    }

    fn validate(&self, what: &str, fps: u32) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::invalid(format!(
                "{what} sheet must be at least 1x1 pixels, got {}x{}",
                self.width, self.height
            )));
        }
        if self.frames_y == 0 {
            return Err(ConfigError::invalid(format!("{what} sheet needs at least one row")));
        }
        if self.frames_x < 2 {
            return Err(ConfigError::invalid(format!(
                "{what} sheet needs at least 2 frames per row, got {}",
                self.frames_x
            )));
        }
        if frame_duration(fps, self.frames_x).is_none() {
            return Err(ConfigError::invalid(format!(
                "{what} sheet has {} frames per row, too many for {fps} fps",
                self.frames_x
            )));
        }
        Ok(())
    }
}

/// One parallax background band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Texture key handed back to the renderer
    pub texture: String,
    /// Unscaled tile width (pixels)
    pub tile_width: f32,
    /// Scroll speed (pixels/s, leftward)
    pub speed: f32,
    /// Tile copies are placed `tile_width * repeat_count` apart
    pub repeat_count: f32,
    /// Draw scale for the renderer
    pub render_scale: f32,
}

impl LayerConfig {
    pub fn new(texture: &str, speed: f32) -> Self {
        Self {
            texture: texture.to_string(),
            tile_width: LAYER_TILE_WIDTH,
            speed,
            repeat_count: LAYER_REPEAT,
            render_scale: LAYER_REPEAT,
        }
    }
}

/// Complete static configuration for one race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Window ===
    pub window_width: u32,
    pub window_height: u32,
    /// Target display fps, used for animation cadence
    pub fps: u32,

    // === Player ===
    pub gravity: f32,
    /// Must be negative (screen y grows downward)
    pub jump_velocity: f32,
    pub player_sheet: SheetConfig,
    pub player_inset: f32,

    // === Obstacles ===
    pub obstacle_sheet: SheetConfig,
    pub obstacle_count: usize,
    pub obstacle_speed: f32,
    pub obstacle_spacing: f32,
    pub obstacle_inset: f32,
    pub respawn_offset_slots: u32,
    /// Least distance from the trailing obstacle to a respawned one; 0 turns
    /// the floor off
    pub respawn_min_gap: f32,

    // === Race ===
    pub finish_distance: f32,

    // === Scenery ===
    pub layers: Vec<LayerConfig>,

    // === Demo ===
    /// Seconds of obstacle motion the autopilot plans against
    pub autopilot_horizon: f32,
    /// Seed for the respawn RNG
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            fps: TARGET_FPS,

            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            player_sheet: SheetConfig::player(),
            player_inset: PLAYER_INSET,

            obstacle_sheet: SheetConfig::obstacle(),
            obstacle_count: OBSTACLE_COUNT,
            obstacle_speed: OBSTACLE_SPEED,
            obstacle_spacing: OBSTACLE_SPACING,
            obstacle_inset: OBSTACLE_INSET,
            respawn_offset_slots: RESPAWN_OFFSET_SLOTS,
            respawn_min_gap: RESPAWN_MIN_GAP,

            finish_distance: FINISH_DISTANCE,

            layers: vec![
                LayerConfig::new("far-buildings", 20.0),
                LayerConfig::new("back-buildings", 40.0),
                LayerConfig::new("foreground", 80.0),
            ],

            autopilot_horizon: AUTOPILOT_HORIZON,
            seed: 0,
        }
    }
}

fn non_negative(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(format!("{name} must be finite and >= 0, got {value}")))
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject configurations that would produce NaN/Inf timing or degenerate geometry
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::invalid(format!(
                "window must be at least 1x1, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        if self.fps == 0 {
            return Err(ConfigError::invalid("fps must be > 0"));
        }

        self.player_sheet.validate("player", self.fps)?;
        self.obstacle_sheet.validate("obstacle", self.fps)?;

        non_negative("gravity", self.gravity)?;
        if !self.jump_velocity.is_finite() || self.jump_velocity >= 0.0 {
            return Err(ConfigError::invalid(format!(
                "jump_velocity must be negative (upward), got {}",
                self.jump_velocity
            )));
        }
        non_negative("player_inset", self.player_inset)?;

        if self.obstacle_count == 0 || self.obstacle_count > MAX_OBSTACLES {
            return Err(ConfigError::invalid(format!(
                "obstacle_count must be in 1..={MAX_OBSTACLES}, got {}",
                self.obstacle_count
            )));
        }
        non_negative("obstacle_speed", self.obstacle_speed)?;
        non_negative("obstacle_spacing", self.obstacle_spacing)?;
        non_negative("obstacle_inset", self.obstacle_inset)?;
        if self.respawn_offset_slots == 0 {
            return Err(ConfigError::invalid("respawn_offset_slots must be > 0"));
        }
        non_negative("respawn_min_gap", self.respawn_min_gap)?;

        if !self.finish_distance.is_finite() || self.finish_distance <= 0.0 {
            return Err(ConfigError::invalid(format!(
                "finish_distance must be finite and > 0, got {}",
                self.finish_distance
            )));
        }

        if self.layers.len() > MAX_LAYERS {
            return Err(ConfigError::invalid(format!(
                "at most {MAX_LAYERS} parallax layers, got {}",
                self.layers.len()
            )));
        }
        for layer in &self.layers {
            if !layer.tile_width.is_finite() || layer.tile_width <= 0.0 {
                return Err(ConfigError::invalid(format!(
                    "layer {} tile_width must be > 0",
                    layer.texture
                )));
            }
            if !layer.repeat_count.is_finite() || layer.repeat_count <= 0.0 {
                return Err(ConfigError::invalid(format!(
                    "layer {} repeat_count must be > 0",
                    layer.texture
                )));
            }
            non_negative("layer speed", layer.speed)?;
            non_negative("layer render_scale", layer.render_scale)?;
        }

        non_negative("autopilot_horizon", self.autopilot_horizon)?;
        Ok(())
    }
}

//! Dasher - a side-scrolling dash/jump game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (animation, physics, collisions, race state)
//! - `config`: Static game configuration with validation
//! - `error`: Configuration errors
//!
//! Windowing, asset loading, input polling and rendering live outside this
//! crate. The host loop feeds elapsed time and a jump flag into
//! [`sim::tick`] and draws from [`sim::FrameSnapshot`].

pub mod config;
pub mod error;
pub mod sim;

pub use config::{GameConfig, LayerConfig, SheetConfig};
pub use error::ConfigError;

/// Reference tuning values
pub mod consts {
    /// Target display rate of the reference game loop
    pub const TARGET_FPS: u32 = 60;
    /// Nominal frame time at the target rate
    pub const FRAME_DT: f32 = 1.0 / TARGET_FPS as f32;

    /// Window dimensions (pixels)
    pub const WINDOW_WIDTH: u32 = 512;
    pub const WINDOW_HEIGHT: u32 = 380;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 1200.0;
    /// Upward velocity assigned on jump (pixels/s, negative is up)
    pub const JUMP_VELOCITY: f32 = -650.0;

    /// Obstacle approach speed (pixels/s)
    pub const OBSTACLE_SPEED: f32 = 400.0;
    /// Number of obstacles on the field
    pub const OBSTACLE_COUNT: usize = 3;
    /// Upper bound on `obstacle_count`
    pub const MAX_OBSTACLES: usize = 64;
    /// Horizontal gap between initial obstacle positions. One jump lasts about
    /// 66 frames at 60 fps, so a run of gaps under ~440px cannot be cleared.
    pub const OBSTACLE_SPACING: f32 = 450.0;
    /// Transparent padding trimmed from each side of an obstacle frame
    pub const OBSTACLE_INSET: f32 = 50.0;
    /// Trim applied to each side of the player frame
    pub const PLAYER_INSET: f32 = 1.0;
    /// Respawn offsets are drawn from {0, 1, .., slots-1} obstacle widths
    pub const RESPAWN_OFFSET_SLOTS: u32 = 8;
    /// A respawned obstacle lands at least this far behind the trailing one
    pub const RESPAWN_MIN_GAP: f32 = 450.0;

    /// Player sheet (scarfy: 6 frames in one row)
    pub const PLAYER_SHEET_WIDTH: u32 = 768;
    pub const PLAYER_SHEET_HEIGHT: u32 = 128;
    pub const PLAYER_FRAMES_X: u32 = 6;
    pub const PLAYER_FRAMES_Y: u32 = 1;

    /// Obstacle sheet (nebula: 8x8 grid)
    pub const OBSTACLE_SHEET_WIDTH: u32 = 1024;
    pub const OBSTACLE_SHEET_HEIGHT: u32 = 1024;
    pub const OBSTACLE_FRAMES_X: u32 = 8;
    pub const OBSTACLE_FRAMES_Y: u32 = 8;

    /// Distance the finish line must scroll before the race is won
    pub const FINISH_DISTANCE: f32 = 4000.0;

    /// Maximum number of parallax layers
    pub const MAX_LAYERS: usize = 3;
    /// Background tile width (pixels, unscaled)
    pub const LAYER_TILE_WIDTH: f32 = 256.0;
    /// Layer copies are laid out `tile_width * LAYER_REPEAT` apart
    pub const LAYER_REPEAT: f32 = 2.0;

    /// How far ahead the autopilot plans its jumps (seconds)
    pub const AUTOPILOT_HORIZON: f32 = 3.0;
}

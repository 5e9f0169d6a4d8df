//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time and input come from the caller
//! - Seeded RNG only
//! - Stable iteration order (obstacles in field order)
//! - No rendering, windowing or asset dependencies

pub mod collision;
pub mod layer;
pub mod obstacles;
pub mod player;
pub mod race;
pub mod sprite;
pub mod state;
pub mod tick;

pub use collision::{CollisionJudge, Rect, hitbox};
pub use layer::ScrollingLayer;
pub use obstacles::{Obstacle, ObstacleField};
pub use player::PlayerController;
pub use race::{RaceOutcome, RaceState};
pub use sprite::{AnimatedSprite, frame_duration};
pub use state::{FrameSnapshot, LayerView, SpriteView, World};
pub use tick::{TickInput, advance, autopilot_wants_jump, tick};

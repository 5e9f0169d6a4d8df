//! Sprite-sheet animation state
//!
//! A sheet is a grid of equally sized frames. Only the horizontal axis is
//! animated; the displayed rectangle always comes from the top row.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::SheetConfig;
use crate::error::ConfigError;

/// Seconds each frame stays on screen: `1 / (fps / (frames_x - 1))`.
///
/// The inner quotient is integer division, so 60 fps over an 8-frame row
/// gives `1 / 8` rather than `7 / 60`. Returns `None` when the formula would
/// divide by zero (`frames_x < 2`, or more frames than fps).
pub fn frame_duration(fps: u32, frames_x: u32) -> Option<f32> {
    let frames_per_tick = fps.checked_div(frames_x.checked_sub(1)?)?;
    if frames_per_tick == 0 {
        return None;
    }
    Some(1.0 / frames_per_tick as f32)
}

/// Frame-cycling state for one sprite sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimatedSprite {
    pub sheet: SheetConfig,
    /// Current column, always in `[0, frames_x)`
    frame: u32,
    frame_duration: f32,
    /// Time accumulated since the last frame change
    running_time: f32,
    /// Source rectangle within the sheet for the current frame
    rect: Rect,
}

impl AnimatedSprite {
    pub fn new(sheet: SheetConfig, fps: u32) -> Result<Self, ConfigError> {
        let frame_duration = frame_duration(fps, sheet.frames_x).ok_or_else(|| {
            ConfigError::invalid(format!(
                "cannot animate {} frames per row at {fps} fps",
                sheet.frames_x
            ))
        })?;
        if sheet.frames_y == 0 {
            return Err(ConfigError::invalid("sprite sheet needs at least one row"));
        }

        let rect = Rect::new(
            0.0,
            0.0,
            sheet.width as f32 / sheet.frames_x as f32,
            sheet.height as f32 / sheet.frames_y as f32,
        );

        Ok(Self {
            sheet,
            frame: 0,
            frame_duration,
            running_time: 0.0,
            rect,
        })
    }

    #[inline]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    #[inline]
    pub fn frame_duration(&self) -> f32 {
        self.frame_duration
    }

    #[inline]
    pub fn running_time(&self) -> f32 {
        self.running_time
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Width of one frame in pixels
    #[inline]
    pub fn width(&self) -> f32 {
        self.rect.w
    }

    /// Height of one frame in pixels
    #[inline]
    pub fn height(&self) -> f32 {
        self.rect.h
    }

    /// Accumulate `dt` and step at most one frame.
    ///
    /// On a step the accumulator drops back to zero; any time past the frame
    /// boundary is discarded. Returns true if the frame changed.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.running_time += dt;
        if self.running_time < self.frame_duration {
            return false;
        }

        self.frame = (self.frame + 1) % self.sheet.frames_x;
        self.rect.x = self.frame as f32 * self.rect.w;
        self.running_time = 0.0;
        true
    }
}

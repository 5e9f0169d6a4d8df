//! Parallax scrolling background band
//!
//! Two copies of one tile are drawn side by side and slide left together.
//! When the first copy has moved a full span off screen the offset snaps back
//! to zero, so two draw calls give an endless strip.

use serde::{Deserialize, Serialize};

use crate::config::LayerConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollingLayer {
    /// Texture key for the renderer
    pub texture: String,
    pub tile_width: f32,
    pub speed: f32,
    pub repeat_count: f32,
    pub render_scale: f32,
    /// Always in `(-span, 0]`
    offset: f32,
}

impl ScrollingLayer {
    pub fn new(config: &LayerConfig) -> Self {
        Self {
            texture: config.texture.clone(),
            tile_width: config.tile_width,
            speed: config.speed,
            repeat_count: config.repeat_count,
            render_scale: config.render_scale,
            offset: 0.0,
        }
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Distance between the two copies
    #[inline]
    pub fn span(&self) -> f32 {
        self.tile_width * self.repeat_count
    }

    /// X positions of the two tile copies
    pub fn copy_positions(&self) -> [f32; 2] {
        [self.offset, self.offset + self.span()]
    }

    /// Scroll left by `speed * dt`, snapping to zero (not wrapping the
    /// remainder) once a full span has been covered.
    pub fn advance(&mut self, dt: f32) {
        self.offset -= self.speed * dt;
        if self.offset <= -self.span() {
            log::debug!("Layer {} wrapped", self.texture);
            self.offset = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn far_buildings() -> ScrollingLayer {
        ScrollingLayer::new(&LayerConfig::new("far-buildings", 20.0))
    }

    #[test]
    fn test_scrolls_left() {
        let mut layer = far_buildings();
        layer.advance(0.5);
        assert_eq!(layer.offset(), -10.0);
        assert_eq!(layer.copy_positions(), [-10.0, 502.0]);
    }

    #[test]
    fn test_large_step_resets_to_zero() {
        let mut layer = far_buildings();
        layer.advance(1.0);
        // 512px span at 20px/s; a 30s step overshoots by 88px, which is dropped
        layer.advance(30.0);
        assert_eq!(layer.offset(), 0.0);
    }

    #[test]
    fn test_exact_span_resets() {
        let mut layer = far_buildings();
        layer.advance(512.0 / 20.0);
        assert_eq!(layer.offset(), 0.0);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut layer = far_buildings();
        layer.advance(0.25);
        let before = layer.offset();
        layer.advance(0.0);
        assert_eq!(layer.offset(), before);
    }

    proptest! {
        #[test]
        fn prop_offset_stays_in_range(
            speed in 0.0f32..500.0,
            dts in prop::collection::vec(0.0f32..5.0, 0..100),
        ) {
            let mut layer = ScrollingLayer::new(&LayerConfig::new("fg", speed));
            for dt in dts {
                layer.advance(dt);
                prop_assert!(layer.offset() <= 0.0);
                prop_assert!(layer.offset() > -layer.span());
            }
        }
    }
}

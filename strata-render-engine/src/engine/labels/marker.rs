use bevy::prelude::*;
use constants::render_settings::{
    BASE_MARKER_FONT_SIZE, BASE_MARKER_RADIUS, BASE_MARKER_TEXT_CANVAS_SIZE,
    MARKER_FONT_SIZE_RANGE,
};

use super::font::GlyphRaster;
use super::raster::RasterSurface;

/// Offset of the number overlay in front of the badge disc, before scaling.
const NUMBER_OVERLAY_OFFSET: f32 = 0.01;

/// Circular layer badge: a dark disc with the layer number drawn on top.
#[derive(Debug, Clone)]
pub struct MarkerBadge {
    pub radius: f32,
    pub number: RasterSurface,
    /// Distance of the number overlay in front of the disc.
    pub overlay_offset: f32,
}

/// Build the badge for 1-based layer `number`. The number canvas grows with
/// the square root of the scale so badges stay modest on large footprints.
pub fn create_marker(number: usize, scale_factor: f32, glyphs: &dyn GlyphRaster) -> MarkerBadge {
    let root_scale = scale_factor.sqrt();
    let canvas = (BASE_MARKER_TEXT_CANVAS_SIZE * root_scale) as u32;
    let (min_px, max_px) = MARKER_FONT_SIZE_RANGE;
    let font_px = (BASE_MARKER_FONT_SIZE * root_scale).clamp(min_px, max_px);

    let mut surface = RasterSurface::new(canvas, canvas);
    if let Some(coverage) = glyphs.render_line(&number.to_string(), font_px) {
        let left = (surface.width() as i32 - coverage.width as i32) / 2;
        let top = (surface.height() as i32 - coverage.height as i32) / 2;
        surface.blend_coverage(&coverage, left, top, [255, 255, 255]);
    }

    MarkerBadge {
        radius: BASE_MARKER_RADIUS * scale_factor,
        number: surface,
        overlay_offset: NUMBER_OVERLAY_OFFSET * scale_factor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::labels::font::{FontRasterizer, PlaceholderGlyphs};
    use approx::assert_relative_eq;

    #[test]
    fn canvas_scales_sub_linearly() {
        let small = create_marker(1, 1.0, &PlaceholderGlyphs);
        let large = create_marker(1, 4.0, &PlaceholderGlyphs);
        assert_eq!(small.number.size(), UVec2::splat(64));
        assert_eq!(large.number.size(), UVec2::splat(128));
        assert_relative_eq!(small.radius, 0.2);
        assert_relative_eq!(large.radius, 0.8);
        assert_relative_eq!(large.overlay_offset, 0.04);
    }

    #[test]
    fn number_is_drawn_centred() {
        let raster = FontRasterizer::embedded().unwrap();
        let badge = create_marker(7, 1.0, &raster);
        let size = badge.number.width();
        let lit = |x: u32, y: u32| badge.number.pixel(x, y)[3] > 0;
        assert!(!lit(0, 0));
        assert!((0..size).any(|x| lit(x, size / 2)));
    }
}

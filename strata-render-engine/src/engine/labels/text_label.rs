use bevy::prelude::*;
use constants::render_settings::{
    BASE_DEPTH_LABEL_FONT_SIZE, BASE_DEPTH_LABEL_PADDING, BASE_LABEL_BORDER_RADIUS,
    BASE_LABEL_FONT_SIZE, BASE_LABEL_MAX_WIDTH, BASE_LABEL_PADDING, BASE_SPRITE_SCALE_FACTOR,
    LABEL_BACKGROUND_ALPHA, LABEL_FONT_SIZE_RANGE, LABEL_LINE_HEIGHT,
};

use super::font::{GlyphRaster, TextMeasure};
use super::raster::RasterSurface;

const TEXT_COLOUR: [u8; 3] = [255, 255, 255];

/// Rasterized label plus the world-space size of the quad that shows it.
#[derive(Debug, Clone)]
pub struct LabelSprite {
    pub surface: RasterSurface,
    pub world_size: Vec2,
}

impl LabelSprite {
    fn from_surface(surface: RasterSurface) -> Self {
        let world_size = surface.size().as_vec2() * BASE_SPRITE_SCALE_FACTOR;
        Self {
            surface,
            world_size,
        }
    }
}

/// Pixel metrics of a layer label at a given annotation scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    pub font_px: f32,
    pub padding: f32,
    pub max_width: f32,
    pub line_height: f32,
    pub corner_radius: f32,
}

impl LabelStyle {
    pub fn for_scale(scale_factor: f32) -> Self {
        let (min_px, max_px) = LABEL_FONT_SIZE_RANGE;
        let font_px = (BASE_LABEL_FONT_SIZE * scale_factor).clamp(min_px, max_px);
        Self {
            font_px,
            padding: BASE_LABEL_PADDING * scale_factor,
            max_width: BASE_LABEL_MAX_WIDTH * scale_factor,
            line_height: font_px * LABEL_LINE_HEIGHT,
            corner_radius: BASE_LABEL_BORDER_RADIUS * scale_factor,
        }
    }
}

/// Greedy word wrap on single spaces. A word is only moved to a new line
/// when it is not the first word, so one over-long word stays on its own line.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    text: &str,
    max_width: f32,
    font_px: f32,
    measure: &M,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for (i, word) in text.split(' ').enumerate() {
        let candidate = format!("{current}{word} ");
        if measure.measure(&candidate, font_px) > max_width && i > 0 {
            lines.push(current.trim().to_string());
            current = format!("{word} ");
        } else {
            current = candidate;
        }
    }

    lines.push(current.trim().to_string());
    lines
}

/// Wrapped white text on a rounded background tinted with `background`.
pub fn create_text_label(
    text: &str,
    background: Srgba,
    scale_factor: f32,
    glyphs: &dyn GlyphRaster,
) -> LabelSprite {
    let style = LabelStyle::for_scale(scale_factor);
    let lines = wrap_text(text, style.max_width, style.font_px, glyphs);
    let text_width = lines
        .iter()
        .map(|line| glyphs.measure(line, style.font_px))
        .fold(0.0f32, f32::max);

    let width = (text_width + style.padding * 2.0) as u32;
    let height = (lines.len() as f32 * style.line_height + style.padding * 2.0) as u32;
    let mut surface = RasterSurface::new(width, height);

    let fill = [
        (background.red * 255.0).round() as u8,
        (background.green * 255.0).round() as u8,
        (background.blue * 255.0).round() as u8,
        (LABEL_BACKGROUND_ALPHA * 255.0).round() as u8,
    ];
    surface.fill_rounded_rect(fill, style.corner_radius);

    for (row, line) in lines.iter().enumerate() {
        let Some(coverage) = glyphs.render_line(line, style.font_px) else {
            continue;
        };
        let top = style.padding + row as f32 * style.line_height;
        surface.blend_coverage(&coverage, style.padding as i32, top as i32, TEXT_COLOUR);
    }

    LabelSprite::from_surface(surface)
}

/// Depth-scale text such as `7.0'` on a transparent background.
pub fn create_depth_label(
    depth_feet: f32,
    scale_factor: f32,
    glyphs: &dyn GlyphRaster,
) -> LabelSprite {
    let (min_px, max_px) = LABEL_FONT_SIZE_RANGE;
    let font_px = (BASE_DEPTH_LABEL_FONT_SIZE * scale_factor).clamp(min_px, max_px);
    let padding = BASE_DEPTH_LABEL_PADDING * scale_factor;
    let text = format_depth(depth_feet);

    let width = (glyphs.measure(&text, font_px) + padding * 2.0) as u32;
    let height = (font_px + padding * 2.0) as u32;
    let mut surface = RasterSurface::new(width, height);

    if let Some(coverage) = glyphs.render_line(&text, font_px) {
        let left = (surface.width() as i32 - coverage.width as i32) / 2;
        let top = (surface.height() as i32 - coverage.height as i32) / 2;
        surface.blend_coverage(&coverage, left, top, TEXT_COLOUR);
    }

    LabelSprite::from_surface(surface)
}

pub fn format_depth(depth_feet: f32) -> String {
    format!("{depth_feet:.1}'")
}

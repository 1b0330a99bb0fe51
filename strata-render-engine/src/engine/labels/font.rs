use std::sync::Arc;

use bevy::prelude::*;
use fontdue::{Font, FontSettings};
use once_cell::sync::Lazy;
use thiserror::Error;

static FONT_DATA: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/fonts/DejaVuSans-Bold.ttf"
));

static EMBEDDED_FONT: Lazy<Result<Font, LabelError>> = Lazy::new(|| {
    Font::from_bytes(FONT_DATA, FontSettings::default())
        .map_err(|err| LabelError::Font(err.to_string()))
});

/// Average advance of a placeholder glyph relative to the font size.
const PLACEHOLDER_ADVANCE: f32 = 0.6;

#[derive(Debug, Clone, Error)]
pub enum LabelError {
    #[error("failed to parse label font: {0}")]
    Font(String),
}

/// 8-bit alpha mask for one rendered line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Coverage {
    pub width: usize,
    pub height: usize,
    pub alpha: Vec<u8>,
}

/// Horizontal extent of a run of text at a given pixel size.
pub trait TextMeasure {
    fn measure(&self, text: &str, font_px: f32) -> f32;
}

pub trait GlyphRaster: TextMeasure + Send + Sync {
    /// Rasterize one line of text. `None` means nothing can be drawn.
    fn render_line(&self, text: &str, font_px: f32) -> Option<Coverage>;
}

/// Bold sans-serif glyphs from the font embedded in the binary.
pub struct FontRasterizer {
    font: &'static Font,
}

impl FontRasterizer {
    pub fn embedded() -> Result<Self, LabelError> {
        match &*EMBEDDED_FONT {
            Ok(font) => Ok(Self { font }),
            Err(err) => Err(err.clone()),
        }
    }
}

impl TextMeasure for FontRasterizer {
    fn measure(&self, text: &str, font_px: f32) -> f32 {
        text.chars()
            .map(|ch| self.font.metrics(ch, font_px).advance_width)
            .sum()
    }
}

impl GlyphRaster for FontRasterizer {
    fn render_line(&self, text: &str, font_px: f32) -> Option<Coverage> {
        let line = self.font.horizontal_line_metrics(font_px)?;
        let width = self.measure(text, font_px).ceil() as usize;
        let height = (line.ascent - line.descent).ceil() as usize;
        if width == 0 || height == 0 {
            return None;
        }

        let mut alpha = vec![0u8; width * height];
        let mut pen = 0.0f32;
        for ch in text.chars() {
            let (metrics, bitmap) = self.font.rasterize(ch, font_px);
            let left = (pen + metrics.xmin as f32).round() as i32;
            let top = (line.ascent - (metrics.height as f32 + metrics.ymin as f32)).round() as i32;

            for gy in 0..metrics.height {
                let y = top + gy as i32;
                if y < 0 || y >= height as i32 {
                    continue;
                }
                for gx in 0..metrics.width {
                    let x = left + gx as i32;
                    if x < 0 || x >= width as i32 {
                        continue;
                    }
                    let dest = y as usize * width + x as usize;
                    alpha[dest] = alpha[dest].max(bitmap[gy * metrics.width + gx]);
                }
            }
            pen += metrics.advance_width;
        }

        Some(Coverage {
            width,
            height,
            alpha,
        })
    }
}

/// Fixed-advance metrics with no glyph output. Labels keep their layout
/// and background but carry no text.
pub struct PlaceholderGlyphs;

impl TextMeasure for PlaceholderGlyphs {
    fn measure(&self, text: &str, font_px: f32) -> f32 {
        text.chars().count() as f32 * font_px * PLACEHOLDER_ADVANCE
    }
}

impl GlyphRaster for PlaceholderGlyphs {
    fn render_line(&self, _text: &str, _font_px: f32) -> Option<Coverage> {
        None
    }
}

/// Shared glyph source used by every label and marker build.
#[derive(Resource, Clone)]
pub struct LabelGlyphs(Arc<dyn GlyphRaster>);

impl LabelGlyphs {
    pub fn new(raster: impl GlyphRaster + 'static) -> Self {
        Self(Arc::new(raster))
    }

    pub fn raster(&self) -> &dyn GlyphRaster {
        self.0.as_ref()
    }
}

impl Default for LabelGlyphs {
    fn default() -> Self {
        match FontRasterizer::embedded() {
            Ok(raster) => Self::new(raster),
            Err(err) => {
                warn!("{err}; labels will render without text");
                Self::new(PlaceholderGlyphs)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_font_measures_and_renders() {
        let raster = FontRasterizer::embedded().unwrap();
        let short = raster.measure("Clay", 18.0);
        let long = raster.measure("Clay Layer", 18.0);
        assert!(short > 0.0);
        assert!(long > short);
        assert!(raster.measure("Clay", 36.0) > short * 1.9);

        let coverage = raster.render_line("Clay", 18.0).unwrap();
        assert_eq!(coverage.width, short.ceil() as usize);
        assert!(coverage.alpha.iter().any(|&a| a > 0));
    }

    #[test]
    fn empty_line_renders_nothing() {
        let raster = FontRasterizer::embedded().unwrap();
        assert!(raster.render_line("", 18.0).is_none());
    }

    #[test]
    fn placeholder_has_fixed_advance() {
        assert!((PlaceholderGlyphs.measure("abcd", 10.0) - 24.0).abs() < 1e-4);
        assert!(PlaceholderGlyphs.render_line("abcd", 10.0).is_none());
    }
}

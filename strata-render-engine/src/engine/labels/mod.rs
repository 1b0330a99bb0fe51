//! Label and marker synthesis for strata annotations.
//!
//! Text is measured and wrapped through the `TextMeasure` trait, rasterized
//! into an RGBA `RasterSurface`, then handed to the scene layer as a textured
//! quad whose world size is the raster size times `BASE_SPRITE_SCALE_FACTOR`.

/// Glyph rasterization backed by an embedded font, with a text-free fallback.
pub mod font;

/// Numbered circular badges placed beside each layer.
pub mod marker;

/// CPU-side RGBA canvas with rounded-rectangle fills and glyph blending.
pub mod raster;

/// Word-wrapped text labels and depth-scale labels.
pub mod text_label;

pub use font::{
    Coverage, FontRasterizer, GlyphRaster, LabelError, LabelGlyphs, PlaceholderGlyphs, TextMeasure,
};
pub use marker::{MarkerBadge, create_marker};
pub use raster::RasterSurface;
pub use text_label::{
    LabelSprite, LabelStyle, create_depth_label, create_text_label, format_depth, wrap_text,
};

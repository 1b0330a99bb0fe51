use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use super::font::Coverage;

/// RGBA8 pixel buffer, row-major from the top-left corner.
#[derive(Clone, PartialEq)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl RasterSurface {
    /// Fully transparent surface. Zero sizes are bumped to one pixel.
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
            self.pixels[offset + 3],
        ]
    }

    /// Fill the whole surface with a rounded rectangle of `color`.
    pub fn fill_rounded_rect(&mut self, color: [u8; 4], radius: f32) {
        let w = self.width as f32;
        let h = self.height as f32;
        let radius = radius.clamp(0.0, w.min(h) * 0.5);

        for y in 0..self.height {
            for x in 0..self.width {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                let cx = px.clamp(radius, w - radius);
                let cy = py.clamp(radius, h - radius);
                let dist = Vec2::new(px - cx, py - cy).length();
                let coverage = (radius - dist + 1.0).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let mut c = color;
                    c[3] = (c[3] as f32 * coverage).round() as u8;
                    self.put(x, y, c);
                }
            }
        }
    }

    /// Blend a coverage mask with its top-left corner at `(left, top)`.
    pub fn blend_coverage(&mut self, coverage: &Coverage, left: i32, top: i32, color: [u8; 3]) {
        for gy in 0..coverage.height {
            let dest_y = top + gy as i32;
            if dest_y < 0 || dest_y >= self.height as i32 {
                continue;
            }
            for gx in 0..coverage.width {
                let dest_x = left + gx as i32;
                if dest_x < 0 || dest_x >= self.width as i32 {
                    continue;
                }
                let alpha = coverage.alpha[gy * coverage.width + gx];
                if alpha == 0 {
                    continue;
                }
                self.blend(
                    dest_x as u32,
                    dest_y as u32,
                    [color[0], color[1], color[2], alpha],
                );
            }
        }
    }

    /// Upload-ready sRGB texture for the scene layer.
    pub fn to_image(&self) -> Image {
        Image::new(
            Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            self.pixels.clone(),
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::default(),
        )
    }

    fn put(&mut self, x: u32, y: u32, color: [u8; 4]) {
        let offset = ((y * self.width + x) * 4) as usize;
        self.pixels[offset..offset + 4].copy_from_slice(&color);
    }

    // Source-over compositing in straight (non-premultiplied) alpha.
    fn blend(&mut self, x: u32, y: u32, src: [u8; 4]) {
        let dst = self.pixel(x, y);
        let sa = src[3] as f32 / 255.0;
        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return;
        }

        let mut out = [0u8; 4];
        for channel in 0..3 {
            let s = src[channel] as f32;
            let d = dst[channel] as f32;
            out[channel] = ((s * sa + d * da * (1.0 - sa)) / out_a).round() as u8;
        }
        out[3] = (out_a * 255.0).round() as u8;
        self.put(x, y, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounded_rect_leaves_corners_clear() {
        let mut surface = RasterSurface::new(40, 20);
        surface.fill_rounded_rect([10, 20, 30, 204], 6.0);
        assert_eq!(surface.pixel(0, 0)[3], 0);
        assert_eq!(surface.pixel(20, 10), [10, 20, 30, 204]);
        assert_eq!(surface.pixel(20, 0), [10, 20, 30, 204]);
    }

    #[test]
    fn coverage_blends_over_background() {
        let mut surface = RasterSurface::new(4, 4);
        surface.fill_rounded_rect([0, 0, 0, 255], 0.0);
        let coverage = Coverage {
            width: 2,
            height: 1,
            alpha: vec![255, 0],
        };
        surface.blend_coverage(&coverage, 1, 1, [255, 255, 255]);
        assert_eq!(surface.pixel(1, 1), [255, 255, 255, 255]);
        assert_eq!(surface.pixel(2, 1), [0, 0, 0, 255]);

        // Off-surface glyph pixels are clipped.
        surface.blend_coverage(&coverage, -1, 3, [255, 0, 0]);
        assert_eq!(surface.pixel(0, 3), [0, 0, 0, 255]);
    }

    #[test]
    fn zero_sized_surface_is_bumped() {
        let surface = RasterSurface::new(0, 0);
        assert_eq!(surface.size(), UVec2::ONE);
        let image = surface.to_image();
        assert_eq!(image.width(), 1);
    }
}

use bevy::prelude::*;
use constants::render_settings::{
    BASE_DEPTH_MARKER_MAIN_LINE_OFFSET, BASE_DEPTH_MARKER_TEXT_GAP, BASE_DEPTH_MARKER_TICK_LENGTH,
    DEPTH_TICK_RELATIVE_TOLERANCE, DEPTH_TICK_TOLERANCE,
};

use super::layout::{proportional_heights, scale_factor, total_exploded_spacing};
use crate::engine::labels::{GlyphRaster, create_depth_label};
use crate::engine::scene::subtree::{SceneNode, SceneSubtree};
use crate::model::layer::{Layer, total_depth};
use crate::model::{StrataDimensions, ViewMode};

/// One depth-axis tick: cumulative depth in feet and its rendered height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthTick {
    pub depth: f32,
    pub y: f32,
}

fn round_to_tenths(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Ticks at the top of the stack and at the bottom of every layer.
///
/// Heights come from the stack height without exploded spacing, so labels
/// show true cumulative feet while exploded gaps only shift tick positions.
/// A closing tick is appended when the last boundary misses the adjusted
/// bottom by more than the tolerance.
pub fn compute_depth_ticks(
    layers: &[Layer],
    adjusted_model_height: f32,
    view_mode: ViewMode,
    spacing: f32,
) -> Vec<DepthTick> {
    if layers.is_empty() || !(adjusted_model_height > 0.0) {
        return Vec::new();
    }

    let exploded = view_mode == ViewMode::Exploded;
    let unspaced_height =
        adjusted_model_height - total_exploded_spacing(layers.len(), view_mode, spacing);
    let depths: Vec<f32> = layers.iter().map(|layer| layer.depth).collect();
    let heights = proportional_heights(&depths, unspaced_height);

    let mut ticks = vec![DepthTick { depth: 0.0, y: 0.0 }];
    let mut y = 0.0;
    let mut running_depth = 0.0;
    let last = layers.len() - 1;

    for (i, (depth, height)) in depths.iter().zip(heights).enumerate() {
        y -= height;
        running_depth += depth;
        ticks.push(DepthTick {
            depth: round_to_tenths(running_depth),
            y,
        });
        if exploded && i < last {
            y -= spacing;
        }
    }

    let tolerance = DEPTH_TICK_TOLERANCE.max(adjusted_model_height * DEPTH_TICK_RELATIVE_TOLERANCE);
    if (y + adjusted_model_height).abs() > tolerance {
        warn!(
            "Depth scale ended at {:.4} instead of {:.4}, closing tick added",
            y, -adjusted_model_height
        );
        ticks.push(DepthTick {
            depth: round_to_tenths(total_depth(layers)),
            y: -adjusted_model_height,
        });
    }
    ticks
}

/// Depth axis along the left edge of the stack: one vertical line, a tick
/// per boundary and a camera-facing depth label beside each tick.
pub fn build_depth_scale(
    layers: &[Layer],
    dimensions: &StrataDimensions,
    view_mode: ViewMode,
    spacing: f32,
    adjusted_model_height: f32,
    glyphs: &dyn GlyphRaster,
) -> SceneSubtree {
    let mut root = SceneNode::group("depth_scale");
    let ticks = compute_depth_ticks(layers, adjusted_model_height, view_mode, spacing);
    if ticks.is_empty() {
        return SceneSubtree::new(root);
    }

    let scale = scale_factor(dimensions);
    let line_x = -dimensions.width / 2.0 - BASE_DEPTH_MARKER_MAIN_LINE_OFFSET * scale;
    let tick_length = BASE_DEPTH_MARKER_TICK_LENGTH * scale;
    let text_gap = BASE_DEPTH_MARKER_TEXT_GAP * scale;

    let mut segments = vec![[
        Vec3::new(line_x, 0.0, 0.0),
        Vec3::new(line_x, -adjusted_model_height, 0.0),
    ]];
    segments.extend(ticks.iter().map(|tick| {
        [
            Vec3::new(line_x, tick.y, 0.0),
            Vec3::new(line_x - tick_length, tick.y, 0.0),
        ]
    }));
    root.push(SceneNode::lines("depth_axis", segments, Color::WHITE));

    for (i, tick) in ticks.iter().enumerate() {
        let sprite = create_depth_label(tick.depth, scale, glyphs);
        let x = line_x - tick_length - text_gap - sprite.world_size.x / 2.0;
        let label = SceneNode::label(format!("depth_label_{i}"), sprite);
        root.push(label.at(Vec3::new(x, tick.y, 0.0)));
    }

    SceneSubtree::new(root)
}

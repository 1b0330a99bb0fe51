use bevy::color::Alpha;
use bevy::prelude::*;
use constants::render_settings::{
    BASE_MARKER_RADIUS, CONNECTOR_COLOUR, CONNECTOR_OPACITY, ELEMENT_Z_OFFSET,
    LABEL_GAP_FROM_MARKER_OR_EDGE, LINE_TO_ELEMENT_GAP, MARKER_GAP_FROM_EDGE,
};

use super::depth_scale::build_depth_scale;
use super::layout::{LayerSlot, StrataLayout, compute_layout};
use crate::engine::labels::{GlyphRaster, create_marker, create_text_label};
use crate::engine::scene::color::color_or_fallback;
use crate::engine::scene::subtree::{NodeShape, SceneNode, SceneSubtree};
use crate::model::layer::Layer;
use crate::model::{DisplayOptions, StrataDimensions, ViewMode};

/// Text shown on a layer label, with fallbacks for blank fields.
pub fn label_text(index: usize, layer: &Layer) -> String {
    let name = layer.name.trim();
    let description = layer.description.trim();
    let name = if name.is_empty() {
        format!("Layer {}", index + 1)
    } else {
        name.to_string()
    };
    let description = if description.is_empty() {
        "No description"
    } else {
        description
    };
    format!("{name}: {description}")
}

/// Shared horizontal anchors for the annotations on the right-hand side.
struct Annotation {
    scale: f32,
    edge_x: f32,
    marker_x: f32,
    marker_radius: f32,
    front_z: f32,
}

impl Annotation {
    fn new(dimensions: &StrataDimensions, scale: f32) -> Self {
        let edge_x = dimensions.width / 2.0;
        Self {
            scale,
            edge_x,
            marker_x: edge_x + MARKER_GAP_FROM_EDGE * scale,
            marker_radius: BASE_MARKER_RADIUS * scale,
            front_z: dimensions.depth / 2.0,
        }
    }

    fn element_z(&self) -> f32 {
        self.front_z + ELEMENT_Z_OFFSET * self.scale
    }

    fn line_z(&self) -> f32 {
        self.front_z + ELEMENT_Z_OFFSET * self.scale / 2.0
    }

    fn label_attach_x(&self, with_marker: bool) -> f32 {
        let gap = LABEL_GAP_FROM_MARKER_OR_EDGE * self.scale;
        if with_marker {
            self.marker_x + self.marker_radius + gap
        } else {
            self.edge_x + gap
        }
    }

    /// Leader segments from the layer edge to the label, broken around the marker.
    fn leader_segments(&self, y: f32, with_marker: bool) -> Vec<[Vec3; 2]> {
        let z = self.line_z();
        let gap = LINE_TO_ELEMENT_GAP * self.scale;
        let label_start = self.label_attach_x(with_marker) - gap;
        let point = |x: f32| Vec3::new(x, y, z);

        if with_marker {
            vec![
                [point(self.edge_x), point(self.marker_x - self.marker_radius - gap)],
                [point(self.marker_x + self.marker_radius + gap), point(label_start)],
            ]
        } else {
            vec![[point(self.edge_x), point(label_start)]]
        }
    }
}

fn layer_volume(slot: &LayerSlot, layer: &Layer, dimensions: &StrataDimensions) -> SceneNode {
    SceneNode::new(
        format!("layer_{}", slot.index),
        NodeShape::Cuboid {
            size: Vec3::new(dimensions.width, slot.height, dimensions.depth),
            color: color_or_fallback(&layer.color).into(),
        },
    )
    .at(Vec3::new(0.0, slot.center, 0.0))
}

fn connector_lines(layout: &StrataLayout, dimensions: &StrataDimensions) -> Option<SceneNode> {
    let spans = layout.connector_spans();
    if spans.is_empty() {
        return None;
    }
    let z = dimensions.depth / 2.0;
    let half_width = dimensions.width / 2.0;
    let segments = spans
        .iter()
        .flat_map(|&(bottom, next_top)| {
            [-half_width, half_width]
                .map(|x| [Vec3::new(x, bottom, z), Vec3::new(x, next_top, z)])
        })
        .collect();
    let color = color_or_fallback(CONNECTOR_COLOUR).with_alpha(CONNECTOR_OPACITY);
    Some(SceneNode::lines("connectors", segments, color.into()))
}

/// Build the complete strata subtree: one box per layer plus whichever
/// annotations `options` enables. Zero layers yields an empty subtree.
pub fn layout_strata(
    layers: &[Layer],
    dimensions: &StrataDimensions,
    view_mode: ViewMode,
    spacing: f32,
    options: &DisplayOptions,
    glyphs: &dyn GlyphRaster,
) -> SceneSubtree {
    let mut root = SceneNode::group("strata");
    if layers.is_empty() {
        return SceneSubtree::new(root);
    }

    let layout = compute_layout(layers, dimensions, view_mode, spacing);
    let annotation = Annotation::new(dimensions, layout.scale_factor);

    for slot in &layout.slots {
        let layer = &layers[slot.index];
        if options.show_strata {
            root.push(layer_volume(slot, layer, dimensions));
        }

        if options.show_markers {
            let badge = create_marker(slot.index + 1, layout.scale_factor, glyphs);
            root.push(
                SceneNode::marker(format!("marker_{}", slot.index), badge).at(Vec3::new(
                    annotation.marker_x,
                    slot.center,
                    annotation.element_z(),
                )),
            );
        }

        if options.show_labels {
            let background = color_or_fallback(&layer.color);
            let sprite = create_text_label(
                &label_text(slot.index, layer),
                background,
                layout.scale_factor,
                glyphs,
            );
            let x = annotation.label_attach_x(options.show_markers) + sprite.world_size.x / 2.0;
            root.push(
                SceneNode::label(format!("label_{}", slot.index), sprite).at(Vec3::new(
                    x,
                    slot.center,
                    annotation.element_z(),
                )),
            );
            root.push(SceneNode::lines(
                format!("label_line_{}", slot.index),
                annotation.leader_segments(slot.center, options.show_markers),
                Color::WHITE,
            ));
        }
    }

    if options.show_connectors {
        if let Some(connectors) = connector_lines(&layout, dimensions) {
            root.push(connectors);
        }
    }

    if options.show_depth_markers {
        let depth_scale = build_depth_scale(
            layers,
            dimensions,
            view_mode,
            spacing,
            layout.adjusted_model_height,
            glyphs,
        );
        if !depth_scale.is_empty() {
            root.push(depth_scale.root);
        }
    }

    SceneSubtree::new(root)
}

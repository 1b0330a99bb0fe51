use constants::render_settings::{BASE_DIMENSION_FOR_SCALING, MIN_STRATA_SCALE_FACTOR};

use crate::model::layer::{Layer, total_depth};
use crate::model::{StrataDimensions, ViewMode};

/// Vertical placement of one rendered layer. `y` grows upwards from the
/// ground surface at 0, so every value here is zero or negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerSlot {
    pub index: usize,
    pub top: f32,
    pub center: f32,
    pub bottom: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrataLayout {
    pub scale_factor: f32,
    pub total_actual_depth: f32,
    pub model_visual_height: f32,
    /// Sum of the gaps inserted between layers in exploded view.
    pub total_exploded_spacing: f32,
    pub adjusted_model_height: f32,
    pub exploded: bool,
    pub slots: Vec<LayerSlot>,
}

impl StrataLayout {
    /// Vertical spans bridging each layer's bottom to the next layer's top.
    /// Empty unless the view is exploded and at least two layers render.
    pub fn connector_spans(&self) -> Vec<(f32, f32)> {
        if !self.exploded {
            return Vec::new();
        }
        self.slots
            .windows(2)
            .map(|pair| (pair[0].bottom, pair[1].top))
            .collect()
    }

    pub fn total_slot_height(&self) -> f32 {
        self.slots.iter().map(|slot| slot.height).sum()
    }
}

fn reference_dimension(dimensions: &StrataDimensions) -> f32 {
    dimensions.max_side().max(BASE_DIMENSION_FOR_SCALING)
}

/// Annotation scale for a footprint: grows with the larger side, never below 0.5.
pub fn scale_factor(dimensions: &StrataDimensions) -> f32 {
    (reference_dimension(dimensions) / BASE_DIMENSION_FOR_SCALING).max(MIN_STRATA_SCALE_FACTOR)
}

/// Rendered height of the whole stack before any exploded spacing.
pub fn model_visual_height(dimensions: &StrataDimensions, total_actual_depth: f32) -> f32 {
    reference_dimension(dimensions).max(total_actual_depth)
}

/// Total gap added by exploded view for `layer_count` layers.
pub fn total_exploded_spacing(layer_count: usize, view_mode: ViewMode, spacing: f32) -> f32 {
    match view_mode {
        ViewMode::Exploded => layer_count.saturating_sub(1) as f32 * spacing,
        ViewMode::Normal => 0.0,
    }
}

/// Map layer thicknesses proportionally onto `model_height`. A zero total
/// falls back to an equal split.
pub fn proportional_heights(depths: &[f32], model_height: f32) -> Vec<f32> {
    let total: f32 = depths.iter().sum();
    let count = depths.len();
    depths
        .iter()
        .map(|depth| {
            let share = if total > 0.0 {
                depth / total
            } else {
                1.0 / count as f32
            };
            share * model_height
        })
        .collect()
}

/// Vertical layout of the strata stack, top to bottom.
pub fn compute_layout(
    layers: &[Layer],
    dimensions: &StrataDimensions,
    view_mode: ViewMode,
    spacing: f32,
) -> StrataLayout {
    let total_actual_depth = total_depth(layers);
    let model_visual_height = model_visual_height(dimensions, total_actual_depth);
    let total_exploded_spacing = total_exploded_spacing(layers.len(), view_mode, spacing);
    let exploded = view_mode == ViewMode::Exploded;

    let depths: Vec<f32> = layers.iter().map(|layer| layer.depth).collect();
    let heights = proportional_heights(&depths, model_visual_height);

    let mut slots = Vec::with_capacity(layers.len());
    let mut cursor = 0.0;
    let last = layers.len().saturating_sub(1);

    for (index, height) in heights.into_iter().enumerate() {
        if !(height > 0.0) {
            continue;
        }
        slots.push(LayerSlot {
            index,
            top: cursor,
            center: cursor - height / 2.0,
            bottom: cursor - height,
            height,
        });
        cursor -= height;
        if exploded && index < last {
            cursor -= spacing;
        }
    }

    StrataLayout {
        scale_factor: scale_factor(dimensions),
        total_actual_depth,
        model_visual_height,
        total_exploded_spacing,
        adjusted_model_height: model_visual_height + total_exploded_spacing,
        exploded,
        slots,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LayerStack;
    use crate::model::layer::LayerEdit;
    use approx::assert_relative_eq;

    fn stack(depths: &[f32]) -> LayerStack {
        let mut stack = LayerStack::with_layer_count(depths.len());
        for (i, depth) in depths.iter().enumerate() {
            stack.update_layer(i, LayerEdit::Depth(*depth));
        }
        stack
    }

    #[test]
    fn normal_view_three_layers() {
        let stack = stack(&[1.0, 2.0, 2.0]);
        let layout = compute_layout(
            stack.layers(),
            &StrataDimensions::default(),
            ViewMode::Normal,
            0.5,
        );

        assert_relative_eq!(layout.total_actual_depth, 5.0);
        assert_relative_eq!(layout.model_visual_height, 5.0);
        let heights: Vec<f32> = layout.slots.iter().map(|s| s.height).collect();
        assert_eq!(heights, [1.0, 2.0, 2.0]);
        let centres: Vec<f32> = layout.slots.iter().map(|s| s.center).collect();
        assert_eq!(centres, [-0.5, -2.0, -4.0]);
        assert!(layout.connector_spans().is_empty());
    }

    #[test]
    fn exploded_view_adds_spacing_and_connectors() {
        let stack = stack(&[1.0, 2.0, 2.0]);
        let layout = compute_layout(
            stack.layers(),
            &StrataDimensions::default(),
            ViewMode::Exploded,
            0.5,
        );

        assert_relative_eq!(layout.adjusted_model_height, 6.0);
        let spans = layout.connector_spans();
        assert_eq!(spans, [(-1.0, -1.5), (-3.5, -4.0)]);
        assert_relative_eq!(layout.slots[2].bottom, -6.0);
    }

    #[test]
    fn single_layer_has_no_connectors() {
        let stack = stack(&[3.0]);
        let layout = compute_layout(
            stack.layers(),
            &StrataDimensions::default(),
            ViewMode::Exploded,
            2.0,
        );
        assert!(layout.connector_spans().is_empty());
        assert_relative_eq!(layout.adjusted_model_height, 5.0);
    }

    #[test]
    fn empty_stack_is_valid() {
        let layout = compute_layout(&[], &StrataDimensions::default(), ViewMode::Exploded, 0.5);
        assert!(layout.slots.is_empty());
        assert_eq!(layout.total_exploded_spacing, 0.0);
    }

    #[test]
    fn heights_sum_to_model_height() {
        let cases: [&[f32]; 4] = [&[0.1], &[7.3, 0.4, 12.0], &[1.0; 20], &[0.1, 30.0, 2.2, 0.7]];
        let dims = StrataDimensions {
            width: 12.0,
            depth: 3.0,
        };
        for depths in cases {
            for mode in [ViewMode::Normal, ViewMode::Exploded] {
                let stack = stack(depths);
                let layout = compute_layout(stack.layers(), &dims, mode, 0.75);
                assert_relative_eq!(
                    layout.total_slot_height(),
                    layout.model_visual_height,
                    max_relative = 1e-5
                );
            }
        }
    }

    #[test]
    fn zero_depth_edit_never_yields_flat_volume() {
        let mut stack = stack(&[1.0, 2.0]);
        stack.update_layer(0, LayerEdit::DepthText("0".into()));
        let layout = compute_layout(
            stack.layers(),
            &StrataDimensions::default(),
            ViewMode::Normal,
            0.5,
        );
        assert_eq!(stack.layers()[0].depth, 0.1);
        assert_eq!(layout.slots.len(), 2);
        assert!(layout.slots.iter().all(|slot| slot.height > 0.0));
    }

    #[test]
    fn equal_split_when_total_is_zero() {
        assert_eq!(proportional_heights(&[0.0, 0.0], 6.0), [3.0, 3.0]);
    }

    #[test]
    fn scale_factor_is_monotone_and_floored() {
        let mut previous = 0.0;
        for side in [0.1, 1.0, 4.9, 5.0, 7.5, 10.0, 50.0, 500.0] {
            let factor = scale_factor(&StrataDimensions {
                width: side,
                depth: 1.0,
            });
            assert!(factor >= 0.5);
            assert!(factor >= previous);
            previous = factor;
        }
        assert_relative_eq!(
            scale_factor(&StrataDimensions {
                width: 10.0,
                depth: 20.0
            }),
            4.0
        );
    }
}

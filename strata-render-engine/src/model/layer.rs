use bevy::prelude::*;
use constants::soil::{
    DEFAULT_LAYER_DEPTH, DEFAULT_SOIL_TYPES, FIRST_LAYER_DEPTH, MAX_LAYERS, MIN_LAYER_DEPTH,
};

/// Stable identity of a layer, unaffected by reordering or removal of others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

/// One soil horizon. Index 0 in a stack is the shallowest layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    /// Hex colour string such as `#5e4b37`.
    pub color: String,
    pub description: String,
    /// Thickness in feet, never below `MIN_LAYER_DEPTH`.
    pub depth: f32,
}

/// Single-field edit applied through `LayerStack::update_layer`.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerEdit {
    Name(String),
    Color(String),
    Description(String),
    Depth(f32),
    /// Raw text from an input field, parsed then clamped.
    DepthText(String),
}

/// Clamp a layer thickness to the allowed minimum. NaN collapses to the minimum.
pub fn clamp_depth(depth: f32) -> f32 {
    if depth.is_nan() || depth < MIN_LAYER_DEPTH {
        MIN_LAYER_DEPTH
    } else {
        depth
    }
}

/// Parse user-entered depth text. Unparseable input yields the minimum depth.
pub fn parse_depth(text: &str) -> f32 {
    clamp_depth(text.trim().parse::<f32>().unwrap_or(f32::NAN))
}

/// Checks that a colour string parses as an sRGB hex triple.
pub fn is_valid_color(color: &str) -> bool {
    Srgba::hex(color).is_ok()
}

/// Ordered soil profile with the currently selected layer.
#[derive(Resource, Debug, Clone, Default)]
pub struct LayerStack {
    layers: Vec<Layer>,
    active: usize,
    next_id: u64,
}

impl LayerStack {
    /// Build a stack pre-filled with `count` palette layers.
    pub fn with_layer_count(count: usize) -> Self {
        let mut stack = Self::default();
        stack.set_layer_count(count);
        stack.active = 0;
        stack
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_layer(&self) -> Option<&Layer> {
        self.layers.get(self.active)
    }

    pub fn set_active(&mut self, index: usize) {
        if index < self.layers.len() {
            self.active = index;
        }
    }

    /// Append a palette layer and select it. Refused once the stack is full.
    pub fn add_layer(&mut self) -> Option<LayerId> {
        if self.layers.len() >= MAX_LAYERS {
            warn!("Maximum number of layers ({}) reached", MAX_LAYERS);
            return None;
        }

        let layer = self.create_layer(self.layers.len());
        let id = layer.id;
        self.layers.push(layer);
        self.active = self.layers.len() - 1;
        Some(id)
    }

    /// Remove the layer at `index`, keeping the selection on a sensible layer.
    pub fn remove_layer(&mut self, index: usize) -> Option<Layer> {
        if index >= self.layers.len() {
            return None;
        }

        let removed = self.layers.remove(index);
        if index == self.active {
            self.active = self.active.min(self.layers.len().saturating_sub(1));
        } else if index < self.active {
            self.active -= 1;
        }
        Some(removed)
    }

    /// Apply an edit to one layer. Returns false when nothing changed.
    pub fn update_layer(&mut self, index: usize, edit: LayerEdit) -> bool {
        let Some(layer) = self.layers.get_mut(index) else {
            return false;
        };

        match edit {
            LayerEdit::Name(name) => layer.name = name,
            LayerEdit::Description(description) => layer.description = description,
            LayerEdit::Color(color) => {
                if !is_valid_color(&color) {
                    warn!("Rejected layer colour '{}': not a hex colour", color);
                    return false;
                }
                layer.color = color;
            }
            LayerEdit::Depth(depth) => layer.depth = clamp_depth(depth),
            LayerEdit::DepthText(text) => layer.depth = parse_depth(&text),
        }
        true
    }

    /// Grow with palette layers or truncate from the end to reach `count`.
    pub fn set_layer_count(&mut self, count: usize) {
        let target = count.min(MAX_LAYERS);
        let current = self.layers.len();

        if target > current {
            for index in current..target {
                let layer = self.create_layer(index);
                self.layers.push(layer);
            }
        } else {
            self.layers.truncate(target);
        }
        self.active = self.active.min(target.saturating_sub(1));
    }

    /// Sum of all layer thicknesses in feet.
    pub fn total_depth(&self) -> f32 {
        total_depth(&self.layers)
    }

    /// Total profile depth with one decimal, as shown in the legend.
    pub fn total_profile_depth_label(&self) -> String {
        format!("{:.1}", self.total_depth())
    }

    fn create_layer(&mut self, index: usize) -> Layer {
        let soil = &DEFAULT_SOIL_TYPES[index % DEFAULT_SOIL_TYPES.len()];
        let id = LayerId(self.next_id);
        self.next_id += 1;

        Layer {
            id,
            name: soil.name.to_string(),
            color: soil.colour.to_string(),
            description: soil.description.to_string(),
            depth: if index == 0 {
                FIRST_LAYER_DEPTH
            } else {
                DEFAULT_LAYER_DEPTH
            },
        }
    }
}

pub fn total_depth(layers: &[Layer]) -> f32 {
    layers.iter().map(|layer| layer.depth).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_cycles_palette_and_depths() {
        let stack = LayerStack::with_layer_count(6);
        let names: Vec<&str> = stack.layers().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Topsoil",
                "Clay Layer",
                "Sandy Layer",
                "Bedrock",
                "Gravelly Soil",
                "Topsoil"
            ]
        );
        assert_eq!(stack.layers()[0].depth, 1.0);
        assert!(stack.layers()[1..].iter().all(|l| l.depth == 2.0));
        assert_eq!(stack.total_profile_depth_label(), "11.0");
    }

    #[test]
    fn ids_stay_unique_after_removal() {
        let mut stack = LayerStack::with_layer_count(3);
        let removed = stack.remove_layer(1).unwrap();
        let added = stack.add_layer().unwrap();
        assert_ne!(removed.id, added);
        assert!(stack.layers().iter().all(|l| l.id != removed.id));
    }

    #[test]
    fn add_layer_stops_at_limit() {
        let mut stack = LayerStack::with_layer_count(MAX_LAYERS);
        assert!(stack.add_layer().is_none());
        assert_eq!(stack.len(), MAX_LAYERS);
    }

    #[test]
    fn add_layer_selects_new_layer() {
        let mut stack = LayerStack::with_layer_count(2);
        stack.add_layer();
        assert_eq!(stack.active_index(), 2);
    }

    #[test]
    fn removing_layers_moves_selection() {
        let mut stack = LayerStack::with_layer_count(4);
        stack.set_active(2);
        stack.remove_layer(0);
        assert_eq!(stack.active_index(), 1);

        stack.set_active(2);
        stack.remove_layer(2);
        assert_eq!(stack.active_index(), 1);

        stack.remove_layer(0);
        stack.remove_layer(0);
        assert!(stack.is_empty());
        assert_eq!(stack.active_index(), 0);
        assert!(stack.remove_layer(0).is_none());
    }

    #[test]
    fn depth_edits_are_clamped() {
        let mut stack = LayerStack::with_layer_count(1);
        stack.update_layer(0, LayerEdit::Depth(0.0));
        assert_eq!(stack.layers()[0].depth, MIN_LAYER_DEPTH);
        stack.update_layer(0, LayerEdit::Depth(f32::NAN));
        assert_eq!(stack.layers()[0].depth, MIN_LAYER_DEPTH);
        stack.update_layer(0, LayerEdit::DepthText("abc".into()));
        assert_eq!(stack.layers()[0].depth, MIN_LAYER_DEPTH);
        stack.update_layer(0, LayerEdit::DepthText(" 3.5 ".into()));
        assert_eq!(stack.layers()[0].depth, 3.5);
    }

    #[test]
    fn invalid_colour_edit_is_rejected() {
        let mut stack = LayerStack::with_layer_count(1);
        assert!(!stack.update_layer(0, LayerEdit::Color("brownish".into())));
        assert_eq!(stack.layers()[0].color, "#3b2e1e");
        assert!(stack.update_layer(0, LayerEdit::Color("#112233".into())));
        assert_eq!(stack.layers()[0].color, "#112233");
        assert!(!stack.update_layer(5, LayerEdit::Name("x".into())));
    }

    #[test]
    fn layer_count_clamps_and_truncates() {
        let mut stack = LayerStack::with_layer_count(3);
        stack.set_active(2);
        stack.set_layer_count(50);
        assert_eq!(stack.len(), MAX_LAYERS);
        assert_eq!(stack.active_index(), 2);

        stack.set_layer_count(1);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.active_index(), 0);
        assert_eq!(stack.layers()[0].name, "Topsoil");

        stack.set_layer_count(0);
        assert!(stack.is_empty());
        assert_eq!(stack.total_depth(), 0.0);
    }
}

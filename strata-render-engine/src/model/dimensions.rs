use bevy::prelude::*;
use constants::soil::{DEFAULT_STRATA_DEPTH, DEFAULT_STRATA_WIDTH, DEFAULT_VERTICAL_SPACING};
use serde::{Deserialize, Serialize};

/// Horizontal footprint of the strata block in feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrataDimensions {
    pub width: f32,
    pub depth: f32,
}

impl Default for StrataDimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_STRATA_WIDTH,
            depth: DEFAULT_STRATA_DEPTH,
        }
    }
}

impl StrataDimensions {
    /// Returns false and leaves the width untouched for non-positive input.
    pub fn set_width(&mut self, width: f32) -> bool {
        if !is_positive(width) {
            return false;
        }
        self.width = width;
        true
    }

    pub fn set_depth(&mut self, depth: f32) -> bool {
        if !is_positive(depth) {
            return false;
        }
        self.depth = depth;
        true
    }

    /// Largest horizontal side of the footprint.
    pub fn max_side(&self) -> f32 {
        self.width.max(self.depth)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Normal,
    Exploded,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Exploded,
            Self::Exploded => Self::Normal,
        }
    }
}

/// Geometry settings shared by the strata rebuild and the depth scale.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct StrataSettings {
    pub dimensions: StrataDimensions,
    pub view_mode: ViewMode,
    pub(crate) vertical_spacing: f32,
}

impl Default for StrataSettings {
    fn default() -> Self {
        Self {
            dimensions: StrataDimensions::default(),
            view_mode: ViewMode::Normal,
            vertical_spacing: DEFAULT_VERTICAL_SPACING,
        }
    }
}

impl StrataSettings {
    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    /// Spacing between exploded layers; must stay positive.
    pub fn set_vertical_spacing(&mut self, spacing: f32) -> bool {
        if !is_positive(spacing) {
            return false;
        }
        self.vertical_spacing = spacing;
        true
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

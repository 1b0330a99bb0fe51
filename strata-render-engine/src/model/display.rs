use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayOption {
    Labels,
    Markers,
    DepthMarkers,
    Connectors,
    Strata,
    GroundGrid,
}

/// Which generated scene elements are shown. Everything starts visible.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub show_labels: bool,
    pub show_markers: bool,
    pub show_depth_markers: bool,
    pub show_connectors: bool,
    pub show_strata: bool,
    pub show_ground_grid: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_labels: true,
            show_markers: true,
            show_depth_markers: true,
            show_connectors: true,
            show_strata: true,
            show_ground_grid: true,
        }
    }
}

impl DisplayOptions {
    pub fn get(&self, option: DisplayOption) -> bool {
        match option {
            DisplayOption::Labels => self.show_labels,
            DisplayOption::Markers => self.show_markers,
            DisplayOption::DepthMarkers => self.show_depth_markers,
            DisplayOption::Connectors => self.show_connectors,
            DisplayOption::Strata => self.show_strata,
            DisplayOption::GroundGrid => self.show_ground_grid,
        }
    }

    /// Flip one option and return its new value.
    pub fn toggle(&mut self, option: DisplayOption) -> bool {
        let flag = match option {
            DisplayOption::Labels => &mut self.show_labels,
            DisplayOption::Markers => &mut self.show_markers,
            DisplayOption::DepthMarkers => &mut self.show_depth_markers,
            DisplayOption::Connectors => &mut self.show_connectors,
            DisplayOption::Strata => &mut self.show_strata,
            DisplayOption::GroundGrid => &mut self.show_ground_grid,
        };
        *flag = !*flag;
        *flag
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_then_reset() {
        let mut options = DisplayOptions::default();
        assert!(!options.toggle(DisplayOption::Connectors));
        assert!(!options.get(DisplayOption::Connectors));
        assert!(!options.toggle(DisplayOption::GroundGrid));
        assert!(options.toggle(DisplayOption::Connectors));

        options.reset();
        assert_eq!(options, DisplayOptions::default());
    }
}

use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::soil::{DEFAULT_LAYER_COUNT, DEFAULT_VERTICAL_SPACING, MAX_LAYERS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{DisplayOptions, LayerStack, StrataDimensions, StrataSettings, ViewMode};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("layer count {0} exceeds the maximum of {MAX_LAYERS}")]
    TooManyLayers(usize),
    #[error("strata dimensions must be positive, got {width} x {depth}")]
    InvalidDimensions { width: f32, depth: f32 },
    #[error("vertical spacing must be positive, got {0}")]
    InvalidSpacing(f32),
}

/// Startup state of the viewer, read from a JSON asset.
///
/// Every field is optional in the file; missing ones take their defaults.
#[derive(Asset, TypePath, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub layer_count: usize,
    pub dimensions: StrataDimensions,
    pub view_mode: ViewMode,
    pub vertical_spacing: f32,
    pub display: DisplayOptions,
    /// glTF file relative to the asset directory.
    pub site_map: Option<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            layer_count: DEFAULT_LAYER_COUNT,
            dimensions: StrataDimensions::default(),
            view_mode: ViewMode::Normal,
            vertical_spacing: DEFAULT_VERTICAL_SPACING,
            display: DisplayOptions::default(),
            site_map: None,
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layer_count > MAX_LAYERS {
            return Err(ConfigError::TooManyLayers(self.layer_count));
        }
        let StrataDimensions { width, depth } = self.dimensions;
        let mut dimensions = StrataDimensions::default();
        if !dimensions.set_width(width) || !dimensions.set_depth(depth) {
            return Err(ConfigError::InvalidDimensions { width, depth });
        }
        if !StrataSettings::default().set_vertical_spacing(self.vertical_spacing) {
            return Err(ConfigError::InvalidSpacing(self.vertical_spacing));
        }
        Ok(())
    }

    pub fn layer_stack(&self) -> LayerStack {
        LayerStack::with_layer_count(self.layer_count)
    }

    pub fn strata_settings(&self) -> StrataSettings {
        let mut settings = StrataSettings {
            dimensions: self.dimensions,
            view_mode: self.view_mode,
            ..default()
        };
        settings.set_vertical_spacing(self.vertical_spacing);
        settings
    }
}

/// Where the config comes from and the handle of the load in flight.
#[derive(Resource, Debug)]
pub struct ConfigLoader {
    path: String,
    handle: Option<Handle<ViewerConfig>>,
}

impl ConfigLoader {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            handle: None,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

pub fn start_loading(mut loader: ResMut<ConfigLoader>, asset_server: Res<AssetServer>) {
    info!("Loading viewer config from '{}'", loader.path);
    loader.handle = Some(asset_server.load(loader.path.clone()));
}

/// Pick the config to start from: a loaded, valid config or the defaults.
pub fn resolve_config(path: &str, loaded: Option<&ViewerConfig>) -> ViewerConfig {
    let Some(config) = loaded else {
        warn!("Viewer config '{}' unavailable, using defaults", path);
        return ViewerConfig::default();
    };
    match config.validate() {
        Ok(()) => config.clone(),
        Err(err) => {
            warn!("Viewer config '{}' rejected: {}. Using defaults", path, err);
            ViewerConfig::default()
        }
    }
}

/// Outcome of polling the config load.
pub enum ConfigPoll {
    Pending,
    Ready(ViewerConfig),
}

pub fn poll_config(
    loader: &ConfigLoader,
    asset_server: &AssetServer,
    configs: &Assets<ViewerConfig>,
) -> ConfigPoll {
    let Some(handle) = loader.handle.as_ref() else {
        return ConfigPoll::Ready(resolve_config(&loader.path, None));
    };
    if let Some(config) = configs.get(handle) {
        return ConfigPoll::Ready(resolve_config(&loader.path, Some(config)));
    }
    if let LoadState::Failed(err) = asset_server.load_state(handle) {
        error!("Failed to load viewer config '{}': {}", loader.path, err);
        return ConfigPoll::Ready(resolve_config(&loader.path, None));
    }
    ConfigPoll::Pending
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_takes_defaults() {
        let config: ViewerConfig =
            serde_json::from_str(r#"{ "layer_count": 5, "view_mode": "exploded" }"#).unwrap();
        assert_eq!(config.layer_count, 5);
        assert_eq!(config.view_mode, ViewMode::Exploded);
        assert_eq!(config.dimensions, StrataDimensions::default());
        assert_eq!(config.vertical_spacing, DEFAULT_VERTICAL_SPACING);
        assert!(config.display.show_ground_grid);
        assert!(config.site_map.is_none());
    }

    #[test]
    fn display_toggles_read_individually() {
        let config: ViewerConfig =
            serde_json::from_str(r#"{ "display": { "show_labels": false } }"#).unwrap();
        assert!(!config.display.show_labels);
        assert!(config.display.show_markers);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let too_many = ViewerConfig {
            layer_count: MAX_LAYERS + 1,
            ..default()
        };
        assert_eq!(too_many.validate(), Err(ConfigError::TooManyLayers(MAX_LAYERS + 1)));

        let flat = ViewerConfig {
            dimensions: StrataDimensions {
                width: 0.0,
                depth: 5.0,
            },
            ..default()
        };
        assert!(matches!(flat.validate(), Err(ConfigError::InvalidDimensions { .. })));

        let no_spacing = ViewerConfig {
            vertical_spacing: -1.0,
            ..default()
        };
        assert_eq!(no_spacing.validate(), Err(ConfigError::InvalidSpacing(-1.0)));
    }

    #[test]
    fn rejected_config_falls_back_to_defaults() {
        let bad = ViewerConfig {
            layer_count: 99,
            ..default()
        };
        assert_eq!(resolve_config("bad.json", Some(&bad)), ViewerConfig::default());
        assert_eq!(resolve_config("missing.json", None), ViewerConfig::default());
    }

    #[test]
    fn config_builds_resources() {
        let config = ViewerConfig {
            layer_count: 4,
            view_mode: ViewMode::Exploded,
            vertical_spacing: 1.5,
            ..default()
        };
        assert_eq!(config.layer_stack().len(), 4);
        let settings = config.strata_settings();
        assert_eq!(settings.view_mode, ViewMode::Exploded);
        assert_eq!(settings.vertical_spacing(), 1.5);
    }
}

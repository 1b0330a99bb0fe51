//! Core application setup and state management.
//!
//! Handles the application lifecycle, window configuration, the loading of
//! the viewer configuration and the transition into the running viewer.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the strata, borehole and site map systems.
pub mod app_setup;

/// Application state machine: config loading, then the running viewer.
pub mod app_state;

/// Viewer configuration asset, its validation and the loader that polls it.
pub mod config;

/// Window title and vsync settings.
pub mod window_config;

pub use app_setup::{LaunchOptions, create_app};
pub use app_state::AppState;
pub use config::{ConfigError, ViewerConfig};

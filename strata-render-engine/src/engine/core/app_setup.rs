use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::camera::viewport_camera::{ViewportCamera, camera_controller};
use crate::engine::core::app_state::{AppState, SiteMapOverride, transition_to_running};
use crate::engine::core::config::{ConfigLoader, ViewerConfig, start_loading};
use crate::engine::core::window_config::create_window_config;
use crate::engine::labels::LabelGlyphs;
use crate::engine::scene::billboard::face_camera;
use crate::engine::scene::environment::setup_environment;
use crate::engine::scene::grid::sync_ground_grid;
use crate::engine::scene::lifecycle::{SceneObjects, dispose_scene_on_exit};
use crate::model::{DisplayOptions, LayerStack, StrataSettings};
use crate::strata::systems::rebuild_strata;
use crate::tools::borehole::BoreholePlugin;
use crate::tools::hud::{spawn_status_overlay, update_entry_text, update_status_text};
use crate::tools::shortcuts::{ViewerCommand, apply_viewer_commands, handle_keyboard_shortcuts};
use crate::tools::site_map::SiteMapPlugin;
use crate::tools::text_entry::{
    TextEntry, TextEntrySubmitted, apply_text_entry, capture_text_entry,
};

/// Startup inputs that come from outside the asset directory.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub config_path: String,
    pub site_map: Option<String>,
}

pub fn create_app(options: LaunchOptions) -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers ViewerConfig as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<ViewerConfig>::new(&["json"]))
        .add_plugins(BoreholePlugin)
        .add_plugins(SiteMapPlugin);

    app.insert_resource(ConfigLoader::new(options.config_path))
        .insert_resource(SiteMapOverride(options.site_map))
        .init_resource::<LayerStack>()
        .init_resource::<StrataSettings>()
        .init_resource::<DisplayOptions>()
        .init_resource::<SceneObjects>()
        .init_resource::<LabelGlyphs>()
        .init_resource::<ViewportCamera>()
        .init_resource::<TextEntry>()
        .add_event::<ViewerCommand>()
        .add_event::<TextEntrySubmitted>();

    app.add_systems(
        Startup,
        (setup_environment, spawn_status_overlay, start_loading),
    )
    .add_systems(
        Update,
        transition_to_running.run_if(in_state(AppState::Loading)),
    )
    .add_systems(
        Update,
        (
            capture_text_entry,
            apply_text_entry,
            handle_keyboard_shortcuts,
            apply_viewer_commands,
            rebuild_strata,
            sync_ground_grid,
        )
            .chain()
            .run_if(in_state(AppState::Running)),
    )
    .add_systems(
        Update,
        (
            camera_controller,
            face_camera.after(camera_controller),
            update_status_text,
            update_entry_text,
        ),
    )
    .add_systems(Last, dispose_scene_on_exit);

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}

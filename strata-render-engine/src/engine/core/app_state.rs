use bevy::prelude::*;

use crate::engine::core::config::{ConfigLoader, ConfigPoll, ViewerConfig, poll_config};
use crate::tools::site_map::SiteMapRequest;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

/// Site map given on the command line. Takes precedence over the config's.
#[derive(Resource, Debug, Default, Clone)]
pub struct SiteMapOverride(pub Option<String>);

/// Apply the viewer config once it resolves and start running.
pub fn transition_to_running(
    loader: Res<ConfigLoader>,
    asset_server: Res<AssetServer>,
    configs: Res<Assets<ViewerConfig>>,
    site_map_override: Res<SiteMapOverride>,
    mut commands: Commands,
    mut site_map_requests: EventWriter<SiteMapRequest>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let ConfigPoll::Ready(config) = poll_config(&loader, &asset_server, &configs) else {
        return;
    };

    commands.insert_resource(config.layer_stack());
    commands.insert_resource(config.strata_settings());
    commands.insert_resource(config.display);

    if let Some(path) = site_map_override.0.clone().or(config.site_map) {
        site_map_requests.write(SiteMapRequest::Load(path));
    }

    info!(
        "→ Transitioning to Running with {} layers ({:?} view)",
        config.layer_count, config.view_mode
    );
    next_state.set(AppState::Running);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DisplayOptions, LayerStack, StrataSettings};
    use bevy::state::app::StatesPlugin;

    fn app(site_map_override: Option<&str>) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default(), StatesPlugin))
            .init_asset::<ViewerConfig>()
            .init_state::<AppState>()
            .init_resource::<LayerStack>()
            .init_resource::<StrataSettings>()
            .init_resource::<DisplayOptions>()
            .insert_resource(ConfigLoader::new("config/viewer.json"))
            .insert_resource(SiteMapOverride(site_map_override.map(str::to_string)))
            .add_event::<SiteMapRequest>()
            .add_systems(
                Update,
                transition_to_running.run_if(in_state(AppState::Loading)),
            );
        app
    }

    fn site_map_requests(app: &App) -> Vec<SiteMapRequest> {
        app.world()
            .resource::<Events<SiteMapRequest>>()
            .iter_current_update_events()
            .cloned()
            .collect()
    }

    #[test]
    fn missing_config_starts_with_defaults() {
        let mut app = app(None);
        app.update();
        app.update();

        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::Running
        );
        assert_eq!(app.world().resource::<LayerStack>().len(), 3);
        assert!(site_map_requests(&app).is_empty());
    }

    #[test]
    fn command_line_site_map_is_requested() {
        let mut app = app(Some("maps/site.glb"));
        app.update();
        assert_eq!(
            site_map_requests(&app),
            vec![SiteMapRequest::Load("maps/site.glb".into())]
        );
    }
}

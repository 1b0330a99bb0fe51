use std::path::Path;

use bevy::asset::{LoadState, RecursiveDependencyLoadState};
use bevy::gltf::Gltf;
use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use bevy::scene::{SceneInstance, SceneSpawner};
use thiserror::Error;

use super::fit::{SiteMapBounds, fit_site_map};
use crate::engine::scene::lifecycle::{SceneObjects, SubtreeKind};
use crate::engine::scene::spawn::SceneAssets;
use crate::model::{SiteMapTransform, StrataSettings};

const SUPPORTED_EXTENSIONS: [&str; 2] = ["glb", "gltf"];

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SiteMapError {
    #[error("unsupported site map file '{0}', expected .glb or .gltf")]
    UnsupportedFormat(String),
    #[error("failed to load site map '{path}': {reason}")]
    Load { path: String, reason: String },
    #[error("site map '{0}' contains no scene")]
    NoScene(String),
    #[error("site map '{0}' has no measurable geometry")]
    EmptyBounds(String),
}

/// Check the file extension before handing the path to the asset server.
pub fn validate_site_map_path(path: &str) -> Result<(), SiteMapError> {
    let supported = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        });
    if supported {
        Ok(())
    } else {
        Err(SiteMapError::UnsupportedFormat(path.to_string()))
    }
}

#[derive(Event, Debug, Clone, PartialEq)]
pub enum SiteMapRequest {
    /// Load a glTF file, relative to the asset directory.
    Load(String),
    Remove,
}

/// Marks the root entity of the spawned site map scene.
#[derive(Component)]
pub struct SiteMapRoot;

#[derive(Debug)]
struct PendingLoad {
    generation: u64,
    path: String,
    handle: Handle<Gltf>,
}

/// Single in-flight site map request.
///
/// Every request bumps the generation. Only the latest request may attach
/// its result; anything older is dropped when it resolves.
#[derive(Resource, Debug, Default)]
pub struct SiteMapSlot {
    generation: u64,
    pending: Option<PendingLoad>,
    awaiting_fit: Option<(u64, String, Entity)>,
    last_error: Option<SiteMapError>,
}

impl SiteMapSlot {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some() || self.awaiting_fit.is_some()
    }

    pub fn last_error(&self) -> Option<&SiteMapError> {
        self.last_error.as_ref()
    }

    /// Start tracking a new load, superseding whatever was in flight.
    pub fn begin(&mut self, path: impl Into<String>, handle: Handle<Gltf>) -> u64 {
        self.generation += 1;
        self.pending = Some(PendingLoad {
            generation: self.generation,
            path: path.into(),
            handle,
        });
        self.awaiting_fit = None;
        self.last_error = None;
        self.generation
    }

    /// Drop any in-flight load.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.awaiting_fit = None;
    }

    fn fail(&mut self, error: SiteMapError) {
        error!("{error}");
        self.cancel();
        self.last_error = Some(error);
    }

    /// Stop waiting on a scene that has nothing to fit. The map stays attached.
    fn empty_scene(&mut self, generation: u64, path: String) {
        self.awaiting_fit = None;
        if !self.is_current(generation) {
            return;
        }
        let err = SiteMapError::EmptyBounds(path);
        warn!("{err}");
        self.last_error = Some(err);
    }

    /// Hand over the spawned scene root for fitting, if `generation` is still current.
    fn loaded(&mut self, generation: u64, root: Entity) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        let Some(pending) = self.pending.take() else {
            return false;
        };
        self.awaiting_fit = Some((generation, pending.path, root));
        true
    }
}

pub fn handle_site_map_requests(
    mut requests: EventReader<SiteMapRequest>,
    asset_server: Res<AssetServer>,
    mut slot: ResMut<SiteMapSlot>,
    mut site_map: ResMut<SiteMapTransform>,
    mut commands: Commands,
    mut assets: SceneAssets,
    mut scene_objects: ResMut<SceneObjects>,
) {
    for request in requests.read() {
        // Whatever comes next, the current map goes first.
        scene_objects.clear(&mut commands, &mut assets, SubtreeKind::SiteMap);
        *site_map = SiteMapTransform::default();

        match request {
            SiteMapRequest::Load(path) => {
                if let Err(err) = validate_site_map_path(path) {
                    slot.fail(err);
                    continue;
                }
                let generation = slot.begin(path.clone(), asset_server.load(path.clone()));
                info!("Loading site map '{}' (request {})", path, generation);
            }
            SiteMapRequest::Remove => {
                slot.cancel();
                info!("Site map removed");
            }
        }
    }
}

/// Spawn the scene of a finished load and hand its root to the lifecycle manager.
pub fn poll_site_map_load(
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    mut slot: ResMut<SiteMapSlot>,
    mut commands: Commands,
    mut assets: SceneAssets,
    mut scene_objects: ResMut<SceneObjects>,
) {
    let Some(pending) = slot.pending.as_ref() else {
        return;
    };
    let generation = pending.generation;
    let path = pending.path.clone();

    if let LoadState::Failed(err) = asset_server.load_state(&pending.handle) {
        slot.fail(SiteMapError::Load {
            path,
            reason: err.to_string(),
        });
        return;
    }
    if let RecursiveDependencyLoadState::Failed(err) =
        asset_server.recursive_dependency_load_state(&pending.handle)
    {
        slot.fail(SiteMapError::Load {
            path,
            reason: err.to_string(),
        });
        return;
    }
    if !asset_server.is_loaded_with_dependencies(&pending.handle) {
        return;
    }

    let scene = gltfs
        .get(&pending.handle)
        .and_then(|gltf| gltf.default_scene.clone().or_else(|| gltf.scenes.first().cloned()));
    let Some(scene) = scene else {
        slot.fail(SiteMapError::NoScene(path));
        return;
    };

    let root = commands
        .spawn((
            Name::new("site_map"),
            SiteMapRoot,
            SceneRoot(scene),
            Transform::default(),
            Visibility::default(),
        ))
        .id();
    if slot.loaded(generation, root) {
        scene_objects.attach(&mut commands, &mut assets, SubtreeKind::SiteMap, root);
        debug!("Site map '{}' spawned as {:?}", path, root);
    } else {
        commands.entity(root).despawn();
    }
}

/// World-space corners of every mesh bound under `root`.
fn scene_corners(
    root: Entity,
    children: &Query<&Children>,
    bounds: &Query<(&GlobalTransform, &Aabb)>,
) -> Vec<Vec3> {
    children
        .iter_descendants(root)
        .filter_map(|entity| bounds.get(entity).ok())
        .flat_map(|(transform, aabb)| {
            let center = Vec3::from(aabb.center);
            let half = Vec3::from(aabb.half_extents);
            (0..8).map(move |corner| {
                let sign = Vec3::new(
                    if corner & 1 == 0 { -1.0 } else { 1.0 },
                    if corner & 2 == 0 { -1.0 } else { 1.0 },
                    if corner & 4 == 0 { -1.0 } else { 1.0 },
                );
                transform.transform_point(center + half * sign)
            })
        })
        .collect()
}

/// Where a spawned site map stands on its way to being fitted.
#[derive(Debug, PartialEq)]
pub enum FitProgress {
    Wait,
    Fit(Vec<Vec3>),
    /// The scene finished spawning without any mesh to measure.
    Empty,
}

pub fn fit_progress(scene_ready: bool, mesh_count: usize, corners: Vec<Vec3>) -> FitProgress {
    if !corners.is_empty() {
        FitProgress::Fit(corners)
    } else if scene_ready && mesh_count == 0 {
        FitProgress::Empty
    } else {
        FitProgress::Wait
    }
}

/// Once the scene's meshes have bounds, fit the map to the strata footprint.
/// The root still has an identity transform at this point, so world bounds
/// equal the map's own bounds.
#[allow(clippy::too_many_arguments)]
pub fn fit_site_map_when_ready(
    mut slot: ResMut<SiteMapSlot>,
    settings: Res<StrataSettings>,
    scene_spawner: Res<SceneSpawner>,
    instances: Query<&SceneInstance>,
    children: Query<&Children>,
    meshes: Query<(), With<Mesh3d>>,
    bounds: Query<(&GlobalTransform, &Aabb)>,
    mut site_map: ResMut<SiteMapTransform>,
) {
    let Some((generation, path, root)) = slot.awaiting_fit.clone() else {
        return;
    };
    let scene_ready = instances
        .get(root)
        .is_ok_and(|instance| scene_spawner.instance_is_ready(**instance));
    let mesh_count = children
        .iter_descendants(root)
        .filter(|entity| meshes.contains(*entity))
        .count();
    let corners = scene_corners(root, &children, &bounds);
    let corners = match fit_progress(scene_ready, mesh_count, corners) {
        FitProgress::Wait => return,
        FitProgress::Empty => {
            slot.empty_scene(generation, path);
            return;
        }
        FitProgress::Fit(corners) => corners,
    };
    slot.awaiting_fit = None;
    if !slot.is_current(generation) {
        return;
    }

    let fitted = SiteMapBounds::from_points(corners)
        .and_then(|bounds| fit_site_map(&bounds, &settings.dimensions));
    match fitted {
        Some(fitted) => {
            info!(
                "Site map '{}' fitted: scale {:.4}, offset {}",
                path, fitted.scale, fitted.position
            );
            *site_map = fitted;
        }
        None => slot.empty_scene(generation, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::SystemState;

    #[test]
    fn only_gltf_files_are_accepted() {
        assert!(validate_site_map_path("maps/site.glb").is_ok());
        assert!(validate_site_map_path("maps/site.GLTF").is_ok());
        assert_eq!(
            validate_site_map_path("maps/site.obj"),
            Err(SiteMapError::UnsupportedFormat("maps/site.obj".into()))
        );
        assert!(validate_site_map_path("site").is_err());
    }

    #[test]
    fn superseded_load_is_ignored() {
        let mut world = World::new();
        let stale_root = world.spawn_empty().id();
        let fresh_root = world.spawn_empty().id();

        let mut slot = SiteMapSlot::default();
        let first = slot.begin("a.glb", Handle::default());
        let second = slot.begin("b.glb", Handle::default());
        assert_ne!(first, second);
        assert!(!slot.loaded(first, stale_root));
        assert!(slot.is_loading());

        assert!(slot.loaded(second, fresh_root));
        assert_eq!(slot.awaiting_fit.as_ref().map(|(_, _, root)| *root), Some(fresh_root));
    }

    #[test]
    fn cancel_clears_pending_and_failure_is_kept() {
        let mut slot = SiteMapSlot::default();
        let generation = slot.begin("a.glb", Handle::default());
        slot.cancel();
        assert!(!slot.is_loading());
        assert!(!slot.is_current(generation));

        slot.fail(SiteMapError::NoScene("a.glb".into()));
        assert_eq!(slot.last_error(), Some(&SiteMapError::NoScene("a.glb".into())));
        slot.begin("b.glb", Handle::default());
        assert!(slot.last_error().is_none());
    }

    #[test]
    fn requests_clear_previous_map() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Gltf>()
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<Assets<Image>>()
            .init_resource::<SceneObjects>()
            .init_resource::<SiteMapSlot>()
            .init_resource::<SiteMapTransform>()
            .add_event::<SiteMapRequest>()
            .add_systems(Update, handle_site_map_requests);

        let old_root = app.world_mut().spawn(Name::new("site_map")).id();
        app.world_mut().resource_scope(|world, mut objects: Mut<SceneObjects>| {
            let mut state: SystemState<(Commands<'static, 'static>, SceneAssets<'static>)> =
                SystemState::new(world);
            let (mut commands, mut assets) = state.get_mut(world);
            objects.attach(&mut commands, &mut assets, SubtreeKind::SiteMap, old_root);
            state.apply(world);
        });
        app.world_mut().resource_mut::<SiteMapTransform>().set_opacity(0.3);

        app.world_mut().send_event(SiteMapRequest::Load("terrain.obj".into()));
        app.update();

        assert!(app.world().get_entity(old_root).is_err());
        assert_eq!(app.world().resource::<SceneObjects>().current(SubtreeKind::SiteMap), None);
        assert_eq!(*app.world().resource::<SiteMapTransform>(), SiteMapTransform::default());
        let slot = app.world().resource::<SiteMapSlot>();
        assert!(!slot.is_loading());
        assert!(matches!(slot.last_error(), Some(SiteMapError::UnsupportedFormat(_))));
    }

    #[test]
    fn meshless_scene_stops_waiting() {
        let corners = vec![Vec3::ZERO, Vec3::ONE];
        assert_eq!(fit_progress(false, 0, Vec::new()), FitProgress::Wait);
        assert_eq!(fit_progress(true, 2, Vec::new()), FitProgress::Wait);
        assert_eq!(fit_progress(true, 0, Vec::new()), FitProgress::Empty);
        assert_eq!(fit_progress(false, 1, corners.clone()), FitProgress::Fit(corners));

        let mut world = World::new();
        let root = world.spawn_empty().id();
        let mut slot = SiteMapSlot::default();
        let generation = slot.begin("empty.glb", Handle::default());
        assert!(slot.loaded(generation, root));
        slot.empty_scene(generation, "empty.glb".into());
        assert!(!slot.is_loading());
        assert_eq!(
            slot.last_error(),
            Some(&SiteMapError::EmptyBounds("empty.glb".into()))
        );
    }
}

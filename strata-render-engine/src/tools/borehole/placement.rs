use bevy::ecs::entity::EntityHashSet;
use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings, RayCastVisibility};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::scene::GROUND_GRID_SIZE;

use super::prompt::{BoreholeNamePrompt, normalize_name};
use super::state::PlacementState;
use crate::engine::camera::ray::{pointer_to_ndc, ray_aabb_hit_t, ray_from_ndc, ray_plane_hit_t};
use crate::engine::scene::lifecycle::{SceneObjects, SubtreeKind};
use crate::model::{BoreholeRegistry, DisplayOptions, SiteMapTransform};
use crate::tools::text_entry::{EntryTarget, TextEntry};

/// Something a placement ray can land on.
pub trait RayTarget {
    fn name(&self) -> &'static str;

    /// Distance along `ray` to the nearest surface of this target.
    fn intersect(&mut self, ray: Ray3d) -> Option<f32>;
}

/// The ground grid: the y = 0 plane limited to the grid's square extent.
pub struct GridTarget {
    half_extent: f32,
}

impl GridTarget {
    pub fn new(size: f32) -> Self {
        Self {
            half_extent: size / 2.0,
        }
    }
}

impl Default for GridTarget {
    fn default() -> Self {
        Self::new(GROUND_GRID_SIZE)
    }
}

impl RayTarget for GridTarget {
    fn name(&self) -> &'static str {
        "ground grid"
    }

    fn intersect(&mut self, ray: Ray3d) -> Option<f32> {
        // Zero-thickness box spanning the grid.
        let extent = Vec3::new(self.half_extent, 0.0, self.half_extent);
        ray_aabb_hit_t(ray.origin, *ray.direction, -extent, extent)
    }
}

/// Meshes under the loaded site map, tested triangle by triangle.
pub struct SiteMapTarget<'a, 'w, 's> {
    ray_cast: &'a mut MeshRayCast<'w, 's>,
    meshes: &'a EntityHashSet,
}

impl<'a, 'w, 's> SiteMapTarget<'a, 'w, 's> {
    pub fn new(ray_cast: &'a mut MeshRayCast<'w, 's>, meshes: &'a EntityHashSet) -> Self {
        Self { ray_cast, meshes }
    }
}

impl RayTarget for SiteMapTarget<'_, '_, '_> {
    fn name(&self) -> &'static str {
        "site map"
    }

    fn intersect(&mut self, ray: Ray3d) -> Option<f32> {
        let meshes = self.meshes;
        let filter = |entity: Entity| meshes.contains(&entity);
        let settings = MeshRayCastSettings::default()
            .with_filter(&filter)
            .with_visibility(RayCastVisibility::Any)
            .never_early_exit();
        self.ray_cast
            .cast_ray(ray, &settings)
            .iter()
            .map(|(_, hit)| hit.distance)
            .min_by(f32::total_cmp)
    }
}

/// Where a placement ray ended up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitSource {
    Target(&'static str),
    /// Nothing was hit, so the ray was intersected with the y = 0 plane.
    FallbackPlane,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementHit {
    pub point: Vec3,
    pub source: HitSource,
}

/// Resolve a pointer position to a world point for a new borehole.
///
/// Candidates are tested in order and the closest hit over all of them wins.
/// Without any hit the ray falls back to the y = 0 plane, which only fails
/// when the ray is parallel to it or points away from it.
pub fn place_borehole(
    pointer: Vec2,
    viewport: Rect,
    camera_transform: &GlobalTransform,
    clip_from_view: Mat4,
    candidates: &mut [&mut dyn RayTarget],
) -> Option<PlacementHit> {
    let ndc = pointer_to_ndc(pointer, viewport)?;
    let ray = ray_from_ndc(ndc, camera_transform, clip_from_view)?;

    let closest = candidates
        .iter_mut()
        .filter_map(|target| target.intersect(ray).map(|t| (t, target.name())))
        .min_by(|a, b| a.0.total_cmp(&b.0));

    if let Some((t, name)) = closest {
        return Some(PlacementHit {
            point: ray.get_point(t),
            source: HitSource::Target(name),
        });
    }

    let t = ray_plane_hit_t(ray, 0.0)?;
    let point = ray.get_point(t);
    Some(PlacementHit {
        point: Vec3::new(point.x, 0.0, point.z),
        source: HitSource::FallbackPlane,
    })
}

/// Mesh entities making up the site map hierarchy under `root`.
fn site_map_meshes(
    root: Entity,
    children: &Query<&Children>,
    meshes: &Query<(), With<Mesh3d>>,
) -> EntityHashSet {
    std::iter::once(root)
        .chain(children.iter_descendants(root))
        .filter(|entity| meshes.contains(*entity))
        .collect()
}

/// Resolve a click while placing. Whatever happens, placement ends afterwards.
#[allow(clippy::too_many_arguments)]
pub fn handle_placement_click(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    display: Res<DisplayOptions>,
    site_map: Res<SiteMapTransform>,
    scene_objects: Res<SceneObjects>,
    children: Query<&Children>,
    mesh_entities: Query<(), With<Mesh3d>>,
    mut ray_cast: MeshRayCast,
    prompt: Res<BoreholeNamePrompt>,
    mut text_entry: ResMut<TextEntry>,
    mut registry: ResMut<BoreholeRegistry>,
    mut next_state: ResMut<NextState<PlacementState>>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    next_state.set(PlacementState::Idle);

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(pointer) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let viewport = camera
        .logical_viewport_rect()
        .unwrap_or_else(|| Rect::new(0.0, 0.0, window.width(), window.height()));

    let map_meshes = scene_objects
        .current(SubtreeKind::SiteMap)
        .filter(|_| site_map.visible)
        .map(|root| site_map_meshes(root, &children, &mesh_entities));

    let mut site_map_target = map_meshes
        .as_ref()
        .map(|meshes| SiteMapTarget::new(&mut ray_cast, meshes));
    let mut grid_target = display.show_ground_grid.then(GridTarget::default);

    let mut candidates: Vec<&mut dyn RayTarget> = Vec::new();
    if let Some(target) = site_map_target.as_mut() {
        candidates.push(target);
    }
    if let Some(target) = grid_target.as_mut() {
        candidates.push(target);
    }

    let Some(hit) = place_borehole(
        pointer,
        viewport,
        camera_transform,
        camera.clip_from_view(),
        &mut candidates,
    ) else {
        warn!("Placement ray missed every target and the ground plane");
        return;
    };
    debug!("Placement ray hit {:?} at {}", hit.source, hit.point);

    let suggested = registry.suggested_name();
    match &*prompt {
        BoreholeNamePrompt::TextEntry => {
            text_entry.open(EntryTarget::BoreholeName(hit.point), suggested);
        }
        BoreholeNamePrompt::Immediate(source) => {
            let Some(name) = normalize_name(source.request_name(&suggested)) else {
                info!("Borehole placement cancelled: no name given");
                return;
            };
            registry.add(&name, hit.point);
        }
    }
}

use bevy::color::Alpha;
use bevy::prelude::*;

use super::loader::SiteMapRoot;
use crate::engine::scene::lifecycle::{SceneObjects, SubtreeKind};
use crate::model::SiteMapTransform;

/// Set a material's alpha, switching to blending below full opacity.
pub fn apply_opacity(material: &mut StandardMaterial, opacity: f32) {
    material.base_color.set_alpha(opacity);
    material.alpha_mode = if opacity < 1.0 {
        AlphaMode::Blend
    } else {
        AlphaMode::Opaque
    };
}

/// Push `SiteMapTransform` edits onto the live site map: root transform,
/// visibility and the opacity of every material in the scene.
pub fn apply_site_map_transform(
    site_map: Res<SiteMapTransform>,
    scene_objects: Res<SceneObjects>,
    mut roots: Query<(&mut Transform, &mut Visibility), With<SiteMapRoot>>,
    children: Query<&Children>,
    mesh_materials: Query<&MeshMaterial3d<StandardMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !site_map.is_changed() {
        return;
    }
    let Some(root) = scene_objects.current(SubtreeKind::SiteMap) else {
        return;
    };
    let Ok((mut transform, mut visibility)) = roots.get_mut(root) else {
        return;
    };

    *transform = site_map.to_transform();
    *visibility = if site_map.visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };

    for entity in children.iter_descendants(root) {
        let Ok(handle) = mesh_materials.get(entity) else {
            continue;
        };
        if let Some(material) = materials.get_mut(&handle.0) {
            apply_opacity(material, site_map.opacity());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::SystemState;

    #[test]
    fn opacity_switches_blend_mode() {
        let mut material = StandardMaterial::default();
        apply_opacity(&mut material, 0.4);
        assert_eq!(material.base_color.alpha(), 0.4);
        assert!(matches!(material.alpha_mode, AlphaMode::Blend));

        apply_opacity(&mut material, 1.0);
        assert!(matches!(material.alpha_mode, AlphaMode::Opaque));
    }

    #[test]
    fn edits_reach_root_and_materials() {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<Assets<Image>>()
            .init_resource::<SceneObjects>()
            .init_resource::<SiteMapTransform>()
            .add_systems(Update, apply_site_map_transform);

        let material = app
            .world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial::default());
        let world = app.world_mut();
        let root = world
            .spawn((SiteMapRoot, Transform::default(), Visibility::default()))
            .with_child(MeshMaterial3d(material.clone()))
            .id();

        let mut state: SystemState<(
            Commands<'static, 'static>,
            crate::engine::scene::spawn::SceneAssets<'static>,
            ResMut<'static, SceneObjects>,
        )> = SystemState::new(world);
        let (mut commands, mut assets, mut objects) = state.get_mut(world);
        objects.attach(&mut commands, &mut assets, SubtreeKind::SiteMap, root);
        state.apply(world);

        {
            let mut site_map = world.resource_mut::<SiteMapTransform>();
            site_map.set_scale(2.0);
            site_map.set_opacity(0.5);
            site_map.visible = false;
        }
        app.update();

        let world = app.world();
        assert_eq!(world.get::<Transform>(root).unwrap().scale, Vec3::splat(2.0));
        assert_eq!(world.get::<Visibility>(root), Some(&Visibility::Hidden));
        let material = world.resource::<Assets<StandardMaterial>>().get(&material).unwrap();
        assert_eq!(material.base_color.alpha(), 0.5);
    }
}

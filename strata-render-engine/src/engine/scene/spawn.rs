use bevy::asset::RenderAssetUsages;
use bevy::color::Alpha;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};

use super::billboard::Billboard;
use super::subtree::{NodeShape, SceneNode, SceneSubtree};
use crate::engine::labels::RasterSurface;

/// Asset stores a subtree draws its geometry, materials and textures from.
#[derive(SystemParam)]
pub struct SceneAssets<'w> {
    pub meshes: ResMut<'w, Assets<Mesh>>,
    pub materials: ResMut<'w, Assets<StandardMaterial>>,
    pub images: ResMut<'w, Assets<Image>>,
}

/// Every asset created for one subtree, released together on disposal.
#[derive(Debug, Default)]
pub struct SubtreeResources {
    meshes: Vec<Handle<Mesh>>,
    materials: Vec<Handle<StandardMaterial>>,
    images: Vec<Handle<Image>>,
}

impl SubtreeResources {
    pub fn len(&self) -> usize {
        self.meshes.len() + self.materials.len() + self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn add_mesh(&mut self, assets: &mut SceneAssets, mesh: Mesh) -> Handle<Mesh> {
        let handle = assets.meshes.add(mesh);
        self.meshes.push(handle.clone());
        handle
    }

    fn add_material(
        &mut self,
        assets: &mut SceneAssets,
        material: StandardMaterial,
    ) -> Handle<StandardMaterial> {
        let handle = assets.materials.add(material);
        self.materials.push(handle.clone());
        handle
    }

    fn add_texture(&mut self, assets: &mut SceneAssets, surface: &RasterSurface) -> Handle<Image> {
        let handle = assets.images.add(surface.to_image());
        self.images.push(handle.clone());
        handle
    }

    fn release(self, assets: &mut SceneAssets) {
        for mesh in &self.meshes {
            assets.meshes.remove(mesh);
        }
        for material in &self.materials {
            assets.materials.remove(material);
        }
        for image in &self.images {
            assets.images.remove(image);
        }
    }
}

/// A materialized subtree: its root entity and the assets it owns.
#[derive(Debug)]
pub struct LiveSubtree {
    pub root: Entity,
    resources: SubtreeResources,
}

impl LiveSubtree {
    /// Wrap a root whose assets belong to someone else, such as a loaded scene.
    pub fn external(root: Entity) -> Self {
        Self {
            root,
            resources: SubtreeResources::default(),
        }
    }

    pub fn resources(&self) -> &SubtreeResources {
        &self.resources
    }
}

/// Spawn an entity hierarchy mirroring `subtree`, recording every asset it creates.
pub fn spawn_subtree(
    commands: &mut Commands,
    assets: &mut SceneAssets,
    subtree: SceneSubtree,
) -> LiveSubtree {
    let mut resources = SubtreeResources::default();
    let root = spawn_node(commands, assets, &mut resources, subtree.root);
    LiveSubtree { root, resources }
}

/// Release the subtree's assets, then despawn its hierarchy if it still exists.
pub fn dispose_subtree(commands: &mut Commands, assets: &mut SceneAssets, live: LiveSubtree) {
    live.resources.release(assets);
    if let Ok(mut root) = commands.get_entity(live.root) {
        root.despawn();
    }
}

fn spawn_node(
    commands: &mut Commands,
    assets: &mut SceneAssets,
    resources: &mut SubtreeResources,
    node: SceneNode,
) -> Entity {
    let SceneNode {
        name,
        translation,
        shape,
        billboard,
        children,
    } = node;

    let entity = commands
        .spawn((
            Name::new(name),
            Transform::from_translation(translation),
            Visibility::default(),
        ))
        .id();

    match shape {
        NodeShape::Group => {}
        NodeShape::Cuboid { size, color } => {
            let mesh = resources.add_mesh(assets, Cuboid::new(size.x, size.y, size.z).into());
            let material = resources.add_material(
                assets,
                StandardMaterial {
                    base_color: color,
                    perceptual_roughness: 0.7,
                    metallic: 0.1,
                    ..default()
                },
            );
            commands
                .entity(entity)
                .insert((Mesh3d(mesh), MeshMaterial3d(material)));
        }
        NodeShape::Lines { segments, color } => {
            let mesh = resources.add_mesh(assets, line_list_mesh(&segments));
            let material = resources.add_material(
                assets,
                StandardMaterial {
                    base_color: color,
                    unlit: true,
                    alpha_mode: if color.alpha() < 1.0 {
                        AlphaMode::Blend
                    } else {
                        AlphaMode::Opaque
                    },
                    ..default()
                },
            );
            commands
                .entity(entity)
                .insert((Mesh3d(mesh), MeshMaterial3d(material)));
        }
        NodeShape::Disc { radius, color } => {
            let mesh = resources.add_mesh(assets, Circle::new(radius).into());
            let material = resources.add_material(
                assets,
                StandardMaterial {
                    base_color: color,
                    unlit: true,
                    cull_mode: None,
                    ..default()
                },
            );
            commands
                .entity(entity)
                .insert((Mesh3d(mesh), MeshMaterial3d(material)));
        }
        NodeShape::TexturedDisc { radius, texture } => {
            let mesh = resources.add_mesh(assets, Circle::new(radius).into());
            let material = textured_material(assets, resources, &texture);
            commands
                .entity(entity)
                .insert((Mesh3d(mesh), MeshMaterial3d(material)));
        }
        NodeShape::Sprite { texture, size } => {
            let mesh = resources.add_mesh(assets, Rectangle::new(size.x, size.y).into());
            let material = textured_material(assets, resources, &texture);
            commands
                .entity(entity)
                .insert((Mesh3d(mesh), MeshMaterial3d(material)));
        }
        NodeShape::Cylinder {
            radius,
            height,
            color,
        } => {
            let mesh = resources.add_mesh(assets, Cylinder::new(radius, height).into());
            let material = resources.add_material(
                assets,
                StandardMaterial {
                    base_color: color,
                    perceptual_roughness: 0.5,
                    metallic: 0.1,
                    ..default()
                },
            );
            commands
                .entity(entity)
                .insert((Mesh3d(mesh), MeshMaterial3d(material)));
        }
    }

    if billboard {
        commands.entity(entity).insert(Billboard);
    }

    for child in children {
        let child = spawn_node(commands, assets, resources, child);
        commands.entity(entity).add_child(child);
    }

    entity
}

// Unlit, double-sided and blended so transparent label corners show through.
fn textured_material(
    assets: &mut SceneAssets,
    resources: &mut SubtreeResources,
    surface: &RasterSurface,
) -> Handle<StandardMaterial> {
    let texture = resources.add_texture(assets, surface);
    resources.add_material(
        assets,
        StandardMaterial {
            base_color_texture: Some(texture),
            unlit: true,
            cull_mode: None,
            alpha_mode: AlphaMode::Blend,
            ..default()
        },
    )
}

/// Line-list mesh with one vertex pair per segment.
pub fn line_list_mesh(segments: &[[Vec3; 2]]) -> Mesh {
    let positions: Vec<[f32; 3]> = segments
        .iter()
        .flat_map(|[start, end]| [start.to_array(), end.to_array()])
        .collect();
    let indices: Vec<u32> = (0..positions.len() as u32).collect();

    let mut mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::RENDER_WORLD);
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

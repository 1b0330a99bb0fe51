use bevy::prelude::*;
use constants::render_settings::MARKER_BADGE_COLOUR;

use super::color::color_or_fallback;
use crate::engine::labels::{LabelSprite, MarkerBadge, RasterSurface};

/// Geometry carried by a node. Everything is built around the node origin.
#[derive(Debug, Clone)]
pub enum NodeShape {
    Group,
    /// Lit box volume.
    Cuboid { size: Vec3, color: Color },
    /// Unlit line segments. Alpha below one renders blended.
    Lines { segments: Vec<[Vec3; 2]>, color: Color },
    /// Flat unlit disc facing +Z.
    Disc { radius: f32, color: Color },
    /// Disc facing +Z carrying a transparent texture.
    TexturedDisc { radius: f32, texture: RasterSurface },
    /// Textured quad of `size` world units.
    Sprite { texture: RasterSurface, size: Vec2 },
    /// Lit upright cylinder centred on the origin.
    Cylinder { radius: f32, height: f32, color: Color },
}

/// Engine-agnostic scene description node.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub translation: Vec3,
    pub shape: NodeShape,
    /// Keep the node turned towards the camera.
    pub billboard: bool,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, shape: NodeShape) -> Self {
        Self {
            name: name.into(),
            translation: Vec3::ZERO,
            shape,
            billboard: false,
            children: Vec::new(),
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeShape::Group)
    }

    pub fn lines(name: impl Into<String>, segments: Vec<[Vec3; 2]>, color: Color) -> Self {
        Self::new(name, NodeShape::Lines { segments, color })
    }

    /// Camera-facing label quad.
    pub fn label(name: impl Into<String>, sprite: LabelSprite) -> Self {
        let mut node = Self::new(
            name,
            NodeShape::Sprite {
                texture: sprite.surface,
                size: sprite.world_size,
            },
        );
        node.billboard = true;
        node
    }

    /// Camera-facing dark disc with the number overlay just in front of it.
    pub fn marker(name: impl Into<String>, badge: MarkerBadge) -> Self {
        let badge_color = Color::from(color_or_fallback(MARKER_BADGE_COLOUR));
        let mut node = Self::group(name);
        node.billboard = true;
        node
            .with_child(Self::new(
                "badge",
                NodeShape::Disc {
                    radius: badge.radius,
                    color: badge_color,
                },
            ))
            .with_child(
                Self::new(
                    "number",
                    NodeShape::TexturedDisc {
                        radius: badge.radius,
                        texture: badge.number,
                    },
                )
                .at(Vec3::new(0.0, 0.0, badge.overlay_offset)),
            )
    }

    pub fn at(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    /// Depth-first list of this node and all of its descendants.
    pub fn descendants(&self) -> Vec<&SceneNode> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.descendants());
        }
        out
    }

    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        self.descendants().into_iter().find(|node| node.name == name)
    }
}

/// Disposable tree of scene nodes produced by a synthesis pass.
#[derive(Debug, Clone)]
pub struct SceneSubtree {
    pub root: SceneNode,
}

impl SceneSubtree {
    pub fn new(root: SceneNode) -> Self {
        Self { root }
    }

    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(SceneNode::group(name))
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty() && matches!(self.root.shape, NodeShape::Group)
    }

    pub fn node_count(&self) -> usize {
        self.root.descendants().len()
    }

    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        self.root.find(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::labels::{PlaceholderGlyphs, create_marker};

    #[test]
    fn marker_node_layers_number_in_front() {
        let node = SceneNode::marker("marker-1", create_marker(1, 2.0, &PlaceholderGlyphs));
        assert_eq!(node.children.len(), 2);
        let number = node.find("number").unwrap();
        assert!(number.translation.z > 0.0);
        assert!(matches!(node.children[0].shape, NodeShape::Disc { .. }));
    }

    #[test]
    fn empty_subtree_reports_empty() {
        let mut subtree = SceneSubtree::empty("strata");
        assert!(subtree.is_empty());
        assert_eq!(subtree.node_count(), 1);
        subtree.root.push(SceneNode::group("layer-0"));
        assert!(!subtree.is_empty());
        assert!(subtree.find("layer-0").is_some());
    }
}

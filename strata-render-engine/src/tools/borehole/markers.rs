use bevy::prelude::*;
use constants::render_settings::{
    BOREHOLE_LABEL_COLOUR, BOREHOLE_LABEL_GAP, BOREHOLE_LABEL_SCALE_FACTOR, BOREHOLE_MARKER_COLOUR,
    BOREHOLE_MARKER_HEIGHT, BOREHOLE_MARKER_RADIUS,
};

use crate::engine::labels::{GlyphRaster, LabelGlyphs, create_text_label};
use crate::engine::scene::color::color_or_fallback;
use crate::engine::scene::lifecycle::{SceneObjects, SubtreeKind};
use crate::engine::scene::spawn::SceneAssets;
use crate::engine::scene::subtree::{NodeShape, SceneNode, SceneSubtree};
use crate::model::{Borehole, BoreholeRegistry};

/// Upright red post standing on the borehole point with its name above it.
fn borehole_node(borehole: &Borehole, glyphs: &dyn GlyphRaster) -> SceneNode {
    let sprite = create_text_label(
        &borehole.name,
        color_or_fallback(BOREHOLE_LABEL_COLOUR),
        BOREHOLE_LABEL_SCALE_FACTOR,
        glyphs,
    );
    let label_y = BOREHOLE_MARKER_HEIGHT + sprite.world_size.y / 2.0 + BOREHOLE_LABEL_GAP;

    SceneNode::group(format!("borehole_{}", borehole.id))
        .at(borehole.position())
        .with_child(
            SceneNode::new(
                "post",
                NodeShape::Cylinder {
                    radius: BOREHOLE_MARKER_RADIUS,
                    height: BOREHOLE_MARKER_HEIGHT,
                    color: color_or_fallback(BOREHOLE_MARKER_COLOUR).into(),
                },
            )
            .at(Vec3::Y * BOREHOLE_MARKER_HEIGHT / 2.0),
        )
        .with_child(SceneNode::label("name", sprite).at(Vec3::Y * label_y))
}

pub fn borehole_subtree(boreholes: &[Borehole], glyphs: &dyn GlyphRaster) -> SceneSubtree {
    let mut root = SceneNode::group("boreholes");
    for borehole in boreholes {
        root.push(borehole_node(borehole, glyphs));
    }
    SceneSubtree::new(root)
}

/// Rebuild all borehole markers whenever the registry changes.
pub fn sync_borehole_markers(
    registry: Res<BoreholeRegistry>,
    glyphs: Res<LabelGlyphs>,
    mut commands: Commands,
    mut assets: SceneAssets,
    mut scene_objects: ResMut<SceneObjects>,
) {
    if !registry.is_changed() && !glyphs.is_changed() {
        return;
    }
    let subtree = (!registry.is_empty())
        .then(|| borehole_subtree(registry.boreholes(), glyphs.raster()));
    scene_objects.rebuild(&mut commands, &mut assets, SubtreeKind::Boreholes, subtree);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::labels::PlaceholderGlyphs;
    use approx::assert_relative_eq;

    #[test]
    fn post_stands_on_point_with_label_above() {
        let mut registry = BoreholeRegistry::default();
        registry.add("BH-1", Vec3::new(3.2, 0.0, -1.1));
        let subtree = borehole_subtree(registry.boreholes(), &PlaceholderGlyphs);

        let group = subtree.find("borehole_0").unwrap();
        assert_eq!(group.translation, Vec3::new(3.2, 0.0, -1.1));

        let post = group.find("post").unwrap();
        assert_relative_eq!(post.translation.y, 0.75);

        let label = group.find("name").unwrap();
        let NodeShape::Sprite { size, .. } = &label.shape else {
            panic!("borehole name must be a sprite");
        };
        assert_relative_eq!(label.translation.y - size.y / 2.0, 1.7, epsilon = 1e-5);
        assert!(label.billboard);
    }

    #[test]
    fn registry_changes_rebuild_markers() {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<Assets<Image>>()
            .init_resource::<SceneObjects>()
            .init_resource::<BoreholeRegistry>()
            .insert_resource(LabelGlyphs::new(PlaceholderGlyphs))
            .add_systems(Update, sync_borehole_markers);

        app.update();
        assert!(app.world().resource::<SceneObjects>().current(SubtreeKind::Boreholes).is_none());

        app.world_mut()
            .resource_mut::<BoreholeRegistry>()
            .add("BH-1", Vec3::new(1.0, 0.0, 1.0));
        app.update();
        let first = app.world().resource::<SceneObjects>().current(SubtreeKind::Boreholes).unwrap();

        app.world_mut().resource_mut::<BoreholeRegistry>().remove(0);
        app.update();
        assert!(app.world().resource::<SceneObjects>().current(SubtreeKind::Boreholes).is_none());
        assert!(app.world().get_entity(first).is_err());
    }
}

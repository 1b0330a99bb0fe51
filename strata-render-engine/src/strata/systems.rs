use bevy::prelude::*;

use super::scene::layout_strata;
use crate::engine::labels::LabelGlyphs;
use crate::engine::scene::lifecycle::{SceneObjects, SubtreeKind};
use crate::engine::scene::spawn::SceneAssets;
use crate::model::{DisplayOptions, LayerStack, StrataSettings};

/// Rebuild the strata subtree whenever the layers, geometry settings or
/// display toggles change. Hidden strata or an empty stack clear the slot.
pub fn rebuild_strata(
    stack: Res<LayerStack>,
    settings: Res<StrataSettings>,
    display: Res<DisplayOptions>,
    glyphs: Res<LabelGlyphs>,
    mut commands: Commands,
    mut assets: SceneAssets,
    mut scene_objects: ResMut<SceneObjects>,
) {
    if !(stack.is_changed() || settings.is_changed() || display.is_changed() || glyphs.is_changed())
    {
        return;
    }

    let subtree = (display.show_strata && !stack.is_empty()).then(|| {
        layout_strata(
            stack.layers(),
            &settings.dimensions,
            settings.view_mode,
            settings.vertical_spacing(),
            &display,
            glyphs.raster(),
        )
    });

    match &subtree {
        Some(strata) => debug!(
            "Rebuilding strata: {} layers, {:?} view, {} nodes",
            stack.len(),
            settings.view_mode,
            strata.node_count()
        ),
        None => debug!("Strata hidden or empty, clearing subtree"),
    }
    scene_objects.rebuild(&mut commands, &mut assets, SubtreeKind::Strata, subtree);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::labels::PlaceholderGlyphs;
    use crate::model::ViewMode;

    fn app() -> App {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<Assets<Image>>()
            .init_resource::<SceneObjects>()
            .init_resource::<DisplayOptions>()
            .init_resource::<StrataSettings>()
            .insert_resource(LayerStack::with_layer_count(3))
            .insert_resource(LabelGlyphs::new(PlaceholderGlyphs))
            .add_systems(Update, rebuild_strata);
        app
    }

    fn strata_root(app: &App) -> Option<Entity> {
        app.world().resource::<SceneObjects>().current(SubtreeKind::Strata)
    }

    fn named(app: &mut App, name: &str) -> usize {
        let world = app.world_mut();
        world
            .query::<&Name>()
            .iter(world)
            .filter(|n| n.as_str() == name)
            .count()
    }

    #[test]
    fn rebuilds_only_on_change() {
        let mut app = app();
        app.update();
        let first = strata_root(&app).unwrap();
        assert_eq!(named(&mut app, "layer_2"), 1);

        app.update();
        assert_eq!(strata_root(&app), Some(first));

        app.world_mut().resource_mut::<StrataSettings>().view_mode = ViewMode::Exploded;
        app.update();
        let second = strata_root(&app).unwrap();
        assert_ne!(first, second);
        assert!(app.world().get_entity(first).is_err());
        assert_eq!(named(&mut app, "layer_2"), 1);
        assert_eq!(named(&mut app, "connectors"), 1);
    }

    #[test]
    fn empty_or_hidden_strata_clear_slot() {
        let mut app = app();
        app.update();

        app.world_mut().resource_mut::<LayerStack>().set_layer_count(0);
        app.update();
        assert!(strata_root(&app).is_none());
        assert_eq!(app.world().resource::<Assets<Mesh>>().len(), 0);

        app.world_mut().resource_mut::<LayerStack>().set_layer_count(2);
        app.update();
        assert!(strata_root(&app).is_some());

        app.world_mut().resource_mut::<DisplayOptions>().show_strata = false;
        app.update();
        assert!(strata_root(&app).is_none());
    }

    #[test]
    fn mesh_count_stable_across_rebuilds() {
        let mut app = app();
        app.update();
        let meshes = app.world().resource::<Assets<Mesh>>().len();
        let images = app.world().resource::<Assets<Image>>().len();

        for _ in 0..3 {
            app.world_mut().resource_mut::<StrataSettings>().set_vertical_spacing(1.0);
            app.update();
        }
        assert_eq!(app.world().resource::<Assets<Mesh>>().len(), meshes);
        assert_eq!(app.world().resource::<Assets<Image>>().len(), images);
    }
}

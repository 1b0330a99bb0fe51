use std::collections::HashMap;

use bevy::prelude::*;

use super::spawn::{LiveSubtree, SceneAssets, dispose_subtree, spawn_subtree};
use super::subtree::SceneSubtree;

/// The four independently rebuilt parts of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubtreeKind {
    Strata,
    GroundGrid,
    SiteMap,
    Boreholes,
}

/// Sole owner of the live instance of each subtree kind.
///
/// Every change replaces the whole subtree: the old instance has its assets
/// released and its hierarchy despawned before the new one is spawned.
/// Nothing else keeps entity ids of these subtrees across a rebuild.
#[derive(Resource, Default)]
pub struct SceneObjects {
    live: HashMap<SubtreeKind, LiveSubtree>,
}

impl SceneObjects {
    /// Replace `kind` with `subtree`, or just clear it when `None`.
    pub fn rebuild(
        &mut self,
        commands: &mut Commands,
        assets: &mut SceneAssets,
        kind: SubtreeKind,
        subtree: Option<SceneSubtree>,
    ) -> Option<Entity> {
        self.clear(commands, assets, kind);
        let subtree = subtree?;
        let live = spawn_subtree(commands, assets, subtree);
        let root = live.root;
        self.live.insert(kind, live);
        debug!("Rebuilt {:?} subtree as {:?}", kind, root);
        Some(root)
    }

    /// Take ownership of an externally spawned root, disposing the previous one.
    pub fn attach(
        &mut self,
        commands: &mut Commands,
        assets: &mut SceneAssets,
        kind: SubtreeKind,
        root: Entity,
    ) {
        self.clear(commands, assets, kind);
        self.live.insert(kind, LiveSubtree::external(root));
    }

    /// Dispose the current instance of `kind`. Clearing an empty slot is a no-op.
    pub fn clear(&mut self, commands: &mut Commands, assets: &mut SceneAssets, kind: SubtreeKind) {
        if let Some(live) = self.live.remove(&kind) {
            dispose_subtree(commands, assets, live);
        }
    }

    pub fn current(&self, kind: SubtreeKind) -> Option<Entity> {
        self.live.get(&kind).map(|live| live.root)
    }

    pub fn dispose_all(&mut self, commands: &mut Commands, assets: &mut SceneAssets) {
        for (_, live) in self.live.drain() {
            dispose_subtree(commands, assets, live);
        }
    }
}

/// Release every live subtree when the app is shutting down.
pub fn dispose_scene_on_exit(
    mut exit_events: EventReader<AppExit>,
    mut commands: Commands,
    mut assets: SceneAssets,
    mut scene_objects: ResMut<SceneObjects>,
) {
    if exit_events.read().next().is_none() {
        return;
    }
    info!("Disposing scene objects on exit");
    scene_objects.dispose_all(&mut commands, &mut assets);
}

//! Flat reference grid on the y = 0 ground plane
use bevy::prelude::*;
use constants::scene::{
    GROUND_GRID_CENTRE_COLOUR, GROUND_GRID_DIVISIONS, GROUND_GRID_LINE_COLOUR, GROUND_GRID_SIZE,
};

use super::color::color_or_fallback;
use super::lifecycle::{SceneObjects, SubtreeKind};
use super::spawn::SceneAssets;
use super::subtree::{SceneNode, SceneSubtree};
use crate::model::DisplayOptions;

/// Build a square grid of `size` feet split into `divisions` cells per side.
/// The two lines through the origin are drawn in a darker colour.
pub fn ground_grid_subtree(size: f32, divisions: u32) -> SceneSubtree {
    let half = size / 2.0;
    let step = size / divisions.max(1) as f32;
    let centre_index = divisions / 2;

    let mut centre_lines = Vec::new();
    let mut lines = Vec::new();

    for i in 0..=divisions {
        let offset = -half + i as f32 * step;
        let x_line = [Vec3::new(offset, 0.0, -half), Vec3::new(offset, 0.0, half)];
        let z_line = [Vec3::new(-half, 0.0, offset), Vec3::new(half, 0.0, offset)];

        // Odd division counts have no line through the origin.
        let target = if divisions % 2 == 0 && i == centre_index {
            &mut centre_lines
        } else {
            &mut lines
        };
        target.push(x_line);
        target.push(z_line);
    }

    let mut root = SceneNode::group("ground_grid");
    if !centre_lines.is_empty() {
        root.push(SceneNode::lines(
            "grid_centre_lines",
            centre_lines,
            color_or_fallback(GROUND_GRID_CENTRE_COLOUR).into(),
        ));
    }
    root.push(SceneNode::lines(
        "grid_lines",
        lines,
        color_or_fallback(GROUND_GRID_LINE_COLOUR).into(),
    ));
    SceneSubtree::new(root)
}

/// Rebuild the ground grid whenever its visibility toggle flips.
pub fn sync_ground_grid(
    display: Res<DisplayOptions>,
    mut shown: Local<Option<bool>>,
    mut commands: Commands,
    mut assets: SceneAssets,
    mut scene_objects: ResMut<SceneObjects>,
) {
    let visible = display.show_ground_grid;
    if *shown == Some(visible) {
        return;
    }
    *shown = Some(visible);

    let subtree = visible.then(|| ground_grid_subtree(GROUND_GRID_SIZE, GROUND_GRID_DIVISIONS));
    scene_objects.rebuild(&mut commands, &mut assets, SubtreeKind::GroundGrid, subtree);
}

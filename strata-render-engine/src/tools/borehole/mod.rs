//! Interactive borehole placement.
//!
//! Placement is a two-state machine driven by `PlacementState`:
//!
//! ```text
//! Idle ──toggle──> Placing ──click / Escape / toggle──> Idle
//!                     │
//!                     └─ OnEnter: camera controller off, crosshair cursor
//!                        OnExit:  camera controller on, default cursor
//! ```
//!
//! A click while placing casts a ray from the camera through the pointer,
//! tests the site map and the ground grid, falls back to the y = 0 plane,
//! opens the name entry and, once a name is confirmed, appends the result
//! to `BoreholeRegistry`. The registry change then rebuilds the marker
//! subtree.

/// Red posts and name labels for every recorded borehole.
pub mod markers;

/// Pointer-to-world resolution and the click handler.
pub mod placement;

/// Name source for new boreholes.
pub mod prompt;

/// Placement state machine and its enter/exit hooks.
pub mod state;

use bevy::prelude::*;

use crate::model::BoreholeRegistry;
use crate::tools::text_entry::TextEntry;

pub use placement::{GridTarget, HitSource, PlacementHit, RayTarget, place_borehole};
pub use prompt::{AcceptSuggestedName, BoreholeNamePrompt, NamePrompt, normalize_name};
pub use state::{PlacementState, toggle_placement};

use markers::sync_borehole_markers;
use placement::handle_placement_click;
use state::{
    cancel_placement_on_escape, enter_placement, exit_placement, restore_controller_on_exit,
};

/// Registers the placement state machine, click handling and marker rebuilds.
pub struct BoreholePlugin;

impl Plugin for BoreholePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<PlacementState>()
            .init_resource::<BoreholeRegistry>()
            .init_resource::<BoreholeNamePrompt>()
            .init_resource::<TextEntry>()
            .add_systems(OnEnter(PlacementState::Placing), enter_placement)
            .add_systems(OnExit(PlacementState::Placing), exit_placement)
            .add_systems(
                Update,
                (cancel_placement_on_escape, handle_placement_click)
                    .chain()
                    .run_if(in_state(PlacementState::Placing)),
            )
            .add_systems(Update, sync_borehole_markers)
            .add_systems(Last, restore_controller_on_exit);
    }
}

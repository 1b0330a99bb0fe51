//! Optional terrain mesh shown around the strata block.
//!
//! A `SiteMapRequest` clears the current map and starts a glTF load through
//! the asset server. `SiteMapSlot` keeps only the latest request alive, so a
//! slow load that is superseded never attaches. Once the scene has spawned
//! and its meshes have bounds, the map is fitted to the strata footprint and
//! `SiteMapTransform` edits are applied from then on.

/// Bounds and the footprint fit.
pub mod fit;

/// Request handling, load polling and the in-flight slot.
pub mod loader;

/// Applies transform, visibility and opacity edits to the live map.
pub mod transform;

use bevy::prelude::*;

pub use fit::{SiteMapBounds, fit_site_map};
pub use loader::{SiteMapError, SiteMapRequest, SiteMapRoot, SiteMapSlot, validate_site_map_path};

use crate::model::SiteMapTransform;
use loader::{fit_site_map_when_ready, handle_site_map_requests, poll_site_map_load};
use transform::apply_site_map_transform;

pub struct SiteMapPlugin;

impl Plugin for SiteMapPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SiteMapSlot>()
            .init_resource::<SiteMapTransform>()
            .add_event::<SiteMapRequest>()
            .add_systems(
                Update,
                (
                    handle_site_map_requests,
                    poll_site_map_load,
                    fit_site_map_when_ready,
                    apply_site_map_transform,
                )
                    .chain(),
            );
    }
}

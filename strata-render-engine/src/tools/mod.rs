//! Interactive tools layered on top of the generated scene.
//!
//! ## Keyboard commands
//!
//! Key presses are mapped to `ViewerCommand` events by
//! `handle_keyboard_shortcuts` and applied to the model resources by
//! `apply_viewer_commands`. Change detection on those resources then drives
//! the scene rebuilds, so a command never touches the scene directly.
//!
//! ```text
//! Keyboard
//!   └─> ViewerCommand
//!       └─> apply_viewer_commands()
//!           ├─> LayerStack / StrataSettings / DisplayOptions  ─> strata rebuild
//!           ├─> BoreholeRegistry                              ─> marker rebuild
//!           ├─> SiteMapTransform / SiteMapRequest             ─> site map
//!           └─> NextState<PlacementState>                     ─> placement mode
//! ```
//!
//! ## Tools
//!
//! ### Borehole placement
//! - **Activation**: `B`
//! - Casts a ray from the pointer against the site map and ground grid,
//!   falling back to the y = 0 plane, then asks for a name.
//!
//! ### Site map
//! - **Activation**: configured path or `--site-map` on the command line
//! - Loads a glTF terrain, fits it to the strata footprint and applies
//!   visibility, opacity, position and scale edits.
//!
//! ### Text entry
//! - **Activation**: a borehole click, or `N`/`T`/`D` for the active layer
//! - Takes over the keyboard until Enter or Escape.

/// Borehole placement state machine, ray casting and markers.
pub mod borehole;

/// Status line and key help overlay.
pub mod hud;

/// Keyboard shortcuts and the commands they emit.
pub mod shortcuts;

/// Site map loading, fitting and transform application.
pub mod site_map;

/// Single-line text entry for borehole names and layer fields.
pub mod text_entry;

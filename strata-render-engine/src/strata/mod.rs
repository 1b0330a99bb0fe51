//! Procedural strata synthesis.
//!
//! `layout` turns the layer stack into pure vertical geometry, `depth_scale`
//! derives the tick positions of the depth axis, and `scene` combines both
//! with labels and markers into a disposable `SceneSubtree`. The systems in
//! `systems` rebuild that subtree whenever its inputs change.

pub mod depth_scale;
pub mod layout;
pub mod scene;
pub mod systems;

pub use depth_scale::{DepthTick, build_depth_scale, compute_depth_ticks};
pub use layout::{LayerSlot, StrataLayout, compute_layout, scale_factor};
pub use scene::layout_strata;

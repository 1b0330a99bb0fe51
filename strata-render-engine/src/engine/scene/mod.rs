//! Engine-agnostic scene descriptions and their Bevy materialization.
//!
//! Generators produce a `SceneSubtree` of plain nodes. `spawn` turns a
//! subtree into entities and owned assets, and `lifecycle` keeps one live
//! subtree per slot, disposing the old one on every swap.

/// Labels and badges that turn to face the camera every frame.
pub mod billboard;

/// Hex colour parsing with the neutral fallback.
pub mod color;

/// Background, fog, lights and the viewer camera.
pub mod environment;

/// Flat reference grid on the ground plane, shown or hidden with the display options.
pub mod grid;

/// Named subtree slots and the rebuild/dispose discipline.
pub mod lifecycle;

/// Spawning of subtrees into entities, meshes, materials and textures.
pub mod spawn;

/// Scene node tree produced by the generators.
pub mod subtree;

pub use lifecycle::{SceneObjects, SubtreeKind};
pub use subtree::{NodeShape, SceneNode, SceneSubtree};

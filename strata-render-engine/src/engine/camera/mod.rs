//! Viewer camera navigation and pointer ray construction.
//!
//! Provides a damped orbit/pan/zoom controller that placement tools can
//! switch off, plus the pure helpers that turn a pointer position into a
//! world-space ray and intersect it with planes and boxes.

/// Ray construction from pointer coordinates and ray intersection helpers.
pub mod ray;

/// Orbit camera resource and controller system for scene navigation.
pub mod viewport_camera;

pub use viewport_camera::{CameraInput, ViewportCamera, camera_controller};

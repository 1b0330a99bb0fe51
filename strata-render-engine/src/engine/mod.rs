pub mod camera;
pub mod core;
pub mod labels;
pub mod scene;

//! Editable records behind the strata viewer.
//!
//! Everything here is plain data with validation rules. Bevy resources wrap
//! the collections so change detection can drive scene rebuilds.

/// Borehole records and the registry that owns them.
pub mod borehole;

/// Strata footprint, view mode and vertical spacing settings.
pub mod dimensions;

/// Visibility toggles for every generated scene element.
pub mod display;

/// Soil layers and the ordered stack that edits them.
pub mod layer;

/// Placement, scale, visibility and opacity of the loaded site map.
pub mod site_map;

pub use borehole::{Borehole, BoreholeRegistry};
pub use dimensions::{StrataDimensions, StrataSettings, ViewMode};
pub use display::{DisplayOption, DisplayOptions};
pub use layer::{Layer, LayerEdit, LayerId, LayerStack};
pub use site_map::SiteMapTransform;

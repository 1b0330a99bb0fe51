/// Footprint size at which annotation geometry is drawn at its base size.
pub const BASE_DIMENSION_FOR_SCALING: f32 = 5.0;

/// Lower bound of the annotation scale factor for small footprints.
pub const MIN_STRATA_SCALE_FACTOR: f32 = 0.5;

/// World units per raster pixel for every billboard surface.
pub const BASE_SPRITE_SCALE_FACTOR: f32 = 0.012;

// Layer labels
pub const BASE_LABEL_FONT_SIZE: f32 = 18.0;
pub const BASE_LABEL_PADDING: f32 = 8.0;
pub const BASE_LABEL_MAX_WIDTH: f32 = 220.0;
pub const BASE_LABEL_BORDER_RADIUS: f32 = 4.0;
pub const LABEL_LINE_HEIGHT: f32 = 1.2;
pub const LABEL_FONT_SIZE_RANGE: (f32, f32) = (10.0, 50.0);
/// Background alpha applied to the layer colour behind label text.
pub const LABEL_BACKGROUND_ALPHA: f32 = 0.8;

// Numbered layer markers
pub const BASE_MARKER_RADIUS: f32 = 0.20;
pub const BASE_MARKER_TEXT_CANVAS_SIZE: f32 = 64.0;
pub const BASE_MARKER_FONT_SIZE: f32 = 30.0;
pub const MARKER_FONT_SIZE_RANGE: (f32, f32) = (10.0, 48.0);
pub const MARKER_GAP_FROM_EDGE: f32 = 0.4;
pub const MARKER_BADGE_COLOUR: &str = "#333333";

// Label placement relative to the strata edge
pub const ELEMENT_Z_OFFSET: f32 = 0.1;
pub const LINE_TO_ELEMENT_GAP: f32 = 0.1;
pub const LABEL_GAP_FROM_MARKER_OR_EDGE: f32 = 0.2;

// Depth scale
pub const BASE_DEPTH_LABEL_FONT_SIZE: f32 = 18.0;
pub const BASE_DEPTH_LABEL_PADDING: f32 = 4.0;
pub const BASE_DEPTH_MARKER_MAIN_LINE_OFFSET: f32 = 0.5;
pub const BASE_DEPTH_MARKER_TICK_LENGTH: f32 = 0.25;
pub const BASE_DEPTH_MARKER_TEXT_GAP: f32 = 0.08;
/// Absolute floor of the tolerance used before appending a closing depth tick.
pub const DEPTH_TICK_TOLERANCE: f32 = 0.01;
/// Relative part of the closing tick tolerance, proportional to the stack height.
pub const DEPTH_TICK_RELATIVE_TOLERANCE: f32 = 1.0e-5;

// Exploded view connectors
pub const CONNECTOR_COLOUR: &str = "#aaaaaa";
pub const CONNECTOR_OPACITY: f32 = 0.7;

// Borehole markers
pub const BOREHOLE_MARKER_RADIUS: f32 = 0.25;
pub const BOREHOLE_MARKER_HEIGHT: f32 = 1.5;
pub const BOREHOLE_LABEL_GAP: f32 = 0.2;
pub const BOREHOLE_LABEL_SCALE_FACTOR: f32 = 1.0;
pub const BOREHOLE_MARKER_COLOUR: &str = "#ff0000";
pub const BOREHOLE_LABEL_COLOUR: &str = "#cc0000";

/// Colour used whenever a layer colour string fails to parse.
pub const FALLBACK_LAYER_COLOUR: &str = "#CCCCCC";

/// Edge length of the square ground grid (feet).
pub const GROUND_GRID_SIZE: f32 = 100.0;

/// Number of cells along each side of the ground grid.
pub const GROUND_GRID_DIVISIONS: u32 = 50;

pub const GROUND_GRID_CENTRE_COLOUR: &str = "#888888";
pub const GROUND_GRID_LINE_COLOUR: &str = "#bbbbbb";

/// Viewport clear colour, also used for distance fog.
pub const BACKGROUND_COLOUR: &str = "#d1d5db";

pub const FOG_NEAR: f32 = GROUND_GRID_SIZE * 0.75;
pub const FOG_FAR: f32 = GROUND_GRID_SIZE * 2.5;

pub const CAMERA_FOV_DEGREES: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = GROUND_GRID_SIZE * 5.0;
pub const CAMERA_START_POSITION: [f32; 3] = [
    GROUND_GRID_SIZE / 3.0,
    GROUND_GRID_SIZE / 4.0,
    GROUND_GRID_SIZE / 3.0,
];

// Orbit controller limits
pub const CAMERA_MIN_DISTANCE: f32 = 1.0;
pub const CAMERA_MAX_DISTANCE: f32 = GROUND_GRID_SIZE * 2.0;
pub const CAMERA_DAMPING_FACTOR: f32 = 0.05;
pub const CAMERA_PAN_SPEED: f32 = 1.5;

/// Rays closer to parallel than this never hit the fallback ground plane.
pub const PLANE_PARALLEL_EPSILON: f32 = 1.0e-6;

// Lighting, in Bevy photometric units
pub const AMBIENT_BRIGHTNESS: f32 = 800.0;
pub const KEY_LIGHT_ILLUMINANCE: f32 = 12_000.0;
pub const BACK_LIGHT_ILLUMINANCE: f32 = 6_000.0;
pub const KEY_LIGHT_POSITION: [f32; 3] = [
    GROUND_GRID_SIZE / 2.0,
    GROUND_GRID_SIZE / 1.5,
    GROUND_GRID_SIZE / 2.0,
];
pub const BACK_LIGHT_POSITION: [f32; 3] = [
    -GROUND_GRID_SIZE / 2.0,
    GROUND_GRID_SIZE / 3.0,
    -GROUND_GRID_SIZE / 2.0,
];

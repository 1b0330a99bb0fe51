pub struct SoilType {
    pub name: &'static str,
    pub colour: &'static str,
    pub description: &'static str,
}

/// Palette cycled through when new layers are created.
pub const DEFAULT_SOIL_TYPES: &[SoilType] = &[
    SoilType {
        name: "Topsoil",
        colour: "#3b2e1e",
        description: "Dark, fertile surface layer with organic matter",
    },
    SoilType {
        name: "Clay Layer",
        colour: "#5e4b37",
        description: "Dense, water-retaining layer with fine particles",
    },
    SoilType {
        name: "Sandy Layer",
        colour: "#9b8569",
        description: "Loose, granular texture with good drainage",
    },
    SoilType {
        name: "Bedrock",
        colour: "#c4c4c4",
        description: "Solid rock layer beneath soil horizons",
    },
    SoilType {
        name: "Gravelly Soil",
        colour: "#a1917e",
        description: "Contains many small stones and pebbles",
    },
];

/// Upper bound on the number of layers in a profile.
pub const MAX_LAYERS: usize = 20;

/// Smallest depth (feet) a layer may take.
pub const MIN_LAYER_DEPTH: f32 = 0.1;

pub const FIRST_LAYER_DEPTH: f32 = 1.0;
pub const DEFAULT_LAYER_DEPTH: f32 = 2.0;

pub const DEFAULT_VERTICAL_SPACING: f32 = 0.5;
pub const DEFAULT_STRATA_WIDTH: f32 = 5.0;
pub const DEFAULT_STRATA_DEPTH: f32 = 5.0;

pub const DEFAULT_LAYER_COUNT: usize = 3;

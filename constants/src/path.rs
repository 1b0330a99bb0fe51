/// Viewer configuration, relative to the asset directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/viewer.json";

pub const WINDOW_TITLE: &str = "Strata Viewer";

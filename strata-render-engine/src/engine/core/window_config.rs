use bevy::prelude::*;
use bevy::window::PresentMode;
use constants::path::WINDOW_TITLE;

pub fn create_window_config() -> Window {
    Window {
        title: WINDOW_TITLE.into(),
        present_mode: PresentMode::AutoVsync,
        ..default()
    }
}

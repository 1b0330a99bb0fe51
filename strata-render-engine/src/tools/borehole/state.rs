use bevy::prelude::*;
use bevy::window::{PrimaryWindow, SystemCursorIcon};
use bevy::winit::cursor::CursorIcon;

use crate::engine::camera::ViewportCamera;

/// Borehole placement mode. `Placing` is single-shot: the next click, an
/// Escape press or a toggle always returns to `Idle`.
#[derive(States, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PlacementState {
    #[default]
    Idle,
    Placing,
}

/// Flip between `Idle` and `Placing`.
pub fn toggle_placement(current: &State<PlacementState>, next: &mut NextState<PlacementState>) {
    let target = match current.get() {
        PlacementState::Idle => PlacementState::Placing,
        PlacementState::Placing => PlacementState::Idle,
    };
    next.set(target);
}

fn set_cursor(
    commands: &mut Commands,
    windows: &Query<Entity, With<PrimaryWindow>>,
    icon: SystemCursorIcon,
) {
    if let Ok(window) = windows.single() {
        commands.entity(window).insert(CursorIcon::System(icon));
    }
}

/// Hand the pointer to placement: the orbit controller stops reacting and
/// the cursor becomes a crosshair.
pub fn enter_placement(
    mut commands: Commands,
    mut viewport_camera: ResMut<ViewportCamera>,
    windows: Query<Entity, With<PrimaryWindow>>,
) {
    viewport_camera.enabled = false;
    set_cursor(&mut commands, &windows, SystemCursorIcon::Crosshair);
    info!("Borehole placement started");
}

/// Runs on every way out of `Placing`.
pub fn exit_placement(
    mut commands: Commands,
    mut viewport_camera: ResMut<ViewportCamera>,
    windows: Query<Entity, With<PrimaryWindow>>,
) {
    viewport_camera.enabled = true;
    set_cursor(&mut commands, &windows, SystemCursorIcon::Default);
    info!("Borehole placement ended");
}

pub fn cancel_placement_on_escape(
    keys: Res<ButtonInput<KeyCode>>,
    mut next: ResMut<NextState<PlacementState>>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        debug!("Borehole placement cancelled");
        next.set(PlacementState::Idle);
    }
}

/// State transitions do not run once the app is exiting, so restore the
/// controller directly if placement is interrupted by shutdown.
pub fn restore_controller_on_exit(
    mut exit_events: EventReader<AppExit>,
    state: Res<State<PlacementState>>,
    mut viewport_camera: ResMut<ViewportCamera>,
) {
    if exit_events.read().next().is_none() {
        return;
    }
    if *state.get() == PlacementState::Placing {
        warn!("Exiting during borehole placement, re-enabling camera controller");
        viewport_camera.enabled = true;
    }
}

use bevy::prelude::*;

use crate::model::{BoreholeRegistry, LayerStack, StrataSettings, ViewMode};
use crate::tools::borehole::PlacementState;
use crate::tools::site_map::SiteMapSlot;
use crate::tools::text_entry::TextEntry;

const HUD_FONT_SIZE: f32 = 15.0;

const HELP_TEXT: &str = "E exploded | =/- add/remove layer | [/] select | Up/Down depth | \
N/T/D type name/description/depth | P colour | PgUp/PgDn spacing | Left/Right width | \
Home/End footprint depth | L M K C S G toggles | R reset | B place borehole | \
Del remove borehole | X remove map | V map visibility | ,/. map opacity | \
Shift+arrows/PgUp/PgDn move map | Shift+=/- scale map";

#[derive(Component)]
pub struct StatusText;

#[derive(Component)]
pub struct EntryText;

pub fn spawn_status_overlay(mut commands: Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: HUD_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::srgb(0.1, 0.1, 0.1)),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                StatusText,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: HUD_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::srgb(0.05, 0.05, 0.4)),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(36.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                EntryText,
            ));
            parent.spawn((
                Text::new(HELP_TEXT),
                TextFont {
                    font_size: HUD_FONT_SIZE * 0.8,
                    ..default()
                },
                TextColor(Color::srgb(0.25, 0.25, 0.25)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
            ));
        });
}

/// One-line summary of the profile and the current interaction mode.
pub fn status_line(
    stack: &LayerStack,
    settings: &StrataSettings,
    boreholes: usize,
    placing: bool,
    site_map: &SiteMapSlot,
) -> String {
    let view = match settings.view_mode {
        ViewMode::Normal => "normal",
        ViewMode::Exploded => "exploded",
    };
    let active = stack
        .active_layer()
        .map(|layer| format!("{} ({:.1} ft)", layer.name, layer.depth))
        .unwrap_or_else(|| "none".to_string());

    let mut line = format!(
        "Layers: {} | Total depth: {} ft | View: {} | Active: {} | Boreholes: {}",
        stack.len(),
        stack.total_profile_depth_label(),
        view,
        active,
        boreholes
    );
    if site_map.is_loading() {
        line.push_str(" | Loading site map...");
    } else if let Some(err) = site_map.last_error() {
        line.push_str(&format!(" | {err}"));
    }
    if placing {
        line.push_str(" | Click to place a borehole, Esc to cancel");
    }
    line
}

pub fn update_status_text(
    stack: Res<LayerStack>,
    settings: Res<StrataSettings>,
    registry: Res<BoreholeRegistry>,
    placement: Res<State<PlacementState>>,
    site_map: Res<SiteMapSlot>,
    mut text: Query<&mut Text, With<StatusText>>,
) {
    let Ok(mut text) = text.single_mut() else {
        return;
    };
    let line = status_line(
        &stack,
        &settings,
        registry.len(),
        *placement.get() == PlacementState::Placing,
        &site_map,
    );
    if text.0 != line {
        text.0 = line;
    }
}

/// Prompt and buffer of the open text entry, or nothing.
pub fn entry_line(entry: &TextEntry) -> String {
    match (entry.target(), entry.text()) {
        (Some(target), Some(text)) => {
            format!("{}: {}_   (Enter to confirm, Esc to cancel)", target.prompt(), text)
        }
        _ => String::new(),
    }
}

pub fn update_entry_text(entry: Res<TextEntry>, mut text: Query<&mut Text, With<EntryText>>) {
    if !entry.is_changed() {
        return;
    }
    let Ok(mut text) = text.single_mut() else {
        return;
    };
    text.0 = entry_line(&entry);
}

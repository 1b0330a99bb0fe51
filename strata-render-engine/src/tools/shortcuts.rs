use bevy::prelude::*;
use constants::soil::DEFAULT_SOIL_TYPES;

use crate::model::{
    BoreholeRegistry, DisplayOption, DisplayOptions, LayerEdit, LayerStack, SiteMapTransform,
    StrataSettings,
};
use crate::tools::borehole::{PlacementState, toggle_placement};
use crate::tools::site_map::SiteMapRequest;
use crate::tools::text_entry::{EntryTarget, TextEntry};

const DEPTH_STEP: f32 = 0.5;
const SPACING_STEP: f32 = 0.25;
const FOOTPRINT_STEP: f32 = 0.5;
const OPACITY_STEP: f32 = 0.1;
const SITE_MAP_STEP: f32 = 0.5;
const SITE_MAP_LIFT: f32 = 0.25;
const SITE_MAP_SCALE_STEP: f32 = 1.1;

/// Text field of the active layer that can be typed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerField {
    Name,
    Description,
    Depth,
}

/// Edits the viewer understands, whether they come from the keyboard or elsewhere.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum ViewerCommand {
    ToggleViewMode,
    AddLayer,
    RemoveActiveLayer,
    SelectNextLayer,
    SelectPreviousLayer,
    AdjustActiveDepth(f32),
    CycleActiveLayerColour,
    EditActiveLayer(LayerField),
    AdjustSpacing(f32),
    AdjustWidth(f32),
    AdjustFootprintDepth(f32),
    ToggleDisplay(DisplayOption),
    ResetDisplay,
    TogglePlacement,
    RemoveLastBorehole,
    RemoveSiteMap,
    ToggleSiteMap,
    AdjustSiteMapOpacity(f32),
    NudgeSiteMap(Vec3),
    /// Multiply the site map scale by this factor.
    ScaleSiteMap(f32),
}

const KEY_BINDINGS: &[(KeyCode, ViewerCommand)] = &[
    (KeyCode::KeyE, ViewerCommand::ToggleViewMode),
    (KeyCode::Equal, ViewerCommand::AddLayer),
    (KeyCode::Minus, ViewerCommand::RemoveActiveLayer),
    (KeyCode::BracketRight, ViewerCommand::SelectNextLayer),
    (KeyCode::BracketLeft, ViewerCommand::SelectPreviousLayer),
    (KeyCode::ArrowUp, ViewerCommand::AdjustActiveDepth(DEPTH_STEP)),
    (KeyCode::ArrowDown, ViewerCommand::AdjustActiveDepth(-DEPTH_STEP)),
    (KeyCode::KeyP, ViewerCommand::CycleActiveLayerColour),
    (KeyCode::KeyN, ViewerCommand::EditActiveLayer(LayerField::Name)),
    (KeyCode::KeyT, ViewerCommand::EditActiveLayer(LayerField::Description)),
    (KeyCode::KeyD, ViewerCommand::EditActiveLayer(LayerField::Depth)),
    (KeyCode::PageUp, ViewerCommand::AdjustSpacing(SPACING_STEP)),
    (KeyCode::PageDown, ViewerCommand::AdjustSpacing(-SPACING_STEP)),
    (KeyCode::ArrowRight, ViewerCommand::AdjustWidth(FOOTPRINT_STEP)),
    (KeyCode::ArrowLeft, ViewerCommand::AdjustWidth(-FOOTPRINT_STEP)),
    (KeyCode::Home, ViewerCommand::AdjustFootprintDepth(FOOTPRINT_STEP)),
    (KeyCode::End, ViewerCommand::AdjustFootprintDepth(-FOOTPRINT_STEP)),
    (KeyCode::KeyL, ViewerCommand::ToggleDisplay(DisplayOption::Labels)),
    (KeyCode::KeyM, ViewerCommand::ToggleDisplay(DisplayOption::Markers)),
    (KeyCode::KeyK, ViewerCommand::ToggleDisplay(DisplayOption::DepthMarkers)),
    (KeyCode::KeyC, ViewerCommand::ToggleDisplay(DisplayOption::Connectors)),
    (KeyCode::KeyS, ViewerCommand::ToggleDisplay(DisplayOption::Strata)),
    (KeyCode::KeyG, ViewerCommand::ToggleDisplay(DisplayOption::GroundGrid)),
    (KeyCode::KeyR, ViewerCommand::ResetDisplay),
    (KeyCode::KeyB, ViewerCommand::TogglePlacement),
    (KeyCode::Delete, ViewerCommand::RemoveLastBorehole),
    (KeyCode::KeyX, ViewerCommand::RemoveSiteMap),
    (KeyCode::KeyV, ViewerCommand::ToggleSiteMap),
    (KeyCode::Comma, ViewerCommand::AdjustSiteMapOpacity(-OPACITY_STEP)),
    (KeyCode::Period, ViewerCommand::AdjustSiteMapOpacity(OPACITY_STEP)),
];

/// Bindings while Shift is held. They move and scale the site map.
const SHIFT_KEY_BINDINGS: &[(KeyCode, ViewerCommand)] = &[
    (KeyCode::ArrowLeft, ViewerCommand::NudgeSiteMap(Vec3::new(-SITE_MAP_STEP, 0.0, 0.0))),
    (KeyCode::ArrowRight, ViewerCommand::NudgeSiteMap(Vec3::new(SITE_MAP_STEP, 0.0, 0.0))),
    (KeyCode::ArrowUp, ViewerCommand::NudgeSiteMap(Vec3::new(0.0, 0.0, -SITE_MAP_STEP))),
    (KeyCode::ArrowDown, ViewerCommand::NudgeSiteMap(Vec3::new(0.0, 0.0, SITE_MAP_STEP))),
    (KeyCode::PageUp, ViewerCommand::NudgeSiteMap(Vec3::new(0.0, SITE_MAP_LIFT, 0.0))),
    (KeyCode::PageDown, ViewerCommand::NudgeSiteMap(Vec3::new(0.0, -SITE_MAP_LIFT, 0.0))),
    (KeyCode::Equal, ViewerCommand::ScaleSiteMap(SITE_MAP_SCALE_STEP)),
    (KeyCode::Minus, ViewerCommand::ScaleSiteMap(1.0 / SITE_MAP_SCALE_STEP)),
];

/// Map key presses to viewer commands. Silent while the text entry is open.
pub fn handle_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    text_entry: Res<TextEntry>,
    mut commands: EventWriter<ViewerCommand>,
) {
    if text_entry.is_active() {
        return;
    }
    let bindings = if keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) {
        SHIFT_KEY_BINDINGS
    } else {
        KEY_BINDINGS
    };
    for (key, command) in bindings {
        if keyboard.just_pressed(*key) {
            commands.write(*command);
        }
    }
}

/// Palette colour following `current`, or the first one for custom colours.
pub fn next_palette_colour(current: &str) -> &'static str {
    let next = DEFAULT_SOIL_TYPES
        .iter()
        .position(|soil| soil.colour.eq_ignore_ascii_case(current))
        .map_or(0, |index| (index + 1) % DEFAULT_SOIL_TYPES.len());
    DEFAULT_SOIL_TYPES[next].colour
}

/// Apply queued commands to the viewer resources. Resources are only
/// borrowed mutably when a command actually changes them, so rebuilds are
/// not triggered by no-op presses.
#[allow(clippy::too_many_arguments)]
pub fn apply_viewer_commands(
    mut events: EventReader<ViewerCommand>,
    mut stack: ResMut<LayerStack>,
    mut settings: ResMut<StrataSettings>,
    mut display: ResMut<DisplayOptions>,
    mut registry: ResMut<BoreholeRegistry>,
    mut site_map: ResMut<SiteMapTransform>,
    mut site_map_requests: EventWriter<SiteMapRequest>,
    mut text_entry: ResMut<TextEntry>,
    placement: Res<State<PlacementState>>,
    mut next_placement: ResMut<NextState<PlacementState>>,
) {
    for command in events.read() {
        debug!("Viewer command {:?}", command);
        match *command {
            ViewerCommand::ToggleViewMode => {
                settings.view_mode = settings.view_mode.toggled();
                info!("View mode: {:?}", settings.view_mode);
            }
            ViewerCommand::AddLayer => {
                stack.add_layer();
            }
            ViewerCommand::RemoveActiveLayer => {
                if !stack.is_empty() {
                    let index = stack.active_index();
                    stack.remove_layer(index);
                }
            }
            ViewerCommand::SelectNextLayer => {
                let next = stack.active_index() + 1;
                if next < stack.len() {
                    stack.set_active(next);
                }
            }
            ViewerCommand::SelectPreviousLayer => {
                if let Some(previous) = stack.active_index().checked_sub(1) {
                    stack.set_active(previous);
                }
            }
            ViewerCommand::AdjustActiveDepth(delta) => {
                if let Some(depth) = stack.active_layer().map(|layer| layer.depth) {
                    let index = stack.active_index();
                    stack.update_layer(index, LayerEdit::Depth(depth + delta));
                }
            }
            ViewerCommand::CycleActiveLayerColour => {
                let colour = stack
                    .active_layer()
                    .map(|layer| next_palette_colour(&layer.color));
                if let Some(colour) = colour {
                    let index = stack.active_index();
                    stack.update_layer(index, LayerEdit::Color(colour.to_string()));
                }
            }
            ViewerCommand::EditActiveLayer(field) => {
                let index = stack.active_index();
                if let Some(layer) = stack.active_layer() {
                    let (target, initial) = match field {
                        LayerField::Name => (EntryTarget::LayerName(index), layer.name.clone()),
                        LayerField::Description => {
                            (EntryTarget::LayerDescription(index), layer.description.clone())
                        }
                        LayerField::Depth => {
                            (EntryTarget::LayerDepth(index), layer.depth.to_string())
                        }
                    };
                    text_entry.open(target, initial);
                }
            }
            ViewerCommand::AdjustSpacing(delta) => {
                let spacing = settings.vertical_spacing() + delta;
                if !settings.bypass_change_detection().set_vertical_spacing(spacing) {
                    warn!("Vertical spacing must stay positive, ignoring {:.2}", spacing);
                } else {
                    settings.set_changed();
                }
            }
            ViewerCommand::AdjustWidth(delta) => {
                let width = settings.dimensions.width + delta;
                if !settings.bypass_change_detection().dimensions.set_width(width) {
                    warn!("Strata width must stay positive, ignoring {:.2}", width);
                } else {
                    settings.set_changed();
                }
            }
            ViewerCommand::AdjustFootprintDepth(delta) => {
                let depth = settings.dimensions.depth + delta;
                if !settings.bypass_change_detection().dimensions.set_depth(depth) {
                    warn!("Strata depth must stay positive, ignoring {:.2}", depth);
                } else {
                    settings.set_changed();
                }
            }
            ViewerCommand::ToggleDisplay(option) => {
                let shown = display.toggle(option);
                info!("{:?} {}", option, if shown { "shown" } else { "hidden" });
            }
            ViewerCommand::ResetDisplay => {
                if *display != DisplayOptions::default() {
                    display.reset();
                }
            }
            ViewerCommand::TogglePlacement => {
                toggle_placement(&placement, &mut next_placement);
            }
            ViewerCommand::RemoveLastBorehole => {
                if let Some(id) = registry.boreholes().last().map(|borehole| borehole.id) {
                    registry.remove(id);
                }
            }
            ViewerCommand::RemoveSiteMap => {
                site_map_requests.write(SiteMapRequest::Remove);
            }
            ViewerCommand::ToggleSiteMap => {
                site_map.visible = !site_map.visible;
            }
            ViewerCommand::AdjustSiteMapOpacity(delta) => {
                let opacity = site_map.opacity() + delta;
                site_map.set_opacity(opacity);
            }
            ViewerCommand::NudgeSiteMap(offset) => {
                let position = site_map.position + offset;
                site_map.set_position(position);
            }
            ViewerCommand::ScaleSiteMap(factor) => {
                let scale = site_map.scale * factor;
                if !site_map.set_scale(scale) {
                    warn!("Site map scale must stay positive, ignoring {}", scale);
                }
            }
        }
    }
}

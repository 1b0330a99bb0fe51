use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;

use crate::model::{BoreholeRegistry, LayerEdit, LayerStack};
use crate::tools::borehole::normalize_name;

const MAX_ENTRY_CHARS: usize = 48;

/// What a finished entry is written to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryTarget {
    BoreholeName(Vec3),
    LayerName(usize),
    LayerDescription(usize),
    LayerDepth(usize),
}

impl EntryTarget {
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::BoreholeName(_) => "Borehole name",
            Self::LayerName(_) => "Layer name",
            Self::LayerDescription(_) => "Layer description",
            Self::LayerDepth(_) => "Layer depth (ft)",
        }
    }
}

/// Finished entry. `text` is `None` when the entry was cancelled.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct TextEntrySubmitted {
    pub target: EntryTarget,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryOutcome {
    Editing,
    Submitted(TextEntrySubmitted),
}

#[derive(Debug)]
struct ActiveEntry {
    target: EntryTarget,
    buffer: String,
}

/// Single-line text field shown in the overlay. While it is open, the
/// keyboard belongs to it and shortcuts are suspended.
#[derive(Resource, Debug, Default)]
pub struct TextEntry {
    active: Option<ActiveEntry>,
}

impl TextEntry {
    /// Start editing `initial` for `target`, replacing any open entry.
    pub fn open(&mut self, target: EntryTarget, initial: impl Into<String>) {
        let mut buffer: String = initial.into();
        buffer.truncate(
            buffer
                .char_indices()
                .nth(MAX_ENTRY_CHARS)
                .map_or(buffer.len(), |(i, _)| i),
        );
        self.active = Some(ActiveEntry { target, buffer });
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn target(&self) -> Option<EntryTarget> {
        self.active.as_ref().map(|entry| entry.target)
    }

    pub fn text(&self) -> Option<&str> {
        self.active.as_ref().map(|entry| entry.buffer.as_str())
    }

    /// Feed one pressed key. Enter submits, Escape cancels.
    pub fn apply_key(&mut self, key: &Key) -> EntryOutcome {
        let Some(entry) = self.active.as_mut() else {
            return EntryOutcome::Editing;
        };
        match key {
            Key::Enter => {
                let entry = self.active.take();
                return entry.map_or(EntryOutcome::Editing, |entry| {
                    EntryOutcome::Submitted(TextEntrySubmitted {
                        target: entry.target,
                        text: Some(entry.buffer),
                    })
                });
            }
            Key::Escape => {
                let target = entry.target;
                self.active = None;
                return EntryOutcome::Submitted(TextEntrySubmitted { target, text: None });
            }
            Key::Backspace => {
                entry.buffer.pop();
            }
            Key::Space => push_chars(&mut entry.buffer, " "),
            Key::Character(chars) => push_chars(&mut entry.buffer, chars),
            _ => {}
        }
        EntryOutcome::Editing
    }
}

fn push_chars(buffer: &mut String, chars: &str) {
    for c in chars.chars().filter(|c| !c.is_control()) {
        if buffer.chars().count() >= MAX_ENTRY_CHARS {
            return;
        }
        buffer.push(c);
    }
}

pub fn capture_text_entry(
    mut keys: EventReader<KeyboardInput>,
    mut entry: ResMut<TextEntry>,
    mut submitted: EventWriter<TextEntrySubmitted>,
) {
    if !entry.is_active() {
        keys.clear();
        return;
    }
    for key in keys.read() {
        if key.state != ButtonState::Pressed {
            continue;
        }
        if let EntryOutcome::Submitted(event) = entry.apply_key(&key.logical_key) {
            submitted.write(event);
            break;
        }
    }
}

/// Write finished entries to the borehole registry or the layer stack.
pub fn apply_text_entry(
    mut submitted: EventReader<TextEntrySubmitted>,
    mut registry: ResMut<BoreholeRegistry>,
    mut stack: ResMut<LayerStack>,
) {
    for TextEntrySubmitted { target, text } in submitted.read() {
        let Some(text) = text.clone() else {
            info!("{} entry cancelled", target.prompt());
            continue;
        };
        match *target {
            EntryTarget::BoreholeName(point) => match normalize_name(Some(text)) {
                Some(name) => {
                    registry.add(&name, point);
                }
                None => info!("Borehole placement cancelled: no name given"),
            },
            EntryTarget::LayerName(index) => {
                stack.update_layer(index, LayerEdit::Name(text.trim().to_string()));
            }
            EntryTarget::LayerDescription(index) => {
                stack.update_layer(index, LayerEdit::Description(text.trim().to_string()));
            }
            EntryTarget::LayerDepth(index) => {
                stack.update_layer(index, LayerEdit::DepthText(text));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(entry: &mut TextEntry, text: &str) {
        for c in text.chars() {
            let key = if c == ' ' {
                Key::Space
            } else {
                Key::Character(c.to_string().as_str().into())
            };
            assert_eq!(entry.apply_key(&key), EntryOutcome::Editing);
        }
    }

    #[test]
    fn typing_edits_prefilled_buffer() {
        let mut entry = TextEntry::default();
        entry.open(EntryTarget::BoreholeName(Vec3::ZERO), "BH-3");
        entry.apply_key(&Key::Backspace);
        typed(&mut entry, "4 north");
        assert_eq!(entry.text(), Some("BH-4 north"));

        let outcome = entry.apply_key(&Key::Enter);
        assert_eq!(
            outcome,
            EntryOutcome::Submitted(TextEntrySubmitted {
                target: EntryTarget::BoreholeName(Vec3::ZERO),
                text: Some("BH-4 north".into()),
            })
        );
        assert!(!entry.is_active());
    }

    #[test]
    fn escape_cancels_and_closed_entry_ignores_keys() {
        let mut entry = TextEntry::default();
        entry.open(EntryTarget::LayerName(1), "Clay");
        let EntryOutcome::Submitted(event) = entry.apply_key(&Key::Escape) else {
            panic!("escape must close the entry");
        };
        assert_eq!(event.text, None);
        assert_eq!(entry.apply_key(&Key::Enter), EntryOutcome::Editing);
    }

    #[test]
    fn buffer_length_is_bounded() {
        let mut entry = TextEntry::default();
        entry.open(EntryTarget::LayerDescription(0), "x".repeat(60));
        assert_eq!(entry.text().map(|t| t.chars().count()), Some(MAX_ENTRY_CHARS));
        typed(&mut entry, "y");
        assert_eq!(entry.text().map(|t| t.chars().count()), Some(MAX_ENTRY_CHARS));
    }

    fn app() -> App {
        let mut app = App::new();
        app.insert_resource(LayerStack::with_layer_count(2))
            .init_resource::<BoreholeRegistry>()
            .add_event::<TextEntrySubmitted>()
            .add_systems(Update, apply_text_entry);
        app
    }

    #[test]
    fn blank_borehole_name_records_nothing() {
        let mut app = app();
        let point = Vec3::new(3.2, 0.0, -1.1);
        app.world_mut().send_event(TextEntrySubmitted {
            target: EntryTarget::BoreholeName(point),
            text: Some("   ".into()),
        });
        app.world_mut().send_event(TextEntrySubmitted {
            target: EntryTarget::BoreholeName(point),
            text: None,
        });
        app.update();
        assert!(app.world().resource::<BoreholeRegistry>().is_empty());

        app.world_mut().send_event(TextEntrySubmitted {
            target: EntryTarget::BoreholeName(point),
            text: Some(" North pit ".into()),
        });
        app.update();
        let registry = app.world().resource::<BoreholeRegistry>();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.boreholes()[0].name, "North pit");
    }

    #[test]
    fn layer_entries_edit_the_stack() {
        let mut app = app();
        app.world_mut().send_event(TextEntrySubmitted {
            target: EntryTarget::LayerName(1),
            text: Some("Silt".into()),
        });
        app.world_mut().send_event(TextEntrySubmitted {
            target: EntryTarget::LayerDepth(1),
            text: Some("0.02".into()),
        });
        app.update();
        let layer = &app.world().resource::<LayerStack>().layers()[1];
        assert_eq!(layer.name, "Silt");
        assert_eq!(layer.depth, 0.1);
    }
}

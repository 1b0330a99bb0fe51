use bevy::prelude::*;

/// Source of the human-readable name for a new borehole. Returning `None`
/// (or a blank string) cancels the placement.
pub trait NamePrompt: Send + Sync {
    fn request_name(&self, suggested: &str) -> Option<String>;
}

/// Accepts the suggested `BH-n` name without asking.
pub struct AcceptSuggestedName;

impl NamePrompt for AcceptSuggestedName {
    fn request_name(&self, suggested: &str) -> Option<String> {
        Some(suggested.to_string())
    }
}

/// How the placement click handler obtains a name.
#[derive(Resource)]
pub enum BoreholeNamePrompt {
    /// Open the on-screen text entry prefilled with the suggested name.
    TextEntry,
    /// Answer on the spot, without user input.
    Immediate(Box<dyn NamePrompt>),
}

impl BoreholeNamePrompt {
    pub fn immediate(prompt: impl NamePrompt + 'static) -> Self {
        Self::Immediate(Box::new(prompt))
    }
}

impl Default for BoreholeNamePrompt {
    fn default() -> Self {
        Self::TextEntry
    }
}

/// Trim an answer. Blank answers count as cancelled.
pub fn normalize_name(name: Option<String>) -> Option<String> {
    let name = name?;
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<&'static str>);

    impl NamePrompt for Fixed {
        fn request_name(&self, _suggested: &str) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    #[test]
    fn blank_and_cancelled_names_abort() {
        let ask = |prompt: &dyn NamePrompt| normalize_name(prompt.request_name("BH-1"));
        assert_eq!(ask(&Fixed(None)), None);
        assert_eq!(ask(&Fixed(Some("   "))), None);
        assert_eq!(ask(&Fixed(Some("  North pit "))), Some("North pit".to_string()));
        assert_eq!(ask(&AcceptSuggestedName), Some("BH-1".to_string()));
    }

    #[test]
    fn interactive_entry_is_the_default() {
        assert!(matches!(
            BoreholeNamePrompt::default(),
            BoreholeNamePrompt::TextEntry
        ));
        assert!(matches!(
            BoreholeNamePrompt::immediate(AcceptSuggestedName),
            BoreholeNamePrompt::Immediate(_)
        ));
    }
}

//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to pager actions in Viewing mode.
///
/// Defaults follow `less`. Prompt modes consume their own keys and never
/// consult these bindings.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Terminals disagree on whether shifted characters such as `G` or `?`
    /// carry the SHIFT modifier, so character keys are also tried without it.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        let key = KeyEvent::new(key.code, key.modifiers);
        if let Some(action) = self.bindings.get(&key) {
            return Some(*action);
        }
        match key.code {
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::SHIFT) => {
                let unshifted = KeyEvent::new(key.code, key.modifiers - KeyModifiers::SHIFT);
                self.bindings.get(&unshifted).copied()
            }
            _ => None,
        }
    }

    /// Bind `key` to `action`, replacing any previous binding.
    pub fn insert(&mut self, key: KeyEvent, action: KeyAction) {
        self.bindings.insert(key, action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        let mut bind = |code: KeyCode, action: KeyAction| {
            bindings.insert(KeyEvent::new(code, KeyModifiers::NONE), action);
        };

        // Line scrolling
        bind(KeyCode::Char('j'), KeyAction::ScrollDown);
        bind(KeyCode::Down, KeyAction::ScrollDown);
        bind(KeyCode::Enter, KeyAction::ScrollDown);
        bind(KeyCode::Char('k'), KeyAction::ScrollUp);
        bind(KeyCode::Up, KeyAction::ScrollUp);

        // Page navigation
        bind(KeyCode::Char(' '), KeyAction::PageDown);
        bind(KeyCode::Char('f'), KeyAction::PageDown);
        bind(KeyCode::PageDown, KeyAction::PageDown);
        bind(KeyCode::Char('b'), KeyAction::PageUp);
        bind(KeyCode::PageUp, KeyAction::PageUp);

        bind(KeyCode::Char('<'), KeyAction::ScrollToTop);
        bind(KeyCode::Home, KeyAction::ScrollToTop);
        bind(KeyCode::Char('>'), KeyAction::ScrollToBottom);
        bind(KeyCode::Char('G'), KeyAction::ScrollToBottom);
        bind(KeyCode::End, KeyAction::ScrollToBottom);

        // Horizontal scrolling
        bind(KeyCode::Left, KeyAction::ScrollLeft);
        bind(KeyCode::Right, KeyAction::ScrollRight);

        // Search
        bind(KeyCode::Char('/'), KeyAction::StartSearchForward);
        bind(KeyCode::Char('?'), KeyAction::StartSearchBackward);
        bind(KeyCode::Char('n'), KeyAction::NextMatch);
        bind(KeyCode::Char('N'), KeyAction::PrevMatch);

        bind(KeyCode::Char('g'), KeyAction::GotoLine);
        bind(KeyCode::Char(':'), KeyAction::GotoLine);

        // Display toggles
        bind(KeyCode::Char('w'), KeyAction::ToggleWrap);
        bind(KeyCode::Char('#'), KeyAction::ToggleLineNumbers);
        bind(KeyCode::Char('='), KeyAction::ToggleStatusBar);

        // Application controls
        bind(KeyCode::Char('q'), KeyAction::Quit);

        bindings.insert(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            KeyAction::Quit,
        );

        Self { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn default_bindings_map_lowercase_w_to_toggle_wrap() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(key(KeyCode::Char('w'), KeyModifiers::NONE)),
            Some(KeyAction::ToggleWrap),
        );
    }

    #[test]
    fn shifted_characters_match_with_or_without_shift_modifier() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(key(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(KeyAction::ScrollToBottom)
        );
        assert_eq!(
            bindings.get(key(KeyCode::Char('G'), KeyModifiers::NONE)),
            Some(KeyAction::ScrollToBottom)
        );
        assert_eq!(
            bindings.get(key(KeyCode::Char('?'), KeyModifiers::SHIFT)),
            Some(KeyAction::StartSearchBackward)
        );
    }

    #[test]
    fn search_navigation_bindings() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(key(KeyCode::Char('n'), KeyModifiers::NONE)),
            Some(KeyAction::NextMatch)
        );
        assert_eq!(
            bindings.get(key(KeyCode::Char('N'), KeyModifiers::SHIFT)),
            Some(KeyAction::PrevMatch)
        );
    }

    #[test]
    fn control_modified_letters_do_not_fall_back_to_plain_letters() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.get(key(KeyCode::Char('j'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
    }

    #[test]
    fn insert_overrides_default() {
        let mut bindings = KeyBindings::default();
        bindings.insert(key(KeyCode::Char('q'), KeyModifiers::NONE), KeyAction::ScrollDown);
        assert_eq!(
            bindings.get(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(KeyAction::ScrollDown)
        );
    }
}

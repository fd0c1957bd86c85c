//! Keyboard input handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::Panel;
use crate::keymap::map_key;

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Press a keypad button
    Button(&'static str),
    /// Show or hide the history panel
    ToggleHistory,
    /// Show or hide the theme panel
    ToggleThemes,
    /// Empty the history
    ClearHistory,
    /// Move the theme cursor up
    SelectPrevious,
    /// Move the theme cursor down
    SelectNext,
    /// Apply the theme under the cursor
    Confirm,
    /// Close the open panel
    Close,
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action given the open panel
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent, panel: Panel) -> KeyAction {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        // Panel keys shadow calculator keys
        match (panel, code) {
            (Panel::Themes, KeyCode::Up) => return KeyAction::SelectPrevious,
            (Panel::Themes, KeyCode::Down) => return KeyAction::SelectNext,
            (Panel::Themes, KeyCode::Enter) => return KeyAction::Confirm,
            (Panel::History, KeyCode::Char('c')) => return KeyAction::ClearHistory,
            (Panel::History | Panel::Themes, KeyCode::Esc) => return KeyAction::Close,
            _ => {}
        }

        match code {
            KeyCode::Char('h') => KeyAction::ToggleHistory,
            KeyCode::Char('t') => KeyAction::ToggleThemes,
            KeyCode::Char('q') => KeyAction::Quit,
            KeyCode::Char(c) => Self::button(&c.to_string()),
            KeyCode::Enter => Self::button("Enter"),
            KeyCode::Backspace => Self::button("Backspace"),
            KeyCode::Esc => Self::button("Escape"),
            _ => KeyAction::None,
        }
    }

    fn button(key: &str) -> KeyAction {
        map_key(key).map_or(KeyAction::None, KeyAction::Button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_event_ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    fn on_keypad(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key(key_event(code), Panel::Keypad)
    }

    // ===== Calculator key tests =====

    #[test]
    fn test_handle_digit_keys() {
        for c in '0'..='9' {
            let action = on_keypad(KeyCode::Char(c));
            assert!(matches!(action, KeyAction::Button(label) if label == c.to_string()));
        }
    }

    #[test]
    fn test_handle_operator_keys() {
        assert_eq!(on_keypad(KeyCode::Char('+')), KeyAction::Button("+"));
        assert_eq!(on_keypad(KeyCode::Char('-')), KeyAction::Button("−"));
        assert_eq!(on_keypad(KeyCode::Char('*')), KeyAction::Button("×"));
        assert_eq!(on_keypad(KeyCode::Char('/')), KeyAction::Button("÷"));
        assert_eq!(on_keypad(KeyCode::Char('%')), KeyAction::Button("%"));
    }

    #[test]
    fn test_handle_named_keys() {
        assert_eq!(on_keypad(KeyCode::Enter), KeyAction::Button("="));
        assert_eq!(on_keypad(KeyCode::Char('=')), KeyAction::Button("="));
        assert_eq!(on_keypad(KeyCode::Backspace), KeyAction::Button("⌫"));
        assert_eq!(on_keypad(KeyCode::Esc), KeyAction::Button("AC"));
        assert_eq!(on_keypad(KeyCode::Char('.')), KeyAction::Button("."));
    }

    #[test]
    fn test_handle_unknown_key() {
        assert_eq!(on_keypad(KeyCode::F(1)), KeyAction::None);
        assert_eq!(on_keypad(KeyCode::Tab), KeyAction::None);
        assert_eq!(on_keypad(KeyCode::Char('x')), KeyAction::None);
    }

    // ===== Panel key tests =====

    #[test]
    fn test_handle_panel_toggles() {
        assert_eq!(on_keypad(KeyCode::Char('h')), KeyAction::ToggleHistory);
        assert_eq!(on_keypad(KeyCode::Char('t')), KeyAction::ToggleThemes);
    }

    #[test]
    fn test_theme_panel_navigation() {
        let handler = InputHandler::new();
        let keys = [
            (KeyCode::Up, KeyAction::SelectPrevious),
            (KeyCode::Down, KeyAction::SelectNext),
            (KeyCode::Enter, KeyAction::Confirm),
            (KeyCode::Esc, KeyAction::Close),
        ];
        for (code, expected) in keys {
            assert_eq!(handler.handle_key(key_event(code), Panel::Themes), expected);
        }
    }

    #[test]
    fn test_arrows_ignored_outside_theme_panel() {
        assert_eq!(on_keypad(KeyCode::Up), KeyAction::None);
        assert_eq!(on_keypad(KeyCode::Down), KeyAction::None);
    }

    #[test]
    fn test_history_panel_clear() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('c')), Panel::History),
            KeyAction::ClearHistory
        );
        assert_eq!(on_keypad(KeyCode::Char('c')), KeyAction::None);
    }

    #[test]
    fn test_calculator_keys_pass_through_panels() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('7')), Panel::History),
            KeyAction::Button("7")
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Enter), Panel::History),
            KeyAction::Button("=")
        );
    }

    // ===== Quit tests =====

    #[test]
    fn test_handle_quit() {
        let handler = InputHandler::new();
        assert_eq!(on_keypad(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('c')), Panel::Themes),
            KeyAction::Quit
        );
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('x')), Panel::Keypad),
            KeyAction::None
        );
    }
}

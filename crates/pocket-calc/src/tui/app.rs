//! TUI application state

use tracing::{debug, info};

use super::input::KeyAction;
use crate::core::Calculator;
use crate::keypad::Keypad;
use crate::storage::Persistence;
use crate::theme::Theme;

/// Overlay shown on top of the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    /// No overlay
    #[default]
    Keypad,
    /// Calculation history
    History,
    /// Theme picker
    Themes,
}

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    calculator: Calculator,
    keypad: Keypad,
    panel: Panel,
    theme: &'static Theme,
    theme_cursor: usize,
    persistence: Persistence,
    /// Label of the last pressed button, highlighted until the next key
    pressed: Option<&'static str>,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates an app with in-memory persistence and the default theme
    #[must_use]
    pub fn new() -> Self {
        Self::with_persistence(Persistence::in_memory(), Theme::default_theme())
    }

    /// Creates an app whose history and theme come from `persistence`
    #[must_use]
    pub fn with_persistence(persistence: Persistence, fallback_theme: &'static Theme) -> Self {
        let history = persistence.load_history();
        let theme = persistence.load_theme_or(fallback_theme);
        info!(entries = history.len(), theme = theme.id, "calculator ready");
        Self {
            calculator: Calculator::with_history(history),
            keypad: Keypad::new(),
            panel: Panel::Keypad,
            theme,
            theme_cursor: theme.index(),
            persistence,
            pressed: None,
            should_quit: false,
        }
    }

    /// Sets the thousands separator
    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.calculator = self.calculator.with_separator(separator);
        self
    }

    /// Returns the calculator engine
    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Returns the keypad layout
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the open panel
    #[must_use]
    pub fn panel(&self) -> Panel {
        self.panel
    }

    /// Returns the active theme
    #[must_use]
    pub fn theme(&self) -> &'static Theme {
        self.theme
    }

    /// Returns the theme picker cursor
    #[must_use]
    pub fn theme_cursor(&self) -> usize {
        self.theme_cursor
    }

    /// Returns the label of the last pressed button
    #[must_use]
    pub fn pressed(&self) -> Option<&'static str> {
        self.pressed
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Applies a key action
    pub fn handle_action(&mut self, action: KeyAction) {
        if !matches!(action, KeyAction::Button(_)) {
            self.pressed = None;
        }
        match action {
            KeyAction::Button(label) => self.press(label),
            KeyAction::ToggleHistory => self.toggle_history(),
            KeyAction::ToggleThemes => self.toggle_themes(),
            KeyAction::ClearHistory => self.clear_history(),
            KeyAction::SelectPrevious => self.select_previous(),
            KeyAction::SelectNext => self.select_next(),
            KeyAction::Confirm => self.confirm_theme(),
            KeyAction::Close => self.close_panel(),
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// Presses the keypad button with this label
    pub fn press(&mut self, label: &'static str) {
        let Some(kind) = self.keypad.kind_of(label) else {
            debug!(label, "no such keypad button");
            return;
        };
        self.pressed = Some(label);
        if self.calculator.submit(label, kind) {
            self.save();
        }
    }

    /// Presses the button at a keypad index, e.g. from a mouse click
    pub fn click(&mut self, index: usize) {
        if let Some(button) = self.keypad.get(index) {
            let label = button.label;
            self.press(label);
        }
    }

    /// Shows or hides the history panel
    pub fn toggle_history(&mut self) {
        self.panel = if self.panel == Panel::History {
            Panel::Keypad
        } else {
            Panel::History
        };
    }

    /// Shows or hides the theme panel
    pub fn toggle_themes(&mut self) {
        if self.panel == Panel::Themes {
            self.panel = Panel::Keypad;
        } else {
            self.theme_cursor = self.theme.index();
            self.panel = Panel::Themes;
        }
    }

    /// Closes whichever panel is open
    pub fn close_panel(&mut self) {
        self.panel = Panel::Keypad;
    }

    /// Empties the history and saves
    pub fn clear_history(&mut self) {
        self.calculator.clear_history();
        self.save();
    }

    /// Moves the theme cursor up, wrapping
    pub fn select_previous(&mut self) {
        let count = Theme::all().len();
        self.theme_cursor = (self.theme_cursor + count - 1) % count;
    }

    /// Moves the theme cursor down, wrapping
    pub fn select_next(&mut self) {
        self.theme_cursor = (self.theme_cursor + 1) % Theme::all().len();
    }

    /// Applies the theme under the cursor and closes the panel
    pub fn confirm_theme(&mut self) {
        self.select_theme(self.theme_cursor);
        self.panel = Panel::Keypad;
    }

    /// Switches to the theme at `index`; out of range is ignored
    pub fn select_theme(&mut self, index: usize) {
        let Some(theme) = Theme::all().get(index) else {
            return;
        };
        if theme.id != self.theme.id {
            info!(theme = theme.id, "theme changed");
            self.theme = theme;
            self.theme_cursor = index;
            self.save();
        }
    }

    fn save(&mut self) {
        self.persistence.save(self.calculator.history(), self.theme);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, HISTORY_KEY};

    fn press_all(app: &mut CalculatorApp, labels: &[&'static str]) {
        for &label in labels {
            app.press(label);
        }
    }

    // ===== Constructor tests =====

    #[test]
    fn test_app_new() {
        let app = CalculatorApp::new();
        assert_eq!(app.calculator().display(), "0");
        assert_eq!(app.panel(), Panel::Keypad);
        assert_eq!(app.theme().id, "cosmic-beach");
        assert!(app.pressed().is_none());
        assert!(!app.should_quit());
    }

    #[test]
    fn test_app_default() {
        let app = CalculatorApp::default();
        assert!(app.calculator().history().is_empty());
    }

    #[test]
    fn test_app_uses_fallback_theme() {
        let fallback = Theme::find("sunset-glow").unwrap();
        let app = CalculatorApp::with_persistence(Persistence::in_memory(), fallback);
        assert_eq!(app.theme().id, "sunset-glow");
        assert_eq!(app.theme_cursor(), 2);
    }

    // ===== Button tests =====

    #[test]
    fn test_press_computes() {
        let mut app = CalculatorApp::new();
        press_all(&mut app, &["7", "+", "3", "="]);
        assert_eq!(app.calculator().display(), "10");
        assert_eq!(app.pressed(), Some("="));
    }

    #[test]
    fn test_press_unknown_label() {
        let mut app = CalculatorApp::new();
        app.press("sin");
        assert!(app.pressed().is_none());
        assert_eq!(app.calculator().display(), "0");
    }

    #[test]
    fn test_click_by_index() {
        let mut app = CalculatorApp::new();
        let seven = app.keypad().position("7").unwrap();
        app.click(seven);
        app.click(999);
        assert_eq!(app.calculator().display(), "7");
    }

    #[test]
    fn test_with_separator() {
        let mut app = CalculatorApp::new().with_separator('.');
        press_all(&mut app, &["1", "2", "3", "4"]);
        assert_eq!(app.calculator().display(), "1.234");
    }

    // ===== Panel tests =====

    #[test]
    fn test_toggle_history() {
        let mut app = CalculatorApp::new();
        app.handle_action(KeyAction::ToggleHistory);
        assert_eq!(app.panel(), Panel::History);
        app.handle_action(KeyAction::ToggleHistory);
        assert_eq!(app.panel(), Panel::Keypad);
    }

    #[test]
    fn test_toggle_themes_resets_cursor() {
        let mut app = CalculatorApp::new();
        app.handle_action(KeyAction::ToggleThemes);
        app.handle_action(KeyAction::SelectNext);
        app.handle_action(KeyAction::Close);
        app.handle_action(KeyAction::ToggleThemes);
        assert_eq!(app.panel(), Panel::Themes);
        assert_eq!(app.theme_cursor(), 0);
    }

    #[test]
    fn test_select_wraps() {
        let mut app = CalculatorApp::new();
        app.select_previous();
        assert_eq!(app.theme_cursor(), Theme::all().len() - 1);
        app.select_next();
        assert_eq!(app.theme_cursor(), 0);
    }

    #[test]
    fn test_confirm_theme() {
        let mut app = CalculatorApp::new();
        app.handle_action(KeyAction::ToggleThemes);
        app.handle_action(KeyAction::SelectNext);
        app.handle_action(KeyAction::Confirm);
        assert_eq!(app.theme().id, "emerald-forest");
        assert_eq!(app.panel(), Panel::Keypad);
    }

    #[test]
    fn test_select_theme_out_of_range() {
        let mut app = CalculatorApp::new();
        app.select_theme(42);
        assert_eq!(app.theme().id, "cosmic-beach");
    }

    #[test]
    fn test_clear_history_keeps_session() {
        let mut app = CalculatorApp::new();
        press_all(&mut app, &["2", "×", "4", "="]);
        app.handle_action(KeyAction::ClearHistory);
        assert!(app.calculator().history().is_empty());
        assert_eq!(app.calculator().display(), "8");
    }

    #[test]
    fn test_non_button_action_clears_highlight() {
        let mut app = CalculatorApp::new();
        app.handle_action(KeyAction::Button("5"));
        assert_eq!(app.pressed(), Some("5"));
        app.handle_action(KeyAction::None);
        assert!(app.pressed().is_none());
    }

    #[test]
    fn test_quit() {
        let mut app = CalculatorApp::new();
        app.handle_action(KeyAction::Quit);
        assert!(app.should_quit());
    }

    // ===== Persistence tests =====

    #[test]
    fn test_state_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut app = CalculatorApp::with_persistence(
                Persistence::new(FileStorage::new(dir.path())),
                Theme::default_theme(),
            );
            press_all(&mut app, &["9", "÷", "3", "="]);
            app.select_theme(3);
        }

        let app = CalculatorApp::with_persistence(
            Persistence::new(FileStorage::new(dir.path())),
            Theme::default_theme(),
        );
        assert_eq!(app.theme().id, "deep-ocean");
        assert_eq!(app.calculator().history().lines(), vec!["9 ÷ 3 = 3"]);
        // Session state is not persisted
        assert_eq!(app.calculator().display(), "0");
    }

    #[test]
    fn test_clear_history_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = CalculatorApp::with_persistence(
            Persistence::new(FileStorage::new(dir.path())),
            Theme::default_theme(),
        );
        press_all(&mut app, &["1", "+", "1", "="]);
        app.clear_history();

        let stored = std::fs::read_to_string(dir.path().join(HISTORY_KEY)).unwrap();
        assert_eq!(stored, "[]");
    }
}

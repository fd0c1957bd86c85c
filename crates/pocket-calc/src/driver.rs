//! Frontend-independent calculator driver
//!
//! A scenario is written once against [`CalculatorDriver`] and then run on
//! the bare engine and on the TUI. Keys use the same names as the keymap
//! (`"7"`, `"*"`, `"Enter"`, `"Escape"`).

use crate::core::Calculator;
use crate::keymap::{resolve_key, tokenize};
use crate::keypad::Keypad;

/// Abstract driver trait for calculator interactions
pub trait CalculatorDriver {
    /// Presses one key by name
    fn press_key(&mut self, key: &str);

    /// Gets the formatted main display
    fn display(&self) -> String;

    /// Gets the pending operation preview
    fn preview(&self) -> String;

    /// Gets history entries (newest first)
    fn history(&self) -> Vec<HistoryItem>;

    /// Presses every key in a script such as `"12+3{Enter}"`
    fn type_keys(&mut self, script: &str) {
        for key in tokenize(script) {
            self.press_key(&key);
        }
    }

    /// All-clear; history is kept
    fn clear(&mut self) {
        self.press_key("Escape");
    }
}

/// A history line split for assertions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    /// Text before `=`
    pub expression: String,
    /// Text after `=`
    pub result: String,
}

impl HistoryItem {
    fn from_entry(entry: &crate::core::history::HistoryEntry) -> Self {
        Self {
            expression: entry.expression().to_string(),
            result: entry.result().to_string(),
        }
    }
}

/// Driver over the bare engine
#[derive(Debug, Default)]
pub struct EngineDriver {
    calculator: Calculator,
    keypad: Keypad,
}

impl EngineDriver {
    /// Creates a driver around a fresh calculator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the underlying calculator
    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }
}

impl CalculatorDriver for EngineDriver {
    fn press_key(&mut self, key: &str) {
        if let Some((label, kind)) = resolve_key(&self.keypad, key) {
            self.calculator.submit(label, kind);
        }
    }

    fn display(&self) -> String {
        self.calculator.display()
    }

    fn preview(&self) -> String {
        self.calculator.preview()
    }

    fn history(&self) -> Vec<HistoryItem> {
        self.calculator
            .history()
            .iter()
            .map(HistoryItem::from_entry)
            .collect()
    }
}

/// TUI driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::{CalculatorDriver, HistoryItem};
    use crate::tui::{CalculatorApp, InputHandler};

    /// Drives [`CalculatorApp`] through synthesized key events
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
        handler: InputHandler,
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self {
                app,
                handler: InputHandler::new(),
            }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// Returns a mutable reference to the underlying app
        pub fn app_mut(&mut self) -> &mut CalculatorApp {
            &mut self.app
        }

        fn key_code(key: &str) -> Option<KeyCode> {
            match key {
                "Enter" => Some(KeyCode::Enter),
                "Backspace" => Some(KeyCode::Backspace),
                "Escape" => Some(KeyCode::Esc),
                other => {
                    let mut chars = other.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => Some(KeyCode::Char(c)),
                        _ => None,
                    }
                }
            }
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press_key(&mut self, key: &str) {
            let Some(code) = Self::key_code(key) else {
                return;
            };
            let event = KeyEvent::new(code, KeyModifiers::NONE);
            let action = self.handler.handle_key(event, self.app.panel());
            self.app.handle_action(action);
        }

        fn display(&self) -> String {
            self.app.calculator().display()
        }

        fn preview(&self) -> String {
            self.app.calculator().preview()
        }

        fn history(&self) -> Vec<HistoryItem> {
            self.app
                .calculator()
                .history()
                .iter()
                .map(HistoryItem::from_entry)
                .collect()
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Unified scenarios =====
// These work with ANY CalculatorDriver implementation

/// Verifies the four operations
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    driver.type_keys("7+3{Enter}");
    assert_eq!(driver.display(), "10");
    driver.clear();

    driver.type_keys("10-4=");
    assert_eq!(driver.display(), "6");
    driver.clear();

    driver.type_keys("6*7=");
    assert_eq!(driver.display(), "42");
    driver.clear();

    driver.type_keys("20/8=");
    assert_eq!(driver.display(), "2.5");
    driver.clear();
}

/// Verifies exact decimal results
pub fn verify_decimal_exactness<D: CalculatorDriver>(driver: &mut D) {
    driver.type_keys(".1+.2=");
    assert_eq!(driver.display(), "0.3");
    driver.clear();

    driver.type_keys("1/3=");
    assert_eq!(driver.display(), "0.333333333333333");
    driver.clear();
}

/// Verifies that a second operator evaluates the pending one
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) {
    driver.type_keys("2+3+");
    assert_eq!(driver.display(), "5");
    assert_eq!(driver.preview(), "5 +");
    driver.type_keys("4=");
    assert_eq!(driver.display(), "9");
    assert_eq!(driver.preview(), "");
    driver.clear();
}

/// Verifies the error state and recovery from it
pub fn verify_error_handling<D: CalculatorDriver>(driver: &mut D) {
    driver.type_keys("5/0=");
    assert_eq!(driver.display(), "Error");
    assert_eq!(driver.preview(), "");

    driver.type_keys("9");
    assert_eq!(driver.display(), "9");
    driver.clear();
}

/// Verifies percent and backspace
pub fn verify_percent_and_backspace<D: CalculatorDriver>(driver: &mut D) {
    driver.type_keys("12%");
    assert_eq!(driver.display(), "0.12");
    driver.clear();

    driver.type_keys("123{Backspace}");
    assert_eq!(driver.display(), "12");
    driver.type_keys("{Backspace}{Backspace}");
    assert_eq!(driver.display(), "0");
    driver.clear();
}

/// Verifies history tracking
pub fn verify_history<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    let before = driver.history().len();

    driver.type_keys("1+1=");
    driver.type_keys("2+2=");
    driver.type_keys("1200*3=");

    let history = driver.history();
    assert_eq!(history.len(), before + 3);

    // Most recent should be first
    assert_eq!(history[0].expression, "1,200 × 3");
    assert_eq!(history[0].result, "3,600");
    assert_eq!(history[2].expression, "1 + 1");
}

/// Runs every scenario above
pub fn run_all_scenarios<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_decimal_exactness(driver);
    verify_chaining(driver);
    verify_error_handling(driver);
    verify_percent_and_backspace(driver);
    verify_history(driver);
}

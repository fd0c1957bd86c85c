//! Terminal frontend
//!
//! State lives in [`CalculatorApp`]; [`InputHandler`] turns crossterm key
//! events into [`KeyAction`]s and [`render`] draws one frame.

mod app;
mod input;
mod keypad;
mod ui;

pub use app::{CalculatorApp, Panel};
pub use input::{InputHandler, KeyAction};
pub use keypad::{color, hit_test, KeypadWidget};
pub use ui::{render, AppLayout, CalculatorUI, APP_TITLE, EMPTY_HISTORY, HELP_SHORTCUTS};

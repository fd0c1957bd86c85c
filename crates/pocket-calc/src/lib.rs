//! Pocket Calc - a four-function pocket calculator
//!
//! Immediate-execution arithmetic over exact decimals: every operator press
//! evaluates the pending operation, `=` completes it and records a history
//! line. Results are rounded to 15 significant figures and shown with
//! thousands grouping.
//!
//! The engine in [`core`] is pure and synchronous. [`storage`] persists
//! history and theme between runs, and the optional [`tui`] module is a
//! ratatui frontend over the same engine.
//!
//! # Example
//!
//! ```rust
//! use pocket_calc::prelude::*;
//!
//! let mut calc = Calculator::new();
//! for label in ["1", "2", "0", "0", "×", "3"] {
//!     let kind = Keypad::new().kind_of(label).unwrap();
//!     calc.submit(label, kind);
//! }
//! calc.submit("=", ButtonKind::Equal);
//!
//! assert_eq!(calc.display(), "3,600");
//! assert_eq!(calc.history().latest().unwrap().display(), "1,200 × 3 = 3,600");
//! ```

#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod keymap;
pub mod keypad;
pub mod storage;
pub mod theme;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{AppConfig, ConfigError, ConfigResult};
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::session::{Current, Input, Session};
    pub use crate::core::{ButtonKind, CalcError, CalcResult, Calculator, Operator, Snapshot};
    pub use crate::driver::{CalculatorDriver, EngineDriver, HistoryItem};
    pub use crate::keymap::{map_key, resolve_key, tokenize};
    pub use crate::keypad::{Keypad, KeypadButton};
    pub use crate::storage::{
        FileStorage, MemoryStorage, Persistence, Storage, StorageError, StorageResult,
    };
    pub use crate::theme::{Theme, THEMES};

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
}

/// Presses every key of a script and returns the final display
///
/// Keys are named as in [`keymap`]; unknown keys are skipped.
#[must_use]
pub fn run_script(calculator: &mut core::Calculator, script: &str) -> String {
    let keypad = keypad::Keypad::new();
    for key in keymap::tokenize(script) {
        match keymap::resolve_key(&keypad, &key) {
            Some((label, kind)) => {
                calculator.submit(label, kind);
            }
            None => tracing::debug!(key = %key, "skipping unmapped key"),
        }
    }
    calculator.display()
}

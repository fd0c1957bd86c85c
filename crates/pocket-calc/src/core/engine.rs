//! Calculator engine
//!
//! Owns the current [`Session`] and the [`History`], and is the only place
//! where a reducer step is committed. Frontends talk to it through
//! [`Calculator::submit`] and read it through [`Calculator::snapshot`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::format::{format_operand_with, format_optional, DEFAULT_SEPARATOR};
use crate::core::history::{History, HistoryEntry};
use crate::core::session::{Completed, Input, Session};

/// The four kinds of keypad button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonKind {
    /// Digits and the decimal point
    Number,
    /// `+ − × ÷`
    Operator,
    /// `=`
    Equal,
    /// `AC`, `⌫`, `%`
    Special,
}

/// Read-only view of the engine for presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Formatted main display
    pub display: String,
    /// `"<previous> <op>"` while an operator is pending, else empty
    pub preview: String,
    /// History lines, newest first
    pub history: Vec<String>,
    /// Main display shows `Error`
    pub is_error: bool,
}

/// Pocket calculator state machine
#[derive(Debug, Clone)]
pub struct Calculator {
    session: Session,
    history: History,
    separator: char,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Creates a calculator with an empty history
    #[must_use]
    pub fn new() -> Self {
        Self::with_history(History::new())
    }

    /// Creates a calculator around a previously loaded history
    #[must_use]
    pub fn with_history(history: History) -> Self {
        Self {
            session: Session::default(),
            history,
            separator: DEFAULT_SEPARATOR,
        }
    }

    /// Sets the thousands separator used for display and history lines
    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Submits one labeled button press
    ///
    /// Never fails: arithmetic problems put the engine into the error state.
    /// Returns true when the press recorded a history entry.
    pub fn submit(&mut self, label: &str, kind: ButtonKind) -> bool {
        match Input::decode(label, kind) {
            Ok(Some(input)) => self.apply(input),
            Ok(None) => {
                debug!(label, ?kind, "ignoring unrecognised label");
                false
            }
            Err(error) => {
                debug!(%error, "operator rejected");
                self.session = Session::failed(error);
                false
            }
        }
    }

    /// Applies an already decoded input
    pub fn apply(&mut self, input: Input) -> bool {
        let step = self.session.reduce(input);
        if step.session.is_error() && !self.session.is_error() {
            debug!(?input, current = ?step.session.current, "entered error state");
        }
        self.session = step.session;

        match step.completed {
            Some(completed) => {
                let entry = self.history_entry(&completed);
                debug!(entry = entry.display(), "recorded computation");
                self.history.push(entry);
                true
            }
            None => false,
        }
    }

    fn history_entry(&self, completed: &Completed) -> HistoryEntry {
        HistoryEntry::new(
            &format_operand_with(&completed.previous, self.separator),
            completed.operator,
            &format_operand_with(&completed.current, self.separator),
            &format_operand_with(&completed.result, self.separator),
        )
    }

    /// Returns the current session
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the calculation history
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Empties the history; the session is untouched
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Returns the formatted main display
    #[must_use]
    pub fn display(&self) -> String {
        format_operand_with(self.session.current.raw(), self.separator)
    }

    /// Returns the pending `"<previous> <op>"` preview, or an empty string
    #[must_use]
    pub fn preview(&self) -> String {
        match (&self.session.previous, self.session.operator) {
            (Some(_), Some(op)) => format!(
                "{} {op}",
                format_optional(self.session.previous.as_deref(), self.separator)
            ),
            _ => String::new(),
        }
    }

    /// Returns true while the display shows `Error`
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.session.is_error()
    }

    /// Captures everything a frontend needs to draw
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display: self.display(),
            preview: self.preview(),
            history: self.history.lines(),
            is_error: self.is_error(),
        }
    }
}

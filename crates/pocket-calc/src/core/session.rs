//! Session state and the input reducer
//!
//! A [`Session`] is an immutable snapshot of the four-field calculator
//! state. [`Session::reduce`] maps `(state, input)` to the next state plus,
//! for a successful equals, the computation to record. Nothing here
//! formats, logs, or touches history.

use crate::core::engine::ButtonKind;
use crate::core::{compute, percent, CalcError, CalcResult, Operator, ERROR_TEXT};

/// Operands longer than this stop accepting digits
pub const MAX_ENTRY_LEN: usize = 20;

/// The value in the main display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Current {
    /// A decimal string, possibly mid-entry (`"12."`)
    Value(String),
    /// The last computation failed
    Error(CalcError),
}

impl Current {
    /// Returns the stored decimal string, if not in error
    #[must_use]
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Self::Value(v) => Some(v),
            Self::Error(_) => None,
        }
    }

    /// Returns true in the error state
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Returns the stored string, with [`ERROR_TEXT`] for the error state
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            Self::Value(v) => v,
            Self::Error(_) => ERROR_TEXT,
        }
    }
}

/// One decoded button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A digit `0`-`9` or the decimal point
    Digit(char),
    /// One of the four operators
    Operator(Operator),
    /// `=`
    Equals,
    /// `AC`
    AllClear,
    /// `⌫`
    Backspace,
    /// `%`
    Percent,
}

impl Input {
    /// Backspace label on the keypad
    pub const BACKSPACE: &'static str = "⌫";
    /// All-clear label on the keypad
    pub const ALL_CLEAR: &'static str = "AC";
    /// Percent label on the keypad
    pub const PERCENT: &'static str = "%";

    /// Decodes a labeled press
    ///
    /// Returns `Ok(None)` for labels that carry no meaning for their kind
    /// (they are ignored) and an error for an unrecognised operator label.
    pub fn decode(label: &str, kind: ButtonKind) -> CalcResult<Option<Self>> {
        let input = match kind {
            ButtonKind::Number => {
                let mut chars = label.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() || c == '.' => Some(Self::Digit(c)),
                    _ => None,
                }
            }
            ButtonKind::Operator => Some(Self::Operator(Operator::from_label(label)?)),
            ButtonKind::Equal => Some(Self::Equals),
            ButtonKind::Special => match label {
                Self::ALL_CLEAR => Some(Self::AllClear),
                Self::BACKSPACE | "Backspace" => Some(Self::Backspace),
                Self::PERCENT => Some(Self::Percent),
                _ => None,
            },
        };
        Ok(input)
    }
}

/// A successful equals, with raw (unformatted) operands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed {
    /// Left operand as stored
    pub previous: String,
    /// Operator applied
    pub operator: Operator,
    /// Right operand as stored when `=` was pressed
    pub current: String,
    /// Canonical result string
    pub result: String,
}

/// Output of one reducer step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// The next session
    pub session: Session,
    /// Set only by a successful equals
    pub completed: Option<Completed>,
}

impl Step {
    fn to(session: Session) -> Self {
        Self {
            session,
            completed: None,
        }
    }
}

/// The calculator's mutable state, treated as a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Main display value
    pub current: Current,
    /// Left operand awaiting the pending operator
    pub previous: Option<String>,
    /// Operator chosen but not yet applied
    pub operator: Option<Operator>,
    /// Next digit starts a fresh operand
    pub overwrite: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            current: Current::Value("0".to_string()),
            previous: None,
            operator: None,
            overwrite: true,
        }
    }
}

impl Session {
    /// The error state: pending work dropped, next digit overwrites
    #[must_use]
    pub fn failed(error: CalcError) -> Self {
        Self {
            current: Current::Error(error),
            previous: None,
            operator: None,
            overwrite: true,
        }
    }

    /// Returns true in the error state
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.current.is_error()
    }

    /// Computes the next state for one input
    #[must_use]
    pub fn reduce(&self, input: Input) -> Step {
        match input {
            Input::Digit(c) => Step::to(self.enter_digit(c)),
            Input::Operator(op) => Step::to(self.choose_operator(op)),
            Input::Equals => self.equals(),
            Input::AllClear => Step::to(Self::default()),
            Input::Backspace => Step::to(self.backspace()),
            Input::Percent => Step::to(self.percent()),
        }
    }

    fn enter_digit(&self, c: char) -> Self {
        let fresh = if c == '.' {
            "0.".to_string()
        } else {
            c.to_string()
        };

        let current = match &self.current {
            Current::Error(_) => {
                return Self {
                    current: Current::Value(fresh),
                    overwrite: false,
                    ..self.clone()
                };
            }
            Current::Value(v) => v,
        };

        if !self.overwrite && current.len() > MAX_ENTRY_LEN {
            return self.clone();
        }
        if c == '.' && current.contains('.') {
            return self.clone();
        }

        let next = if self.overwrite {
            fresh
        } else if current == "0" && c != '.' {
            c.to_string()
        } else {
            format!("{current}{c}")
        };
        Self {
            current: Current::Value(next),
            overwrite: false,
            ..self.clone()
        }
    }

    fn choose_operator(&self, op: Operator) -> Self {
        let base = if self.is_error() {
            Self::default()
        } else {
            self.clone()
        };

        let chained = match (&base.previous, base.operator, &base.current) {
            (Some(previous), Some(pending), Current::Value(current)) if !base.overwrite => {
                Some(compute(previous, pending, current))
            }
            _ => None,
        };

        match chained {
            Some(Err(error)) => Self::failed(error),
            Some(Ok(result)) => Self {
                current: Current::Value(result.clone()),
                previous: Some(result),
                operator: Some(op),
                overwrite: true,
            },
            None => Self {
                previous: base.current.as_value().map(str::to_string),
                operator: Some(op),
                overwrite: true,
                ..base
            },
        }
    }

    fn equals(&self) -> Step {
        let (Some(previous), Some(operator), Current::Value(current)) =
            (&self.previous, self.operator, &self.current)
        else {
            return Step::to(self.clone());
        };

        match compute(previous, operator, current) {
            Err(error) => Step::to(Self::failed(error)),
            Ok(result) => Step {
                session: Self {
                    current: Current::Value(result.clone()),
                    previous: None,
                    operator: None,
                    overwrite: true,
                },
                completed: Some(Completed {
                    previous: previous.clone(),
                    operator,
                    current: current.clone(),
                    result,
                }),
            },
        }
    }

    fn backspace(&self) -> Self {
        if self.overwrite {
            return self.clone();
        }
        let reset = Self {
            current: Current::Value("0".to_string()),
            overwrite: true,
            ..self.clone()
        };
        match &self.current {
            Current::Error(_) => reset,
            Current::Value(v) if v.len() == 2 && v.starts_with('-') => reset,
            Current::Value(v) if v.chars().count() > 1 => {
                let mut shorter = v.clone();
                shorter.pop();
                Self {
                    current: Current::Value(shorter),
                    ..self.clone()
                }
            }
            Current::Value(_) => reset,
        }
    }

    fn percent(&self) -> Self {
        let Current::Value(v) = &self.current else {
            return self.clone();
        };
        match percent(v) {
            Ok(value) => Self {
                current: Current::Value(value),
                overwrite: true,
                ..self.clone()
            },
            Err(error) => Self::failed(error),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn value(s: &str) -> Current {
        Current::Value(s.to_string())
    }

    fn press(session: &Session, inputs: &[Input]) -> Session {
        inputs
            .iter()
            .fold(session.clone(), |s, input| s.reduce(*input).session)
    }

    fn typing(session: &Session, digits: &str) -> Session {
        let inputs: Vec<Input> = digits.chars().map(Input::Digit).collect();
        press(session, &inputs)
    }

    fn entry(current: &str, overwrite: bool) -> Session {
        Session {
            current: value(current),
            overwrite,
            ..Session::default()
        }
    }

    // ===== Input::decode tests =====

    #[test]
    fn test_decode_digits() {
        assert_eq!(
            Input::decode("7", ButtonKind::Number),
            Ok(Some(Input::Digit('7')))
        );
        assert_eq!(
            Input::decode(".", ButtonKind::Number),
            Ok(Some(Input::Digit('.')))
        );
        assert_eq!(Input::decode("77", ButtonKind::Number), Ok(None));
        assert_eq!(Input::decode("x", ButtonKind::Number), Ok(None));
    }

    #[test]
    fn test_decode_operators() {
        assert_eq!(
            Input::decode("÷", ButtonKind::Operator),
            Ok(Some(Input::Operator(Operator::Divide)))
        );
        assert_eq!(
            Input::decode("^", ButtonKind::Operator),
            Err(CalcError::UnsupportedOperator("^".into()))
        );
    }

    #[test]
    fn test_decode_specials() {
        assert_eq!(
            Input::decode("AC", ButtonKind::Special),
            Ok(Some(Input::AllClear))
        );
        assert_eq!(
            Input::decode("⌫", ButtonKind::Special),
            Ok(Some(Input::Backspace))
        );
        assert_eq!(
            Input::decode("%", ButtonKind::Special),
            Ok(Some(Input::Percent))
        );
        assert_eq!(Input::decode("MC", ButtonKind::Special), Ok(None));
        assert_eq!(
            Input::decode("=", ButtonKind::Equal),
            Ok(Some(Input::Equals))
        );
    }

    // ===== Digit entry =====

    #[test]
    fn test_default_session() {
        let s = Session::default();
        assert_eq!(s.current, value("0"));
        assert_eq!(s.previous, None);
        assert_eq!(s.operator, None);
        assert!(s.overwrite);
    }

    #[test]
    fn test_first_digit_overwrites() {
        let s = typing(&Session::default(), "7");
        assert_eq!(s.current, value("7"));
        assert!(!s.overwrite);
    }

    #[test]
    fn test_digits_append() {
        let s = typing(&Session::default(), "123");
        assert_eq!(s.current, value("123"));
    }

    #[test]
    fn test_leading_point_becomes_zero_point() {
        let s = typing(&Session::default(), ".5");
        assert_eq!(s.current, value("0.5"));
    }

    #[test]
    fn test_single_decimal_point() {
        let s = typing(&Session::default(), "1..2.");
        assert_eq!(s.current, value("1.2"));
    }

    #[test]
    fn test_point_ignored_after_result_with_fraction() {
        // The single-point rule is checked before overwrite
        let s = entry("0.5", true).reduce(Input::Digit('.')).session;
        assert_eq!(s, entry("0.5", true));
    }

    #[test]
    fn test_leading_zero_suppressed() {
        let s = typing(&entry("0", false), "05");
        assert_eq!(s.current, value("5"));
    }

    #[test]
    fn test_zero_point_keeps_zero() {
        let s = typing(&entry("0", false), ".");
        assert_eq!(s.current, value("0."));
    }

    #[test]
    fn test_length_guard() {
        let long = "1".repeat(21);
        let s = entry(&long, false).reduce(Input::Digit('2')).session;
        assert_eq!(s.current, value(&long));

        let at_limit = "1".repeat(20);
        let s = entry(&at_limit, false).reduce(Input::Digit('2')).session;
        assert_eq!(s.current.raw().len(), 21);
    }

    #[test]
    fn test_length_guard_skipped_when_overwriting() {
        let long = "1".repeat(25);
        let s = entry(&long, true).reduce(Input::Digit('2')).session;
        assert_eq!(s.current, value("2"));
    }

    #[test]
    fn test_digit_exits_error() {
        let s = Session::failed(CalcError::DivisionByZero)
            .reduce(Input::Digit('9'))
            .session;
        assert_eq!(s, entry("9", false));
    }

    #[test]
    fn test_point_exits_error() {
        let s = Session::failed(CalcError::DivisionByZero)
            .reduce(Input::Digit('.'))
            .session;
        assert_eq!(s.current, value("0."));
    }

    // ===== Operators =====

    #[test]
    fn test_operator_stores_previous() {
        let s = press(
            &typing(&Session::default(), "7"),
            &[Input::Operator(Operator::Add)],
        );
        assert_eq!(s.previous.as_deref(), Some("7"));
        assert_eq!(s.operator, Some(Operator::Add));
        assert_eq!(s.current, value("7"));
        assert!(s.overwrite);
    }

    #[test]
    fn test_operator_chains() {
        let s = typing(&Session::default(), "2");
        let s = press(&s, &[Input::Operator(Operator::Add)]);
        let s = typing(&s, "3");
        let s = press(&s, &[Input::Operator(Operator::Multiply)]);
        assert_eq!(s.current, value("5"));
        assert_eq!(s.previous.as_deref(), Some("5"));
        assert_eq!(s.operator, Some(Operator::Multiply));
    }

    #[test]
    fn test_operator_twice_replaces_pending() {
        let s = typing(&Session::default(), "8");
        let s = press(
            &s,
            &[
                Input::Operator(Operator::Add),
                Input::Operator(Operator::Subtract),
            ],
        );
        assert_eq!(s.previous.as_deref(), Some("8"));
        assert_eq!(s.operator, Some(Operator::Subtract));
        assert_eq!(s.current, value("8"));
    }

    #[test]
    fn test_operator_chain_error() {
        let s = typing(&Session::default(), "5");
        let s = press(&s, &[Input::Operator(Operator::Divide)]);
        let s = typing(&s, "0");
        let s = press(&s, &[Input::Operator(Operator::Add)]);
        assert_eq!(s, Session::failed(CalcError::DivisionByZero));
    }

    #[test]
    fn test_operator_resets_error_first() {
        let s = Session::failed(CalcError::Overflow).reduce(Input::Operator(Operator::Add));
        assert_eq!(s.session.previous.as_deref(), Some("0"));
        assert_eq!(s.session.operator, Some(Operator::Add));
        assert_eq!(s.session.current, value("0"));
    }

    // ===== Equals =====

    #[test]
    fn test_equals_without_operator_is_noop() {
        let s = typing(&Session::default(), "42");
        let step = s.reduce(Input::Equals);
        assert_eq!(step.session, s);
        assert!(step.completed.is_none());
    }

    #[test]
    fn test_equals_completes() {
        let s = typing(&Session::default(), "7");
        let s = press(&s, &[Input::Operator(Operator::Add)]);
        let s = typing(&s, "3");
        let step = s.reduce(Input::Equals);

        assert_eq!(step.session, entry("10", true));
        assert_eq!(
            step.completed,
            Some(Completed {
                previous: "7".into(),
                operator: Operator::Add,
                current: "3".into(),
                result: "10".into(),
            })
        );
    }

    #[test]
    fn test_equals_uses_current_when_second_operand_not_typed() {
        // 4 × = squares the displayed value
        let s = typing(&Session::default(), "4");
        let s = press(&s, &[Input::Operator(Operator::Multiply)]);
        let step = s.reduce(Input::Equals);
        assert_eq!(step.session.current, value("16"));
    }

    #[test]
    fn test_equals_error_records_nothing() {
        let s = typing(&Session::default(), "5");
        let s = press(&s, &[Input::Operator(Operator::Divide)]);
        let s = typing(&s, "0");
        let step = s.reduce(Input::Equals);
        assert_eq!(step.session, Session::failed(CalcError::DivisionByZero));
        assert!(step.completed.is_none());
    }

    #[test]
    fn test_repeated_equals_is_noop() {
        let s = typing(&Session::default(), "7");
        let s = press(&s, &[Input::Operator(Operator::Add)]);
        let s = typing(&s, "3");
        let s = press(&s, &[Input::Equals]);
        let step = s.reduce(Input::Equals);
        assert_eq!(step.session, s);
        assert!(step.completed.is_none());
    }

    // ===== AC =====

    #[test]
    fn test_all_clear_from_anywhere() {
        let busy = press(
            &typing(&Session::default(), "12"),
            &[Input::Operator(Operator::Subtract)],
        );
        assert_eq!(busy.reduce(Input::AllClear).session, Session::default());
        assert_eq!(
            Session::failed(CalcError::DivisionByZero)
                .reduce(Input::AllClear)
                .session,
            Session::default()
        );
    }

    // ===== Backspace =====

    #[test]
    fn test_backspace_noop_when_overwriting() {
        let s = entry("123", true);
        assert_eq!(s.reduce(Input::Backspace).session, s);
    }

    #[test]
    fn test_backspace_drops_last_char() {
        let s = entry("123", false).reduce(Input::Backspace).session;
        assert_eq!(s, entry("12", false));
    }

    #[test]
    fn test_backspace_negative_single_digit() {
        let s = entry("-5", false).reduce(Input::Backspace).session;
        assert_eq!(s, entry("0", true));
    }

    #[test]
    fn test_backspace_last_digit() {
        let s = entry("7", false).reduce(Input::Backspace).session;
        assert_eq!(s, entry("0", true));
    }

    #[test]
    fn test_backspace_error_requires_entry_mode() {
        let failed = Session::failed(CalcError::DivisionByZero);
        assert_eq!(failed.reduce(Input::Backspace).session, failed);

        let mut entering = failed;
        entering.overwrite = false;
        assert_eq!(
            entering.reduce(Input::Backspace).session,
            entry("0", true)
        );
    }

    // ===== Percent =====

    #[test]
    fn test_percent() {
        let s = typing(&Session::default(), "12");
        let s = s.reduce(Input::Percent).session;
        assert_eq!(s, entry("0.12", true));
    }

    #[test]
    fn test_percent_keeps_pending_operation() {
        let s = typing(&Session::default(), "200");
        let s = press(&s, &[Input::Operator(Operator::Multiply)]);
        let s = typing(&s, "5");
        let s = s.reduce(Input::Percent).session;
        assert_eq!(s.current, value("0.05"));
        assert_eq!(s.previous.as_deref(), Some("200"));
        let step = s.reduce(Input::Equals);
        assert_eq!(step.session.current, value("10"));
    }

    #[test]
    fn test_percent_in_error_is_noop() {
        let failed = Session::failed(CalcError::DivisionByZero);
        assert_eq!(failed.reduce(Input::Percent).session, failed);
    }

    #[test]
    fn test_percent_invalid_operand() {
        let s = entry("-", false).reduce(Input::Percent).session;
        assert!(s.is_error());
        assert!(s.overwrite);
    }
}

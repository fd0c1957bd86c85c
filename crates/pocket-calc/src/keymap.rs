//! Keyboard key names to keypad labels
//!
//! Key names follow the DOM `KeyboardEvent.key` convention (`"7"`, `"*"`,
//! `"Enter"`, `"Escape"`), which is also what the `--keys` script syntax
//! uses inside braces.

use crate::core::ButtonKind;
use crate::keypad::Keypad;

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Maps a key name to the keypad label it presses
#[must_use]
pub fn map_key(key: &str) -> Option<&'static str> {
    let label = match key {
        "." => ".",
        "+" => "+",
        "-" => "−",
        "*" => "×",
        "/" => "÷",
        "Enter" | "=" => "=",
        "Backspace" => "⌫",
        "Escape" => "AC",
        "%" => "%",
        other => {
            let mut chars = other.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return None;
            };
            let digit = c.to_digit(10)?;
            DIGITS[digit as usize]
        }
    };
    Some(label)
}

/// Maps a key name to a keypad label and its kind
#[must_use]
pub fn resolve_key(keypad: &Keypad, key: &str) -> Option<(&'static str, ButtonKind)> {
    let label = map_key(key)?;
    keypad.kind_of(label).map(|kind| (label, kind))
}

/// Splits a key script into key names
///
/// Every non-whitespace character is a key of its own; named keys are
/// wrapped in braces: `"12+3{Enter}"`. An unterminated brace takes the rest
/// of the script as its name.
#[must_use]
pub fn tokenize(script: &str) -> Vec<String> {
    let mut keys = Vec::new();
    let mut chars = script.chars();
    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '{' => {
                let name: String = chars.by_ref().take_while(|&c| c != '}').collect();
                if !name.is_empty() {
                    keys.push(name);
                }
            }
            c => keys.push(c.to_string()),
        }
    }
    keys
}

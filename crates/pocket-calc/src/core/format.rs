//! Display formatting for stored operand strings
//!
//! Formatting is a pure function of the stored string; the engine never
//! stores grouped text.

use crate::core::{parse_operand, ERROR_TEXT};

/// Thousands separator used when none is configured
pub const DEFAULT_SEPARATOR: char = ',';

/// Formats an optional operand; `None` renders as an empty string
#[must_use]
pub fn format_optional(operand: Option<&str>, separator: char) -> String {
    operand.map_or_else(String::new, |op| format_operand_with(op, separator))
}

/// Formats an operand for display
///
/// - anything that does not parse as a finite decimal becomes `Error`,
///   including a lone `"-"`
/// - mid-entry values (`"12."`) are shown untouched
/// - otherwise the integer part is grouped in threes and the fraction is
///   reattached verbatim, so `".5"` stays `".5"` and `"1.50"` stays `"1.50"`
#[must_use]
pub fn format_operand_with(operand: &str, separator: char) -> String {
    if parse_operand(operand).is_err() {
        return ERROR_TEXT.to_string();
    }
    if operand.ends_with('.') {
        return operand.to_string();
    }

    let (sign, unsigned) = match operand.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", operand),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    if integer.is_empty() {
        return format!("{sign}.{}", fraction.unwrap_or_default());
    }

    let digits = match integer.trim_start_matches('0') {
        "" => "0",
        significant => significant,
    };
    let grouped = group_thousands(digits, separator);
    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

//! Keypad layout
//!
//! The 19-button grid shared by every frontend. Kinds come from here, so a
//! keyboard key only needs to resolve to a label.
//!
//! ```text
//! [ AC ] [ ⌫ ] [ % ] [ ÷ ]
//! [ 7  ] [ 8 ] [ 9 ] [ × ]
//! [ 4  ] [ 5 ] [ 6 ] [ − ]
//! [ 1  ] [ 2 ] [ 3 ] [ + ]
//! [    0     ] [ . ] [ = ]
//! ```

use crate::core::ButtonKind;

/// A single keypad button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadButton {
    /// Text on the button, submitted as the event label
    pub label: &'static str,
    /// How the engine interprets the label
    pub kind: ButtonKind,
    /// Number of grid columns the button covers
    pub span: usize,
}

impl KeypadButton {
    const fn new(label: &'static str, kind: ButtonKind) -> Self {
        Self {
            label,
            kind,
            span: 1,
        }
    }

    const fn wide(label: &'static str, kind: ButtonKind, span: usize) -> Self {
        Self { label, kind, span }
    }
}

/// A button placed on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedButton {
    /// Grid row
    pub row: usize,
    /// First grid column covered
    pub col: usize,
    /// The button itself
    pub button: KeypadButton,
}

const STANDARD: [KeypadButton; 19] = {
    use ButtonKind::{Equal, Number, Operator, Special};
    [
        KeypadButton::new("AC", Special),
        KeypadButton::new("⌫", Special),
        KeypadButton::new("%", Special),
        KeypadButton::new("÷", Operator),
        KeypadButton::new("7", Number),
        KeypadButton::new("8", Number),
        KeypadButton::new("9", Number),
        KeypadButton::new("×", Operator),
        KeypadButton::new("4", Number),
        KeypadButton::new("5", Number),
        KeypadButton::new("6", Number),
        KeypadButton::new("−", Operator),
        KeypadButton::new("1", Number),
        KeypadButton::new("2", Number),
        KeypadButton::new("3", Number),
        KeypadButton::new("+", Operator),
        KeypadButton::wide("0", Number, 2),
        KeypadButton::new(".", Number),
        KeypadButton::new("=", Equal),
    ]
};

/// The calculator keypad
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypad {
    placed: Vec<PlacedButton>,
    cols: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Number of grid columns in the standard layout
    pub const COLUMNS: usize = 4;

    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        Self::from_buttons(&STANDARD, Self::COLUMNS)
    }

    /// Lays buttons out row-major, wrapping when a button would not fit
    #[must_use]
    pub fn from_buttons(buttons: &[KeypadButton], cols: usize) -> Self {
        let mut placed = Vec::with_capacity(buttons.len());
        let (mut row, mut col) = (0, 0);
        for button in buttons {
            let span = button.span.clamp(1, cols);
            if col + span > cols {
                row += 1;
                col = 0;
            }
            placed.push(PlacedButton {
                row,
                col,
                button: KeypadButton { span, ..*button },
            });
            col += span;
        }
        Self { placed, cols }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.placed.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        let rows = self.placed.last().map_or(0, |p| p.row + 1);
        (rows, self.cols)
    }

    /// Returns the placed buttons in row-major order
    #[must_use]
    pub fn buttons(&self) -> &[PlacedButton] {
        &self.placed
    }

    /// Gets a button by index
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&KeypadButton> {
        self.placed.get(index).map(|p| &p.button)
    }

    /// Finds the index of the button with this label
    #[must_use]
    pub fn position(&self, label: &str) -> Option<usize> {
        self.placed.iter().position(|p| p.button.label == label)
    }

    /// Finds a button by label
    #[must_use]
    pub fn find(&self, label: &str) -> Option<&KeypadButton> {
        self.position(label).and_then(|i| self.get(i))
    }

    /// Returns the kind of the button with this label
    #[must_use]
    pub fn kind_of(&self, label: &str) -> Option<ButtonKind> {
        self.find(label).map(|b| b.kind)
    }

    /// Returns the index of the button covering a grid cell
    #[must_use]
    pub fn index_at(&self, row: usize, col: usize) -> Option<usize> {
        self.placed
            .iter()
            .position(|p| p.row == row && (p.col..p.col + p.button.span).contains(&col))
    }

    /// Returns the button covering a grid cell
    #[must_use]
    pub fn cell_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.index_at(row, col).and_then(|i| self.get(i))
    }
}

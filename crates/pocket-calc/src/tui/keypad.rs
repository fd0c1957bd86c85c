//! Keypad widget and mouse hit testing

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::core::ButtonKind;
use crate::keypad::Keypad;
use crate::theme::{Rgb, Theme};

/// Converts a theme color into a terminal color
#[must_use]
pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn inner_area(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Size of one grid cell inside `area`, or `None` when it does not fit
fn cell_size(keypad: &Keypad, area: Rect) -> Option<(u16, u16)> {
    let (rows, cols) = keypad.dimensions();
    if rows == 0 || cols == 0 {
        return None;
    }
    let inner = inner_area(area);
    let width = inner.width / cols as u16;
    let height = inner.height / rows as u16;
    (width > 0 && height > 0).then_some((width, height))
}

/// Converts a click position to a button index
#[must_use]
pub fn hit_test(keypad: &Keypad, area: Rect, x: u16, y: u16) -> Option<usize> {
    let inner = inner_area(area);
    if x < inner.x || y < inner.y || x >= inner.x + inner.width || y >= inner.y + inner.height {
        return None;
    }
    let (width, height) = cell_size(keypad, area)?;
    let col = ((x - inner.x) / width) as usize;
    let row = ((y - inner.y) / height) as usize;
    keypad.index_at(row, col)
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
    theme: &'a Theme,
    pressed: Option<&'a str>,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad, theme: &'a Theme) -> Self {
        Self {
            keypad,
            theme,
            pressed: None,
        }
    }

    /// Highlights the button with this label
    #[must_use]
    pub fn pressed(mut self, label: Option<&'a str>) -> Self {
        self.pressed = label;
        self
    }

    fn style_for(&self, label: &str, kind: ButtonKind) -> Style {
        let palette = &self.theme.palette;
        let pressed = self.pressed == Some(label);
        let base = match kind {
            ButtonKind::Number => Style::default().fg(color(palette.number)),
            ButtonKind::Operator => Style::default().fg(color(palette.operator)),
            ButtonKind::Special => Style::default().fg(color(palette.special)),
            ButtonKind::Equal => {
                let bg = if pressed {
                    palette.equal_bg_active
                } else {
                    palette.equal_bg
                };
                return Style::default()
                    .fg(color(palette.equal_fg))
                    .bg(color(bg))
                    .add_modifier(Modifier::BOLD);
            }
        };
        if pressed {
            base.add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            base
        }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color(self.theme.palette.display_secondary)))
            .render(area, buf);

        let Some((width, height)) = cell_size(self.keypad, area) else {
            return;
        };
        let inner = inner_area(area);

        for placed in self.keypad.buttons() {
            let button = placed.button;
            let cell = Rect {
                x: inner.x + placed.col as u16 * width,
                y: inner.y + placed.row as u16 * height,
                width: button.span as u16 * width,
                height,
            };
            let style = self.style_for(button.label, button.kind);
            if button.kind == ButtonKind::Equal || self.pressed == Some(button.label) {
                buf.set_style(cell, style);
            }

            let label = format!("[{}]", button.label);
            let label_width = label.chars().count() as u16;
            if label_width > cell.width {
                continue;
            }
            let label_x = cell.x + (cell.width - label_width) / 2;
            let label_y = cell.y + cell.height / 2;
            buf.set_span(label_x, label_y, &Span::styled(label, style), cell.width);
        }
    }
}

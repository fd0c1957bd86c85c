//! TUI rendering

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::{CalculatorApp, Panel};
use super::keypad::{color, KeypadWidget};
use crate::theme::Theme;

/// Screen regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    /// Preview and main display
    pub display: Rect,
    /// Keypad, also where panels open
    pub keypad: Rect,
    /// Key help
    pub help: Rect,
}

impl AppLayout {
    /// Splits the full terminal area
    #[must_use]
    pub fn new(area: Rect) -> Self {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .margin(1)
            .constraints([
                Constraint::Min(28),    // Calculator
                Constraint::Length(24), // Help sidebar
            ])
            .split(area);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Preview + display
                Constraint::Min(7),    // Keypad
            ])
            .split(columns[0]);
        Self {
            display: rows[0],
            keypad: rows[1],
            help: columns[1],
        }
    }
}

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    fn theme(&self) -> &'static Theme {
        self.app.theme()
    }

    fn border(&self, title: &'a str) -> Block<'a> {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color(self.theme().palette.display_secondary)))
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let palette = &self.theme().palette;
        let calculator = self.app.calculator();
        let lines = vec![
            Line::from(Span::styled(
                calculator.preview(),
                Style::default().fg(color(palette.display_secondary)),
            )),
            Line::from(Span::styled(
                calculator.display(),
                Style::default()
                    .fg(color(palette.display))
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Right)
            .block(self.border(" Display "))
            .render(area, buf);
    }

    fn render_history(&self, area: Rect, buf: &mut Buffer) {
        let palette = &self.theme().palette;
        let history = self.app.calculator().history();
        let block = self.border(" History ").title_bottom(Line::from(Span::styled(
            " c: clear ",
            Style::default().fg(color(palette.history_clear)),
        )));

        if history.is_empty() {
            Paragraph::new(Span::styled(
                EMPTY_HISTORY,
                Style::default().fg(color(palette.display_secondary)),
            ))
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
            return;
        }

        let items: Vec<ListItem> = history
            .iter()
            .map(|entry| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        entry.result(),
                        Style::default()
                            .fg(color(palette.display))
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        entry.expression(),
                        Style::default().fg(color(palette.display_secondary)),
                    )),
                ])
            })
            .collect();
        List::new(items).block(block).render(area, buf);
    }

    fn render_themes(&self, area: Rect, buf: &mut Buffer) {
        let palette = &self.theme().palette;
        let items: Vec<ListItem> = Theme::all()
            .iter()
            .enumerate()
            .map(|(i, theme)| {
                let cursor = if i == self.app.theme_cursor() { "▶ " } else { "  " };
                let active = if theme.id == self.theme().id { " ✓" } else { "" };
                let style = if i == self.app.theme_cursor() {
                    Style::default()
                        .fg(color(theme.palette.operator))
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(color(palette.number))
                };
                ListItem::new(Line::from(vec![
                    Span::styled(cursor, style),
                    Span::styled(theme.name, style),
                    Span::styled(active, Style::default().fg(color(palette.special))),
                ]))
            })
            .collect();
        List::new(items)
            .block(self.border(" Theme "))
            .render(area, buf);
    }

    fn render_help_sidebar(&self, area: Rect, buf: &mut Buffer) {
        let palette = &self.theme().palette;
        let shortcuts: Vec<ListItem> = HELP_SHORTCUTS
            .iter()
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>6}", key), Style::default().fg(color(palette.operator))),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(color(palette.display_secondary))),
                ]))
            })
            .collect();
        List::new(shortcuts)
            .block(self.border(" Help "))
            .render(area, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme();
        let background = Style::default().bg(color(theme.background[0]));
        buf.set_style(area, background);

        Block::default()
            .title(format!(" {APP_TITLE} · {} ", theme.name))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color(theme.palette.operator)))
            .render(area, buf);

        let layout = AppLayout::new(area);
        self.render_display(layout.display, buf);
        KeypadWidget::new(self.app.keypad(), theme)
            .pressed(self.app.pressed())
            .render(layout.keypad, buf);

        match self.app.panel() {
            Panel::Keypad => {}
            Panel::History => {
                Clear.render(layout.keypad, buf);
                buf.set_style(layout.keypad, background);
                self.render_history(layout.keypad, buf);
            }
            Panel::Themes => {
                Clear.render(layout.keypad, buf);
                buf.set_style(layout.keypad, background);
                self.render_themes(layout.keypad, buf);
            }
        }

        self.render_help_sidebar(layout.help, buf);
    }
}

/// Title shown on the outer border
pub const APP_TITLE: &str = "Pocket Calc";

/// Shown in the history panel when there is nothing to show
pub const EMPTY_HISTORY: &str = "No history yet.";

/// Key help for the sidebar
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("0-9 .", "Digits"),
    ("+-*/", "Operators"),
    ("Enter", "Equals"),
    ("%", "Percent"),
    ("Bksp", "Delete"),
    ("Esc", "All clear"),
    ("h", "History"),
    ("t", "Themes"),
    ("↑/↓", "Pick theme"),
    ("q", "Quit"),
];

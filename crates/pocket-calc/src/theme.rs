//! Color themes
//!
//! Four built-in palettes, selected by identifier. Frontends convert the
//! [`Rgb`] values to whatever color type they draw with.

use serde::Serialize;

/// A 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colors for each part of the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    /// `AC`, `⌫`, `%`
    pub special: Rgb,
    /// `+ − × ÷`
    pub operator: Rgb,
    /// Digits and the point
    pub number: Rgb,
    /// `=` background
    pub equal_bg: Rgb,
    /// `=` background while pressed
    pub equal_bg_active: Rgb,
    /// `=` label
    pub equal_fg: Rgb,
    /// Main display text
    pub display: Rgb,
    /// Preview line text
    pub display_secondary: Rgb,
    /// Clear-history action
    pub history_clear: Rgb,
}

/// A named theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    /// Stable identifier, persisted across sessions
    pub id: &'static str,
    /// Name shown in the theme picker
    pub name: &'static str,
    /// Gradient stops: from, via, to
    pub background: [Rgb; 3],
    /// Foreground colors
    pub palette: Palette,
}

const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
const SLATE_900: Rgb = Rgb(0x0f, 0x17, 0x2a);
// white at 70% over a dark backdrop
const WHITE_70: Rgb = Rgb(0xb3, 0xb3, 0xb3);

/// Built-in themes; the first one is the default
pub const THEMES: [Theme; 4] = [
    Theme {
        id: "cosmic-beach",
        name: "Cosmic Beach",
        background: [Rgb(0x11, 0x18, 0x27), Rgb(0x58, 0x1c, 0x87), Rgb(0x9a, 0x34, 0x12)],
        palette: Palette {
            special: Rgb(0xfb, 0x92, 0x3c),
            operator: Rgb(0x22, 0xd3, 0xee),
            number: WHITE,
            equal_bg: Rgb(0x06, 0xb6, 0xd4),
            equal_bg_active: Rgb(0x08, 0x91, 0xb2),
            equal_fg: SLATE_900,
            display: WHITE,
            display_secondary: WHITE_70,
            history_clear: Rgb(0x22, 0xd3, 0xee),
        },
    },
    Theme {
        id: "emerald-forest",
        name: "Emerald Forest",
        background: [Rgb(0x11, 0x18, 0x27), Rgb(0x06, 0x4e, 0x3b), Rgb(0x16, 0x65, 0x34)],
        palette: Palette {
            special: Rgb(0xfc, 0xd3, 0x4d),
            operator: Rgb(0x34, 0xd3, 0x99),
            number: WHITE,
            equal_bg: Rgb(0x10, 0xb9, 0x81),
            equal_bg_active: Rgb(0x05, 0x96, 0x69),
            equal_fg: SLATE_900,
            display: WHITE,
            display_secondary: WHITE_70,
            history_clear: Rgb(0x34, 0xd3, 0x99),
        },
    },
    Theme {
        id: "sunset-glow",
        name: "Sunset Glow",
        background: [Rgb(0x0f, 0x17, 0x2a), Rgb(0x83, 0x18, 0x43), Rgb(0xbe, 0x12, 0x3c)],
        palette: Palette {
            special: Rgb(0xfb, 0xbf, 0x24),
            operator: Rgb(0xf4, 0x72, 0xb6),
            number: WHITE,
            equal_bg: Rgb(0xec, 0x48, 0x99),
            equal_bg_active: Rgb(0xdb, 0x27, 0x77),
            equal_fg: WHITE,
            display: WHITE,
            display_secondary: WHITE_70,
            history_clear: Rgb(0xf4, 0x72, 0xb6),
        },
    },
    Theme {
        id: "deep-ocean",
        name: "Deep Ocean",
        background: [Rgb(0x0f, 0x17, 0x2a), Rgb(0x1e, 0x3a, 0x8a), Rgb(0x15, 0x5e, 0x75)],
        palette: Palette {
            special: Rgb(0xf5, 0x9e, 0x0b),
            operator: Rgb(0x60, 0xa5, 0xfa),
            number: WHITE,
            equal_bg: Rgb(0x3b, 0x82, 0xf6),
            equal_bg_active: Rgb(0x25, 0x63, 0xeb),
            equal_fg: WHITE,
            display: WHITE,
            display_secondary: WHITE_70,
            history_clear: Rgb(0x60, 0xa5, 0xfa),
        },
    },
];

impl Default for Theme {
    fn default() -> Self {
        *Self::default_theme()
    }
}

impl Theme {
    /// Returns the default theme
    #[must_use]
    pub fn default_theme() -> &'static Self {
        &THEMES[0]
    }

    /// Returns all built-in themes
    #[must_use]
    pub fn all() -> &'static [Self] {
        &THEMES
    }

    /// Looks a theme up by identifier
    #[must_use]
    pub fn find(id: &str) -> Option<&'static Self> {
        THEMES.iter().find(|t| t.id == id)
    }

    /// Looks a theme up by identifier, falling back to the default
    #[must_use]
    pub fn find_or_default(id: &str) -> &'static Self {
        Self::find(id).unwrap_or_else(Self::default_theme)
    }

    /// Position in [`THEMES`]
    #[must_use]
    pub fn index(&self) -> usize {
        THEMES.iter().position(|t| t.id == self.id).unwrap_or(0)
    }
}

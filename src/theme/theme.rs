use super::{Color, ThemeMode};

/// Colors for every surface the editor paints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,

    pub window: Color,
    pub background: Color,
    pub foreground: Color,
    pub cursor: Color,

    pub gutter_bg: Color,
    pub gutter_fg: Color,

    pub tab_bg: Color,
    pub tab_fg: Color,
    pub tab_active_bg: Color,
    pub tab_active_fg: Color,

    /// Find results
    pub highlight_bg: Color,
    pub highlight_fg: Color,
}

impl Theme {
    pub const fn light() -> Self {
        Self {
            name: "light",
            window: Color::rgb(240, 240, 240),
            background: Color::WHITE,
            foreground: Color::BLACK,
            cursor: Color::BLACK,
            gutter_bg: Color::rgb(0xee, 0xee, 0xee),
            gutter_fg: Color::BLACK,
            tab_bg: Color::rgb(0xdd, 0xdd, 0xdd),
            tab_fg: Color::rgb(0x44, 0x44, 0x44),
            tab_active_bg: Color::WHITE,
            tab_active_fg: Color::BLACK,
            highlight_bg: Color::YELLOW,
            highlight_fg: Color::BLACK,
        }
    }

    pub const fn dark() -> Self {
        Self {
            name: "dark",
            window: Color::rgb(0x2d, 0x2d, 0x2d),
            background: Color::rgb(0x1e, 0x1e, 0x1e),
            foreground: Color::rgb(0xdc, 0xdc, 0xdc),
            cursor: Color::WHITE,
            gutter_bg: Color::rgb(0x2d, 0x2d, 0x2d),
            gutter_fg: Color::rgb(0xaa, 0xaa, 0xaa),
            tab_bg: Color::rgb(0x25, 0x25, 0x25),
            tab_fg: Color::rgb(0xaa, 0xaa, 0xaa),
            tab_active_bg: Color::rgb(0x1e, 0x1e, 0x1e),
            tab_active_fg: Color::rgb(0xdc, 0xdc, 0xdc),
            highlight_bg: Color::YELLOW,
            highlight_fg: Color::BLACK,
        }
    }

    /// Palette for a mode, asking the host when the mode is `Auto`
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode.resolve() {
            ThemeMode::Dark => Self::dark(),
            _ => Self::light(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

use ratatui::style::Color;
use thiserror::Error;

/// A color palette applied to the board.
///
/// Palettes are external configuration: the engine never reads them, the
/// renderer receives the selected one alongside each snapshot.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
}

/// Neon green-on-navy palette.
pub const THEME_NEON: Theme = Theme {
    name: "neon",
    background: Color::Rgb(0x08, 0x12, 0x26),
    snake_head: Color::Rgb(0x84, 0xF3, 0xC9),
    snake_body: Color::Rgb(0x06, 0xB6, 0xD4),
    food: Color::Rgb(0xFB, 0x71, 0x85),
};

/// Classic green snake on dark blue.
pub const THEME_CLASSIC: Theme = Theme {
    name: "classic",
    background: Color::Rgb(0x0B, 0x12, 0x20),
    snake_head: Color::Rgb(0x4A, 0xDE, 0x80),
    snake_body: Color::Rgb(0x10, 0xB9, 0x81),
    food: Color::Rgb(0xEF, 0x44, 0x44),
};

/// Retro amber-and-teal palette.
pub const THEME_RETRO: Theme = Theme {
    name: "retro",
    background: Color::Rgb(0x12, 0x12, 0x12),
    snake_head: Color::Rgb(0xFF, 0xD1, 0x66),
    snake_body: Color::Rgb(0x06, 0xD6, 0xA0),
    food: Color::Rgb(0xFF, 0x6B, 0x6B),
};

/// All available themes.
pub const THEMES: &[Theme] = &[THEME_NEON, THEME_CLASSIC, THEME_RETRO];

/// Rejected theme name.
#[derive(Debug, Error)]
#[error("unknown theme '{0}'; expected one of neon, classic, retro")]
pub struct UnknownTheme(String);

/// Looks up a theme by its CLI name.
pub fn parse_theme(raw: &str) -> Result<&'static Theme, UnknownTheme> {
    THEMES
        .iter()
        .find(|theme| theme.name.eq_ignore_ascii_case(raw.trim()))
        .ok_or_else(|| UnknownTheme(raw.to_owned()))
}

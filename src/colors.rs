//! Terminal colors.
//!
//! Backed by owo-colors when the `colors` feature is on. With the feature off,
//! or when `NO_COLOR` is set, every helper returns its input unchanged.

use std::env;

#[cfg(feature = "colors")]
use owo_colors::{AnsiColors, OwoColorize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Yellow,
    Red,
    Cyan,
    Blue,
    Magenta,
    Gray,
}

#[cfg(feature = "colors")]
impl From<Color> for AnsiColors {
    fn from(color: Color) -> Self {
        match color {
            Color::Green => AnsiColors::Green,
            Color::Yellow => AnsiColors::Yellow,
            Color::Red => AnsiColors::Red,
            Color::Cyan => AnsiColors::BrightCyan,
            Color::Blue => AnsiColors::BrightBlue,
            Color::Magenta => AnsiColors::BrightMagenta,
            Color::Gray => AnsiColors::BrightBlack,
        }
    }
}

pub const SAFE: Color = Color::Green;
pub const WARNING: Color = Color::Yellow;
pub const DANGER: Color = Color::Red;

/// Threshold color for a percentage: `<= 50` safe, `<= 80` warning, above that danger.
pub fn color_for_percent(percent: u8) -> Color {
    if percent <= 50 {
        SAFE
    } else if percent <= 80 {
        WARNING
    } else {
        DANGER
    }
}

fn enabled() -> bool {
    cfg!(feature = "colors") && env::var_os("NO_COLOR").is_none()
}

pub fn paint(text: &str, color: Color) -> String {
    if !enabled() {
        return text.to_string();
    }
    #[cfg(feature = "colors")]
    {
        text.color(AnsiColors::from(color)).to_string()
    }
    #[cfg(not(feature = "colors"))]
    {
        let _ = color;
        text.to_string()
    }
}

pub fn dim(text: &str) -> String {
    if !enabled() {
        return text.to_string();
    }
    #[cfg(feature = "colors")]
    {
        text.dimmed().to_string()
    }
    #[cfg(not(feature = "colors"))]
    {
        text.to_string()
    }
}

/// Shown whenever a whole section, or the whole line, cannot be produced.
pub fn warning_glyph() -> String {
    paint("⚠️", Color::Yellow)
}

/// Separator placed between widget fragments.
pub fn separator() -> String {
    format!(" {} ", dim("│"))
}

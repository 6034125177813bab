//! Theme color definitions for the UI
//!
//! Provides dark and light color palettes selected from the config.

use crate::config::Theme;
use crate::keyboard::KeyStatus;
use ratatui::style::Color;

/// Complete color palette for the UI
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    /// Main background
    pub bg: Color,
    /// Primary foreground text
    pub fg: Color,
    /// Dimmed/secondary text
    pub dim: Color,
    /// Accent color (headings, active tab)
    pub accent: Color,
    /// Success / celebration
    pub green: Color,
    /// Warnings and errors counters
    pub yellow: Color,
    pub red: Color,
    /// Badge / panel background
    pub panel: Color,
    /// Key never pressed
    pub key_off: Color,
    /// Key pressed at least once
    pub key_pressed: Color,
    /// Key currently down
    pub key_held: Color,
    /// Key double-pressed
    pub key_double: Color,
    /// Key part of a simultaneous combination
    pub key_combo: Color,
    /// Key label text (untouched)
    pub key_text: Color,
    /// Key label text on a colored tile
    pub key_text_on: Color,
}

impl ThemeColors {
    /// Create a color palette for the given theme variant
    pub fn from_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(17, 24, 39),
            fg: Color::Rgb(229, 231, 235),
            dim: Color::Rgb(156, 163, 175),
            accent: Color::Rgb(96, 165, 250),
            green: Color::Rgb(74, 222, 128),
            yellow: Color::Rgb(250, 204, 21),
            red: Color::Rgb(220, 38, 38),
            panel: Color::Rgb(31, 41, 55),
            key_off: Color::Rgb(55, 65, 81),
            key_pressed: Color::Rgb(22, 163, 74),
            key_held: Color::Rgb(37, 99, 235),
            key_double: Color::Rgb(202, 138, 4),
            key_combo: Color::Rgb(147, 51, 234),
            key_text: Color::Rgb(229, 231, 235),
            key_text_on: Color::Rgb(255, 255, 255),
        }
    }

    /// High contrast for bright terminals
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(245, 245, 248),
            fg: Color::Rgb(30, 30, 40),
            dim: Color::Rgb(110, 110, 130),
            accent: Color::Rgb(29, 78, 216),
            green: Color::Rgb(21, 128, 61),
            yellow: Color::Rgb(161, 98, 7),
            red: Color::Rgb(185, 28, 28),
            panel: Color::Rgb(229, 231, 235),
            key_off: Color::Rgb(209, 213, 219),
            key_pressed: Color::Rgb(34, 197, 94),
            key_held: Color::Rgb(59, 130, 246),
            key_double: Color::Rgb(234, 179, 8),
            key_combo: Color::Rgb(168, 85, 247),
            key_text: Color::Rgb(31, 41, 55),
            key_text_on: Color::Rgb(255, 255, 255),
        }
    }

    /// Tile background and label colors for a key status
    pub fn key_colors(&self, status: KeyStatus) -> (Color, Color) {
        match status {
            KeyStatus::Simultaneous => (self.key_combo, self.key_text_on),
            KeyStatus::DoublePressed => (self.key_double, self.key_text_on),
            KeyStatus::Held => (self.key_held, self.key_text_on),
            KeyStatus::Pressed => (self.key_pressed, self.key_text_on),
            KeyStatus::Untouched => (self.key_off, self.key_text),
        }
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self::dark()
    }
}

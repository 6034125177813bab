//! Keyboard form factors and their display grids
//!
//! Each layout declares the number of keys a full test expects and an ordered
//! grid of tile labels. Empty labels are spacer cells. The grids repeat some
//! tiles (`shift`, `alt`, `ctrl`) because both physical keys share one
//! identifier.

use super::KeyId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Selectable keyboard form factor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyboardLayout {
    /// Full-size keyboard with function row and navigation cluster
    #[default]
    #[serde(rename = "100%")]
    Full,
    /// Tenkeyless
    #[serde(rename = "TKL")]
    Tkl,
    #[serde(rename = "75%")]
    SeventyFive,
    #[serde(rename = "65%")]
    SixtyFive,
    #[serde(rename = "60%")]
    Sixty,
}

/// Relative width of a key tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySize {
    Normal,
    Wide,
    ExtraWide,
    Tall,
    Huge,
}

impl KeySize {
    /// Width of the tile in terminal cells
    pub fn cells(&self) -> u16 {
        match self {
            Self::Normal | Self::Tall => 5,
            Self::Wide => 8,
            Self::ExtraWide => 10,
            Self::Huge => 24,
        }
    }
}

/// Size of the tile for a grid label
pub fn key_size(label: &str) -> KeySize {
    match label {
        "backspace" | "tab" | "\\" | "caps" | "enter" | "ctrl" | "alt" => KeySize::Wide,
        "shift" => KeySize::ExtraWide,
        "space" => KeySize::Huge,
        _ => KeySize::Normal,
    }
}

const FUNCTION_ROW: &[&str] = &[
    "esc", "f1", "f2", "f3", "f4", "f5", "f6", "f7", "f8", "f9", "f10", "f11", "f12", "prtsc",
    "scrlk", "pause",
];
const NUMBER_ROW: &[&str] = &[
    "`", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "-", "=", "backspace",
];
const TOP_ROW: &[&str] = &[
    "tab", "q", "w", "e", "r", "t", "y", "u", "i", "o", "p", "[", "]", "\\",
];
const HOME_ROW: &[&str] = &[
    "caps", "a", "s", "d", "f", "g", "h", "j", "k", "l", ";", "'", "enter",
];
const SHIFT_ROW: &[&str] = &[
    "shift", "z", "x", "c", "v", "b", "n", "m", ",", ".", "/", "shift",
];
const FULL_BOTTOM_ROW: &[&str] = &["ctrl", "win", "alt", "space", "alt", "fn", "menu", "ctrl"];
const NAV_UPPER: &[&str] = &["", "", "", "ins", "home", "pgup"];
const NAV_LOWER: &[&str] = &["", "", "", "del", "end", "pgdn"];
const ARROWS_UPPER: &[&str] = &["", "", "", "\u{2190}", "\u{2191}", "\u{2192}"];
const ARROWS_LOWER: &[&str] = &["", "", "", "", "\u{2193}", ""];
const FULL_GRID: &[&[&str]] = &[
    FUNCTION_ROW,
    NUMBER_ROW,
    TOP_ROW,
    HOME_ROW,
    SHIFT_ROW,
    FULL_BOTTOM_ROW,
    NAV_UPPER,
    NAV_LOWER,
    ARROWS_UPPER,
    ARROWS_LOWER,
];
const SEVENTY_FIVE_GRID: &[&[&str]] = &[
    &[
        "esc", "f1", "f2", "f3", "f4", "f5", "f6", "f7", "f8", "f9", "f10", "f11", "f12", "del",
    ],
    NUMBER_ROW,
    TOP_ROW,
    HOME_ROW,
    SHIFT_ROW,
    &["ctrl", "win", "alt", "space", "alt", "fn", "ctrl"],
    ARROWS_UPPER,
    ARROWS_LOWER,
];
const SIXTY_FIVE_GRID: &[&[&str]] = &[
    &[
        "`", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "-", "=", "backspace", "del",
    ],
    &[
        "tab", "q", "w", "e", "r", "t", "y", "u", "i", "o", "p", "[", "]", "\\", "pgup",
    ],
    &[
        "caps", "a", "s", "d", "f", "g", "h", "j", "k", "l", ";", "'", "enter", "pgdn",
    ],
    &[
        "shift", "z", "x", "c", "v", "b", "n", "m", ",", ".", "/", "shift", "\u{2191}",
    ],
    &[
        "ctrl", "win", "alt", "space", "alt", "fn", "ctrl", "\u{2190}", "\u{2193}", "\u{2192}",
    ],
];
const SIXTY_GRID: &[&[&str]] = &[
    NUMBER_ROW,
    TOP_ROW,
    HOME_ROW,
    SHIFT_ROW,
    &["ctrl", "win", "alt", "space", "alt", "fn", "ctrl"],
];

impl KeyboardLayout {
    /// Display name for the layout
    pub fn name(&self) -> &'static str {
        match self {
            Self::Full => "100%",
            Self::Tkl => "TKL",
            Self::SeventyFive => "75%",
            Self::SixtyFive => "65%",
            Self::Sixty => "60%",
        }
    }

    /// Number of distinct keys that must be pressed to complete the test
    pub fn expected_keys(&self) -> usize {
        match self {
            Self::Full => 101,
            Self::Tkl => 87,
            Self::SeventyFive => 84,
            Self::SixtyFive => 68,
            Self::Sixty => 61,
        }
    }

    pub fn all() -> &'static [KeyboardLayout] {
        &[
            Self::Full,
            Self::Tkl,
            Self::SeventyFive,
            Self::SixtyFive,
            Self::Sixty,
        ]
    }

    /// Look up a layout by its display name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|l| l.name().eq_ignore_ascii_case(name.trim()))
    }

    /// The next layout in selection order, wrapping around
    pub fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|l| l == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    /// Display grid, top row first
    pub fn rows(&self) -> &'static [&'static [&'static str]] {
        match self {
            // TKL is drawn with the full-size grid
            Self::Full | Self::Tkl => FULL_GRID,
            Self::SeventyFive => SEVENTY_FIVE_GRID,
            Self::SixtyFive => SIXTY_FIVE_GRID,
            Self::Sixty => SIXTY_GRID,
        }
    }

    /// Distinct key identifiers that have a tile in the grid
    pub fn grid_keys(&self) -> BTreeSet<KeyId> {
        self.rows()
            .iter()
            .flat_map(|row| row.iter())
            .filter_map(|label| KeyId::parse(label))
            .collect()
    }

    /// Whether the grid has a tile for `key`
    pub fn contains(&self, key: &KeyId) -> bool {
        self.rows()
            .iter()
            .flat_map(|row| row.iter())
            .any(|label| *label == key.as_str())
    }
}

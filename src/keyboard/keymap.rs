//! Key identifiers and normalization of host key names

use crossterm::event::{KeyCode as CtKeyCode, ModifierKeyCode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized, lower-case name of one physical key (e.g. `a`, `shift`, `f1`, `←`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyId(String);

impl KeyId {
    /// Normalize a raw key name supplied by the host.
    ///
    /// The name is lower-cased and common browser/terminal aliases are folded
    /// onto the labels used by the layout grids. Returns `None` for an empty name.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        if raw == " " {
            return Some(Self::named("space"));
        }

        let lower = raw.trim().to_lowercase();
        if lower.is_empty() {
            return None;
        }

        let canonical = match lower.as_str() {
            "spacebar" => "space",
            "control" | "lctrl" | "rctrl" => "ctrl",
            "escape" => "esc",
            "capslock" => "caps",
            "meta" | "super" | "os" | "cmd" => "win",
            "arrowleft" | "left" => "\u{2190}",
            "arrowup" | "up" => "\u{2191}",
            "arrowright" | "right" => "\u{2192}",
            "arrowdown" | "down" => "\u{2193}",
            "pageup" => "pgup",
            "pagedown" => "pgdn",
            "insert" => "ins",
            "delete" => "del",
            "printscreen" => "prtsc",
            "scrolllock" => "scrlk",
            "contextmenu" => "menu",
            "return" => "enter",
            other => return Some(Self(fold_char_key(other))),
        };
        Some(Self::named(canonical))
    }

    /// Map a terminal key code onto its identifier
    pub fn from_crossterm(code: CtKeyCode) -> Option<Self> {
        let name = match code {
            CtKeyCode::Char(c) => return Self::from_char(c),
            CtKeyCode::Backspace => "backspace",
            CtKeyCode::Enter => "enter",
            CtKeyCode::Left => "\u{2190}",
            CtKeyCode::Up => "\u{2191}",
            CtKeyCode::Right => "\u{2192}",
            CtKeyCode::Down => "\u{2193}",
            CtKeyCode::Home => "home",
            CtKeyCode::End => "end",
            CtKeyCode::PageUp => "pgup",
            CtKeyCode::PageDown => "pgdn",
            CtKeyCode::Tab | CtKeyCode::BackTab => "tab",
            CtKeyCode::Delete => "del",
            CtKeyCode::Insert => "ins",
            CtKeyCode::F(n) => return Some(Self(format!("f{}", n))),
            CtKeyCode::Esc => "esc",
            CtKeyCode::CapsLock => "caps",
            CtKeyCode::ScrollLock => "scrlk",
            CtKeyCode::NumLock => "numlock",
            CtKeyCode::PrintScreen => "prtsc",
            CtKeyCode::Pause => "pause",
            CtKeyCode::Menu => "menu",
            CtKeyCode::Modifier(m) => modifier_name(m),
            CtKeyCode::Null | CtKeyCode::KeypadBegin | CtKeyCode::Media(_) => return None,
        };
        Some(Self::named(name))
    }

    /// Identifier of the key that produces `c` on a US keyboard
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(Self::named("space")),
            '\n' | '\r' => Some(Self::named("enter")),
            '\t' => Some(Self::named("tab")),
            c if c.is_control() => None,
            c => Some(Self(fold_char_key(&c.to_string()))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn named(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for KeyId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn modifier_name(m: ModifierKeyCode) -> &'static str {
    use ModifierKeyCode as M;
    match m {
        M::LeftShift | M::RightShift => "shift",
        M::LeftControl | M::RightControl => "ctrl",
        M::LeftAlt | M::RightAlt | M::IsoLevel3Shift | M::IsoLevel5Shift => "alt",
        M::LeftSuper | M::RightSuper | M::LeftMeta | M::RightMeta | M::LeftHyper
        | M::RightHyper => "win",
    }
}

/// US layout pairs of (base key, shifted symbol)
const SHIFTED_SYMBOLS: [(char, char); 21] = [
    ('`', '~'),
    ('1', '!'),
    ('2', '@'),
    ('3', '#'),
    ('4', '$'),
    ('5', '%'),
    ('6', '^'),
    ('7', '&'),
    ('8', '*'),
    ('9', '('),
    ('0', ')'),
    ('-', '_'),
    ('=', '+'),
    ('[', '{'),
    (']', '}'),
    ('\\', '|'),
    (';', ':'),
    ('\'', '"'),
    (',', '<'),
    ('.', '>'),
    ('/', '?'),
];

/// Character a US keyboard produces for `c` with Shift held
pub fn shifted_char(c: char) -> char {
    if let Some(&(_, shifted)) = SHIFTED_SYMBOLS.iter().find(|(base, _)| *base == c) {
        return shifted;
    }
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Lower-case a single-character key and fold US shifted symbols onto their base key
fn fold_char_key(s: &str) -> String {
    let mut chars = s.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return s.to_string();
    };

    match SHIFTED_SYMBOLS.iter().find(|(_, shifted)| *shifted == c) {
        Some(&(base, _)) => base.to_string(),
        None => c.to_lowercase().collect(),
    }
}

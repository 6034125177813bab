//! Visual keyboard layout rendering

use super::ThemeColors;
use crate::keyboard::{key_size, KeyId, KeyStatus, KeyboardState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

/// Width of a spacer cell in the grid
const SPACER_WIDTH: u16 = 4;
/// Gap between tiles
const GAP: u16 = 1;

/// Visual representation of the selected layout's grid
pub struct KeyboardVisual<'a> {
    keyboard_state: &'a KeyboardState,
    colors: ThemeColors,
}

impl<'a> KeyboardVisual<'a> {
    pub fn new(keyboard_state: &'a KeyboardState, colors: ThemeColors) -> Self {
        Self {
            keyboard_state,
            colors,
        }
    }

    /// Rows needed to draw the grid
    pub fn height(&self) -> u16 {
        self.keyboard_state.layout().rows().len() as u16
    }

    fn tile_width(label: &str) -> u16 {
        if label.is_empty() {
            SPACER_WIDTH
        } else {
            key_size(label).cells()
        }
    }

    fn row_width(row: &[&str]) -> u16 {
        let tiles: u16 = row.iter().map(|l| Self::tile_width(l)).sum();
        tiles + GAP * (row.len() as u16).saturating_sub(1)
    }

    fn render_key(&self, buf: &mut Buffer, x: u16, y: u16, label: &str, w: u16) {
        let status = KeyId::parse(label)
            .map(|key| self.keyboard_state.key_status(&key))
            .unwrap_or(KeyStatus::Untouched);
        let (bg, fg) = self.colors.key_colors(status);
        let mut style = Style::default().fg(fg).bg(bg);
        if status != KeyStatus::Untouched {
            style = style.add_modifier(Modifier::BOLD);
        }
        let text = fit_label(short_label(label), w as usize);
        buf.set_string(x, y, format!("{:^w$}", text, w = w as usize), style);
    }
}

/// Abbreviation used on the tile for long labels
fn short_label(label: &str) -> &str {
    match label {
        "backspace" => "bksp",
        "space" => "",
        other => other,
    }
}

fn fit_label(label: &str, width: usize) -> String {
    label.chars().take(width).collect()
}

impl<'a> Widget for KeyboardVisual<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = self.keyboard_state.layout().rows();
        let widest = rows.iter().map(|r| Self::row_width(r)).max().unwrap_or(0);

        if area.width < widest || area.height < 5 {
            buf.set_string(
                area.x,
                area.y,
                "\u{2328} Window too small",
                Style::default().fg(self.colors.dim),
            );
            return;
        }

        for (i, row) in rows.iter().enumerate() {
            let y = area.y + i as u16;
            if y >= area.bottom() {
                break;
            }

            let offset = (area.width - Self::row_width(row)) / 2;
            let mut x = area.x + offset;
            for label in row.iter() {
                let w = Self::tile_width(label);
                if x + w > area.right() {
                    break;
                }
                if !label.is_empty() {
                    self.render_key(buf, x, y, label, w);
                }
                x += w + GAP;
            }
        }
    }
}

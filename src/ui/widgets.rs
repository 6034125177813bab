//! Custom TUI widgets

use super::ThemeColors;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Widget, Wrap},
};

/// One labelled statistic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatBadge {
    pub title: &'static str,
    pub value: String,
}

impl StatBadge {
    pub fn new(title: &'static str, value: impl Into<String>) -> Self {
        Self {
            title,
            value: value.into(),
        }
    }
}

/// Row of statistic badges
pub struct StatBadges<'a> {
    badges: &'a [StatBadge],
    colors: ThemeColors,
}

impl<'a> StatBadges<'a> {
    pub fn new(badges: &'a [StatBadge], colors: ThemeColors) -> Self {
        Self { badges, colors }
    }
}

impl<'a> Widget for StatBadges<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.badges.is_empty() {
            return;
        }
        let constraints = vec![Constraint::Ratio(1, self.badges.len() as u32); self.badges.len()];
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (badge, cell) in self.badges.iter().zip(cells.iter()) {
            if cell.width < 4 || cell.height < 3 {
                continue;
            }
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.colors.dim))
                .title(Span::styled(
                    format!(" {} ", badge.title),
                    Style::default().fg(self.colors.dim),
                ));
            let inner = block.inner(*cell);
            block.render(*cell, buf);
            buf.set_string(
                inner.x + 1,
                inner.y,
                &badge.value,
                Style::default()
                    .fg(self.colors.fg)
                    .add_modifier(Modifier::BOLD),
            );
        }
    }
}

/// Most recently pressed key
pub struct LastPressed<'a> {
    key: Option<&'a str>,
    colors: ThemeColors,
}

impl<'a> LastPressed<'a> {
    pub fn new(key: Option<&'a str>, colors: ThemeColors) -> Self {
        Self { key, colors }
    }
}

impl<'a> Widget for LastPressed<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Last Pressed ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.colors.dim));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 2 || inner.height == 0 {
            return;
        }

        let label = self.key.unwrap_or("None");
        buf.set_string(
            inner.x + 1,
            inner.y,
            format!(" {} ", label),
            Style::default()
                .fg(self.colors.fg)
                .bg(self.colors.panel)
                .add_modifier(Modifier::BOLD),
        );
    }
}

/// Progress toward pressing every key of the layout
pub struct ProgressPanel {
    pressed: usize,
    expected: usize,
    colors: ThemeColors,
}

impl ProgressPanel {
    pub fn new(pressed: usize, expected: usize, colors: ThemeColors) -> Self {
        Self {
            pressed,
            expected,
            colors,
        }
    }

    pub fn label(&self) -> String {
        format!("{} / {} keys pressed", self.pressed, self.expected)
    }
}

impl Widget for ProgressPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ratio = if self.expected == 0 {
            1.0
        } else {
            (self.pressed as f64 / self.expected as f64).min(1.0)
        };
        let label = self.label();
        Gauge::default()
            .block(
                Block::default()
                    .title(" Progress ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.colors.dim)),
            )
            .gauge_style(Style::default().fg(self.colors.accent).bg(self.colors.panel))
            .ratio(ratio)
            .label(label)
            .render(area, buf);
    }
}

/// Free-text entry panel
pub struct TextPanel<'a> {
    text: &'a str,
    chars: usize,
    errors: usize,
    colors: ThemeColors,
}

impl<'a> TextPanel<'a> {
    pub fn new(text: &'a str, chars: usize, errors: usize, colors: ThemeColors) -> Self {
        Self {
            text,
            chars,
            errors,
            colors,
        }
    }
}

impl<'a> Widget for TextPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Text Input ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.colors.accent));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(2)])
            .split(inner);

        let body = if self.text.is_empty() {
            Paragraph::new(Span::styled(
                "Start typing here to test your keyboard...",
                Style::default().fg(self.colors.dim),
            ))
        } else {
            Paragraph::new(format!("{}\u{2581}", self.text))
                .style(Style::default().fg(self.colors.fg))
        };
        body.wrap(Wrap { trim: false }).render(chunks[0], buf);

        let footer = vec![
            Line::from(Span::styled(
                format!("Characters typed: {}", self.chars),
                Style::default().fg(self.colors.dim),
            )),
            Line::from(Span::styled(
                format!("Errors: {}", self.errors),
                Style::default().fg(if self.errors > 0 {
                    self.colors.yellow
                } else {
                    self.colors.dim
                }),
            )),
        ];
        Paragraph::new(footer).render(chunks[1], buf);
    }
}

/// Overlay shown once every key of the layout has been pressed
pub struct CelebrationPopup<'a> {
    layout: &'a str,
    colors: ThemeColors,
}

impl<'a> CelebrationPopup<'a> {
    pub fn new(layout: &'a str, colors: ThemeColors) -> Self {
        Self { layout, colors }
    }

    /// Centered rectangle for the popup inside `area`
    pub fn area(area: Rect) -> Rect {
        let width = area.width.min(60);
        let height = area.height.min(9);
        Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        )
    }
}

impl<'a> Widget for CelebrationPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = Self::area(area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" \u{2728} Congratulations! ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.colors.yellow))
            .style(Style::default().bg(self.colors.panel));

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "You've pressed all the keys on the {} keyboard!",
                    self.layout
                ),
                Style::default().fg(self.colors.fg),
            ))
            .centered(),
            Line::from("You're a true keyboard master!").centered(),
            Line::from(""),
            Line::from(Span::styled(
                " Keyboard Virtuoso ",
                Style::default()
                    .fg(self.colors.green)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            ))
            .centered(),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key to continue testing",
                Style::default().fg(self.colors.dim),
            ))
            .centered(),
        ];

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(popup, buf);
    }
}

/// Status bar widget
pub struct StatusBar<'a> {
    state: &'a str,
    layout: &'a str,
    elapsed: &'a str,
    message: Option<&'a str>,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a str, layout: &'a str, elapsed: &'a str) -> Self {
        Self {
            state,
            layout,
            elapsed,
            message: None,
        }
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

/// Control chords listed in the status bar
pub const CONTROL_HINTS: &str = "^T tab  ^L layout  ^R reset  ^E export  ^Q quit";

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg_style = Style::default()
            .bg(Color::DarkGray)
            .fg(Color::White);
        for x in area.left()..area.right() {
            buf.set_string(x, area.y, " ", bg_style);
        }

        let left = format!(" {} | {} | {} ", self.state, self.layout, self.elapsed);
        buf.set_string(area.x, area.y, &left, bg_style.add_modifier(Modifier::BOLD));

        let center = self.message.unwrap_or(CONTROL_HINTS);
        let center_style = if self.message.is_some() {
            bg_style.fg(Color::Yellow)
        } else {
            bg_style
        };
        let center_x = area.x + (area.width / 2).saturating_sub(center.chars().count() as u16 / 2);
        let center_x = center_x.max(area.x + left.len() as u16);
        buf.set_string(center_x, area.y, center, center_style);
    }
}

/// Tab bar widget
pub struct TabBar<'a> {
    tabs: &'a [&'a str],
    selected: usize,
}

impl<'a> TabBar<'a> {
    pub fn new(tabs: &'a [&'a str], selected: usize) -> Self {
        Self { tabs, selected }
    }
}

impl<'a> Widget for TabBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut x = area.x;

        for (i, tab) in self.tabs.iter().enumerate() {
            let style = if i == self.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            };

            let label = format!(" {} ", tab);
            let width = label.chars().count() as u16;

            if x + width <= area.right() {
                buf.set_string(x, area.y, &label, style);
                x += width;

                if i < self.tabs.len() - 1 && x < area.right() {
                    buf.set_string(x, area.y, "|", Style::default().fg(Color::DarkGray));
                    x += 1;
                }
            }
        }

        for fill_x in x..area.right() {
            buf.set_string(fill_x, area.y, " ", Style::default().bg(Color::DarkGray));
        }
    }
}

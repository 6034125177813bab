//! Main application state and logic

use crate::config::Config;
use crate::keyboard::keymap::shifted_char;
use crate::keyboard::{KeyEvent, KeyEventType, KeyId, KeyboardLayout, KeyboardState, PressOutcome};
use crate::report::{ReportError, StatsReport};
use crate::typing::{compute_stats, EntryMode, StatsSnapshot, StatsTicker, TextEntry};
use crossterm::event::{KeyCode as CtKeyCode, KeyEvent as CtKeyEvent, KeyEventKind, KeyModifiers};
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::StatBadge;

/// Current tab in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    Visual,
    Text,
}

impl AppView {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Visual => "Visual Keyboard",
            Self::Text => "Text Input",
        }
    }

    pub fn all() -> &'static [AppView] {
        &[Self::Visual, Self::Text]
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Visual => 0,
            Self::Text => 1,
        }
    }

    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Visual,
            _ => Self::Text,
        }
    }

    pub fn mode(&self) -> EntryMode {
        match self {
            Self::Visual => EntryMode::Visual,
            Self::Text => EntryMode::Text,
        }
    }
}

/// Application running state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Running,
    Quitting,
}

/// Application commands bound to Ctrl chords, so plain keys stay testable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    SwitchTab,
    NextLayout,
    Reset,
    Export,
    Quit,
}

impl Control {
    /// Command for a terminal key event, if it is one
    pub fn from_key(event: &CtKeyEvent) -> Option<Self> {
        if event.kind != KeyEventKind::Press || !event.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }
        match event.code {
            CtKeyCode::Char(c) => match c.to_ascii_lowercase() {
                't' => Some(Self::SwitchTab),
                'l' => Some(Self::NextLayout),
                'r' => Some(Self::Reset),
                'e' => Some(Self::Export),
                'q' | 'c' => Some(Self::Quit),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Character a key event types into the text field.
///
/// Terminals reporting all keys as escape codes may deliver the unshifted
/// key with SHIFT still set.
fn typed_char(event: &CtKeyEvent) -> Option<char> {
    if event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
    {
        return None;
    }
    match event.code {
        CtKeyCode::Char(c) if event.modifiers.contains(KeyModifiers::SHIFT) => {
            Some(shifted_char(c))
        }
        CtKeyCode::Char(c) => Some(c),
        CtKeyCode::Enter => Some('\n'),
        _ => None,
    }
}

/// Main application
pub struct App {
    /// Current tab
    pub view: AppView,
    /// Application state
    pub state: AppState,
    /// Configuration
    pub config: Config,
    /// Keystroke classifier
    pub keyboard_state: KeyboardState,
    /// Free-text field
    pub text: TextEntry,
    /// Last computed elapsed/WPM/accuracy
    pub stats: StatsSnapshot,
    ticker: StatsTicker,
    /// Completion overlay visible
    pub show_celebration: bool,
    /// Last status message
    pub status_message: Option<String>,
    /// Status message timestamp
    pub status_time: Option<Instant>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let keyboard_state =
            KeyboardState::with_window(config.ui.default_layout, config.double_press_window());
        let ticker = StatsTicker::new(config.tick_interval());
        Self {
            view: AppView::Visual,
            state: AppState::Running,
            config,
            keyboard_state,
            text: TextEntry::new(),
            stats: StatsSnapshot::default(),
            ticker,
            show_celebration: false,
            status_message: None,
            status_time: None,
        }
    }

    pub fn layout(&self) -> KeyboardLayout {
        self.keyboard_state.layout()
    }

    /// Process a normalized keyboard event
    pub fn process_event(&mut self, event: &KeyEvent) {
        match event.event_type {
            KeyEventType::Press => {
                self.key_down(event.key.clone(), event.timestamp);
            }
            KeyEventType::Release => {
                self.key_up(&event.key);
            }
        }
    }

    /// Feed a key-down through the classifier
    pub fn key_down(&mut self, key: KeyId, now: Instant) -> PressOutcome {
        if self.state != AppState::Running {
            return PressOutcome::default();
        }

        let outcome = self.keyboard_state.press(key, now);
        if outcome.just_completed {
            self.show_celebration = true;
            self.set_status(format!(
                "All {} keys pressed!",
                self.layout().expected_keys()
            ));
        } else if self.show_celebration {
            self.dismiss_celebration();
        }
        outcome
    }

    pub fn key_up(&mut self, key: &KeyId) {
        if self.state != AppState::Running {
            return;
        }
        self.keyboard_state.release(key);
    }

    /// Replace the text buffer, replaying newly typed characters as presses.
    ///
    /// Returns the replayed keys.
    pub fn text_changed(&mut self, new_text: impl Into<String>, now: Instant) -> Vec<KeyId> {
        if self.state != AppState::Running {
            return Vec::new();
        }
        let typed = self.text.update(new_text);
        let keys: Vec<KeyId> = typed.into_iter().filter_map(KeyId::from_char).collect();
        for key in &keys {
            self.key_down(key.clone(), now);
        }
        keys
    }

    pub fn type_char(&mut self, c: char, now: Instant) -> Vec<KeyId> {
        let next = self.text.with_char(c);
        self.text_changed(next, now)
    }

    pub fn backspace(&mut self, now: Instant) {
        let next = self.text.without_last();
        self.text_changed(next, now);
    }

    /// Route a terminal key event to the text field.
    ///
    /// Returns `true` when the event was consumed as typed text; the caller
    /// should then not forward it to the key listener. Backspace edits the
    /// buffer but is left for the listener so it still counts as a key.
    pub fn handle_text_key(
        &mut self,
        event: &CtKeyEvent,
        reports_releases: bool,
        now: Instant,
    ) -> bool {
        if self.view != AppView::Text || event.kind == KeyEventKind::Release {
            return false;
        }
        match typed_char(event) {
            Some(c) => {
                let replayed = self.type_char(c, now);
                if !reports_releases {
                    for key in &replayed {
                        self.key_up(key);
                    }
                }
                true
            }
            None => {
                if event.code == CtKeyCode::Backspace {
                    self.backspace(now);
                }
                false
            }
        }
    }

    /// Refresh statistics if the ticker is due. Returns whether they changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let start = self.keyboard_state.session_start();
        if !self.ticker.due(now, start) {
            return false;
        }
        self.refresh_stats(now);
        true
    }

    /// Recompute statistics immediately
    pub fn refresh_stats(&mut self, now: Instant) {
        self.stats = compute_stats(
            self.keyboard_state.session_start(),
            now,
            &self.text,
            self.view.mode(),
            &self.stats,
        );
    }

    pub fn run_control(&mut self, control: Control) {
        match control {
            Control::SwitchTab => self.next_view(),
            Control::NextLayout => self.next_layout(),
            Control::Reset => self.reset(),
            Control::Export => {
                if let Err(e) = self.export_stats() {
                    log::error!("export failed: {}", e);
                    self.set_status(format!("Export failed: {}", e));
                }
            }
            Control::Quit => self.quit(),
        }
    }

    /// Clear the whole session
    pub fn reset(&mut self) {
        self.keyboard_state.reset();
        self.clear_session();
        self.set_status("Tester reset".to_string());
    }

    /// Select a layout; always starts a fresh session
    pub fn select_layout(&mut self, layout: KeyboardLayout) {
        self.keyboard_state.set_layout(layout);
        self.clear_session();
        self.set_status(format!(
            "Layout {} ({} keys)",
            layout.name(),
            layout.expected_keys()
        ));
    }

    pub fn next_layout(&mut self) {
        self.select_layout(self.layout().next());
    }

    fn clear_session(&mut self) {
        self.text.clear();
        self.stats = StatsSnapshot::default();
        self.ticker.stop();
        self.show_celebration = false;
    }

    /// Switch to the next tab
    pub fn next_view(&mut self) {
        let next = (self.view.index() + 1) % AppView::all().len();
        self.view = AppView::from_index(next);
    }

    /// Switch to the previous tab
    pub fn prev_view(&mut self) {
        let current = self.view.index();
        let prev = if current == 0 {
            AppView::all().len() - 1
        } else {
            current - 1
        };
        self.view = AppView::from_index(prev);
    }

    pub fn dismiss_celebration(&mut self) {
        self.show_celebration = false;
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.state = AppState::Quitting;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_time = Some(Instant::now());
    }

    /// Get status message if still within the configured display time
    pub fn get_status(&self) -> Option<&str> {
        match (&self.status_message, self.status_time) {
            (Some(msg), Some(time)) if time.elapsed() < self.config.status_duration() => {
                Some(msg)
            }
            _ => None,
        }
    }

    /// Badges for the current tab
    pub fn badges(&self) -> Vec<StatBadge> {
        let mut badges = vec![
            StatBadge::new("Keys Pressed", self.keyboard_state.total_presses().to_string()),
            StatBadge::new(
                "Unique Keys",
                self.keyboard_state.pressed_keys().len().to_string(),
            ),
            StatBadge::new(
                "Double Pressed",
                self.keyboard_state.double_pressed_keys().len().to_string(),
            ),
            StatBadge::new(
                "Simultaneous",
                self.keyboard_state.combinations().len().to_string(),
            ),
        ];
        if self.view == AppView::Text {
            badges.push(StatBadge::new(
                "Time",
                format!("{}s", self.stats.elapsed_secs),
            ));
            badges.push(StatBadge::new("WPM", self.stats.wpm_display()));
            badges.push(StatBadge::new(
                "Accuracy",
                format!("{}%", self.stats.accuracy),
            ));
        }
        badges
    }

    /// Get elapsed time formatted
    pub fn elapsed_formatted(&self) -> String {
        let secs = self.stats.elapsed_secs;
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    /// Build the export report
    pub fn generate_report(&self) -> StatsReport {
        StatsReport::new(&self.keyboard_state, &self.stats)
    }

    /// Export stats to the configured file
    pub fn export_stats(&mut self) -> Result<PathBuf, ReportError> {
        let path = self.config.export.path();
        self.export_stats_to(&path)?;
        Ok(path)
    }

    /// Export stats to a specific path
    pub fn export_stats_to(&mut self, path: &Path) -> Result<(), ReportError> {
        self.generate_report().export_json(path)?;
        self.set_status(format!("Exported to {}", path.display()));
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

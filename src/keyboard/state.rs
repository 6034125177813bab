//! Keystroke classification and completion tracking

use super::{KeyId, KeyboardLayout};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::time::{Duration, Instant};

/// Presses of the same key closer together than this count as a double press
pub const DEFAULT_DOUBLE_PRESS_WINDOW: Duration = Duration::from_millis(200);

/// A key pressed while another key was still held
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Combination {
    /// The key that was already down
    pub held: KeyId,
    /// The key pressed on top of it
    pub pressed: KeyId,
}

impl Combination {
    pub fn involves(&self, key: &KeyId) -> bool {
        self.held == *key || self.pressed == *key
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.held, self.pressed)
    }
}

/// How a single press was classified
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PressOutcome {
    /// First press of this key since the last reset
    pub first_press: bool,
    /// Pressed again inside the double-press window
    pub double_press: bool,
    /// Combinations with already-held keys that were not recorded before
    pub new_combinations: usize,
    /// This press made the pressed-key count reach the layout total
    pub just_completed: bool,
}

/// Session progress for the selected layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestPhase {
    /// Nothing pressed since the last reset
    Idle,
    /// Session running, layout not yet complete
    Active,
    /// Every expected key has been pressed
    Complete,
}

/// Display status of one key, highest precedence first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    Simultaneous,
    DoublePressed,
    Held,
    Pressed,
    Untouched,
}

/// Tracks pressed, held, double-pressed and combined keys for one session
#[derive(Debug, Clone)]
pub struct KeyboardState {
    layout: KeyboardLayout,
    double_press_window: Duration,
    /// Keys pressed at least once
    pressed: BTreeSet<KeyId>,
    /// Keys currently down
    held: BTreeSet<KeyId>,
    /// Keys that were ever pressed twice inside the window
    double_pressed: BTreeSet<KeyId>,
    /// Every held+pressed pair seen
    combinations: BTreeSet<Combination>,
    last_press: HashMap<KeyId, Instant>,
    last_pressed: Option<KeyId>,
    total_presses: u64,
    session_start: Option<Instant>,
    completed: bool,
}

impl KeyboardState {
    pub fn new(layout: KeyboardLayout) -> Self {
        Self::with_window(layout, DEFAULT_DOUBLE_PRESS_WINDOW)
    }

    pub fn with_window(layout: KeyboardLayout, double_press_window: Duration) -> Self {
        Self {
            layout,
            double_press_window,
            pressed: BTreeSet::new(),
            held: BTreeSet::new(),
            double_pressed: BTreeSet::new(),
            combinations: BTreeSet::new(),
            last_press: HashMap::new(),
            last_pressed: None,
            total_presses: 0,
            session_start: None,
            completed: false,
        }
    }

    /// Record a key press at `at`
    pub fn press(&mut self, key: KeyId, at: Instant) -> PressOutcome {
        if self.session_start.is_none() {
            log::info!("session started on '{}'", key);
            self.session_start = Some(at);
        }

        // Combinations are formed against keys held before this press
        let mut new_combinations = 0;
        for held in &self.held {
            let combo = Combination {
                held: held.clone(),
                pressed: key.clone(),
            };
            if self.combinations.insert(combo) {
                new_combinations += 1;
            }
        }

        let first_press = self.pressed.insert(key.clone());
        self.held.insert(key.clone());
        self.last_pressed = Some(key.clone());
        self.total_presses += 1;

        let double_press = self
            .last_press
            .get(&key)
            .is_some_and(|prev| at.saturating_duration_since(*prev) < self.double_press_window);
        if double_press {
            self.double_pressed.insert(key.clone());
        }
        self.last_press.insert(key.clone(), at);

        let just_completed =
            !self.completed && self.pressed.len() >= self.layout.expected_keys();
        if just_completed {
            self.completed = true;
            log::info!(
                "all {} keys of the {} layout pressed",
                self.layout.expected_keys(),
                self.layout.name()
            );
        }

        log::debug!(
            "press '{}': first={} double={} combos={}",
            key,
            first_press,
            double_press,
            new_combinations
        );

        PressOutcome {
            first_press,
            double_press,
            new_combinations,
            just_completed,
        }
    }

    /// Record a key release. Returns whether the key was held.
    pub fn release(&mut self, key: &KeyId) -> bool {
        self.held.remove(key)
    }

    /// Clear the session
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.held.clear();
        self.double_pressed.clear();
        self.combinations.clear();
        self.last_press.clear();
        self.last_pressed = None;
        self.total_presses = 0;
        self.session_start = None;
        self.completed = false;
        log::info!("keyboard state reset ({} layout)", self.layout.name());
    }

    /// Switch layout. Always starts a fresh session.
    pub fn set_layout(&mut self, layout: KeyboardLayout) {
        self.layout = layout;
        self.reset();
    }

    pub fn layout(&self) -> KeyboardLayout {
        self.layout
    }

    pub fn double_press_window(&self) -> Duration {
        self.double_press_window
    }

    pub fn pressed_keys(&self) -> &BTreeSet<KeyId> {
        &self.pressed
    }

    pub fn held_keys(&self) -> &BTreeSet<KeyId> {
        &self.held
    }

    pub fn double_pressed_keys(&self) -> &BTreeSet<KeyId> {
        &self.double_pressed
    }

    pub fn combinations(&self) -> &BTreeSet<Combination> {
        &self.combinations
    }

    /// Combination labels in `held+pressed` form
    pub fn combination_labels(&self) -> Vec<String> {
        self.combinations.iter().map(|c| c.to_string()).collect()
    }

    pub fn last_pressed(&self) -> Option<&KeyId> {
        self.last_pressed.as_ref()
    }

    /// Total presses, repeats included
    pub fn total_presses(&self) -> u64 {
        self.total_presses
    }

    pub fn session_start(&self) -> Option<Instant> {
        self.session_start
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn phase(&self) -> TestPhase {
        match (self.session_start, self.completed) {
            (_, true) => TestPhase::Complete,
            (Some(_), false) => TestPhase::Active,
            (None, false) => TestPhase::Idle,
        }
    }

    /// Fraction of the layout's expected keys that were pressed, capped at 1.0
    pub fn progress(&self) -> f64 {
        let expected = self.layout.expected_keys();
        if expected == 0 {
            return 1.0;
        }
        (self.pressed.len() as f64 / expected as f64).min(1.0)
    }

    /// Pressed identifiers with no tile in the current layout
    pub fn keys_outside_layout(&self) -> Vec<&KeyId> {
        self.pressed
            .iter()
            .filter(|k| !self.layout.contains(k))
            .collect()
    }

    pub fn key_status(&self, key: &KeyId) -> KeyStatus {
        if self.combinations.iter().any(|c| c.involves(key)) {
            KeyStatus::Simultaneous
        } else if self.double_pressed.contains(key) {
            KeyStatus::DoublePressed
        } else if self.held.contains(key) {
            KeyStatus::Held
        } else if self.pressed.contains(key) {
            KeyStatus::Pressed
        } else {
            KeyStatus::Untouched
        }
    }
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new(KeyboardLayout::default())
    }
}

//! Elapsed time, words-per-minute and accuracy

use super::{EntryMode, TextEntry};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Statistics shown in the badges and written to the export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Whole seconds since the first keystroke
    pub elapsed_secs: u64,
    /// `None` while no time has elapsed yet
    pub wpm: Option<u32>,
    /// Percentage, 0..=100
    pub accuracy: u32,
}

impl Default for StatsSnapshot {
    fn default() -> Self {
        Self {
            elapsed_secs: 0,
            wpm: Some(0),
            accuracy: 100,
        }
    }
}

impl StatsSnapshot {
    /// WPM for display, `--` when undefined
    pub fn wpm_display(&self) -> String {
        match self.wpm {
            Some(wpm) => wpm.to_string(),
            None => "--".to_string(),
        }
    }
}

/// Whitespace-delimited, non-empty tokens
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Words per minute, or `None` when `elapsed_secs` is zero
pub fn words_per_minute(words: usize, elapsed_secs: u64) -> Option<u32> {
    if elapsed_secs == 0 {
        return None;
    }
    let minutes = elapsed_secs as f64 / 60.0;
    Some((words as f64 / minutes).round() as u32)
}

/// Accuracy percentage; 100 for an empty buffer, never below 0
pub fn accuracy(errors: usize, len: usize) -> u32 {
    if len == 0 {
        return 100;
    }
    let pct = 100.0 - (errors as f64 / len as f64 * 100.0);
    pct.round().max(0.0) as u32
}

/// Recompute statistics for `now`.
///
/// WPM and accuracy only move while text entry is active; in visual mode the
/// previous values are kept. Without a session clock everything is at its
/// initial value.
pub fn compute_stats(
    session_start: Option<Instant>,
    now: Instant,
    text: &TextEntry,
    mode: EntryMode,
    previous: &StatsSnapshot,
) -> StatsSnapshot {
    let Some(start) = session_start else {
        return StatsSnapshot::default();
    };

    let elapsed_secs = now.saturating_duration_since(start).as_secs();
    match mode {
        EntryMode::Text => StatsSnapshot {
            elapsed_secs,
            wpm: words_per_minute(word_count(text.text()), elapsed_secs),
            accuracy: accuracy(text.errors(), text.len()),
        },
        EntryMode::Visual => StatsSnapshot {
            elapsed_secs,
            ..*previous
        },
    }
}

/// Fixed-cadence trigger for statistics refresh.
///
/// Armed by the session clock and disarmed as soon as the clock is cleared.
/// Missed ticks are skipped rather than replayed.
#[derive(Debug, Clone)]
pub struct StatsTicker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl StatsTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    /// Whether a refresh is due at `now`
    pub fn due(&mut self, now: Instant, session_start: Option<Instant>) -> bool {
        let Some(start) = session_start else {
            self.stop();
            return false;
        };

        let next = *self.next_due.get_or_insert(start + self.interval);
        if now < next {
            return false;
        }

        let mut following = next + self.interval;
        while following <= now {
            following += self.interval;
        }
        self.next_due = Some(following);
        true
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }
}

impl Default for StatsTicker {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

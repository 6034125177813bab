//! Keyboard event types and listener

use super::KeyId;
use crossterm::event::{KeyEvent as CtKeyEvent, KeyEventKind};
use std::sync::mpsc;
use std::time::Instant;

/// Type of keyboard event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventType {
    /// Key was pressed down (auto-repeat included)
    Press,
    /// Key was released
    Release,
}

/// A normalized keyboard event with timing information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// The normalized key identifier
    pub key: KeyId,
    /// Type of event (press/release)
    pub event_type: KeyEventType,
    /// When the event occurred
    pub timestamp: Instant,
}

impl KeyEvent {
    pub fn new(key: KeyId, event_type: KeyEventType, timestamp: Instant) -> Self {
        Self {
            key,
            event_type,
            timestamp,
        }
    }

    pub fn press(key: KeyId, timestamp: Instant) -> Self {
        Self::new(key, KeyEventType::Press, timestamp)
    }

    pub fn release(key: KeyId, timestamp: Instant) -> Self {
        Self::new(key, KeyEventType::Release, timestamp)
    }
}

/// Turns terminal key events into normalized press/release events.
///
/// When the terminal reports release events (keyboard enhancement protocol),
/// presses and releases are forwarded as delivered. Otherwise every press is
/// followed by a synthesized release so no key stays held forever.
pub struct KeyboardListener {
    reports_releases: bool,
    event_tx: mpsc::Sender<KeyEvent>,
}

impl KeyboardListener {
    /// Create a new keyboard listener
    pub fn new(event_tx: mpsc::Sender<KeyEvent>, reports_releases: bool) -> Self {
        Self {
            reports_releases,
            event_tx,
        }
    }

    /// Whether real key-up events are delivered by the terminal
    pub fn reports_releases(&self) -> bool {
        self.reports_releases
    }

    /// Normalize a terminal key event without sending it anywhere
    pub fn translate(&self, event: &CtKeyEvent, now: Instant) -> Vec<KeyEvent> {
        let Some(key) = KeyId::from_crossterm(event.code) else {
            log::trace!("ignoring unmapped key code {:?}", event.code);
            return Vec::new();
        };

        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat if self.reports_releases => {
                vec![KeyEvent::press(key, now)]
            }
            KeyEventKind::Press | KeyEventKind::Repeat => {
                vec![KeyEvent::press(key.clone(), now), KeyEvent::release(key, now)]
            }
            KeyEventKind::Release => vec![KeyEvent::release(key, now)],
        }
    }

    /// Forward a terminal key event to the channel.
    /// Returns the number of events generated
    pub fn handle(&self, event: &CtKeyEvent, now: Instant) -> usize {
        let events = self.translate(event, now);
        let count = events.len();
        for event in events {
            if self.event_tx.send(event).is_err() {
                log::warn!("keyboard event receiver dropped");
                return 0;
            }
        }
        count
    }
}

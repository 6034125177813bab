//! Free-text entry and derived typing statistics

mod stats;
mod text;

pub use stats::{
    accuracy, compute_stats, word_count, words_per_minute, StatsSnapshot, StatsTicker,
};
pub use text::{count_errors, TextEntry};

/// Which input surface is active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntryMode {
    /// Key presses go to the visual keyboard only
    #[default]
    Visual,
    /// Typed characters also fill the text buffer
    Text,
}

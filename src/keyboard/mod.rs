//! Keyboard event handling and state management

mod event;
pub mod keymap;
pub mod layout;
mod state;

pub use event::{KeyEvent, KeyEventType, KeyboardListener};
pub use keymap::KeyId;
pub use layout::{key_size, KeySize, KeyboardLayout};
pub use state::{
    Combination, KeyStatus, KeyboardState, PressOutcome, TestPhase, DEFAULT_DOUBLE_PRESS_WINDOW,
};

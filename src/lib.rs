//! Keyboard Tester - terminal keyboard testing utility
//!
//! Visualizes key presses on a selectable keyboard layout, classifies each
//! keystroke (first press, held, double press, simultaneous combination),
//! tracks typing speed and accuracy in a free-text mode, and celebrates once
//! every key of the layout has been pressed.

pub mod config;
pub mod keyboard;
pub mod report;
pub mod typing;
pub mod ui;

pub use config::Config;

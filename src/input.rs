//! Logical keys
//!
//! The core only understands four keys; the platform layer maps raw
//! keyboard events onto them and drops everything else.

use crate::sim::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    Up,
    Down,
    /// Pause / resume
    Space,
    /// Restart
    Enter,
}

impl InputKey {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(InputKey::Up),
            "ArrowDown" => Some(InputKey::Down),
            " " | "Spacebar" => Some(InputKey::Space),
            "Enter" => Some(InputKey::Enter),
            _ => None,
        }
    }

    /// The semantic event this key publishes
    pub fn event(self) -> Event {
        match self {
            InputKey::Up => Event::KeyUp,
            InputKey::Down => Event::KeyDown,
            InputKey::Space => Event::KeySpace,
            InputKey::Enter => Event::KeyEnter,
        }
    }
}

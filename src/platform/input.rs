//! Backend-neutral input events

use serde::{Deserialize, Serialize};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    /// Shoot / start / acknowledge game over
    Fire,
}

/// Window and keyboard events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Window was closed, the session ends
    Closed,
    KeyPressed(Key),
    KeyReleased(Key),
}

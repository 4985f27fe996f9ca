//! Platform abstraction layer
//!
//! The window backend translates its native events into [`input::InputEvent`]
//! before handing them to `Game::execute_event`.

pub mod input;

pub use input::{InputEvent, Key};

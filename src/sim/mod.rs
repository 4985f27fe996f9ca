//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed tick only, speeds are pre-divided by the framerate
//! - Seeded RNG only
//! - Stable iteration order (pool order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod events;
pub mod game;
pub mod rect;
pub mod state;
pub mod trajectory;

pub use entity::{Direction, Entity, EntityKind, ShellType};
pub use game::{Game, GameSnapshot};
pub use rect::Rect;
pub use state::{GameConfig, GameControl, GameElements, GameStatus, period_elapsed};
pub use trajectory::{InvaderPatrol, update_position};

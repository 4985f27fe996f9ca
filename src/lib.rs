//! Space Invaders - fixed-tick arcade simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, trajectories, events, collisions, game state)
//! - `settings`: Construction parameters and tuning
//! - `audio`: Sound cues handed to the external audio layer
//! - `renderer`: Sprite sink implemented by the external presentation layer
//! - `platform`: Input events delivered by the window backend

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{EntitySizes, GameSettings, SettingsError};
pub use sim::{Game, GameSnapshot, GameStatus};

/// Game configuration constants
pub mod consts {
    /// Default presentation/simulation rate (one tick per frame)
    pub const DEFAULT_FRAMERATE: u32 = 60;

    /// Logical playfield dimensions
    pub const DEFAULT_FIELD_WIDTH: f32 = 1000.0;
    pub const DEFAULT_FIELD_HEIGHT: f32 = 1000.0;
    /// Canvas frame thickness, the player can't move under it
    pub const FRAME_WIDTH: f32 = 10.0;
    /// Border size around the game field
    pub const BORDER_SIZE: f32 = 50.0;
    /// Field width divided by this gives the invader grid step, both axes
    pub const GRID_STEPS_PER_ROW: f32 = 15.0;

    /// Speeds in field units per second, divided by the framerate at setup
    pub const INVADER_SPEED: f32 = 30.0;
    pub const SHIP_SPEED: f32 = 100.0;
    pub const SHELL_SPEED: f32 = 200.0;
    pub const PLAYER_SPEED: f32 = 400.0;

    /// Invader patrol loop, in ticks per leg
    pub const INVADER_STEP_X: u32 = 60;
    pub const INVADER_STEP_Y: u32 = 20;

    /// Invader wave layout
    pub const INVADERS_IN_ROW: usize = 10;
    pub const ROWS_WITH_INVADERS: usize = 6;

    /// Obstacle field layout: groups of blocks, each `OBSTACLES_IN_ROW` wide
    pub const OBSTACLES_IN_ROW: usize = 10;
    pub const OBSTACLE_GROUPS: usize = 4;
    pub const OBSTACLE_ROWS: usize = 5;
    /// Bottom row of the obstacle field, measured from the field bottom
    pub const OBSTACLE_BASE_OFFSET: f32 = 100.0;

    /// Event periods in seconds
    pub const INVADER_SHOT_PERIOD_S: u32 = 1;
    pub const SHIP_SPAWN_PERIOD_S: u32 = 15;
    pub const SHIP_LIFETIME_S: u32 = 10;
    /// Player can shoot this many times per second
    pub const PLAYER_SHOTS_PER_SECOND: u32 = 4;

    /// Score rewards
    pub const INVADER_REWARD: u64 = 10;
    pub const INVADER_SHIP_REWARD: u64 = 250;

    /// Lives
    pub const DEFAULT_LIVES: u32 = 3;
    pub const MAX_LIVES: u32 = 5;
}

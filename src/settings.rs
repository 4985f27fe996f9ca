//! Game construction parameters
//!
//! Everything the presentation layer can tune before a session starts:
//! playfield size, framerate, RNG seed, invader patrol shape and the sprite
//! sizes it measured from its own textures. Loaded from JSON or built in code.

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating settings
#[derive(Debug)]
pub enum SettingsError {
    /// Settings file couldn't be read
    Io(std::io::Error),
    /// Settings file isn't valid JSON for `GameSettings`
    Parse(serde_json::Error),
    /// A value is out of its allowed range
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read settings: {err}"),
            Self::Parse(err) => write!(f, "failed to parse settings: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid setting `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Bounding box sizes of every entity kind, in field units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitySizes {
    pub invader: Vec2,
    pub invader_ship: Vec2,
    pub player: Vec2,
    pub shell: Vec2,
    pub obstacle: Vec2,
}

impl Default for EntitySizes {
    fn default() -> Self {
        Self {
            invader: Vec2::new(48.0, 32.0),
            invader_ship: Vec2::new(64.0, 28.0),
            player: Vec2::new(52.0, 32.0),
            shell: Vec2::new(2.0, 10.0),
            obstacle: Vec2::new(10.0, 10.0),
        }
    }
}

impl EntitySizes {
    fn iter(&self) -> impl Iterator<Item = (&'static str, Vec2)> {
        [
            ("sizes.invader", self.invader),
            ("sizes.invader_ship", self.invader_ship),
            ("sizes.player", self.player),
            ("sizes.shell", self.shell),
            ("sizes.obstacle", self.obstacle),
        ]
        .into_iter()
    }
}

/// Session construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Playfield width in field units
    pub width: f32,
    /// Playfield height in field units
    pub height: f32,
    /// Ticks per second; 0 gives a frozen, neutral configuration
    pub framerate: u32,
    /// RNG seed for enemy fire (None = seed from the wall clock)
    pub seed: Option<u64>,
    /// Ticks per horizontal leg of the invader patrol
    pub invader_step_x: u32,
    /// Ticks per vertical leg of the invader patrol
    pub invader_step_y: u32,
    /// Lives at the start of every session
    pub starting_lives: u32,
    /// Entity bounding box sizes
    pub sizes: EntitySizes,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
            framerate: DEFAULT_FRAMERATE,
            seed: None,
            invader_step_x: INVADER_STEP_X,
            invader_step_y: INVADER_STEP_Y,
            starting_lives: DEFAULT_LIVES,
            sizes: EntitySizes::default(),
        }
    }
}

impl GameSettings {
    /// Settings for a given playfield and framerate, defaults elsewhere
    pub fn new(width: f32, height: f32, framerate: u32) -> Self {
        Self {
            width,
            height,
            framerate,
            ..Self::default()
        }
    }

    /// Same settings with a fixed RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a JSON settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }
        if self.invader_step_x == 0 && self.invader_step_y == 0 {
            return Err(SettingsError::Invalid {
                field: "invader_step_x",
                reason: "invader patrol needs at least one non-empty leg".into(),
            });
        }
        if !(1..=MAX_LIVES).contains(&self.starting_lives) {
            return Err(SettingsError::Invalid {
                field: "starting_lives",
                reason: format!("must be within 1..={MAX_LIVES}, got {}", self.starting_lives),
            });
        }
        for (field, size) in self.sizes.iter() {
            if !size.is_finite() || size.x <= 0.0 || size.y <= 0.0 {
                return Err(SettingsError::Invalid {
                    field,
                    reason: format!("must be positive, got {size}"),
                });
            }
        }
        if self.sizes.player.x + 2.0 * FRAME_WIDTH > self.width {
            return Err(SettingsError::Invalid {
                field: "width",
                reason: "playfield is narrower than the player's travel lane".into(),
            });
        }
        Ok(())
    }

    /// Seed to use for this session
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default()
        })
    }
}

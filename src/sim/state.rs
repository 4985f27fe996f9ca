//! Game status, tick counters and framerate-derived configuration

use serde::{Deserialize, Serialize};

use super::trajectory::InvaderPatrol;
use crate::consts::*;
use crate::settings::GameSettings;

/// Session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Welcome screen, waiting for Fire
    #[default]
    NotStarted,
    /// Simulation ticking
    Running,
    /// Lives exhausted, waiting for Fire
    GameOver,
    /// Window closed; terminal
    Closed,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Closed)
    }
}

/// Mutable per-session counters and input latches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameControl {
    /// Enemy shot fires when this hits a multiple of `invader_shot_period`
    pub invader_shot_counter: u32,
    /// Counts only while no ship is spawned
    pub ship_spawn_counter: u32,
    /// Counts only while a ship is spawned
    pub ship_flight_counter: u32,
    /// Counts only while a reload is pending
    pub player_reload_counter: u32,
    /// Visible invaders in the current wave
    pub invaders_left: u32,
    /// The bonus ship is on the field
    pub invader_ship_spawned: bool,
    /// Player fired and the reload period hasn't elapsed yet
    pub player_reload: bool,
    pub left_pressed: bool,
    pub right_pressed: bool,
}

/// Per-tick speeds and event periods derived from the framerate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub framerate: u32,
    /// Ticks between enemy shots
    pub invader_shot_period: u32,
    /// Ticks between ship spawns
    pub ship_spawn_period: u32,
    /// Ticks a ship patrols before it departs
    pub ship_lifetime_period: u32,
    /// Minimum ticks between player shots
    pub player_reload_period: u32,
    pub player_speed: f32,
    pub enemy_ship_speed: f32,
    pub invader_speed: f32,
    pub shell_speed: f32,
    pub patrol: InvaderPatrol,
}

impl GameConfig {
    pub fn new(framerate: u32, patrol: InvaderPatrol) -> Self {
        let mut config = Self {
            framerate,
            invader_shot_period: framerate.saturating_mul(INVADER_SHOT_PERIOD_S),
            ship_spawn_period: framerate.saturating_mul(SHIP_SPAWN_PERIOD_S),
            ship_lifetime_period: framerate.saturating_mul(SHIP_LIFETIME_S),
            // At least one tick between shots for tiny framerates
            player_reload_period: if framerate == 0 {
                0
            } else {
                (framerate / PLAYER_SHOTS_PER_SECOND).max(1)
            },
            player_speed: 0.0,
            enemy_ship_speed: 0.0,
            invader_speed: 0.0,
            shell_speed: 0.0,
            patrol,
        };
        config.calculate_items_speed(framerate);
        config
    }

    pub fn from_settings(settings: &GameSettings) -> Self {
        Self::new(
            settings.framerate,
            InvaderPatrol::new(settings.invader_step_x, settings.invader_step_y),
        )
    }

    /// Convert per-second speeds to per-tick speeds; a zero framerate freezes everything
    pub fn calculate_items_speed(&mut self, framerate: u32) {
        if framerate == 0 {
            log::warn!("Zero framerate: every entity is frozen and no events fire");
            self.player_speed = 0.0;
            self.enemy_ship_speed = 0.0;
            self.invader_speed = 0.0;
            self.shell_speed = 0.0;
            return;
        }
        let fps = framerate as f32;
        self.player_speed = PLAYER_SPEED / fps;
        self.enemy_ship_speed = SHIP_SPEED / fps;
        self.invader_speed = INVADER_SPEED / fps;
        self.shell_speed = SHELL_SPEED / fps;
    }
}

/// True when `counter` sits on a period boundary. A zero period never fires.
#[inline]
pub fn period_elapsed(counter: u32, period: u32) -> bool {
    period != 0 && counter.is_multiple_of(period)
}

/// Score and lives shown by the HUD
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameElements {
    /// Never decreases within a session
    pub score: u64,
    pub player_lives: u32,
    /// Waves cleared plus one
    pub wave: u32,
}

impl GameElements {
    pub fn new(player_lives: u32) -> Self {
        Self {
            score: 0,
            player_lives: player_lives.min(MAX_LIVES),
            wave: 1,
        }
    }

    pub fn add_score(&mut self, reward: u64) {
        self.score = self.score.saturating_add(reward);
    }
}

impl Default for GameElements {
    fn default() -> Self {
        Self::new(DEFAULT_LIVES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_at_sixty_fps() {
        let config = GameConfig::new(60, InvaderPatrol::new(60, 20));
        assert_eq!(config.invader_shot_period, 60);
        assert_eq!(config.ship_spawn_period, 900);
        assert_eq!(config.ship_lifetime_period, 600);
        assert_eq!(config.player_reload_period, 15);
        assert!((config.invader_speed - 0.5).abs() < 1e-6);
        assert!((config.shell_speed - 200.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_framerate_is_neutral() {
        let config = GameConfig::new(0, InvaderPatrol::new(60, 20));
        assert_eq!(config.invader_shot_period, 0);
        assert_eq!(config.player_reload_period, 0);
        assert_eq!(config.player_speed, 0.0);
        assert_eq!(config.shell_speed, 0.0);
    }

    #[test]
    fn test_low_framerate_reload_is_at_least_one_tick() {
        let config = GameConfig::new(2, InvaderPatrol::new(60, 20));
        assert_eq!(config.player_reload_period, 1);
    }

    #[test]
    fn test_period_elapsed() {
        assert!(period_elapsed(60, 60));
        assert!(period_elapsed(120, 60));
        assert!(!period_elapsed(61, 60));
        assert!(!period_elapsed(0, 0));
        assert!(!period_elapsed(5, 0));
    }

    #[test]
    fn test_elements() {
        let mut elements = GameElements::new(MAX_LIVES + 3);
        assert_eq!(elements.player_lives, MAX_LIVES);
        assert_eq!(elements.wave, 1);
        elements.add_score(INVADER_REWARD);
        elements.add_score(INVADER_SHIP_REWARD);
        assert_eq!(elements.score, 260);
        assert_eq!(GameElements::default().player_lives, DEFAULT_LIVES);
    }

    #[test]
    fn test_status_default() {
        assert_eq!(GameStatus::default(), GameStatus::NotStarted);
        assert!(GameStatus::Closed.is_terminal());
        assert!(!GameStatus::GameOver.is_terminal());
    }
}

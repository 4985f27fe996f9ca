//! Game orchestrator
//!
//! Owns every entity pool, the counters and the status, and sequences one
//! tick: events, culling, collisions, movement.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::check_collision;
use super::entity::{Entity, ShellType};
use super::events::{control_items_position, generate_events};
use super::rect::Rect;
use super::state::{GameConfig, GameControl, GameElements, GameStatus};
use super::trajectory::update_position;
use crate::audio::{AudioSink, SoundCommand, SoundCue};
use crate::consts::*;
use crate::platform::{InputEvent, Key};
use crate::renderer::{Sprite, SpriteKind, SpriteSink};
use crate::settings::{GameSettings, SettingsError};

/// Serializable view of a game between ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub status: GameStatus,
    pub score: u64,
    pub lives: u32,
    pub wave: u32,
    pub invaders_left: u32,
    pub ticks: u64,
    /// Visible entities, in draw order
    pub sprites: Vec<Sprite>,
}

/// A complete game session
#[derive(Debug, Clone)]
pub struct Game {
    pub(crate) settings: GameSettings,
    /// Playfield bounds, anything entirely outside gets culled
    pub(crate) field: Rect,
    pub(crate) config: GameConfig,
    pub(crate) control: GameControl,
    pub(crate) elements: GameElements,
    pub(crate) status: GameStatus,
    pub(crate) enemies: Vec<Entity>,
    pub(crate) bullets: Vec<Entity>,
    pub(crate) obstacles: Vec<Entity>,
    pub(crate) player: Entity,
    pub(crate) invader_ship: Entity,
    pub(crate) rng: Pcg32,
    /// Sound commands recorded since the last drain
    pub(crate) sounds: Vec<SoundCommand>,
    /// Ticks run since the session started
    pub(crate) ticks: u64,
}

impl Game {
    /// Build every pool for the given settings. Invaders stay hidden until the
    /// first Fire press starts a session.
    pub fn new(settings: GameSettings) -> Result<Self, SettingsError> {
        settings.validate()?;

        let config = GameConfig::from_settings(&settings);
        let seed = settings.resolved_seed();
        let sizes = settings.sizes;

        let player_pos = Vec2::new(FRAME_WIDTH, settings.height - BORDER_SIZE);
        let player = Entity::player(player_pos, sizes.player, config.player_speed);

        let ship_pos = Vec2::new(BORDER_SIZE, BORDER_SIZE * 2.0);
        let ship_range = (settings.width - 2.0 * BORDER_SIZE - sizes.invader_ship.x).max(0.0);
        let invader_ship =
            Entity::invader_ship(ship_pos, sizes.invader_ship, config.enemy_ship_speed, ship_range);

        // Pool seed, so the first shot never has to allocate
        let mut shell = Entity::shell(Vec2::ZERO, sizes.shell, config.shell_speed, ShellType::Enemy);
        shell.set_invisible();

        let mut game = Self {
            field: Rect::from_size(settings.width, settings.height),
            config,
            control: GameControl::default(),
            elements: GameElements::new(settings.starting_lives),
            status: GameStatus::NotStarted,
            enemies: Vec::with_capacity(INVADERS_IN_ROW * ROWS_WITH_INVADERS),
            bullets: vec![shell],
            obstacles: Vec::with_capacity(OBSTACLE_GROUPS * OBSTACLES_IN_ROW * OBSTACLE_ROWS),
            player,
            invader_ship,
            rng: Pcg32::seed_from_u64(seed),
            sounds: Vec::new(),
            ticks: 0,
            settings,
        };
        game.setup_invaders();
        game.setup_obstacles();

        log::info!(
            "Game created: {}x{} field at {} fps, seed {seed}",
            game.settings.width,
            game.settings.height,
            game.settings.framerate
        );
        Ok(game)
    }

    /// Invader grid, row by row from the top
    fn setup_invaders(&mut self) {
        let step = self.settings.width / GRID_STEPS_PER_ROW;
        let origin = Vec2::new(BORDER_SIZE, BORDER_SIZE * 4.0);

        for row in 0..ROWS_WITH_INVADERS {
            for col in 0..INVADERS_IN_ROW {
                let pos = origin + Vec2::new(col as f32 * step, row as f32 * step);
                self.enemies.push(Entity::invader(
                    pos,
                    self.settings.sizes.invader,
                    self.config.invader_speed,
                    row as u8,
                ));
            }
        }
    }

    /// Obstacle groups spread evenly across the field, stacked upward from
    /// the base line
    fn setup_obstacles(&mut self) {
        let block = self.settings.sizes.obstacle;
        let group_width = OBSTACLES_IN_ROW as f32 * block.x;
        let groups = OBSTACLE_GROUPS as f32;
        let gap = ((self.settings.width - groups * group_width) / (groups + 1.0)).max(0.0);
        let base_y = self.settings.height - OBSTACLE_BASE_OFFSET;

        for group in 0..OBSTACLE_GROUPS {
            let group_x = gap + group as f32 * (group_width + gap);
            for row in 0..OBSTACLE_ROWS {
                for col in 0..OBSTACLES_IN_ROW {
                    let pos = Vec2::new(group_x + col as f32 * block.x, base_y - row as f32 * block.y);
                    self.obstacles.push(Entity::obstacle(pos, block));
                }
            }
        }
    }

    // === Session control ===

    /// Start a fresh session: new score and lives, full wave, intact cover
    pub fn game_restart(&mut self) {
        if self.control.invader_ship_spawned {
            self.sounds.push(SoundCommand::Stop(SoundCue::ShipLoop));
        }

        // Held keys survive the restart
        self.control = GameControl {
            left_pressed: self.control.left_pressed,
            right_pressed: self.control.right_pressed,
            ..GameControl::default()
        };
        self.elements = GameElements::new(self.settings.starting_lives);
        self.ticks = 0;

        for shell in &mut self.bullets {
            shell.set_invisible();
        }
        self.invader_ship.revert_position();
        self.invader_ship.set_invisible();
        self.player.revert_position();
        self.retarget_player();

        self.spawn_invaders();
        self.spawn_obstacles();
        self.status = GameStatus::Running;
        log::info!("Game started with {} lives", self.elements.player_lives);
    }

    /// Bring back the whole invader wave at its grid slots
    pub(crate) fn spawn_invaders(&mut self) {
        for invader in &mut self.enemies {
            invader.revert_position();
            invader.set_visible();
        }
        self.control.invaders_left = self.enemies.len() as u32;
    }

    fn spawn_obstacles(&mut self) {
        for obstacle in &mut self.obstacles {
            obstacle.set_default_position();
            obstacle.set_visible();
        }
    }

    /// Advance one tick. Does nothing unless the game is running.
    pub fn game_loop(&mut self) {
        if self.status != GameStatus::Running {
            return;
        }
        self.ticks += 1;

        generate_events(self);
        control_items_position(self);
        check_collision(self);
        self.update_items_position();
    }

    fn update_items_position(&mut self) {
        let patrol = self.config.patrol;
        for entity in self
            .enemies
            .iter_mut()
            .chain(self.bullets.iter_mut())
            .chain([&mut self.invader_ship, &mut self.player])
        {
            update_position(entity, &patrol);
        }
    }

    /// Apply one input event
    pub fn execute_event(&mut self, event: InputEvent) {
        if self.status.is_terminal() {
            log::trace!("Ignoring {event:?} after close");
            return;
        }

        match event {
            InputEvent::Closed => {
                if self.control.invader_ship_spawned {
                    self.sounds.push(SoundCommand::Stop(SoundCue::ShipLoop));
                }
                self.status = GameStatus::Closed;
                log::info!("Window closed");
            }
            InputEvent::KeyPressed(Key::Left) => {
                self.control.left_pressed = true;
                self.player.set_motion_vector(self.player_left_limit());
            }
            InputEvent::KeyPressed(Key::Right) => {
                self.control.right_pressed = true;
                self.player.set_motion_vector(self.player_right_limit());
            }
            InputEvent::KeyPressed(Key::Fire) => self.fire_pressed(),
            InputEvent::KeyReleased(Key::Left) => {
                self.control.left_pressed = false;
                self.retarget_player();
            }
            InputEvent::KeyReleased(Key::Right) => {
                self.control.right_pressed = false;
                self.retarget_player();
            }
            InputEvent::KeyReleased(Key::Fire) => {}
        }
    }

    fn fire_pressed(&mut self) {
        match self.status {
            GameStatus::NotStarted => self.game_restart(),
            GameStatus::Running => {
                if self.control.player_reload {
                    log::trace!("Fire ignored while reloading");
                } else {
                    self.player.set_shot_request(true);
                    self.control.player_reload = true;
                }
            }
            GameStatus::GameOver => self.status = GameStatus::NotStarted,
            GameStatus::Closed => {}
        }
    }

    /// Steer toward whichever direction key is still held, or stop
    fn retarget_player(&mut self) {
        let target = match (self.control.left_pressed, self.control.right_pressed) {
            (true, _) => self.player_left_limit(),
            (false, true) => self.player_right_limit(),
            (false, false) => self.player.position(),
        };
        self.player.set_motion_vector(target);
    }

    /// Leftmost player position, clear of the frame
    pub fn player_left_limit(&self) -> Vec2 {
        Vec2::new(FRAME_WIDTH, self.settings.height - BORDER_SIZE)
    }

    /// Rightmost player position, clear of the frame
    pub fn player_right_limit(&self) -> Vec2 {
        Vec2::new(
            self.settings.width - FRAME_WIDTH - self.player.size().x,
            self.settings.height - BORDER_SIZE,
        )
    }

    // === Presentation ===

    /// Every entity, visible or not, in draw order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.obstacles
            .iter()
            .chain(&self.enemies)
            .chain([&self.invader_ship, &self.player])
            .chain(&self.bullets)
    }

    /// Hand every visible entity to the sink
    pub fn draw(&self, sink: &mut impl SpriteSink) {
        for entity in self.entities().filter(|e| e.is_visible()) {
            sink.draw_sprite(SpriteKind::of(entity), entity.rect());
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut sprites: Vec<Sprite> = Vec::new();
        self.draw(&mut sprites);
        GameSnapshot {
            status: self.status,
            score: self.elements.score,
            lives: self.elements.player_lives,
            wave: self.elements.wave,
            invaders_left: self.control.invaders_left,
            ticks: self.ticks,
            sprites,
        }
    }

    /// Take the sound commands recorded since the last call
    pub fn drain_sounds(&mut self) -> Vec<SoundCommand> {
        std::mem::take(&mut self.sounds)
    }

    /// Send the recorded sound commands to `sink`, oldest first
    pub fn flush_sounds(&mut self, sink: &mut impl AudioSink) {
        for command in self.sounds.drain(..) {
            sink.apply(command);
        }
    }

    // === Read-only state ===

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u64 {
        self.elements.score
    }

    pub fn player_lives(&self) -> u32 {
        self.elements.player_lives
    }

    pub fn wave(&self) -> u32 {
        self.elements.wave
    }

    pub fn invaders_left(&self) -> u32 {
        self.control.invaders_left
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn field(&self) -> Rect {
        self.field
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn control(&self) -> &GameControl {
        &self.control
    }

    pub fn elements(&self) -> &GameElements {
        &self.elements
    }

    pub fn invaders(&self) -> &[Entity] {
        &self.enemies
    }

    pub fn shells(&self) -> &[Entity] {
        &self.bullets
    }

    pub fn obstacles(&self) -> &[Entity] {
        &self.obstacles
    }

    pub fn player(&self) -> &Entity {
        &self.player
    }

    pub fn invader_ship(&self) -> &Entity {
        &self.invader_ship
    }
}

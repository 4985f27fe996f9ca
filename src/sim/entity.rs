//! Game entities
//!
//! Every object on the field shares one component set (position, default
//! position, size, speed, visibility) and carries its kind-specific state in
//! [`EntityKind`]. Visibility is the only alive flag: dead entities stay in
//! their pool and get reused.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Who fired a shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShellType {
    Enemy,
    Player,
}

impl ShellType {
    /// Vertical travel sign: enemy shells fall, player shells rise
    #[inline]
    pub fn direction_sign(&self) -> f32 {
        match self {
            ShellType::Enemy => 1.0,
            ShellType::Player => -1.0,
        }
    }
}

/// Horizontal heading of the invader ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    #[inline]
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Kind-specific entity state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Formation invader walking a closed rectangular loop
    Invader {
        /// Ticks into the current patrol cycle
        position_counter: u32,
        /// Grid row, used to pick the sprite variant
        row: u8,
    },
    /// Bonus ship patrolling `[default_x, default_x + range]`
    InvaderShip {
        direction: Direction,
        range: f32,
        /// Flight time is over: stop reflecting and leave the field
        departing: bool,
    },
    /// Pooled projectile
    Shell { owner: ShellType },
    /// User-controlled ship
    Player {
        /// Point the ship is steering toward
        motion_vector: Vec2,
        /// Fire pressed, not yet consumed by the event generator
        shot_request: bool,
    },
    /// Static destructible cover block
    Obstacle,
}

/// A movable, visible rectangle on the playfield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pos: Vec2,
    default_pos: Vec2,
    size: Vec2,
    speed: f32,
    visible: bool,
}

impl Entity {
    fn with_kind(kind: EntityKind, pos: Vec2, size: Vec2, speed: f32, visible: bool) -> Self {
        Self {
            kind,
            pos,
            default_pos: pos,
            size,
            speed,
            visible,
        }
    }

    /// Hidden invader parked at its grid slot
    pub fn invader(default_pos: Vec2, size: Vec2, speed: f32, row: u8) -> Self {
        Self::with_kind(
            EntityKind::Invader {
                position_counter: 0,
                row,
            },
            default_pos,
            size,
            speed,
            false,
        )
    }

    /// Hidden invader ship, heading right
    pub fn invader_ship(default_pos: Vec2, size: Vec2, speed: f32, range: f32) -> Self {
        Self::with_kind(
            EntityKind::InvaderShip {
                direction: Direction::Right,
                range,
                departing: false,
            },
            default_pos,
            size,
            speed,
            false,
        )
    }

    /// Visible shell at `pos`
    pub fn shell(pos: Vec2, size: Vec2, speed: f32, owner: ShellType) -> Self {
        Self::with_kind(EntityKind::Shell { owner }, pos, size, speed, true)
    }

    /// Visible player ship, standing still at its default position
    pub fn player(default_pos: Vec2, size: Vec2, speed: f32) -> Self {
        Self::with_kind(
            EntityKind::Player {
                motion_vector: default_pos,
                shot_request: false,
            },
            default_pos,
            size,
            speed,
            true,
        )
    }

    /// Visible obstacle block
    pub fn obstacle(pos: Vec2, size: Vec2) -> Self {
        Self::with_kind(EntityKind::Obstacle, pos, size, 0.0, true)
    }

    // === Base contract ===

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    #[inline]
    pub fn default_position(&self) -> Vec2 {
        self.default_pos
    }

    /// Store a new default (reset) position
    pub fn set_init_position(&mut self, pos: Vec2) {
        self.default_pos = pos;
    }

    /// Jump back to the stored default position
    pub fn set_default_position(&mut self) {
        self.pos = self.default_pos;
    }

    /// Translate by `delta`
    pub fn move_by(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self) {
        self.visible = true;
    }

    pub fn set_invisible(&mut self) {
        self.visible = false;
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    // === Kind-specific state ===

    /// Reset position and per-kind trajectory state to their spawn values
    pub fn revert_position(&mut self) {
        match &mut self.kind {
            EntityKind::Invader {
                position_counter, ..
            } => *position_counter = 0,
            EntityKind::InvaderShip {
                direction,
                departing,
                ..
            } => {
                *direction = Direction::Right;
                *departing = false;
            }
            EntityKind::Player {
                motion_vector,
                shot_request,
            } => {
                *motion_vector = self.default_pos;
                *shot_request = false;
            }
            EntityKind::Shell { .. } | EntityKind::Obstacle => {}
        }
        self.set_default_position();
    }

    /// Owner tag, for shells only
    pub fn shell_type(&self) -> Option<ShellType> {
        match self.kind {
            EntityKind::Shell { owner } => Some(owner),
            _ => None,
        }
    }

    pub fn set_shell_type(&mut self, new_owner: ShellType) {
        if let EntityKind::Shell { owner } = &mut self.kind {
            *owner = new_owner;
        }
    }

    /// Patrol counter, for invaders only
    pub fn position_counter(&self) -> Option<u32> {
        match self.kind {
            EntityKind::Invader {
                position_counter, ..
            } => Some(position_counter),
            _ => None,
        }
    }

    /// Steering target, for the player only
    pub fn motion_vector(&self) -> Option<Vec2> {
        match self.kind {
            EntityKind::Player { motion_vector, .. } => Some(motion_vector),
            _ => None,
        }
    }

    pub fn set_motion_vector(&mut self, target: Vec2) {
        if let EntityKind::Player { motion_vector, .. } = &mut self.kind {
            *motion_vector = target;
        }
    }

    pub fn shot_request(&self) -> bool {
        matches!(
            self.kind,
            EntityKind::Player {
                shot_request: true,
                ..
            }
        )
    }

    pub fn set_shot_request(&mut self, state: bool) {
        if let EntityKind::Player { shot_request, .. } = &mut self.kind {
            *shot_request = state;
        }
    }

    /// Consume a pending shot request
    pub fn take_shot_request(&mut self) -> bool {
        match &mut self.kind {
            EntityKind::Player { shot_request, .. } => std::mem::take(shot_request),
            _ => false,
        }
    }

    /// Send the invader ship off the field on its current heading
    pub fn set_departing(&mut self) {
        if let EntityKind::InvaderShip { departing, .. } = &mut self.kind {
            *departing = true;
        }
    }

    pub fn is_departing(&self) -> bool {
        matches!(
            self.kind,
            EntityKind::InvaderShip {
                departing: true,
                ..
            }
        )
    }
}

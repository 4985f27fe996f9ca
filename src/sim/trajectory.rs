//! Per-kind trajectory controllers
//!
//! One step function per entity kind, dispatched by [`update_position`].
//! All of them move by `speed` field units per tick and do nothing while the
//! entity is invisible.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Direction, Entity, EntityKind};

/// Shape of the invader patrol loop
///
/// ```text
///        step_x ticks
///     ---------------->
///     ^               |
///     |               | step_y ticks
///     <---------------|
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvaderPatrol {
    pub step_x: u32,
    pub step_y: u32,
}

impl InvaderPatrol {
    pub fn new(step_x: u32, step_y: u32) -> Self {
        Self { step_x, step_y }
    }

    /// Ticks in one full loop
    #[inline]
    pub fn cycle_length(&self) -> u32 {
        2 * (self.step_x + self.step_y)
    }

    /// Unit heading for the given tick of the cycle
    pub fn heading(&self, counter: u32) -> Vec2 {
        let (x, y) = (self.step_x, self.step_y);
        if counter < x {
            Vec2::X
        } else if counter < x + y {
            Vec2::Y
        } else if counter < 2 * x + y {
            Vec2::NEG_X
        } else if counter < 2 * x + 2 * y {
            Vec2::NEG_Y
        } else {
            Vec2::ZERO
        }
    }
}

/// Advance any entity by one tick according to its kind
pub fn update_position(entity: &mut Entity, patrol: &InvaderPatrol) {
    if !entity.is_visible() {
        return;
    }
    match entity.kind {
        EntityKind::Invader { .. } => step_invader(entity, patrol),
        EntityKind::InvaderShip { .. } => step_invader_ship(entity),
        EntityKind::Shell { .. } => step_shell(entity),
        EntityKind::Player { .. } => step_player(entity),
        EntityKind::Obstacle => {}
    }
}

/// Walk the closed rectangular loop; snap home when the cycle completes
fn step_invader(entity: &mut Entity, patrol: &InvaderPatrol) {
    let speed = entity.speed();
    let EntityKind::Invader {
        position_counter, ..
    } = &mut entity.kind
    else {
        return;
    };

    let delta = patrol.heading(*position_counter) * speed;
    *position_counter += 1;
    let completed = *position_counter >= patrol.cycle_length();

    entity.move_by(delta);
    if completed {
        entity.revert_position();
    }
}

/// Reflecting patrol between `default_x` and `default_x + range`
fn step_invader_ship(entity: &mut Entity) {
    let speed = entity.speed();
    let x = entity.position().x;
    let min_x = entity.default_position().x;
    let EntityKind::InvaderShip {
        direction,
        range,
        departing,
    } = &mut entity.kind
    else {
        return;
    };

    if !*departing {
        let next_x = x + direction.sign() * speed;
        if next_x > min_x + *range {
            *direction = Direction::Left;
        } else if next_x < min_x {
            *direction = Direction::Right;
        }
    }

    let delta = Vec2::new(direction.sign() * speed, 0.0);
    entity.move_by(delta);
}

/// Straight vertical travel, sign chosen by the owner
fn step_shell(entity: &mut Entity) {
    let Some(owner) = entity.shell_type() else {
        return;
    };
    let delta = Vec2::new(0.0, owner.direction_sign() * entity.speed());
    entity.move_by(delta);
}

/// Point-seek toward the motion vector without overshooting it
fn step_player(entity: &mut Entity) {
    let Some(target) = entity.motion_vector() else {
        return;
    };
    let pos = entity.position();
    if pos == target {
        return;
    }

    let to_target = target - pos;
    let distance = to_target.length();
    let speed = entity.speed();
    if distance <= speed {
        entity.set_position(target);
    } else {
        entity.move_by(to_target / distance * speed);
    }
}

//! Rendering seam
//!
//! The presentation layer owns textures and the window. The core only tells
//! it which sprite goes where, through a [`SpriteSink`].

use serde::{Deserialize, Serialize};

use crate::sim::entity::{Entity, EntityKind, ShellType};
use crate::sim::rect::Rect;

/// Which texture to use for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    /// Rows share a texture in pairs, see [`SpriteKind::invader_variant`]
    Invader { row: u8 },
    InvaderShip,
    Shell(ShellType),
    Player,
    Obstacle,
}

impl SpriteKind {
    pub fn of(entity: &Entity) -> Self {
        match entity.kind {
            EntityKind::Invader { row, .. } => SpriteKind::Invader { row },
            EntityKind::InvaderShip { .. } => SpriteKind::InvaderShip,
            EntityKind::Shell { owner } => SpriteKind::Shell(owner),
            EntityKind::Player { .. } => SpriteKind::Player,
            EntityKind::Obstacle => SpriteKind::Obstacle,
        }
    }

    /// Invader texture index (0..3) for alternating invader looks
    pub fn invader_variant(&self) -> Option<u8> {
        match self {
            SpriteKind::Invader { row } => Some((row / 2) % 3),
            _ => None,
        }
    }
}

/// A sprite placement produced by one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub rect: Rect,
}

/// Drawing backend implemented by the presentation layer
pub trait SpriteSink {
    /// Draw one visible entity
    fn draw_sprite(&mut self, kind: SpriteKind, rect: Rect);
}

/// Collects the frame instead of drawing it
impl SpriteSink for Vec<Sprite> {
    fn draw_sprite(&mut self, kind: SpriteKind, rect: Rect) {
        self.push(Sprite { kind, rect });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_kind_of_entities() {
        let invader = Entity::invader(Vec2::ZERO, Vec2::ONE, 1.0, 3);
        assert_eq!(SpriteKind::of(&invader), SpriteKind::Invader { row: 3 });

        let shell = Entity::shell(Vec2::ZERO, Vec2::ONE, 1.0, ShellType::Player);
        assert_eq!(SpriteKind::of(&shell), SpriteKind::Shell(ShellType::Player));

        let obstacle = Entity::obstacle(Vec2::ZERO, Vec2::ONE);
        assert_eq!(SpriteKind::of(&obstacle), SpriteKind::Obstacle);
    }

    #[test]
    fn test_invader_variants() {
        assert_eq!(SpriteKind::Invader { row: 0 }.invader_variant(), Some(0));
        assert_eq!(SpriteKind::Invader { row: 1 }.invader_variant(), Some(0));
        assert_eq!(SpriteKind::Invader { row: 2 }.invader_variant(), Some(1));
        assert_eq!(SpriteKind::Invader { row: 5 }.invader_variant(), Some(2));
        assert_eq!(SpriteKind::Invader { row: 6 }.invader_variant(), Some(0));
        assert_eq!(SpriteKind::Player.invader_variant(), None);
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut frame: Vec<Sprite> = Vec::new();
        let rect = Rect::new(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
        frame.draw_sprite(SpriteKind::Player, rect);
        assert_eq!(frame, vec![Sprite { kind: SpriteKind::Player, rect }]);
    }
}

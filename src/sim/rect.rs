//! Axis-aligned bounding boxes
//!
//! Every entity collides as a rectangle anchored at its top-left corner
//! (screen coordinates, +Y pointing down).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Rectangle spanning `[0, 0] x [width, height]`
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Whether the two rectangles share a region of non-zero area.
    /// Touching edges don't count.
    pub fn intersects(&self, other: &Rect) -> bool {
        let lo = self.min().max(other.min());
        let hi = self.max().min(other.max());
        lo.x < hi.x && lo.y < hi.y
    }

    /// Whether no part of this rectangle lies inside `bounds`
    pub fn is_outside(&self, bounds: &Rect) -> bool {
        !self.intersects(bounds)
    }
}

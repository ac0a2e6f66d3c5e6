//! Axis-aligned rectangle geometry
//!
//! The only shape in the game. Positions are top-left pixel coordinates with
//! y growing downward, matching the viewport.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle: top-left position plus size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Overlap test. Touching edges do not count as overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// A copy shrunk by `margin` on every side (grown when negative).
    pub fn shrink(&self, margin: f32) -> Rect {
        Rect {
            pos: self.pos + Vec2::splat(margin),
            size: (self.size - Vec2::splat(margin * 2.0)).max(Vec2::ZERO),
        }
    }

    pub fn set_left(&mut self, x: f32) {
        self.pos.x = x;
    }

    pub fn set_right(&mut self, x: f32) {
        self.pos.x = x - self.size.x;
    }

    pub fn set_bottom(&mut self, y: f32) {
        self.pos.y = y - self.size.y;
    }

    /// Clamp horizontally into `[0, world_width]`.
    pub fn clamp_x(&mut self, world_width: f32) {
        if self.left() < 0.0 {
            self.set_left(0.0);
        }
        if self.right() > world_width {
            self.set_right(world_width);
        }
    }

    /// True when every dimension is finite and positive.
    pub fn is_valid(&self) -> bool {
        self.pos.is_finite() && self.size.is_finite() && self.size.x > 0.0 && self.size.y > 0.0
    }
}

//! Axis-aligned rectangles in world space
//!
//! The world is y-down: `y` grows toward the bottom of the screen, so a
//! rectangle's `top` is its smallest y and `bottom` its largest.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height (non-negative)
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Box of a sprite anchored at its lower-left corner
    pub fn from_bottom_left(anchor: Vec2, size: Vec2) -> Self {
        Self {
            pos: Vec2::new(anchor.x, anchor.y - size.y),
            size,
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

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Inclusive overlap test: touching edges count as a hit
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.right() < other.left()
            || self.left() > other.right()
            || self.bottom() < other.top()
            || self.top() > other.bottom())
    }

    /// Strict horizontal overlap: boxes that only touch do not overlap
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.right() > other.left() && self.left() < other.right()
    }
}

//! Axis-aligned collision tests
//!
//! Everything in the play area is a rectangle. The ball is treated as its
//! enclosing square, so every check is a strict AABB overlap.

use glam::Vec2;

use crate::consts::*;

/// Axis-aligned rectangle in play-area coordinates (y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Square enclosing a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self {
            min: center - Vec2::splat(radius),
            size: Vec2::splat(radius * 2.0),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap: touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        a_max.x > other.min.x && self.min.x < b_max.x && a_max.y > other.min.y && self.min.y < b_max.y
    }
}

/// Bounding box of the brick at (row, col)
pub fn brick_rect(row: usize, col: usize) -> Rect {
    Rect::new(
        col as f32 * (BRICK_WIDTH + BRICK_PADDING_X) + BRICK_OFFSET_X,
        row as f32 * (BRICK_HEIGHT + BRICK_PADDING_Y) + BRICK_OFFSET_Y,
        BRICK_WIDTH,
        BRICK_HEIGHT,
    )
}

/// Bounding box of the paddle whose left edge is at `x`
pub fn paddle_rect(x: f32) -> Rect {
    Rect::new(x, PADDLE_Y, PADDLE_WIDTH, PADDLE_HEIGHT)
}

/// Ball extends past the left or right edge of the play area
#[inline]
pub fn ball_hits_side_wall(pos: Vec2, radius: f32) -> bool {
    pos.x + radius > SCREEN_WIDTH || pos.x - radius < 0.0
}

/// Ball extends past the top of the play area
#[inline]
pub fn ball_hits_ceiling(pos: Vec2, radius: f32) -> bool {
    pos.y - radius < 0.0
}

/// Ball will be below the floor after its next step.
///
/// Unlike the other checks this one looks one frame ahead.
#[inline]
pub fn ball_falls_out(pos: Vec2, vel: Vec2, radius: f32) -> bool {
    pos.y + vel.y > SCREEN_HEIGHT - radius
}

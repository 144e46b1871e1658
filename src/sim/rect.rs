//! Axis-aligned rectangle geometry for bricks, paddle and level bounds
//!
//! Y points up: `top >= bottom`, `right >= left`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One of the four sides of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    /// Evaluation order used whenever sides tie
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    /// Outward unit normal of this side
    #[inline]
    pub fn normal(self) -> Vec2 {
        match self {
            Side::Left => Vec2::NEG_X,
            Side::Right => Vec2::X,
            Side::Top => Vec2::Y,
            Side::Bottom => Vec2::NEG_Y,
        }
    }
}

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        debug_assert!(right >= left && top >= bottom, "inverted rect");
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Rectangle centred on `center` extending `half` on each axis
    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self::new(
            center.x - half.x,
            center.x + half.x,
            center.y + half.y,
            center.y - half.y,
        )
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.left, self.bottom)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.right, self.top)
    }

    /// Inclusive containment (points on the border count)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.bottom && p.y <= self.top
    }

    /// Closest point of the rectangle to `p`
    pub fn clamped(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }

    /// Grow outward by `amount` on every side (Minkowski sum with a square)
    pub fn expanded(&self, amount: f32) -> Self {
        debug_assert!(amount >= 0.0);
        Self {
            left: self.left - amount,
            right: self.right + amount,
            top: self.top + amount,
            bottom: self.bottom - amount,
        }
    }

    /// Shift by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            left: self.left + offset.x,
            right: self.right + offset.x,
            top: self.top + offset.y,
            bottom: self.bottom + offset.y,
        }
    }

    /// Bounding box of two points
    pub fn spanning(a: Vec2, b: Vec2) -> Self {
        let lo = a.min(b);
        let hi = a.max(b);
        Self::new(lo.x, hi.x, hi.y, lo.y)
    }

    /// Inclusive overlap test
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.bottom <= other.top
            && other.bottom <= self.top
    }

    /// Corner of this rectangle whose quadrant `p` lies in.
    ///
    /// `None` when `p` is within the horizontal or vertical span, i.e. it faces
    /// a straight edge (or lies inside).
    pub fn corner_for(&self, p: Vec2) -> Option<Vec2> {
        let x = if p.x < self.left {
            self.left
        } else if p.x > self.right {
            self.right
        } else {
            return None;
        };
        let y = if p.y > self.top {
            self.top
        } else if p.y < self.bottom {
            self.bottom
        } else {
            return None;
        };
        Some(Vec2::new(x, y))
    }

    /// Side `p` is closest to from the inside, with its penetration depth.
    ///
    /// Ties resolve in `Side::ALL` order.
    pub fn nearest_side(&self, p: Vec2) -> (Side, f32) {
        let depths = [
            p.x - self.left,
            self.right - p.x,
            self.top - p.y,
            p.y - self.bottom,
        ];
        let mut best = (Side::Left, depths[0]);
        for (side, depth) in Side::ALL.into_iter().zip(depths).skip(1) {
            if depth < best.1 {
                best = (side, depth);
            }
        }
        best
    }
}

//! Swept ball-vs-rectangle collision with rounded corners
//!
//! The tricky part of the simulation: a moving circle against a box is a ray
//! against the box grown by the circle's radius, except in the four corner
//! quadrants where the grown shape is really a quarter circle.

use glam::Vec2;

use super::ray::{Hit, intersect};
use super::rect::{Rect, Side};

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Sweep a ball of `radius` from `origin` along `movement` against `rect`.
///
/// Casts against `rect` expanded by `radius`; a contact that lands in a corner
/// quadrant is re-tested against a circle around that corner. A ball that
/// already sits inside a corner quadrant of the expanded rectangle skips
/// straight to the circle test.
pub fn ball_rect_collision(
    origin: Vec2,
    movement: Vec2,
    radius: f32,
    rect: &Rect,
    t_limit: f32,
) -> Option<Hit> {
    debug_assert!(radius > 0.0, "ball radius must be positive");
    let expanded = rect.expanded(radius);

    if expanded.contains(origin)
        && let Some(corner) = rect.corner_for(origin)
    {
        return ball_corner_collision(origin, movement, corner, radius, t_limit);
    }

    let hit = intersect(origin, movement, &expanded, t_limit)?;
    match rect.corner_for(hit.point) {
        None => Some(hit),
        Some(corner) => ball_corner_collision(origin, movement, corner, radius, t_limit),
    }
}

/// Ray against the circle of `radius` around `corner`.
///
/// The normal is the unit vector from the corner to the contact, not either
/// adjacent face normal. A ray that starts inside the circle and heads deeper
/// is hit at `t = 0`.
pub fn ball_corner_collision(
    origin: Vec2,
    movement: Vec2,
    corner: Vec2,
    radius: f32,
    t_limit: f32,
) -> Option<Hit> {
    let length = movement.length();
    if length == 0.0 {
        return None;
    }
    let dir = movement / length;

    let to_corner = corner - origin;
    let along = to_corner.dot(dir);
    let perp_sq = to_corner.length_squared() - along * along;
    let radius_sq = radius * radius;
    if perp_sq > radius_sq {
        return None;
    }

    let near = along - (radius_sq - perp_sq).max(0.0).sqrt();
    if near < 0.0 {
        // Behind us, unless we are already inside the circle
        if to_corner.length_squared() > radius_sq {
            return None;
        }
        let normal = (origin - corner).normalize_or_zero();
        return (t_limit > 0.0 && movement.dot(normal) < 0.0).then_some(Hit {
            t: 0.0,
            point: origin,
            normal,
        });
    }

    let t = near / length;
    if t >= t_limit {
        return None;
    }
    let point = origin + movement * t;
    let normal = (point - corner).normalize_or_zero();
    Some(Hit { t, point, normal })
}

/// Ball-vs-rectangle interpenetration at rest
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    /// Closest surface point of the rectangle to the ball centre
    pub point: Vec2,
    /// Outward normal at that point
    pub normal: Vec2,
    /// How far the ball sinks into the rectangle
    pub penetration: f32,
}

/// Check whether a resting ball overlaps `rect` by more than `epsilon`.
///
/// Separations within `epsilon` of zero snap to zero. A centre on or inside
/// the rectangle resolves to the least-penetrated side.
pub fn ball_rect_overlap(center: Vec2, radius: f32, rect: &Rect, epsilon: f32) -> Option<Overlap> {
    let closest = rect.clamped(center);
    let offset = center - closest;
    let dist = crate::snap_to_zero(offset.length(), epsilon);

    if dist == 0.0 {
        let (side, depth) = rect.nearest_side(center);
        let point = match side {
            Side::Left => Vec2::new(rect.left, center.y),
            Side::Right => Vec2::new(rect.right, center.y),
            Side::Top => Vec2::new(center.x, rect.top),
            Side::Bottom => Vec2::new(center.x, rect.bottom),
        };
        return Some(Overlap {
            point,
            normal: side.normal(),
            penetration: radius + depth,
        });
    }

    let penetration = radius - dist;
    (penetration > epsilon).then(|| Overlap {
        point: closest,
        normal: offset / dist,
        penetration,
    })
}

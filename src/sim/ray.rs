//! Parametric ray casts against rectangles and level walls
//!
//! A ray is an `origin` plus a `direction` that spans the whole candidate
//! motion, so the hit parameter `t` is a fraction of that motion in `[0, 1)`.
//! Every cast takes a `t_limit` (the best hit found so far among competing
//! obstacles) and discards anything at or beyond it, so the first candidate
//! to reach a given `t` keeps it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::{Rect, Side};

/// Where a ray first touches a surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// Fraction of the ray's direction travelled before contact
    pub t: f32,
    /// Contact position (ray origin + direction * t)
    pub point: Vec2,
    /// Outward unit normal of the surface at the contact
    pub normal: Vec2,
}

impl Hit {
    pub fn at(origin: Vec2, direction: Vec2, t: f32, normal: Vec2) -> Self {
        Self {
            t,
            point: origin + direction * t,
            normal,
        }
    }
}

/// Coordinate axis selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    #[inline]
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Unit vector along this axis scaled by `sign`
    #[inline]
    pub fn unit(self, sign: f32) -> Vec2 {
        match self {
            Axis::X => Vec2::new(sign, 0.0),
            Axis::Y => Vec2::new(0.0, sign),
        }
    }
}

/// Cast a ray against a rectangle.
///
/// Sides are evaluated left, right, top, bottom; only the side that faces the
/// ray on each axis can be entered. A side is accepted when its crossing lies
/// in `(0, t_limit)` and the other coordinate at that `t` is within the side's
/// span. An origin already inside the rectangle (border included) yields a hit
/// at `t = 0` on the least-penetrated side, provided the ray heads into it.
pub fn intersect(origin: Vec2, direction: Vec2, rect: &Rect, t_limit: f32) -> Option<Hit> {
    if direction == Vec2::ZERO {
        return None;
    }

    let local = rect.translated(-origin);
    if local.contains(Vec2::ZERO) {
        return start_inside(origin, direction, &local, t_limit);
    }

    let mut limit = t_limit;
    let mut side = None;

    if direction.x != 0.0 {
        let (offset, candidate) = if direction.x > 0.0 {
            (local.left, Side::Left)
        } else {
            (local.right, Side::Right)
        };
        if let Some(t) = cross(offset, direction, Axis::X, local.bottom, local.top, limit) {
            limit = t;
            side = Some(candidate);
        }
    }

    if direction.y != 0.0 {
        let (offset, candidate) = if direction.y > 0.0 {
            (local.bottom, Side::Bottom)
        } else {
            (local.top, Side::Top)
        };
        if let Some(t) = cross(offset, direction, Axis::Y, local.left, local.right, limit) {
            limit = t;
            side = Some(candidate);
        }
    }

    side.map(|side| Hit::at(origin, direction, limit, side.normal()))
}

/// Slab test for one bounding line at `offset` on `axis`
fn cross(
    offset: f32,
    direction: Vec2,
    axis: Axis,
    span_min: f32,
    span_max: f32,
    limit: f32,
) -> Option<f32> {
    let t = offset / axis.of(direction);
    if t <= 0.0 || t >= limit {
        return None;
    }
    let along = axis.other().of(direction) * t;
    if along < span_min || along > span_max {
        return None;
    }
    Some(t)
}

fn start_inside(origin: Vec2, direction: Vec2, local: &Rect, t_limit: f32) -> Option<Hit> {
    let (side, _) = local.nearest_side(Vec2::ZERO);
    let normal = side.normal();
    (t_limit > 0.0 && direction.dot(normal) < 0.0)
        .then(|| Hit::at(origin, direction, 0.0, normal))
}

/// Cast a ray against an infinite wall line `axis = at` whose open side faces
/// along `facing` (+1 or -1 on that axis).
///
/// The wall only counts when the ray heads into it and ends on or past the
/// line. A ray that already starts past the wall reports `t = 0` so it gets
/// turned around immediately.
pub fn hit_wall(
    origin: Vec2,
    direction: Vec2,
    axis: Axis,
    at: f32,
    facing: f32,
    t_limit: f32,
) -> Option<Hit> {
    let d = axis.of(direction);
    if d * facing >= 0.0 {
        return None;
    }
    let start = axis.of(origin);
    if (start + d - at) * facing > 0.0 {
        return None;
    }
    let t = ((at - start) / d).max(0.0);
    if t >= t_limit {
        return None;
    }
    Some(Hit::at(origin, direction, t, axis.unit(facing)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brick() -> Rect {
        Rect::new(-5.0, 5.0, 8.0, 4.0)
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_hit_top_from_above() {
        let hit = intersect(Vec2::new(0.0, 10.0), Vec2::new(0.0, -50.0), &brick(), 1.0)
            .expect("should hit top");
        assert!((hit.t - 0.04).abs() < 1e-6);
        assert!(approx(hit.point, Vec2::new(0.0, 8.0)));
        assert_eq!(hit.normal, Vec2::Y);
    }

    #[test]
    fn test_hit_each_side() {
        let r = brick();
        let left = intersect(Vec2::new(-10.0, 6.0), Vec2::new(10.0, 0.0), &r, 1.0).unwrap();
        assert_eq!(left.normal, Vec2::NEG_X);
        let right = intersect(Vec2::new(10.0, 6.0), Vec2::new(-10.0, 0.0), &r, 1.0).unwrap();
        assert_eq!(right.normal, Vec2::X);
        let bottom = intersect(Vec2::new(0.0, 0.0), Vec2::new(1.0, 10.0), &r, 1.0).unwrap();
        assert_eq!(bottom.normal, Vec2::NEG_Y);
        assert!((bottom.t - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_miss_and_short_ray() {
        let r = brick();
        // Passes above
        assert!(intersect(Vec2::new(-10.0, 9.0), Vec2::new(20.0, 0.0), &r, 1.0).is_none());
        // Stops short
        assert!(intersect(Vec2::new(0.0, 10.0), Vec2::new(0.0, -1.0), &r, 1.0).is_none());
        // Points away
        assert!(intersect(Vec2::new(0.0, 10.0), Vec2::new(0.0, 5.0), &r, 1.0).is_none());
        // Zero motion
        assert!(intersect(Vec2::new(0.0, 10.0), Vec2::ZERO, &r, 1.0).is_none());
    }

    #[test]
    fn test_t_limit_discards_later_hits() {
        let r = brick();
        let origin = Vec2::new(0.0, 10.0);
        let dir = Vec2::new(0.0, -50.0);
        assert!(intersect(origin, dir, &r, 0.04).is_none());
        assert!(intersect(origin, dir, &r, 0.05).is_some());
    }

    #[test]
    fn test_exact_corner_prefers_left_right() {
        // Diagonal ray through the top-left corner exactly: left and top tie
        let r = brick();
        let hit = intersect(Vec2::new(-7.0, 10.0), Vec2::new(4.0, -4.0), &r, 1.0).unwrap();
        assert!((hit.t - 0.5).abs() < 1e-6);
        assert_eq!(hit.normal, Vec2::NEG_X);
    }

    #[test]
    fn test_start_inside_heading_in() {
        let r = brick();
        // Just below the top face, moving down
        let hit = intersect(Vec2::new(0.0, 7.9), Vec2::new(0.0, -1.0), &r, 1.0).unwrap();
        assert_eq!(hit.t, 0.0);
        assert_eq!(hit.normal, Vec2::Y);
        assert_eq!(hit.point, Vec2::new(0.0, 7.9));
    }

    #[test]
    fn test_start_inside_heading_out_is_not_a_hit() {
        let r = brick();
        // Leaving through the top: the exit face is never reported
        assert!(intersect(Vec2::new(0.0, 7.9), Vec2::new(0.0, 1.0), &r, 1.0).is_none());
        // Resting exactly on the face and moving away
        assert!(intersect(Vec2::new(0.0, 8.0), Vec2::new(3.0, 1.0), &r, 1.0).is_none());
    }

    #[test]
    fn test_on_face_moving_in() {
        let hit = intersect(Vec2::new(0.0, 8.0), Vec2::new(0.0, -1.0), &brick(), 1.0).unwrap();
        assert_eq!(hit.t, 0.0);
        assert_eq!(hit.normal, Vec2::Y);
    }

    #[test]
    fn test_start_inside_loses_tie_at_zero() {
        // An earlier candidate already claimed t = 0
        assert!(intersect(Vec2::new(0.0, 7.9), Vec2::new(0.0, -1.0), &brick(), 0.0).is_none());
    }

    #[test]
    fn test_wall_crossing() {
        let origin = Vec2::new(8.5, 0.0);
        let dir = Vec2::new(1.0, 0.0);
        let hit = hit_wall(origin, dir, Axis::X, 9.0, -1.0, 1.0).unwrap();
        assert!((hit.t - 0.5).abs() < 1e-6);
        assert_eq!(hit.normal, Vec2::NEG_X);
        assert!(approx(hit.point, Vec2::new(9.0, 0.0)));

        // Not reached
        assert!(hit_wall(origin, dir * 0.25, Axis::X, 9.0, -1.0, 1.0).is_none());
        // Moving away
        assert!(hit_wall(origin, -dir, Axis::X, 9.0, -1.0, 1.0).is_none());
        // Parallel
        assert!(hit_wall(origin, Vec2::Y, Axis::X, 9.0, -1.0, 1.0).is_none());
    }

    #[test]
    fn test_wall_already_past() {
        let hit = hit_wall(Vec2::new(9.5, 0.0), Vec2::new(50.0, 0.0), Axis::X, 9.0, -1.0, 1.0)
            .unwrap();
        assert_eq!(hit.t, 0.0);
        assert_eq!(hit.point, Vec2::new(9.5, 0.0));
    }

    #[test]
    fn test_ceiling() {
        let hit = hit_wall(Vec2::new(0.0, 70.0), Vec2::new(0.0, 20.0), Axis::Y, 79.0, -1.0, 1.0)
            .unwrap();
        assert!((hit.t - 0.45).abs() < 1e-6);
        assert_eq!(hit.normal, Vec2::NEG_Y);
    }
}

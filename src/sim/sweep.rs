//! Swept ball motion for one simulation step
//!
//! The ball travels `vel * dt` per step. Each sub-sweep casts the remaining
//! motion against the walls, the paddle and every live brick, moves the ball to
//! the earliest contact, reflects, and spends that fraction of the step's time.
//! The loop ends when a sub-sweep finds nothing in the way, or after
//! `Tuning::max_sweep_iterations` contacts, when the rest of the motion is
//! applied unchecked.
//!
//! Candidate order is fixed so identical inputs give bit-identical results:
//! walls (left, right, ceiling), then the paddle, then bricks by index. A
//! later candidate only wins with a strictly earlier contact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{ball_rect_collision, ball_rect_overlap, reflect_velocity};
use super::ray::{Axis, Hit, hit_wall};
use super::rect::{Rect, Side};
use super::state::{Ball, Bounds, Obstacle};
use crate::settings::Tuning;

/// What the ball ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Struck {
    /// Level wall: `Left`, `Right` or `Top` (the ceiling)
    Wall(Side),
    Paddle,
    /// Index into the brick slice passed to `step`
    Brick(usize),
}

/// One resolved contact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Hit record; `t` is relative to the sub-sweep that found it
    pub hit: Hit,
    pub struck: Struck,
    /// Ball velocity leaving the contact
    pub velocity: Vec2,
}

/// How a step finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SweepOutcome {
    /// The whole time budget was spent
    #[default]
    Resolved,
    /// The iteration cap was reached and the remaining motion force-applied
    Capped,
}

/// Everything that happened during one step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Struck brick indices, first hit first, without repeats
    pub struck_bricks: Vec<usize>,
    pub contacts: Vec<Contact>,
    /// Fraction of the step's time spent in each sub-sweep (sums to 1)
    pub consumed: Vec<f32>,
    pub outcome: SweepOutcome,
    /// The ball started the step inside the paddle and was pushed out
    pub paddle_corrected: bool,
}

impl SweepReport {
    pub fn sub_sweeps(&self) -> usize {
        self.consumed.len()
    }

    pub fn hit_paddle(&self) -> bool {
        self.paddle_corrected || self.contacts.iter().any(|c| c.struck == Struck::Paddle)
    }
}

/// Running counters for diagnosing stuck configurations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepStats {
    pub steps: u64,
    pub sub_sweeps: u64,
    pub contacts: u64,
    pub capped_steps: u64,
    pub paddle_corrections: u64,
}

impl SweepStats {
    pub fn record(&mut self, report: &SweepReport) {
        self.steps += 1;
        self.sub_sweeps += report.sub_sweeps() as u64;
        self.contacts += report.contacts.len() as u64;
        if report.outcome == SweepOutcome::Capped {
            self.capped_steps += 1;
        }
        if report.paddle_corrected {
            self.paddle_corrections += 1;
        }
    }
}

/// Earliest contact found so far in a sub-sweep
struct Closest {
    limit: f32,
    best: Option<(Hit, Struck)>,
}

impl Closest {
    fn new() -> Self {
        Self {
            limit: 1.0,
            best: None,
        }
    }

    /// Casts already reject anything at or past `limit`
    fn offer(&mut self, hit: Option<Hit>, struck: Struck) {
        if let Some(hit) = hit {
            self.limit = hit.t;
            self.best = Some((hit, struck));
        }
    }
}

/// Advance `ball` through one step of `dt` seconds.
///
/// Struck bricks take their hit immediately, so a brick broken mid-step is not
/// tested again. Broken bricks stay in the slice; compacting them is the
/// caller's job between steps.
pub fn step(
    ball: &mut Ball,
    dt: f32,
    bounds: &Bounds,
    paddle: &Obstacle,
    bricks: &mut [Obstacle],
    tuning: &Tuning,
) -> SweepReport {
    let mut report = SweepReport {
        paddle_corrected: resolve_paddle_overlap(ball, bounds, paddle, tuning),
        ..Default::default()
    };

    let mut origin = ball.pos;
    let mut t_remaining = 1.0_f32;
    let mut movement = ball.vel * dt;

    loop {
        if report.contacts.len() >= tuning.max_sweep_iterations as usize {
            log::warn!(
                "Sweep capped after {} contacts at {:?} (vel {:?}), forcing {:.4} of the step",
                report.contacts.len(),
                origin,
                ball.vel,
                t_remaining
            );
            origin += movement;
            report.consumed.push(t_remaining);
            report.outcome = SweepOutcome::Capped;
            break;
        }

        let closest = if movement == Vec2::ZERO {
            None
        } else {
            closest_hit(origin, movement, ball.radius, bounds, paddle, bricks)
        };

        let Some((hit, struck)) = closest else {
            origin += movement;
            report.consumed.push(t_remaining);
            break;
        };

        let consumed = t_remaining * hit.t;
        report.consumed.push(consumed);
        t_remaining -= consumed;
        origin = hit.point;
        ball.vel = reflect_velocity(ball.vel, hit.normal);

        match struck {
            Struck::Paddle => {
                ball.vel = transfer_paddle_speed(ball.vel, hit.normal, paddle, tuning)
            }
            Struck::Brick(index) => {
                bricks[index].hit();
                if !report.struck_bricks.contains(&index) {
                    report.struck_bricks.push(index);
                }
            }
            Struck::Wall(_) => {}
        }

        log::debug!(
            "Contact {:?} at {:?} (t={:.4}, normal {:?}), vel now {:?}",
            struck,
            hit.point,
            hit.t,
            hit.normal,
            ball.vel
        );
        report.contacts.push(Contact {
            hit,
            struck,
            velocity: ball.vel,
        });

        if t_remaining <= 0.0 {
            break;
        }
        movement = ball.vel * (dt * t_remaining);
    }

    ball.pos = origin;
    report
}

/// Earliest contact along `movement`, if any
fn closest_hit(
    origin: Vec2,
    movement: Vec2,
    radius: f32,
    bounds: &Bounds,
    paddle: &Obstacle,
    bricks: &[Obstacle],
) -> Option<(Hit, Struck)> {
    let mut closest = Closest::new();

    // Walls are lines, so the ball centre just stops a radius short of them
    let x_bound = bounds.half_width - radius;
    let ceiling = bounds.height - radius;
    closest.offer(
        hit_wall(origin, movement, Axis::X, -x_bound, 1.0, closest.limit),
        Struck::Wall(Side::Left),
    );
    closest.offer(
        hit_wall(origin, movement, Axis::X, x_bound, -1.0, closest.limit),
        Struck::Wall(Side::Right),
    );
    closest.offer(
        hit_wall(origin, movement, Axis::Y, ceiling, -1.0, closest.limit),
        Struck::Wall(Side::Top),
    );

    let reach = Rect::spanning(origin, origin + movement).expanded(radius);

    if paddle.rect().overlaps(&reach) {
        closest.offer(
            ball_rect_collision(origin, movement, radius, paddle.rect(), closest.limit),
            Struck::Paddle,
        );
    }

    for (index, brick) in bricks.iter().enumerate() {
        if brick.is_broken() || !brick.rect().overlaps(&reach) {
            continue;
        }
        closest.offer(
            ball_rect_collision(origin, movement, radius, brick.rect(), closest.limit),
            Struck::Brick(index),
        );
    }

    closest.best
}

/// Push a ball that starts the step overlapping the paddle back out.
///
/// The paddle moves before the ball is swept, so it can slide into the ball.
/// The ball is moved onto the paddle's nearest face, bounced if it was heading
/// into that face, and given the paddle's speed transfer. A paddle parked
/// against a wall leaves no room beside it, so a ball that would be pushed
/// past the wall goes over the top instead.
fn resolve_paddle_overlap(
    ball: &mut Ball,
    bounds: &Bounds,
    paddle: &Obstacle,
    tuning: &Tuning,
) -> bool {
    let rect = paddle.rect();
    let Some(overlap) = ball_rect_overlap(ball.pos, ball.radius, rect, tuning.snap_epsilon) else {
        return false;
    };

    let x_bound = bounds.half_width - ball.radius;
    let mut pos = overlap.point + overlap.normal * ball.radius;
    let mut normal = overlap.normal;
    pos.x = pos.x.clamp(-x_bound, x_bound);
    if ball_rect_overlap(pos, ball.radius, rect, tuning.snap_epsilon).is_some() {
        pos = Vec2::new(pos.x, rect.top + ball.radius);
        normal = Vec2::Y;
    }

    ball.pos = pos;
    if ball.vel.dot(normal) < 0.0 {
        ball.vel = reflect_velocity(ball.vel, normal);
    }
    ball.vel = transfer_paddle_speed(ball.vel, normal, paddle, tuning);

    log::debug!(
        "Ball pushed out of paddle by {:.3} to {:?}, vel now {:?}",
        overlap.penetration,
        ball.pos,
        ball.vel
    );
    true
}

/// Add the paddle's speed transfer to a ball leaving the paddle along `normal`.
///
/// The transfer never turns the ball back into the face: if it would, the
/// outgoing normal component is kept and only the tangential part applies.
fn transfer_paddle_speed(vel: Vec2, normal: Vec2, paddle: &Obstacle, tuning: &Tuning) -> Vec2 {
    let outward = vel.dot(normal);
    let moved = vel + Vec2::new(tuning.paddle_speed_transfer * paddle.speed_x, 0.0);
    let into = moved.dot(normal);
    if into < 0.0 {
        moved + (outward - into) * normal
    } else {
        moved
    }
}

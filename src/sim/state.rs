//! Ball, obstacle and arena types
//!
//! Bricks and the paddle share one data-only `Obstacle` representation;
//! behaviour dispatches on `ObstacleKind`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        debug_assert!(radius > 0.0, "ball radius must be positive");
        Self { pos, vel, radius }
    }

    /// Launch the ball upward if it is within `area_radius` of the paddle.
    ///
    /// The paddle row sits at y = 0. Vertical velocity is set to `speed` when
    /// `speed` exceeds it (so an incoming ball is never cancelled) and boosted
    /// by `speed` otherwise (so an outgoing ball is not doubled past what it
    /// already carries). Returns whether the launch applied.
    pub fn launch(&mut self, speed: f32, area_radius: f32, paddle_x: f32) -> bool {
        let distance = Vec2::new(self.pos.x - paddle_x, self.pos.y).length();
        if distance > area_radius {
            return false;
        }
        if speed > self.vel.y {
            self.vel.y = speed;
        } else {
            self.vel.y += speed;
        }
        true
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new(
            Vec2::new(BALL_START_X, BALL_START_Y),
            Vec2::new(BALL_START_VEL_X, BALL_START_VEL_Y),
            BALL_RADIUS,
        )
    }
}

/// Level walls: x = ±half_width, ceiling at y = height, open floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub half_width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(half_width: f32, height: f32) -> Self {
        Self { half_width, height }
    }

    /// Bounds for a level of the given scale (ceiling at twice the y scale)
    pub fn from_scale(scale: Vec2) -> Self {
        Self::new(scale.x, scale.y * 2.0)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::from_scale(Vec2::new(LEVEL_SCALE_X, LEVEL_SCALE_Y))
    }
}

/// What an obstacle is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Breaks after `hits_left` hits; -1 never breaks, 0 is broken
    Brick { hits_left: i8 },
    /// Never destroyed; hands some of its speed to the ball
    Paddle,
}

/// A brick or the paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Centre
    pub position: Vec2,
    pub half_size: Vec2,
    /// Horizontal speed (0 = stationary)
    pub speed_x: f32,
    /// Set once the ball has struck this brick
    #[serde(default)]
    pub flashed: bool,
    rect: Rect,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, position: Vec2, half_width: f32, speed_x: f32) -> Self {
        let half_size = Vec2::new(half_width, OBSTACLE_HALF_HEIGHT);
        debug_assert!(half_size.x > 0.0 && half_size.y > 0.0, "degenerate obstacle");
        Self {
            kind,
            position,
            half_size,
            speed_x,
            flashed: false,
            rect: Rect::from_center(position, half_size),
        }
    }

    /// One-hit brick
    pub fn brick(position: Vec2) -> Self {
        Self::new(ObstacleKind::Brick { hits_left: 1 }, position, BRICK_HALF_WIDTH, 0.0)
    }

    /// Brick that takes several hits
    pub fn strong_brick(position: Vec2) -> Self {
        Self::new(
            ObstacleKind::Brick {
                hits_left: STRONG_BRICK_HITS,
            },
            position,
            BRICK_HALF_WIDTH,
            0.0,
        )
    }

    /// One-hit brick that slides sideways
    pub fn moving_brick(position: Vec2) -> Self {
        Self::new(
            ObstacleKind::Brick { hits_left: 1 },
            position,
            BRICK_HALF_WIDTH,
            MOVING_BRICK_SPEED,
        )
    }

    /// Brick that can never break
    pub fn unbreakable_brick(position: Vec2) -> Self {
        Self::new(ObstacleKind::Brick { hits_left: -1 }, position, BRICK_HALF_WIDTH, 0.0)
    }

    /// Player paddle centred at `x` on the paddle row
    pub fn paddle(x: f32) -> Self {
        Self::new(ObstacleKind::Paddle, Vec2::new(x, 0.0), PADDLE_HALF_WIDTH, 0.0)
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    /// Move the centre and rebuild the rect
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.rect = Rect::from_center(position, self.half_size);
    }

    /// Remaining hits; `None` for the paddle
    pub fn hits_left(&self) -> Option<i8> {
        match self.kind {
            ObstacleKind::Brick { hits_left } => Some(hits_left),
            ObstacleKind::Paddle => None,
        }
    }

    pub fn is_broken(&self) -> bool {
        self.hits_left() == Some(0)
    }

    /// Bricks that can eventually break
    pub fn is_breakable(&self) -> bool {
        matches!(self.hits_left(), Some(hits) if hits != -1)
    }

    pub fn is_movable(&self) -> bool {
        self.speed_x != 0.0
    }

    /// Reaction to being struck by the ball.
    ///
    /// Breakable bricks lose a hit and flash; unbreakable bricks and the
    /// paddle are unchanged.
    pub fn hit(&mut self) {
        if let ObstacleKind::Brick { hits_left } = &mut self.kind
            && *hits_left > 0
        {
            *hits_left -= 1;
            self.flashed = true;
        }
    }

    /// Slide horizontally by `speed_x * dt`, staying within `±bound_x`.
    ///
    /// On reaching a bound the obstacle either bounces back (`flip`), keeping
    /// the overshoot as distance travelled back, or parks at the bound and
    /// stops.
    pub fn slide(&mut self, dt: f32, bound_x: f32, flip: bool) {
        let limit = bound_x - self.half_size.x;
        let movement = self.speed_x * dt;
        let mut x = self.position.x;

        if movement > 0.0 {
            let distance = limit - x;
            if distance < 0.0 || distance > movement {
                x += movement;
            } else if flip {
                self.speed_x = -self.speed_x;
                x = limit - (movement - distance);
            } else {
                self.speed_x = 0.0;
                x = limit;
            }
        } else if movement < 0.0 {
            let distance = x + limit;
            if distance < 0.0 || distance > -movement {
                x += movement;
            } else if flip {
                self.speed_x = -self.speed_x;
                x = -limit + (-movement - distance);
            } else {
                self.speed_x = 0.0;
                x = -limit;
            }
        }

        self.set_position(Vec2::new(x, self.position.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_sets_when_faster() {
        let mut ball = Ball::new(Vec2::new(1.0, 2.0), Vec2::new(5.0, -30.0), 1.0);
        assert!(ball.launch(40.0, 7.0, 0.0));
        assert_eq!(ball.vel, Vec2::new(5.0, 40.0));
    }

    #[test]
    fn test_launch_adds_when_slower() {
        let mut ball = Ball::new(Vec2::new(1.0, 2.0), Vec2::new(5.0, 50.0), 1.0);
        assert!(ball.launch(40.0, 7.0, 0.0));
        assert_eq!(ball.vel.y, 90.0);
    }

    #[test]
    fn test_launch_out_of_range() {
        let mut ball = Ball::new(Vec2::new(20.0, 2.0), Vec2::new(5.0, -30.0), 1.0);
        assert!(!ball.launch(40.0, 7.0, 0.0));
        assert_eq!(ball.vel, Vec2::new(5.0, -30.0));
        // Same ball is in range of a paddle that moved under it
        assert!(ball.launch(40.0, 7.0, 18.0));
    }

    #[test]
    fn test_brick_lifecycle() {
        let mut brick = Obstacle::brick(Vec2::new(0.0, 6.0));
        assert!(brick.is_breakable());
        assert!(!brick.is_broken());
        brick.hit();
        assert!(brick.is_broken());
        assert!(brick.flashed);
        // Counter never goes below zero
        brick.hit();
        assert_eq!(brick.hits_left(), Some(0));
    }

    #[test]
    fn test_strong_and_unbreakable() {
        let mut strong = Obstacle::strong_brick(Vec2::ZERO);
        strong.hit();
        assert_eq!(strong.hits_left(), Some(1));
        assert!(!strong.is_broken());

        let mut wall = Obstacle::unbreakable_brick(Vec2::ZERO);
        assert!(!wall.is_breakable());
        for _ in 0..10 {
            wall.hit();
        }
        assert_eq!(wall.hits_left(), Some(-1));
        assert!(!wall.flashed);
    }

    #[test]
    fn test_paddle_is_never_broken() {
        let mut paddle = Obstacle::paddle(0.0);
        paddle.hit();
        assert_eq!(paddle.hits_left(), None);
        assert!(!paddle.is_broken());
        assert!(!paddle.is_breakable());
        assert_eq!(*paddle.rect(), Rect::new(-6.0, 6.0, 1.0, -1.0));
    }

    #[test]
    fn test_slide_moves_rect() {
        let mut brick = Obstacle::moving_brick(Vec2::new(0.0, 60.0));
        brick.slide(0.5, 30.0, true);
        assert_eq!(brick.position.x, 5.0);
        assert_eq!(brick.rect().left, 1.0);
        assert!(brick.is_movable());
    }

    #[test]
    fn test_slide_flips_at_bound() {
        // Limit is 30 - 4 = 26; 2 short of it, moving 5
        let mut brick = Obstacle::moving_brick(Vec2::new(24.0, 60.0));
        brick.slide(0.5, 30.0, true);
        assert_eq!(brick.speed_x, -10.0);
        assert_eq!(brick.position.x, 23.0);
    }

    #[test]
    fn test_slide_parks_without_flip() {
        let mut paddle = Obstacle::paddle(-22.0);
        paddle.speed_x = -70.0;
        paddle.slide(0.1, 30.0, false);
        assert_eq!(paddle.speed_x, 0.0);
        assert_eq!(paddle.position.x, -24.0);
    }
}

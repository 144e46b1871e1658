//! Wire Breakout - swept collision core for a Breakout-style arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ray casts, swept ball, bricks, paddle)
//! - `settings`: Data-driven tuning loaded from JSON

pub mod settings;
pub mod sim;

pub use settings::{ConfigError, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Level scale: walls at ±x, ceiling at 2·y
    pub const LEVEL_SCALE_X: f32 = 30.0;
    pub const LEVEL_SCALE_Y: f32 = 40.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 1.0;
    pub const BALL_START_X: f32 = 0.0;
    pub const BALL_START_Y: f32 = 30.0;
    pub const BALL_START_VEL_X: f32 = 30.0;
    pub const BALL_START_VEL_Y: f32 = 30.0;
    /// Ball counts as lost once its centre drops below this height
    pub const BALL_LOST_DEPTH: f32 = -5.0;

    /// Obstacles are 2 units tall
    pub const OBSTACLE_HALF_HEIGHT: f32 = 1.0;
    pub const BRICK_HALF_WIDTH: f32 = 4.0;
    pub const PADDLE_HALF_WIDTH: f32 = 6.0;
    /// Hits needed to break a strong brick
    pub const STRONG_BRICK_HITS: i8 = 2;
    /// Horizontal speed of a moving brick
    pub const MOVING_BRICK_SPEED: f32 = 10.0;

    /// Paddle controller
    pub const PADDLE_MAX_SPEED: f32 = 70.0;
    pub const PADDLE_ACCELERATION: f32 = 500.0;
    /// Fraction of paddle speed handed to the ball on contact
    pub const PADDLE_SPEED_TRANSFER: f32 = 0.1;

    /// Launch
    pub const LAUNCH_SPEED: f32 = 40.0;
    pub const LAUNCH_AREA_RADIUS: f32 = 7.0;

    /// Sub-collisions allowed per step before the sweep is forced to finish
    pub const MAX_SWEEP_ITERATIONS: u32 = 16;
    /// Separations smaller than this are treated as contact
    pub const SNAP_EPSILON: f32 = 1e-3;

    /// Level layout spacing
    pub const BRICK_PADDING: f32 = 2.0;
    pub const LEVEL_TOP_PADDING: f32 = 10.0;
    pub const LEVEL_SIDE_PADDING: f32 = 6.0;
    /// Default generated level size
    pub const LEVEL_ROWS: u32 = 4;
    pub const LEVEL_COLS: u32 = 5;
}

/// Move `current` toward `target` by at most `max_delta`
#[inline]
pub fn approach(current: f32, target: f32, max_delta: f32) -> f32 {
    if current < target {
        (current + max_delta).min(target)
    } else {
        (current - max_delta).max(target)
    }
}

/// Snap values within `epsilon` of zero to exactly zero
#[inline]
pub fn snap_to_zero(value: f32, epsilon: f32) -> f32 {
    if value.abs() < epsilon { 0.0 } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approach_clamps_to_target() {
        assert_eq!(approach(0.0, 10.0, 4.0), 4.0);
        assert_eq!(approach(8.0, 10.0, 4.0), 10.0);
        assert_eq!(approach(0.0, -10.0, 4.0), -4.0);
        assert_eq!(approach(-9.0, 0.0, 20.0), 0.0);
    }

    #[test]
    fn test_snap_to_zero() {
        assert_eq!(snap_to_zero(0.0005, 1e-3), 0.0);
        assert_eq!(snap_to_zero(-0.0005, 1e-3), 0.0);
        assert_eq!(snap_to_zero(0.5, 1e-3), 0.5);
    }
}

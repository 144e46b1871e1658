//! Fixed timestep simulation tick
//!
//! Thin frame loop around the sweep: moves the paddle and the sliding bricks,
//! sweeps the ball, then drops broken bricks.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Bounds, Obstacle};
use super::sweep::{self, SweepOutcome, SweepStats};
use crate::consts::*;
use crate::settings::Tuning;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Launch ball if it is near the paddle
    pub launch: bool,
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickEvents {
    pub launched: bool,
    /// Distinct bricks struck this tick
    pub bricks_struck: usize,
    /// Bricks removed this tick
    pub bricks_broken: usize,
    pub paddle_hit: bool,
    pub ball_lost: bool,
    pub level_cleared: bool,
    pub sweep: SweepOutcome,
}

/// Complete simulation state for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Level seed for reproducibility
    pub seed: u64,
    pub bounds: Bounds,
    pub ball: Ball,
    pub paddle: Obstacle,
    /// Live bricks, in generation order
    pub bricks: Vec<Obstacle>,
    pub tuning: Tuning,
    pub stats: SweepStats,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub bricks_broken: u64,
}

impl GameState {
    /// Create a new game state with a generated level
    pub fn new(seed: u64) -> Self {
        Self::with_bricks(seed, generate_level(seed, LEVEL_ROWS, LEVEL_COLS))
    }

    pub fn with_bricks(seed: u64, bricks: Vec<Obstacle>) -> Self {
        Self {
            seed,
            bounds: Bounds::default(),
            ball: Ball::default(),
            paddle: Obstacle::paddle(0.0),
            bricks,
            tuning: Tuning::default(),
            stats: SweepStats::default(),
            time_ticks: 0,
            bricks_broken: 0,
        }
    }

    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Put the ball back at its start position and velocity
    pub fn reset_ball(&mut self) {
        self.ball = Ball::default();
    }

    /// Bricks that still have to be broken to clear the level
    pub fn breakable_remaining(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_breakable()).count()
    }

    pub fn is_ball_lost(&self) -> bool {
        self.ball.pos.y < self.tuning.ball_lost_depth
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> TickEvents {
    let mut events = TickEvents::default();
    state.time_ticks += 1;

    update_paddle(state, input, dt);

    if input.launch {
        events.launched = state.ball.launch(
            state.tuning.launch_speed,
            state.tuning.launch_area_radius,
            state.paddle.position.x,
        );
    }

    update_moving_bricks(&mut state.bricks, state.bounds.half_width, dt);

    let report = sweep::step(
        &mut state.ball,
        dt,
        &state.bounds,
        &state.paddle,
        &mut state.bricks,
        &state.tuning,
    );
    state.stats.record(&report);

    let before = state.bricks.len();
    state.bricks.retain(|b| !b.is_broken());
    let broken = before - state.bricks.len();
    if broken > 0 {
        state.bricks_broken += broken as u64;
        log::debug!(
            "Tick {}: {} brick(s) broken, {} breakable left",
            state.time_ticks,
            broken,
            state.breakable_remaining()
        );
    }

    events.bricks_struck = report.struck_bricks.len();
    events.bricks_broken = broken;
    events.paddle_hit = report.hit_paddle();
    events.sweep = report.outcome;
    events.ball_lost = state.is_ball_lost();
    events.level_cleared = state.breakable_remaining() == 0;
    events
}

/// Paddle speed eases toward the held direction, then the paddle slides and
/// stops dead at a wall
fn update_paddle(state: &mut GameState, input: &TickInput, dt: f32) {
    let direction = match (input.move_left, input.move_right) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    };
    let paddle = &mut state.paddle;
    paddle.speed_x = crate::approach(
        paddle.speed_x,
        direction * state.tuning.paddle_max_speed,
        state.tuning.paddle_acceleration * dt,
    );
    paddle.slide(dt, state.bounds.half_width, false);
}

/// Slide movable bricks, bouncing them off the walls and off bricks in the
/// same row
fn update_moving_bricks(bricks: &mut [Obstacle], bound_x: f32, dt: f32) {
    for i in 0..bricks.len() {
        if !bricks[i].is_movable() {
            continue;
        }
        bricks[i].slide(dt, bound_x, true);

        let mut brick = bricks[i].clone();
        for (j, other) in bricks.iter().enumerate() {
            if j == i || other.position.y != brick.position.y {
                continue;
            }
            let gap = if brick.speed_x > 0.0 && brick.position.x < other.position.x {
                other.rect().left - brick.rect().right
            } else if brick.speed_x < 0.0 && other.position.x < brick.position.x {
                brick.rect().left - other.rect().right
            } else {
                continue;
            };
            if gap < 0.0 {
                let back = if brick.speed_x > 0.0 { 2.0 } else { -2.0 };
                brick.set_position(brick.position + Vec2::new(gap * back, 0.0));
                brick.speed_x = -brick.speed_x;
            }
        }
        bricks[i] = brick;
    }
}

/// Generate a `rows` x `cols` brick grid from `seed`
///
/// Rows start just under the ceiling and go down; columns start at the left
/// wall. Columns that would not fit between the walls are dropped.
pub fn generate_level(seed: u64, rows: u32, cols: u32) -> Vec<Obstacle> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let scale = Vec2::new(LEVEL_SCALE_X, LEVEL_SCALE_Y);

    let left = LEVEL_SIDE_PADDING + BRICK_HALF_WIDTH - scale.x;
    let top = scale.y * 2.0 - LEVEL_TOP_PADDING - OBSTACLE_HALF_HEIGHT;
    let step_x = BRICK_HALF_WIDTH * 2.0 + BRICK_PADDING;
    let step_y = OBSTACLE_HALF_HEIGHT * 2.0 + BRICK_PADDING;

    let max_cols = ((2.0 * (scale.x - LEVEL_SIDE_PADDING) + BRICK_PADDING) / step_x) as u32;
    if cols > max_cols {
        log::warn!("Level only fits {} columns, dropping {}", max_cols, cols - max_cols);
    }
    let cols = cols.min(max_cols);

    let mut bricks = Vec::with_capacity((rows * cols) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let position = Vec2::new(left + col as f32 * step_x, top - row as f32 * step_y);
            let brick = match rng.random_range(0u8..20) {
                0..=2 => continue,
                3..=12 => Obstacle::brick(position),
                13..=16 => Obstacle::strong_brick(position),
                17..=18 => Obstacle::moving_brick(position),
                _ => Obstacle::unbreakable_brick(position),
            };
            bricks.push(brick);
        }
    }

    // A level with nothing to break is cleared before it starts
    if rows > 0 && cols > 0 && !bricks.iter().any(Obstacle::is_breakable) {
        let first = Vec2::new(left, top);
        bricks.retain(|b| b.position != first);
        bricks.insert(0, Obstacle::brick(first));
    }

    let breakable = bricks.iter().filter(|b| b.is_breakable()).count();
    log::info!(
        "Level {}: {} bricks ({} breakable) in {}x{}",
        seed,
        bricks.len(),
        breakable,
        rows,
        cols
    );
    bricks
}

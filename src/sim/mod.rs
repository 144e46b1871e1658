//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (walls, paddle, bricks by index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod ray;
pub mod rect;
pub mod state;
pub mod sweep;
pub mod tick;

pub use collision::{Overlap, ball_rect_collision, ball_rect_overlap, reflect_velocity};
pub use ray::{Axis, Hit, hit_wall, intersect};
pub use rect::{Rect, Side};
pub use state::{Ball, Bounds, Obstacle, ObstacleKind};
pub use sweep::{Contact, Struck, SweepOutcome, SweepReport, SweepStats, step};
pub use tick::{GameState, TickEvents, TickInput, generate_level, tick};

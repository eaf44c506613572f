//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable goal iteration order (Near, then Far)
//! - No rendering or platform dependencies

pub mod collision;
pub mod goal;
pub mod motion;
pub mod scoring;
pub mod shot;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{FloorContact, RIM_RULES, RimOutcome, RimRule};
pub use goal::{Backboard, Goal, GoalSide, default_goals, nearest_goal};
pub use scoring::{Feedback, GameSession, ScoreAward};
pub use shot::Shot;
pub use state::{BallState, GameEvent, GameState, Snapshot, Trail};
pub use tick::{TickInput, fire_reset, reset, shoot, shoot_with, tick};
pub use timer::ResetTimer;

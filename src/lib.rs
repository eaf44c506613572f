//! Hoop Shot - a single-ball basketball shooting simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, scoring)
//! - `highscores`: Top-5 leaderboard with JSON persistence
//! - `tuning`: Calibrated physics constants
//! - `settings`: Host preferences

pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScores, Leaderboard};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::{Vec2, Vec3};

/// Court and goal geometry (world units, Y up)
pub mod consts {
    use glam::Vec3;

    /// Court extent along X (baseline to baseline)
    pub const COURT_LENGTH: f32 = 42.0;
    /// Court extent along Z (sideline to sideline)
    pub const COURT_WIDTH: f32 = 21.0;
    pub const HALF_COURT_LENGTH: f32 = COURT_LENGTH / 2.0;
    pub const HALF_COURT_WIDTH: f32 = COURT_WIDTH / 2.0;

    /// Rim height above the floor
    pub const RIM_HEIGHT: f32 = 6.0;
    /// Rim radius (inner edge of the torus)
    pub const RIM_RADIUS: f32 = 0.75;
    /// Distance from the backboard plane to the rim center
    pub const RIM_INSET: f32 = 0.8;

    /// Backboard center height
    pub const BACKBOARD_HEIGHT: f32 = 7.0;
    /// Backboard extent along Z
    pub const BACKBOARD_WIDTH: f32 = 5.0;
    /// Backboard extent along Y
    pub const BACKBOARD_SPAN: f32 = 3.0;

    /// Where the ball sits after a reset (court center, resting on the floor)
    pub const BALL_START: Vec3 = Vec3::new(0.0, 0.7, 0.0);

    /// Shot power bounds and default
    pub const MIN_POWER: u8 = 0;
    pub const MAX_POWER: u8 = 100;
    pub const DEFAULT_POWER: u8 = 50;

    /// Leaderboard capacity
    pub const MAX_HIGH_SCORES: usize = 5;
}

/// Project a world position onto the floor plane (x, z)
#[inline]
pub fn horizontal(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Distance between two points ignoring height
#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    horizontal(a).distance(horizontal(b))
}

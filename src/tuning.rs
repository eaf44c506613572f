//! Data-driven physics tuning
//!
//! All values are per-tick at the nominal tick rate and were calibrated
//! together against a display-synchronized 60 Hz loop.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Nominal tick rate the constants below were tuned for
    pub tick_rate_hz: u32,

    // === Ball ===
    pub ball_radius: f32,
    /// Vertical acceleration per tick (negative = down)
    pub gravity: f32,
    /// Idle movement per tick while a direction is held
    pub move_speed: f32,
    /// Power change per tick while power-up/down is held
    pub power_step: u8,

    // === Floor ===
    pub floor_restitution: f32,
    /// Horizontal velocity kept after each floor contact
    pub floor_friction: f32,
    pub stop_vertical_speed: f32,
    pub stop_total_speed: f32,

    // === Backboard ===
    pub backboard_restitution: f32,
    /// Tangential velocity kept after a backboard hit
    pub backboard_damping: f32,
    /// Extra clearance between ball surface and board plane
    pub backboard_epsilon: f32,

    // === Rim ===
    pub rim_bounce_inner: f32,
    pub rim_bounce_outer: f32,
    pub rim_height_tolerance: f32,
    pub rim_impulse: f32,
    /// Vertical velocity kept after a rim bounce
    pub rim_vertical_damping: f32,
    /// Outward position correction so the next tick does not re-trigger
    pub rim_nudge: f32,

    // === Scoring ===
    /// Scoring radius as a fraction of the rim radius
    pub score_radius_factor: f32,
    /// Vertical velocity must be below this to count a crossing
    pub score_min_descent: f32,
    /// Velocity kept after dropping through the net
    pub net_vertical_damping: f32,
    pub net_horizontal_damping: f32,

    // === Shot ===
    /// Added to the height difference so every shot arcs
    pub apex_offset: f32,
    pub power_multiplier_base: f32,
    pub power_multiplier_span: f32,
    /// Horizontal jitter at zero power
    pub jitter_scale: f32,

    // === Bounds ===
    pub out_of_bounds_margin: f32,
    /// Height above ball radius still considered "at the floor"
    pub out_of_bounds_height_slack: f32,

    // === Timers ===
    pub settle_reset_delay_ms: u32,
    pub out_of_bounds_reset_delay_ms: u32,

    // === Cosmetic ===
    pub trail_length: usize,
    pub flight_spin_x: f32,
    pub flight_spin_z: f32,
    pub roll_spin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60,

            ball_radius: 0.6,
            gravity: -0.02,
            move_speed: 0.3,
            power_step: 2,

            floor_restitution: 0.7,
            floor_friction: 0.9,
            stop_vertical_speed: 0.02,
            stop_total_speed: 0.08,

            backboard_restitution: 0.8,
            backboard_damping: 0.9,
            backboard_epsilon: 0.1,

            rim_bounce_inner: 0.6,
            rim_bounce_outer: 0.9,
            rim_height_tolerance: 0.3,
            rim_impulse: 0.3,
            rim_vertical_damping: 0.7,
            rim_nudge: 0.2,

            score_radius_factor: 0.8,
            score_min_descent: -0.05,
            net_vertical_damping: 0.9,
            net_horizontal_damping: 0.95,

            apex_offset: 3.0,
            power_multiplier_base: 0.8,
            power_multiplier_span: 0.6,
            jitter_scale: 0.1,

            out_of_bounds_margin: 10.0,
            out_of_bounds_height_slack: 1.0,

            settle_reset_delay_ms: 2000,
            out_of_bounds_reset_delay_ms: 1000,

            trail_length: 30,
            flight_spin_x: 0.1,
            flight_spin_z: 0.05,
            roll_spin: 0.1,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides; missing fields keep their calibrated defaults
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid tuning JSON")
    }

    /// Load tuning overrides from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read tuning file {}", path.display()))?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Convert a millisecond delay into whole ticks (at least one)
    pub fn ms_to_ticks(&self, delay_ms: u32) -> u32 {
        let ticks = (delay_ms as u64 * self.tick_rate_hz as u64).div_ceil(1000);
        (ticks as u32).max(1)
    }

    /// Speed multiplier for a power level: 80% at 0, 140% at 100
    pub fn power_multiplier(&self, power: u8) -> f32 {
        self.power_multiplier_base + self.power_multiplier_span * (power as f32 / 100.0)
    }

    /// Horizontal jitter amplitude for a power level (lower power = less accurate)
    pub fn jitter_amplitude(&self, power: u8) -> f32 {
        (1.0 - power as f32 / 100.0) * self.jitter_scale
    }
}

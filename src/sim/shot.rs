//! Shot initiation
//!
//! Solves a ballistic launch toward the nearest rim, scales it by shot power
//! and adds power-dependent horizontal jitter from an injected RNG.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::goal::{Goal, GoalSide, nearest_goal};
use super::scoring::GameSession;
use super::state::BallState;
use crate::horizontal;
use crate::tuning::Tuning;

/// Below this the horizontal direction is treated as undefined
const MIN_HORIZONTAL_DISTANCE: f32 = 1e-6;

/// A launched shot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub goal: GoalSide,
    pub target: Vec3,
    pub velocity: Vec3,
    /// Nominal flight time (ticks) before power scaling
    pub flight_ticks: f32,
}

/// Launch velocity that reaches `goal`'s rim height from `from`, before jitter
pub fn ballistic_velocity(from: Vec3, goal: &Goal, power: u8, tuning: &Tuning) -> (Vec3, f32) {
    let to_rim = horizontal(goal.center) - horizontal(from);
    let distance = to_rim.length();
    let dir = if distance > MIN_HORIZONTAL_DISTANCE {
        to_rim / distance
    } else {
        goal.approach_axis()
    };

    let height_diff = goal.center.y - from.y;
    let rise = (height_diff + tuning.apex_offset).max(f32::EPSILON);
    let t = (2.0 * rise / tuning.gravity.abs()).sqrt().max(1.0);

    let horizontal_speed = distance / t;
    let vertical_speed = height_diff / t - 0.5 * tuning.gravity * t;

    let m = tuning.power_multiplier(power);
    let h = dir * horizontal_speed * m;
    (Vec3::new(h.x, vertical_speed * m, h.y), t)
}

/// Plan a shot from `from` toward the nearest goal
pub fn plan_shot<R: Rng + ?Sized>(
    from: Vec3,
    power: u8,
    goals: &[Goal],
    tuning: &Tuning,
    rng: &mut R,
) -> Option<Shot> {
    let goal = nearest_goal(goals, from)?;
    let (mut velocity, flight_ticks) = ballistic_velocity(from, goal, power, tuning);

    let amplitude = tuning.jitter_amplitude(power);
    let jitter = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * amplitude;
    velocity.x += jitter.x;
    velocity.z += jitter.y;

    Some(Shot {
        goal: goal.side,
        target: goal.center,
        velocity,
        flight_ticks,
    })
}

/// Launch the ball. No-op (returns `None`) while a shot is already in flight.
pub fn shoot<R: Rng + ?Sized>(
    ball: &mut BallState,
    session: &mut GameSession,
    goals: &[Goal],
    tuning: &Tuning,
    rng: &mut R,
) -> Option<Shot> {
    if ball.is_airborne {
        return None;
    }
    let shot = plan_shot(ball.position, session.shot_power, goals, tuning, rng)?;

    ball.velocity = shot.velocity;
    ball.prev_height = ball.position.y;
    ball.is_airborne = true;
    ball.has_scored = false;
    ball.rim_touched_this_shot = false;
    ball.left_court = false;
    session.begin_shot();
    Some(shot)
}

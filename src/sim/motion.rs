//! Motion integration
//!
//! Idle: the ball follows input directly, no velocity involved.
//! Airborne: semi-implicit Euler, one step per tick, no sub-stepping.

use glam::{Vec2, Vec3};

use super::state::BallState;
use crate::consts::{HALF_COURT_LENGTH, HALF_COURT_WIDTH};
use crate::tuning::Tuning;

/// Clamp a position so a ball of `radius` stays on the court footprint
pub fn clamp_to_court(p: Vec3, radius: f32) -> Vec3 {
    let max_x = HALF_COURT_LENGTH - radius;
    let max_z = HALF_COURT_WIDTH - radius;
    Vec3::new(p.x.clamp(-max_x, max_x), p.y, p.z.clamp(-max_z, max_z))
}

/// Move an idle ball by a per-axis input direction (x: right, y: toward +Z).
/// Returns whether anything was requested.
pub fn move_idle(ball: &mut BallState, direction: Vec2, tuning: &Tuning) -> bool {
    if ball.is_airborne || direction == Vec2::ZERO {
        return false;
    }

    let delta = direction * tuning.move_speed;
    let target = ball.position + Vec3::new(delta.x, 0.0, delta.y);
    ball.position = clamp_to_court(target, tuning.ball_radius);

    // Rolling spin follows the held keys
    ball.rotation.z -= direction.x * tuning.roll_spin;
    ball.rotation.x -= direction.y * tuning.roll_spin;
    true
}

/// Advance an airborne ball by one tick under gravity
pub fn integrate_airborne(ball: &mut BallState, tuning: &Tuning) {
    if !ball.is_airborne {
        return;
    }
    ball.prev_height = ball.position.y;
    ball.velocity.y += tuning.gravity;
    ball.position += ball.velocity;

    let speed = ball.speed();
    ball.rotation.x += speed * tuning.flight_spin_x;
    ball.rotation.z += speed * tuning.flight_spin_z;
}

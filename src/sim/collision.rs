//! Collision detection and response against the fixed court primitives
//!
//! Every check works against a known, tiny set of shapes: two backboards,
//! two rims, the floor plane and the out-of-bounds footprint. The rim zone is
//! handled by an ordered list of named rules; the first rule that does not
//! report [`RimOutcome::Continue`] ends the rim stage for that tick.

use glam::{Vec2, Vec3};

use super::goal::{Goal, GoalSide};
use super::state::BallState;
use crate::consts::{HALF_COURT_LENGTH, HALF_COURT_WIDTH};
use crate::tuning::Tuning;

/// Result of evaluating one rim rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RimOutcome {
    Continue,
    Bounced,
    Scored,
}

/// Rules evaluated around each rim, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RimRule {
    /// Ball clipping the rim annulus gets knocked outward
    Bounce,
    /// Ball dropping through the rim plane inside the scoring radius
    Crossing,
}

pub const RIM_RULES: [RimRule; 2] = [RimRule::Bounce, RimRule::Crossing];

impl RimRule {
    pub fn name(self) -> &'static str {
        match self {
            RimRule::Bounce => "rim-bounce",
            RimRule::Crossing => "rim-crossing",
        }
    }

    pub fn apply(self, ball: &mut BallState, goal: &Goal, tuning: &Tuning) -> RimOutcome {
        match self {
            RimRule::Bounce => rim_bounce(ball, goal, tuning),
            RimRule::Crossing => rim_crossing(ball, goal, tuning),
        }
    }
}

/// Outward horizontal direction from the rim center; falls back to the
/// goal's approach axis when the ball is exactly centered
fn outward(goal: &Goal, p: Vec3) -> Vec2 {
    let offset = goal.rim_offset(p);
    let len = offset.length();
    if len > f32::EPSILON {
        offset / len
    } else {
        -goal.approach_axis()
    }
}

fn rim_bounce(ball: &mut BallState, goal: &Goal, tuning: &Tuning) -> RimOutcome {
    let d = goal.rim_distance(ball.position);
    let in_annulus = d >= tuning.rim_bounce_inner && d <= tuning.rim_bounce_outer;
    let at_height = (ball.position.y - goal.center.y).abs() <= tuning.rim_height_tolerance;
    if !(in_annulus && at_height) {
        return RimOutcome::Continue;
    }

    let dir = outward(goal, ball.position);
    ball.velocity.x += dir.x * tuning.rim_impulse;
    ball.velocity.z += dir.y * tuning.rim_impulse;
    ball.velocity.y *= tuning.rim_vertical_damping;

    ball.position.x += dir.x * tuning.rim_nudge;
    ball.position.z += dir.y * tuning.rim_nudge;
    ball.rim_touched_this_shot = true;
    RimOutcome::Bounced
}

fn rim_crossing(ball: &mut BallState, goal: &Goal, tuning: &Tuning) -> RimOutcome {
    if ball.has_scored {
        return RimOutcome::Continue;
    }
    let within = goal.rim_distance(ball.position) < goal.rim_radius * tuning.score_radius_factor;
    let crossed = ball.prev_height > goal.center.y && ball.position.y <= goal.center.y;
    let descending = ball.velocity.y < tuning.score_min_descent;
    if !(within && crossed && descending) {
        return RimOutcome::Continue;
    }

    ball.has_scored = true;
    // Keeps falling through the net, slightly slowed
    ball.velocity.y *= tuning.net_vertical_damping;
    ball.velocity.x *= tuning.net_horizontal_damping;
    ball.velocity.z *= tuning.net_horizontal_damping;
    RimOutcome::Scored
}

/// Run the rim rules for each goal in order. Returns the first goal whose
/// rules produced something other than `Continue`.
pub fn resolve_rim(
    ball: &mut BallState,
    goals: &[Goal],
    tuning: &Tuning,
) -> Option<(GoalSide, RimOutcome)> {
    for goal in goals {
        for rule in RIM_RULES {
            match rule.apply(ball, goal, tuning) {
                RimOutcome::Continue => {}
                outcome => {
                    log::debug!("{} at {:?} goal", rule.name(), goal.side);
                    return Some((goal.side, outcome));
                }
            }
        }
    }
    None
}

/// Bounce off the first backboard the ball is pressing into. At most one
/// board is resolved per tick.
pub fn backboard_collision(
    ball: &mut BallState,
    goals: &[Goal],
    tuning: &Tuning,
) -> Option<GoalSide> {
    let reach = tuning.ball_radius + tuning.backboard_epsilon;
    for goal in goals {
        let board = &goal.backboard;
        if !board.covers(ball.position) {
            continue;
        }
        let n = goal.side.sign();
        let toward = ball.velocity.x * n > 0.0;
        let near_plane = (board.center.x - ball.position.x).abs() <= reach;
        if toward && near_plane {
            ball.position.x = board.center.x - n * reach;
            ball.velocity.x *= -tuning.backboard_restitution;
            ball.velocity.y *= tuning.backboard_damping;
            ball.velocity.z *= tuning.backboard_damping;
            return Some(goal.side);
        }
    }
    None
}

/// What the floor did to the ball this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorContact {
    None,
    Bounced,
    /// Came to rest; velocity has been zeroed
    Settled,
}

pub fn floor_collision(ball: &mut BallState, tuning: &Tuning) -> FloorContact {
    let r = tuning.ball_radius;
    if ball.position.y > r {
        return FloorContact::None;
    }

    ball.position.y = r;
    ball.velocity.y *= -tuning.floor_restitution;
    ball.velocity.x *= tuning.floor_friction;
    ball.velocity.z *= tuning.floor_friction;

    if ball.velocity.y.abs() < tuning.stop_vertical_speed
        && ball.speed() < tuning.stop_total_speed
    {
        ball.velocity = Vec3::ZERO;
        FloorContact::Settled
    } else {
        FloorContact::Bounced
    }
}

/// Ball has left the court footprint by more than the margin and is down at floor level
pub fn is_out_of_bounds(p: Vec3, tuning: &Tuning) -> bool {
    let m = tuning.out_of_bounds_margin;
    let outside = p.x.abs() > HALF_COURT_LENGTH + m || p.z.abs() > HALF_COURT_WIDTH + m;
    outside && p.y <= tuning.ball_radius + tuning.out_of_bounds_height_slack
}

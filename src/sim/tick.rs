//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. The host calls
//! [`tick`] exactly once per frame.

use glam::Vec2;
use rand::Rng;

use super::collision::{self, FloorContact, RimOutcome};
use super::motion;
use super::shot::{self, Shot};
use super::state::{BallState, GameEvent, GameState};
use crate::consts::{BALL_START, DEFAULT_POWER};
use crate::highscores::Leaderboard;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Toward -Z
    pub forward: bool,
    /// Toward +Z
    pub back: bool,
    pub power_up: bool,
    pub power_down: bool,
    /// Shoot pressed this tick (edge, not level)
    pub shoot: bool,
    /// Reset pressed this tick (edge, not level)
    pub reset: bool,
    /// Host wall clock, used to timestamp leaderboard entries
    pub timestamp_ms: f64,
}

impl TickInput {
    /// Per-axis movement direction: x toward +X, y toward +Z
    pub fn movement(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.forward, self.back))
    }

    /// Signed power change for this tick
    pub fn power_delta(&self, step: u8) -> i16 {
        (self.power_up as i16 - self.power_down as i16) * step as i16
    }
}

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState, input: &TickInput, board: &mut dyn Leaderboard) {
    state.time_ticks += 1;

    if input.reset {
        reset(state, board, input.timestamp_ms);
    }
    if input.shoot {
        shoot(state);
    }

    if state.ball.is_airborne {
        step_airborne(state);
    } else {
        let step = state.tuning.power_step;
        state.session.adjust_power(input.power_delta(step));
        motion::move_idle(&mut state.ball, input.movement(), &state.tuning);
        state.trail.decay();
    }

    if let Some(generation) = state.reset_timer.advance() {
        fire_reset(state, generation, board, input.timestamp_ms);
    }
}

/// Take a shot toward the nearest goal. No-op while airborne.
pub fn shoot(state: &mut GameState) -> Option<Shot> {
    let shot = shot::shoot(
        &mut state.ball,
        &mut state.session,
        &state.goals,
        &state.tuning,
        &mut state.rng,
    )?;
    Some(launched(state, shot))
}

/// [`shoot`] with the jitter drawn from `rng` instead of the state's own RNG
pub fn shoot_with<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> Option<Shot> {
    let shot = shot::shoot(
        &mut state.ball,
        &mut state.session,
        &state.goals,
        &state.tuning,
        rng,
    )?;
    Some(launched(state, shot))
}

fn launched(state: &mut GameState, shot: Shot) -> Shot {
    state.generation += 1;
    log::info!(
        "Shot {} at {:?} goal {}, power {}%, nominal flight {:.0} ticks",
        state.session.shot_attempts,
        shot.goal,
        shot.target,
        state.session.shot_power,
        shot.flight_ticks
    );
    state.push_event(GameEvent::ShotTaken {
        goal: shot.goal,
        power: state.session.shot_power,
        velocity: shot.velocity,
    });
    shot
}

/// Motion, collisions and scoring for one airborne tick
fn step_airborne(state: &mut GameState) {
    let tuning = &state.tuning;
    let ball = &mut state.ball;

    motion::integrate_airborne(ball, tuning);

    if let Some(side) = collision::backboard_collision(ball, &state.goals, tuning) {
        log::debug!("Backboard hit at {:?} goal", side);
        state.events.push(GameEvent::BackboardHit { goal: side });
    }

    match collision::resolve_rim(ball, &state.goals, tuning) {
        Some((side, RimOutcome::Bounced)) => {
            state.session.break_streak();
            state.events.push(GameEvent::RimBounce { goal: side });
        }
        Some((side, RimOutcome::Scored)) => {
            let award = state.session.record_make(ball.rim_touched_this_shot);
            log::info!(
                "Scored +{} (swish: {}, combo: {}), total {}",
                award.points,
                award.swish,
                award.combo,
                state.session.score
            );
            let center = state.goals.iter().find(|g| g.side == side).map(|g| g.center);
            state.events.push(GameEvent::Scored {
                goal: side,
                points: award.points,
                swish: award.swish,
                combo: award.combo,
                combo_bonus: award.combo_bonus,
            });
            if let Some(center) = center {
                state.events.push(GameEvent::NetSway { center });
            }
        }
        Some((_, RimOutcome::Continue)) | None => {}
    }

    if collision::floor_collision(ball, tuning) == FloorContact::Settled {
        ball.is_airborne = false;
        let position = ball.position;
        state.events.push(GameEvent::Settled { position });
        resolve_miss(state);
        let delay = state.tuning.settle_reset_delay_ms;
        schedule_reset(state, delay);
    } else if !ball.left_court && collision::is_out_of_bounds(ball.position, tuning) {
        ball.left_court = true;
        let position = ball.position;
        log::debug!("Ball out of bounds at {:?}", position);
        state.events.push(GameEvent::OutOfBounds { position });
        resolve_miss(state);
        let delay = state.tuning.out_of_bounds_reset_delay_ms;
        schedule_reset(state, delay);
    }

    let position = state.ball.position;
    state.trail.record(position);
}

/// Report a miss if the shot ended without any outcome
fn resolve_miss(state: &mut GameState) {
    if state.ball.has_scored || !state.session.last_feedback.is_none() {
        return;
    }
    state.session.record_miss();
    log::info!("Missed shot ({} of {})", state.session.shots_made, state.session.shot_attempts);
    state.push_event(GameEvent::Missed);
}

fn schedule_reset(state: &mut GameState, delay_ms: u32) {
    let generation = state.generation;
    if state.auto_reset {
        let ticks = state.tuning.ms_to_ticks(delay_ms);
        if !state.reset_timer.schedule(generation, ticks) {
            return;
        }
    }
    state.push_event(GameEvent::ResetScheduled { delay_ms, generation });
}

/// Timer callback: reset only if no shoot/reset happened since scheduling.
/// Returns whether the reset ran.
pub fn fire_reset(
    state: &mut GameState,
    generation: u64,
    board: &mut dyn Leaderboard,
    timestamp_ms: f64,
) -> bool {
    if generation != state.generation {
        log::debug!(
            "Ignoring stale reset (scheduled for {}, now {})",
            generation,
            state.generation
        );
        return false;
    }
    reset(state, board, timestamp_ms);
    true
}

/// Return the ball to center court and close out the round. Submits the
/// round to the leaderboard when anything was scored. Returns the rank
/// achieved, if any.
pub fn reset(
    state: &mut GameState,
    board: &mut dyn Leaderboard,
    timestamp_ms: f64,
) -> Option<usize> {
    state.generation += 1;
    state.reset_timer.cancel();

    state.ball = BallState::at_rest(BALL_START);
    state.trail.clear();
    state.session.shot_power = DEFAULT_POWER;
    state.session.last_feedback = Default::default();

    let submitted = state.session.should_submit();
    let rank = if submitted {
        let score = state.session.score;
        let rank = board.submit(score, timestamp_ms);
        log::info!("Round over: score {} submitted (rank {:?})", score, rank);
        rank
    } else {
        None
    };

    state.session.clear_round();
    state.push_event(GameEvent::Reset { submitted, rank });
    rank
}

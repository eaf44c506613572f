//! Game state and core simulation types
//!
//! All mutable simulation state lives in [`GameState`]; nothing else writes
//! the ball's position or velocity.

use std::collections::VecDeque;

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::goal::{Goal, GoalSide, default_goals};
use super::scoring::{Feedback, GameSession};
use super::timer::ResetTimer;
use crate::consts::BALL_START;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Ball kinematics and per-shot flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub position: Vec3,
    /// Units per tick
    pub velocity: Vec3,
    /// Height at the start of the current tick (rim-crossing detection)
    pub prev_height: f32,
    /// Cosmetic spin (Euler angles, radians)
    pub rotation: Vec3,
    pub is_airborne: bool,
    /// Set once the current shot scores; blocks double counting through the net
    pub has_scored: bool,
    /// Set the first time the rim deflects the current shot
    pub rim_touched_this_shot: bool,
    /// Set once the current shot has been reported out of bounds
    pub left_court: bool,
}

impl Default for BallState {
    fn default() -> Self {
        Self::at_rest(BALL_START)
    }
}

impl BallState {
    pub fn at_rest(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            prev_height: position.y,
            rotation: Vec3::ZERO,
            is_airborne: false,
            has_scored: false,
            rim_touched_this_shot: false,
            left_court: false,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Bounded history of recent airborne positions (oldest first)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    points: VecDeque<Vec3>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a point, dropping the oldest past capacity
    pub fn record(&mut self, pos: Vec3) {
        if self.capacity == 0 {
            return;
        }
        self.points.push_back(pos);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Drop the oldest point (idle fade-out)
    pub fn decay(&mut self) {
        self.points.pop_front();
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec3> {
        self.points.iter()
    }

    pub fn to_vec(&self) -> Vec<Vec3> {
        self.points.iter().copied().collect()
    }
}

/// Notifications for the presentation layer, drained after each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotTaken { goal: GoalSide, power: u8, velocity: Vec3 },
    BackboardHit { goal: GoalSide },
    RimBounce { goal: GoalSide },
    Scored {
        goal: GoalSide,
        /// Total awarded, bonuses included
        points: u32,
        swish: bool,
        combo: u32,
        combo_bonus: u32,
    },
    /// Play the net sway animation at this rim center
    NetSway { center: Vec3 },
    Missed,
    OutOfBounds { position: Vec3 },
    Settled { position: Vec3 },
    ResetScheduled { delay_ms: u32, generation: u64 },
    Reset { submitted: bool, rank: Option<usize> },
}

/// Read-only copy of everything a renderer or HUD needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Vec3,
    pub is_airborne: bool,
    pub trail: Vec<Vec3>,
    pub session: GameSession,
    pub feedback: String,
    pub accuracy: u32,
}

/// Complete simulation state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for the shot jitter RNG
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub ball: BallState,
    pub session: GameSession,
    pub goals: [Goal; 2],
    pub trail: Trail,
    /// Schedule resets automatically after a shot resolves
    pub auto_reset: bool,
    pub reset_timer: ResetTimer,
    /// Bumped by every shoot and reset; stale timers compare against it
    pub generation: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed and calibrated tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            trail: Trail::new(tuning.trail_length),
            tuning,
            ball: BallState::default(),
            session: GameSession::new(),
            goals: default_goals(),
            auto_reset: true,
            reset_timer: ResetTimer::new(),
            generation: 0,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Build from host settings; `fallback_seed` is used when none is configured
    pub fn from_settings(settings: &Settings, fallback_seed: u64) -> Self {
        let mut state = Self::with_tuning(
            settings.seed.unwrap_or(fallback_seed),
            settings.tuning.clone(),
        );
        if !settings.trails {
            state.trail = Trail::new(0);
        }
        state.auto_reset = settings.auto_reset;
        state
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events queued since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn goal(&self, side: GoalSide) -> &Goal {
        match side {
            GoalSide::Near => &self.goals[0],
            GoalSide::Far => &self.goals[1],
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            position: self.ball.position,
            velocity: self.ball.velocity,
            rotation: self.ball.rotation,
            is_airborne: self.ball.is_airborne,
            trail: self.trail.to_vec(),
            session: self.session.clone(),
            feedback: self.session.last_feedback.message(),
            accuracy: self.session.accuracy(),
        }
    }

    pub fn feedback(&self) -> Feedback {
        self.session.last_feedback
    }
}

//! Shot scoring and streak bookkeeping
//!
//! A shot moves `Idle -> Airborne -> {Scored | Missed} -> Idle`. Each round
//! is a single shot from the leaderboard's point of view: a reset submits
//! the round and zeroes every counter here except the power setting.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_POWER, MAX_POWER, MIN_POWER};

/// Points for any made shot
pub const MADE_POINTS: u32 = 2;
/// Extra points when the rim was never touched
pub const SWISH_BONUS: u32 = 3;

/// Outcome of the last resolved shot, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Feedback {
    #[default]
    None,
    Made,
    Swish,
    Combo(u32),
    Missed,
}

impl Feedback {
    /// Display string for the feedback banner
    pub fn message(&self) -> String {
        match self {
            Feedback::None => String::new(),
            Feedback::Made => "SHOT MADE!".to_string(),
            Feedback::Swish => format!("SWISH! +{} BONUS!", SWISH_BONUS),
            Feedback::Combo(n) => format!("COMBO x{}! +{} BONUS!", n, n),
            Feedback::Missed => "MISSED SHOT".to_string(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Feedback::None)
    }
}

/// Points awarded by a single make
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreAward {
    pub points: u32,
    pub swish: bool,
    /// Streak length after this make
    pub combo: u32,
    pub combo_bonus: u32,
}

/// Per-round scoring state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub score: u32,
    pub shot_attempts: u32,
    pub shots_made: u32,
    /// Shot power percentage (0-100); only adjustable while idle
    pub shot_power: u8,
    pub combo_streak: u32,
    pub max_combo: u32,
    pub last_feedback: Feedback,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            score: 0,
            shot_attempts: 0,
            shots_made: 0,
            shot_power: DEFAULT_POWER,
            combo_streak: 0,
            max_combo: 0,
            last_feedback: Feedback::None,
        }
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a new attempt and clear the previous outcome
    pub fn begin_shot(&mut self) {
        self.shot_attempts += 1;
        self.last_feedback = Feedback::None;
    }

    /// Apply a made shot. `rim_touched` gates the swish bonus.
    pub fn record_make(&mut self, rim_touched: bool) -> ScoreAward {
        let mut points = MADE_POINTS;
        self.shots_made += 1;

        let swish = !rim_touched;
        if swish {
            points += SWISH_BONUS;
        }

        self.combo_streak += 1;
        self.max_combo = self.max_combo.max(self.combo_streak);

        let combo_bonus = if self.combo_streak > 1 { self.combo_streak } else { 0 };
        points += combo_bonus;
        self.score += points;

        self.last_feedback = if combo_bonus > 0 {
            Feedback::Combo(self.combo_streak)
        } else if swish {
            Feedback::Swish
        } else {
            Feedback::Made
        };

        ScoreAward {
            points,
            swish,
            combo: self.combo_streak,
            combo_bonus,
        }
    }

    /// A miss always breaks the streak
    pub fn record_miss(&mut self) {
        self.last_feedback = Feedback::Missed;
        self.combo_streak = 0;
    }

    /// Any rim contact breaks the streak, even if the shot still drops
    pub fn break_streak(&mut self) {
        self.combo_streak = 0;
    }

    /// Whether the finished round belongs on the leaderboard
    pub fn should_submit(&self) -> bool {
        self.shot_attempts > 0 && (self.shots_made > 0 || self.score > 0)
    }

    /// Zero the round counters (power is handled by the caller)
    pub fn clear_round(&mut self) {
        self.score = 0;
        self.shot_attempts = 0;
        self.shots_made = 0;
        self.combo_streak = 0;
        self.max_combo = 0;
    }

    /// Nudge power by `delta`, clamped to [0, 100]
    pub fn adjust_power(&mut self, delta: i16) {
        let power = (self.shot_power as i16 + delta).clamp(MIN_POWER as i16, MAX_POWER as i16);
        self.shot_power = power as u8;
    }

    /// Made percentage, rounded; 0 before the first attempt
    pub fn accuracy(&self) -> u32 {
        if self.shot_attempts == 0 {
            return 0;
        }
        (self.shots_made as f32 / self.shot_attempts as f32 * 100.0).round() as u32
    }
}

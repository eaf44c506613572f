//! Static goal geometry
//!
//! A goal is a rim plus the backboard behind it. Two goals sit at opposite
//! baselines, mirrored across the court's center line (x = 0).

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which baseline a goal stands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalSide {
    /// Positive-X baseline
    Near,
    /// Negative-X baseline
    Far,
}

impl GoalSide {
    /// +1 for the near baseline, -1 for the far one
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            GoalSide::Near => 1.0,
            GoalSide::Far => -1.0,
        }
    }
}

/// Backboard rectangle, perpendicular to the X axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Backboard {
    /// Center of the board face
    pub center: Vec3,
    /// Half extent along Z
    pub half_width: f32,
    /// Half extent along Y
    pub half_height: f32,
}

impl Backboard {
    /// Whether a point lies inside the board's face rectangle (ignoring depth)
    pub fn covers(&self, p: Vec3) -> bool {
        (p.z - self.center.z).abs() <= self.half_width
            && p.y >= self.center.y - self.half_height
            && p.y <= self.center.y + self.half_height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub side: GoalSide,
    /// Rim center
    pub center: Vec3,
    pub rim_radius: f32,
    pub backboard: Backboard,
}

impl Goal {
    /// Build the goal standing on the given baseline
    pub fn new(side: GoalSide) -> Self {
        let s = side.sign();
        Self {
            side,
            center: Vec3::new(s * (HALF_COURT_LENGTH - RIM_INSET), RIM_HEIGHT, 0.0),
            rim_radius: RIM_RADIUS,
            backboard: Backboard {
                center: Vec3::new(s * HALF_COURT_LENGTH, BACKBOARD_HEIGHT, 0.0),
                half_width: BACKBOARD_WIDTH / 2.0,
                half_height: BACKBOARD_SPAN / 2.0,
            },
        }
    }

    /// Horizontal unit vector pointing from the court toward this goal's board
    #[inline]
    pub fn approach_axis(&self) -> Vec2 {
        Vec2::new(self.side.sign(), 0.0)
    }

    /// Horizontal offset from rim center to `p`
    #[inline]
    pub fn rim_offset(&self, p: Vec3) -> Vec2 {
        Vec2::new(p.x - self.center.x, p.z - self.center.z)
    }

    /// Distance from rim center to `p` in the floor plane
    #[inline]
    pub fn rim_distance(&self, p: Vec3) -> f32 {
        self.rim_offset(p).length()
    }
}

/// The two goals in fixed iteration order (Near, then Far)
pub fn default_goals() -> [Goal; 2] {
    [Goal::new(GoalSide::Near), Goal::new(GoalSide::Far)]
}

/// Goal closest to `p` (Euclidean, rim center). Ties go to the earlier goal.
pub fn nearest_goal(goals: &[Goal], p: Vec3) -> Option<&Goal> {
    let mut best: Option<(&Goal, f32)> = None;
    for goal in goals {
        let d = goal.center.distance(p);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((goal, d)),
        }
    }
    best.map(|(g, _)| g)
}

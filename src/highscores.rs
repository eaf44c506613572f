//! High score leaderboard system
//!
//! Each round (one shot) that scores is submitted here. Keeps the top 5,
//! highest first; equal scores stay in submission order.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_HIGH_SCORES;

/// Ranked score store the simulation submits finished rounds to
pub trait Leaderboard {
    /// Record a finished round. Returns the rank achieved (1-indexed), or
    /// `None` if the score did not make the table.
    fn submit(&mut self, score: u32, timestamp: f64) -> Option<usize>;

    /// Best `n` entries, highest first
    fn top_n(&self, n: usize) -> Vec<HighScoreEntry>;
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Round score
    pub score: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry { score, timestamp };

        // Insert after any equal scores so ties keep submission order
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load a leaderboard from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read high scores from {}", path.display()))?;
        let mut scores: HighScores = serde_json::from_str(&json)
            .with_context(|| format!("corrupt high score file {}", path.display()))?;
        // Tolerate hand-edited files
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        log::info!("Loaded {} high scores", scores.entries.len());
        Ok(scores)
    }

    /// Load, falling back to an empty table if the file is missing or unreadable
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No high scores found, starting fresh");
            return Self::new();
        }
        match Self::load(path) {
            Ok(scores) => scores,
            Err(e) => {
                log::warn!("{:#}; starting fresh", e);
                Self::new()
            }
        }
    }

    /// Save the leaderboard as JSON
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write high scores to {}", path.display()))?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

impl Leaderboard for HighScores {
    fn submit(&mut self, score: u32, timestamp: f64) -> Option<usize> {
        self.add_score(score, timestamp)
    }

    fn top_n(&self, n: usize) -> Vec<HighScoreEntry> {
        self.entries.iter().take(n).cloned().collect()
    }
}

//! Game settings and preferences
//!
//! Loaded from a JSON file by the native driver. Every field is optional in
//! the file; missing ones fall back to [`Settings::default`].

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ball trails
    pub trails: bool,
    /// Reset the ball automatically after each shot resolves
    pub auto_reset: bool,
    /// Fixed RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,
    /// Where the leaderboard is persisted
    pub highscores_path: Option<PathBuf>,
    /// Physics and gameplay constants
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            trails: true,
            auto_reset: true,
            seed: None,
            highscores_path: None,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    const DEFAULT_HIGHSCORES_FILE: &'static str = "hoop_shot_highscores.json";

    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid settings JSON")
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings = Self::from_json(&json)
            .with_context(|| format!("while loading {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write settings to {}", path.display()))?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Leaderboard file, defaulting to the working directory
    pub fn highscores_path(&self) -> PathBuf {
        self.highscores_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_HIGHSCORES_FILE))
    }
}

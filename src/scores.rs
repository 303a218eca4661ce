//! Best-runs table persisted to ~/.flappy/scores.json.

use crate::core::config::Difficulty;
use crate::core::constants::HIGH_SCORE_SLOTS;
use crate::utils::persistence::{load_json_or_default, save_json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io;

const SCORES_FILE: &str = "scores.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    pub level: u32,
    pub difficulty: Difficulty,
    /// Unix seconds.
    pub achieved_at: i64,
}

impl ScoreEntry {
    /// Entry stamped with the current time.
    pub fn now(score: u32, level: u32, difficulty: Difficulty) -> Self {
        Self {
            score,
            level,
            difficulty,
            achieved_at: Utc::now().timestamp(),
        }
    }

    /// `YYYY-MM-DD`, or "unknown" for an out-of-range timestamp.
    pub fn date(&self) -> String {
        DateTime::<Utc>::from_timestamp(self.achieved_at, 0)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Highest scores first. Ties keep the earlier run ahead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<ScoreEntry>,
}

impl HighScores {
    pub fn load() -> Self {
        load_json_or_default(SCORES_FILE)
    }

    pub fn save(&self) -> io::Result<()> {
        save_json(SCORES_FILE, self)
    }

    pub fn best(&self) -> Option<&ScoreEntry> {
        self.entries.first()
    }

    pub fn best_for(&self, difficulty: Difficulty) -> Option<&ScoreEntry> {
        self.entries.iter().find(|e| e.difficulty == difficulty)
    }

    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        self.entries.len() < HIGH_SCORE_SLOTS
            || self.entries.last().is_some_and(|lowest| score > lowest.score)
    }

    /// Insert a run if it makes the table. Returns its 1-based rank.
    pub fn record(&mut self, entry: ScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }
        let position = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(position, entry);
        self.entries.truncate(HIGH_SCORE_SLOTS);
        Some(position + 1)
    }
}

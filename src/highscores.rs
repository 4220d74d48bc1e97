//! Persisted high score record
//!
//! A single best score, plus the level it was reached on.

use serde::{Deserialize, Serialize};

/// Best score so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScore {
    pub score: u64,
    /// Level reached when the score was set
    #[serde(default)]
    pub level: u32,
}

impl HighScore {
    pub fn new(score: u64, level: u32) -> Self {
        Self { score, level }
    }

    /// Check if a score beats the record
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.score
    }

    /// Record a score if it beats the current best. Returns true when the
    /// record changed.
    pub fn submit(&mut self, score: u64, level: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.score = score;
        self.level = level;
        true
    }
}

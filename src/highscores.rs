//! High score tracking
//!
//! In memory only, lives as long as the process.

use serde::{Deserialize, Serialize};

use crate::game_loop::SessionObserver;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    /// Ticks survived
    pub frames: u64,
}

/// Best score plus a short leaderboard for the current process
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    best: u32,
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// `max` of every final score recorded so far
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Record a finished run. Returns true if it set a new best.
    pub fn record(&mut self, score: u32, frames: u64) -> bool {
        let new_best = score > self.best;
        self.best = self.best.max(score);

        if self.qualifies(score) {
            let entry = HighScoreEntry { score, frames };
            let pos = self
                .entries
                .iter()
                .position(|e| score > e.score)
                .unwrap_or(self.entries.len());
            self.entries.insert(pos, entry);
            self.entries.truncate(MAX_HIGH_SCORES);
        }

        if new_best {
            log::info!("New high score: {score}");
        }
        new_best
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionObserver for HighScores {
    fn on_game_over(&mut self, final_score: u32, frames: u64) {
        self.record(final_score, frames);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_is_running_max() {
        let mut scores = HighScores::new();
        assert_eq!(scores.best(), 0);
        assert!(scores.record(5, 100));
        assert!(!scores.record(3, 80));
        assert!(scores.record(11, 400));
        assert!(!scores.record(11, 500));
        assert_eq!(scores.best(), 11);
    }

    #[test]
    fn test_leaderboard_sorted_and_bounded() {
        let mut scores = HighScores::new();
        for score in 1..=15 {
            scores.record(score, score as u64 * 10);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries[0].score, 15);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(6));
        assert!(!scores.qualifies(2));
    }

    #[test]
    fn test_zero_score_not_listed() {
        let mut scores = HighScores::new();
        assert!(!scores.record(0, 30));
        assert!(scores.is_empty());
    }

    #[test]
    fn test_observer_records_game_over() {
        let mut scores = HighScores::new();
        scores.on_game_over(7, 250);
        assert_eq!(scores.best(), 7);
        assert_eq!(scores.entries[0], HighScoreEntry { score: 7, frames: 250 });
    }
}

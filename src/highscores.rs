//! High score leaderboard system
//!
//! Persisted as a JSON file, tracks top 10 scores.

use std::fs;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u64,
    /// Level reached
    pub level: u32,
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
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64, level: u32, timestamp: f64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                level,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from a JSON file. A missing file is an empty board.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high scores at {}, starting fresh", path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut scores: HighScores = serde_json::from_str(&json)?;
        // Hand-edited files may be out of order
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        log::info!("Loaded {} high scores", scores.entries.len());
        Ok(scores)
    }

    /// Save high scores to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Current wall-clock time as Unix milliseconds
pub fn now_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0.0, |d| d.as_secs_f64() * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(scores: &[u64]) -> HighScores {
        let mut hs = HighScores::new();
        for (i, &score) in scores.iter().enumerate() {
            hs.add_score(score, 1, i as f64);
        }
        hs
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("maze_chase_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_zero_never_qualifies() {
        assert!(!HighScores::new().qualifies(0));
        assert_eq!(HighScores::new().add_score(0, 1, 0.0), None);
    }

    #[test]
    fn test_sorted_descending() {
        let hs = board(&[300, 900, 500]);
        let scores: Vec<u64> = hs.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![900, 500, 300]);
        assert_eq!(hs.top_score(), Some(900));
    }

    #[test]
    fn test_rank_and_ties() {
        let mut hs = board(&[900, 500, 300]);
        assert_eq!(hs.potential_rank(1000), Some(1));
        // Ties rank below the existing entry
        assert_eq!(hs.potential_rank(500), Some(3));
        assert_eq!(hs.add_score(500, 2, 9.0), Some(3));
        assert_eq!(hs.entries[2].level, 2);
    }

    #[test]
    fn test_full_board_trims() {
        let mut hs = board(&[100, 200, 300, 400, 500, 600, 700, 800, 900, 1000]);
        assert_eq!(hs.entries.len(), MAX_HIGH_SCORES);
        assert!(!hs.qualifies(100));
        assert!(hs.qualifies(101));

        assert_eq!(hs.add_score(550, 3, 0.0), Some(6));
        assert_eq!(hs.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(hs.entries.last().map(|e| e.score), Some(200));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let hs = HighScores::load(temp_path("missing")).unwrap();
        assert!(hs.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("save");
        let hs = board(&[1200, 40]);
        hs.save(&path).unwrap();
        let loaded = HighScores::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, hs);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let path = temp_path("garbage");
        fs::write(&path, "not json").unwrap();
        let result = HighScores::load(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(StoreError::Json(_))));
    }

    #[test]
    fn test_now_timestamp_is_recent() {
        // 2020-01-01 in Unix ms
        assert!(now_timestamp() > 1_577_836_800_000.0);
    }
}

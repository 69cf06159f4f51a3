//! Per-level best scores
//!
//! Saving and restoring is left to the caller; JSON helpers are provided.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Best result for one level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRecord {
    pub best_points: u32,
    /// Fastest perfect game, only kept when the timer was on
    pub best_time: Option<Duration>,
}

/// Best results, indexed by level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScores {
    pub levels: Vec<LevelRecord>,
}

impl BestScores {
    pub fn new(level_count: usize) -> Self {
        Self {
            levels: vec![LevelRecord::default(); level_count],
        }
    }

    pub fn best_points(&self, level: usize) -> u32 {
        self.levels.get(level).map(|r| r.best_points).unwrap_or(0)
    }

    pub fn best_time(&self, level: usize) -> Option<Duration> {
        self.levels.get(level).and_then(|r| r.best_time)
    }

    /// Record a finished game. `perfect_time` is the elapsed time of a
    /// perfect, timed game. Returns true if the points are a new best.
    pub fn record(&mut self, level: usize, points: u32, perfect_time: Option<Duration>) -> bool {
        if level >= self.levels.len() {
            self.levels.resize(level + 1, LevelRecord::default());
        }
        let record = &mut self.levels[level];

        let new_best = points > record.best_points;
        if new_best {
            record.best_points = points;
        }
        if let Some(time) = perfect_time {
            if record.best_time.is_none_or(|best| time < best) {
                record.best_time = Some(time);
            }
        }
        new_best
    }

    pub fn reset(&mut self) {
        for record in &mut self.levels {
            *record = LevelRecord::default();
        }
    }

    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load best scores from a JSON file, starting fresh if there are none
    pub fn load(path: &Path, level_count: usize) -> Self {
        let loaded = std::fs::read_to_string(path)
            .map_err(|source| StorageError::Io {
                path: path.to_path_buf(),
                source,
            })
            .and_then(|json| Self::from_json(&json));

        match loaded {
            Ok(mut scores) => {
                if scores.levels.len() < level_count {
                    scores.levels.resize(level_count, LevelRecord::default());
                }
                log::info!("Loaded best scores for {} levels", scores.levels.len());
                scores
            }
            Err(e) => {
                log::info!("No best scores found, starting fresh ({})", e);
                Self::new(level_count)
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Best scores saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_highest() {
        let mut scores = BestScores::new(3);
        assert!(scores.record(1, 6, None));
        assert!(!scores.record(1, 4, None));
        assert!(!scores.record(1, 6, None));
        assert_eq!(scores.best_points(1), 6);
        assert_eq!(scores.best_points(0), 0);
    }

    #[test]
    fn test_best_time_only_improves() {
        let mut scores = BestScores::new(3);
        scores.record(0, 10, Some(Duration::from_secs(40)));
        scores.record(0, 10, Some(Duration::from_secs(55)));
        assert_eq!(scores.best_time(0), Some(Duration::from_secs(40)));
        scores.record(0, 10, Some(Duration::from_secs(30)));
        assert_eq!(scores.best_time(0), Some(Duration::from_secs(30)));
        assert_eq!(scores.best_time(2), None);
    }

    #[test]
    fn test_unknown_level_grows() {
        let mut scores = BestScores::new(1);
        assert!(scores.record(4, 2, None));
        assert_eq!(scores.levels.len(), 5);
        assert_eq!(scores.best_points(4), 2);
    }

    #[test]
    fn test_json_restore() {
        let mut scores = BestScores::new(3);
        scores.record(2, 8, Some(Duration::from_millis(12_500)));
        let restored = BestScores::from_json(&scores.to_json().unwrap()).unwrap();
        assert_eq!(restored, scores);

        scores.reset();
        assert_eq!(scores, BestScores::new(3));
    }

    #[test]
    fn test_missing_file_starts_fresh() {
        let scores = BestScores::load(Path::new("/nonexistent/balancing/scores.json"), 3);
        assert_eq!(scores, BestScores::new(3));
    }
}

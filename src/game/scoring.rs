//! Points awarded for a correct challenge

use serde::{Deserialize, Serialize};

use crate::consts::{POINTS_FIRST_ATTEMPT, POINTS_SECOND_ATTEMPT};

/// Maps the number of incorrect checks before success to points
pub trait ScoringTable {
    fn points(&self, attempts_before_success: u32) -> u32;

    /// Points for a first-try success
    fn max_points(&self) -> u32 {
        self.points(0)
    }

    fn perfect_score(&self, challenges: usize) -> u32 {
        self.max_points().saturating_mul(challenges as u32)
    }
}

/// Full points first try, fewer on the second, nothing after that
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardScoring {
    pub first_attempt: u32,
    pub second_attempt: u32,
}

impl Default for StandardScoring {
    fn default() -> Self {
        Self {
            first_attempt: POINTS_FIRST_ATTEMPT,
            second_attempt: POINTS_SECOND_ATTEMPT,
        }
    }
}

impl ScoringTable for StandardScoring {
    fn points(&self, attempts_before_success: u32) -> u32 {
        match attempts_before_success {
            0 => self.first_attempt,
            1 => self.second_attempt,
            _ => 0,
        }
    }
}

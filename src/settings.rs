//! Game settings and preferences
//!
//! Stored as JSON. Missing fields fall back to their defaults, so older
//! settings files keep loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{CHALLENGES_PER_GAME, MAX_COEFFICIENT};
use crate::error::StorageError;
use crate::game::StandardScoring;

/// How "balanced" is visualized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BalancedRepresentation {
    None,
    #[default]
    BalanceScales,
    BarCharts,
}

impl BalancedRepresentation {
    pub fn as_str(&self) -> &'static str {
        match self {
            BalancedRepresentation::None => "None",
            BalancedRepresentation::BalanceScales => "Balance Scales",
            BalancedRepresentation::BarCharts => "Bar Charts",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(BalancedRepresentation::None),
            "scales" | "balance scales" | "balance_scales" => {
                Some(BalancedRepresentation::BalanceScales)
            }
            "charts" | "bar charts" | "bar_charts" => Some(BalancedRepresentation::BarCharts),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Challenges in one game
    pub challenges_per_game: usize,
    /// Largest coefficient the controls accept (smallest is 0)
    pub max_coefficient: u32,

    // === Game ===
    /// Show the elapsed-time readout and record best times
    pub timer_enabled: bool,
    /// Points per attempt
    pub scoring: StandardScoring,

    // === Introduction ===
    /// Representation selected when the Introduction screen starts
    pub representation: BalancedRepresentation,

    // === Developer ===
    /// Expose answers and allow skipping challenges
    pub show_answers: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            challenges_per_game: CHALLENGES_PER_GAME,
            max_coefficient: MAX_COEFFICIENT,

            timer_enabled: false,
            scoring: StandardScoring::default(),

            representation: BalancedRepresentation::default(),

            show_answers: false,
        }
    }
}

impl Settings {
    /// Clamp a requested coefficient to the allowed range
    pub fn clamp_coefficient(&self, value: u32) -> u32 {
        value.min(self.max_coefficient)
    }

    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let loaded = std::fs::read_to_string(path)
            .map_err(|source| StorageError::Io {
                path: path.to_path_buf(),
                source,
            })
            .and_then(|json| Self::from_json(&json));

        match loaded {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved");
        Ok(())
    }
}

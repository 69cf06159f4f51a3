//! Balancing Equations - chemical equation balancing model and game
//!
//! Core modules:
//! - `model`: Atoms, molecules, equations and the equation catalog
//! - `game`: Challenge selection, scoring and the game state machine
//! - `intro`: Free-exploration screen model
//! - `settings`: User preferences
//! - `best_scores`: Per-level best scores

pub mod best_scores;
pub mod error;
pub mod game;
pub mod intro;
pub mod model;
pub mod settings;

pub use best_scores::BestScores;
pub use error::{ChallengeError, StorageError};
pub use game::{Feedback, GameCommand, GameEvent, GameModel, GamePhase};
pub use intro::IntroductionModel;
pub use model::{Equation, EquationCatalog, MoleculeLibrary};
pub use settings::{BalancedRepresentation, Settings};

/// Game configuration constants
pub mod consts {
    /// Number of game levels (0-based in the model)
    pub const LEVEL_COUNT: usize = 3;
    /// Challenges presented per game
    pub const CHALLENGES_PER_GAME: usize = 5;
    /// Largest coefficient the controls allow
    pub const MAX_COEFFICIENT: u32 = 7;
    /// Incorrect checks before the answer is revealed
    pub const MAX_INCORRECT_ATTEMPTS: u32 = 2;

    /// Points for a correct first check
    pub const POINTS_FIRST_ATTEMPT: u32 = 2;
    /// Points for a correct second check
    pub const POINTS_SECOND_ATTEMPT: u32 = 1;
}

//! Game screen model
//!
//! A game is a fixed list of challenges drawn for one level. The model
//! moves through phases in response to commands, tracks points and elapsed
//! time, and keeps per-level best scores. Everything runs synchronously on
//! the caller's thread; randomness comes only from the seeded RNG.

pub mod challenges;
pub mod scoring;
pub mod state;
pub mod step;

pub use challenges::{ChallengeGenerator, LevelPolicy};
pub use scoring::{ScoringTable, StandardScoring};
pub use state::{Feedback, GameChallenge, GameCommand, GameEvent, GameModel, GamePhase, ListenerId};

//! Error types

use std::path::PathBuf;

use thiserror::Error;

/// A level could not be set up with the requested challenges
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ChallengeError {
    #[error("Unknown level {level} (levels are 0..{levels})")]
    UnknownLevel { level: usize, levels: usize },

    #[error("Level {level} needs {requested} distinct equations but only {available} are eligible")]
    NotEnoughEquations {
        level: usize,
        requested: usize,
        available: usize,
    },
}

/// Reading or writing a JSON file failed
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

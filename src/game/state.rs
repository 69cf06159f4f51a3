//! Game state and core game types
//!
//! The transition function lives in `step.rs`; this module holds the data
//! it moves between and the read-only queries the view layer uses.

use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::scoring::ScoringTable;
use crate::best_scores::BestScores;
use crate::consts::LEVEL_COUNT;
use crate::model::{Equation, EquationCatalog, EquationEvent, ObserverId};
use crate::settings::{BalancedRepresentation, Settings};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No game running, waiting for a level to be chosen
    LevelSelection,
    /// Challenge shown, coefficients editable, waiting for Check
    Present,
    /// First wrong answer; the guess stays visible and editable
    TryAgain,
    /// Second wrong answer (or gave up); equation shows the answer
    ShowAnswer,
    /// Correct answer, points awarded
    Correct,
    /// Every challenge finished
    LevelComplete,
}

impl GamePhase {
    /// Can the user edit coefficients in this phase?
    pub fn is_editable(&self) -> bool {
        matches!(self, GamePhase::Present | GamePhase::TryAgain)
    }
}

/// Commands from the view layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    Check,
    TryAgain,
    ShowAnswer,
    Next,
    NewGame,
}

/// What the user's last checked guess looked like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    Correct { points: u32 },
    BalancedNotSimplified,
    NotBalanced,
}

/// Notifications for game listeners
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PhaseChanged {
        from: GamePhase,
        to: GamePhase,
    },
    /// The current equation was replaced
    ChallengeLoaded {
        index: usize,
        count: usize,
    },
    PointsAwarded {
        points: u32,
        total: u32,
    },
    LevelCompleted {
        level: usize,
        points: u32,
        elapsed: Duration,
        new_best: bool,
    },
}

/// Handle returned when subscribing to game events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub(super) type GameListener = Box<dyn FnMut(&GameEvent)>;

/// One equation presented within a game
#[derive(Debug)]
pub struct GameChallenge {
    entry_id: &'static str,
    pub(super) equation: Equation,
    pub(super) incorrect_attempts: u32,
    pub(super) feedback: Option<Feedback>,
    pub(super) points: Option<u32>,
    representation: BalancedRepresentation,
}

impl GameChallenge {
    pub fn new(
        entry_id: &'static str,
        equation: Equation,
        representation: BalancedRepresentation,
    ) -> Self {
        Self {
            entry_id,
            equation,
            incorrect_attempts: 0,
            feedback: None,
            points: None,
            representation,
        }
    }

    /// Catalog entry this challenge was built from
    pub fn entry_id(&self) -> &'static str {
        self.entry_id
    }

    pub fn equation(&self) -> &Equation {
        &self.equation
    }

    /// Wrong checks so far
    pub fn incorrect_attempts(&self) -> u32 {
        self.incorrect_attempts
    }

    /// Wrong checks before the correct one, if the challenge was solved
    pub fn attempts_before_success(&self) -> Option<u32> {
        self.points.map(|_| self.incorrect_attempts)
    }

    /// Points awarded, if solved
    pub fn points(&self) -> Option<u32> {
        self.points
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    /// Representation used to explain a wrong answer
    pub fn representation(&self) -> BalancedRepresentation {
        self.representation
    }
}

/// Complete game model
pub struct GameModel {
    pub(super) catalog: EquationCatalog,
    pub(super) settings: Settings,
    pub(super) scoring: Box<dyn ScoringTable>,
    /// Seed for reproducibility
    seed: u64,
    pub(super) rng: Pcg32,
    pub(super) phase: GamePhase,
    pub(super) level: usize,
    pub(super) challenges: Vec<GameChallenge>,
    pub(super) current_index: usize,
    pub(super) points: u32,
    pub(super) elapsed: Duration,
    pub(super) timer_running: bool,
    pub(super) best_scores: BestScores,
    pub(super) listeners: Vec<(ListenerId, GameListener)>,
    next_listener_id: u64,
    /// Challenge index each coefficient observer was registered on
    pub(super) observer_owners: Vec<(ObserverId, usize)>,
}

impl std::fmt::Debug for GameModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameModel")
            .field("seed", &self.seed)
            .field("phase", &self.phase)
            .field("level", &self.level)
            .field("current_index", &self.current_index)
            .field("challenges", &self.challenges.len())
            .field("points", &self.points)
            .field("elapsed", &self.elapsed)
            .finish()
    }
}

impl GameModel {
    /// Create a game model with the scoring table from `settings`
    pub fn new(catalog: EquationCatalog, settings: Settings, seed: u64) -> Self {
        let scoring = Box::new(settings.scoring);
        Self::with_scoring(catalog, settings, seed, scoring)
    }

    pub fn with_scoring(
        catalog: EquationCatalog,
        settings: Settings,
        seed: u64,
        scoring: Box<dyn ScoringTable>,
    ) -> Self {
        Self {
            catalog,
            settings,
            scoring,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::LevelSelection,
            level: 0,
            challenges: Vec::new(),
            current_index: 0,
            points: 0,
            elapsed: Duration::ZERO,
            timer_running: false,
            best_scores: BestScores::new(LEVEL_COUNT),
            listeners: Vec::new(),
            next_listener_id: 1,
            observer_owners: Vec::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Selected level (0-based)
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn challenge_count(&self) -> usize {
        self.challenges.len()
    }

    pub fn challenges(&self) -> &[GameChallenge] {
        &self.challenges
    }

    pub fn current_challenge(&self) -> Option<&GameChallenge> {
        self.challenges.get(self.current_index)
    }

    pub fn current_equation(&self) -> Option<&Equation> {
        self.current_challenge().map(GameChallenge::equation)
    }

    pub(super) fn current_challenge_mut(&mut self) -> Option<&mut GameChallenge> {
        self.challenges.get_mut(self.current_index)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn catalog(&self) -> &EquationCatalog {
        &self.catalog
    }

    pub fn best_scores(&self) -> &BestScores {
        &self.best_scores
    }

    /// Restore best scores saved by an earlier session
    pub fn set_best_scores(&mut self, best_scores: BestScores) {
        self.best_scores = best_scores;
    }

    pub fn best_score(&self, level: usize) -> u32 {
        self.best_scores.best_points(level)
    }

    /// Points for solving every challenge on the first try
    pub fn perfect_score(&self) -> u32 {
        self.scoring.perfect_score(self.settings.challenges_per_game)
    }

    /// Result of the last check, while it is on screen
    pub fn feedback(&self) -> Option<Feedback> {
        match self.phase {
            GamePhase::TryAgain | GamePhase::ShowAnswer | GamePhase::Correct => {
                self.current_challenge().and_then(GameChallenge::feedback)
            }
            _ => None,
        }
    }

    /// Balanced coefficients of the current equation, in developer mode only
    pub fn answer(&self) -> Option<String> {
        if !self.settings.show_answers {
            return None;
        }
        self.current_equation().map(Equation::coefficients_string)
    }

    /// Edit a coefficient of the current equation. Ignored unless the phase
    /// is editable; values above the configured maximum are clamped.
    pub fn set_user_coefficient(&mut self, term: crate::model::TermRef, value: u32) -> bool {
        if !self.phase.is_editable() {
            log::debug!("Coefficient edit ignored in {:?}", self.phase);
            return false;
        }
        let value = self.settings.clamp_coefficient(value);
        match self.current_challenge_mut() {
            Some(challenge) => challenge.equation.set_user_coefficient(term, value),
            None => false,
        }
    }

    /// Observe coefficient changes on the current equation. The observer
    /// stays with that equation after `next`; remove it with the returned
    /// handle once the view moves on.
    pub fn add_coefficients_observer(
        &mut self,
        observer: impl FnMut(&EquationEvent) + 'static,
    ) -> Option<ObserverId> {
        let index = self.current_index;
        let id = self
            .current_challenge_mut()
            .map(|c| c.equation.add_coefficients_observer(observer))?;
        self.observer_owners.push((id, index));
        Some(id)
    }

    /// Remove an observer from whichever challenge it was registered on
    pub fn remove_coefficients_observer(&mut self, id: ObserverId) -> bool {
        let Some(position) = self.observer_owners.iter().position(|(owned, _)| *owned == id)
        else {
            return false;
        };
        let (_, index) = self.observer_owners.swap_remove(position);
        self.challenges
            .get_mut(index)
            .is_some_and(|c| c.equation.remove_coefficients_observer(id))
    }

    /// Number of coefficient observers still attached to any challenge
    pub fn coefficient_observer_count(&self) -> usize {
        self.observer_owners.len()
    }

    /// Advance the elapsed-time counter while a game is in progress
    pub fn tick(&mut self, dt: Duration) {
        if self.timer_running {
            self.elapsed += dt;
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub(super) fn emit(&mut self, event: GameEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

//! Game state transitions
//!
//! Every command goes through `GameModel::handle`, which maps
//! (phase, command) to the next phase. Checking and advancing resolve
//! synchronously, so there are no in-between phases to observe.
//! Commands that don't apply to the current phase are ignored.

use std::time::Duration;

use super::challenges::ChallengeGenerator;
use super::state::{Feedback, GameCommand, GameEvent, GameModel, GamePhase};
use crate::consts::MAX_INCORRECT_ATTEMPTS;
use crate::error::ChallengeError;

impl GameModel {
    /// Start a fresh game at `level`, from any phase
    pub fn start_game(&mut self, level: usize) -> Result<(), ChallengeError> {
        let count = self.settings.challenges_per_game;
        let challenges =
            ChallengeGenerator::new(&self.catalog).generate(level, count, &mut self.rng)?;
        log::info!("Level {} started with {} challenges", level + 1, challenges.len());

        self.level = level;
        // observers go away with the equations they were attached to
        self.observer_owners.clear();
        self.challenges = challenges;
        self.current_index = 0;
        self.points = 0;
        self.elapsed = Duration::ZERO;
        self.timer_running = true;

        self.emit(GameEvent::ChallengeLoaded { index: 0, count });
        self.set_phase(GamePhase::Present);
        Ok(())
    }

    pub fn check(&mut self) -> bool {
        self.handle(GameCommand::Check)
    }

    pub fn try_again(&mut self) -> bool {
        self.handle(GameCommand::TryAgain)
    }

    pub fn show_answer(&mut self) -> bool {
        self.handle(GameCommand::ShowAnswer)
    }

    pub fn next(&mut self) -> bool {
        self.handle(GameCommand::Next)
    }

    /// Abandon the current game and go back to level selection
    pub fn new_game(&mut self) -> bool {
        self.handle(GameCommand::NewGame)
    }

    /// Apply a command. Returns false if the current phase ignores it.
    pub fn handle(&mut self, command: GameCommand) -> bool {
        use GameCommand as C;
        use GamePhase as P;

        let next = match (self.phase, command) {
            (_, C::NewGame) => Some(self.abandon_game()),
            (P::Present | P::TryAgain, C::Check) => self.evaluate_guess(),
            (P::TryAgain, C::TryAgain) => Some(P::Present),
            (P::TryAgain, C::ShowAnswer) => Some(self.reveal_answer()),
            (P::TryAgain | P::ShowAnswer | P::Correct, C::Next) => Some(self.advance()),
            // developer skip
            (P::Present, C::Next) if self.settings.show_answers => Some(self.advance()),
            _ => None,
        };

        match next {
            Some(phase) => {
                self.set_phase(phase);
                true
            }
            None => {
                log::debug!("{:?} ignored in {:?}", command, self.phase);
                false
            }
        }
    }

    fn set_phase(&mut self, phase: GamePhase) {
        let from = self.phase;
        self.phase = phase;
        if from != phase {
            self.emit(GameEvent::PhaseChanged { from, to: phase });
        }
    }

    /// Score the current guess. Points are awarded only here, once per challenge.
    fn evaluate_guess(&mut self) -> Option<GamePhase> {
        let challenge = self.challenges.get_mut(self.current_index)?;
        if challenge.equation.coefficients_sum() == 0 {
            log::debug!("Check ignored, all coefficients are zero");
            return None;
        }

        if challenge.equation.is_balanced_and_simplified() {
            let points = self.scoring.points(challenge.incorrect_attempts);
            challenge.points = Some(points);
            challenge.feedback = Some(Feedback::Correct { points });
            self.points += points;
            let total = self.points;
            self.emit(GameEvent::PointsAwarded { points, total });
            return Some(GamePhase::Correct);
        }

        challenge.feedback = Some(if challenge.equation.is_balanced() {
            Feedback::BalancedNotSimplified
        } else {
            Feedback::NotBalanced
        });
        challenge.incorrect_attempts += 1;

        if challenge.incorrect_attempts < MAX_INCORRECT_ATTEMPTS {
            Some(GamePhase::TryAgain)
        } else {
            challenge.equation.balance();
            Some(GamePhase::ShowAnswer)
        }
    }

    fn reveal_answer(&mut self) -> GamePhase {
        if let Some(challenge) = self.current_challenge_mut() {
            challenge.equation.balance();
        }
        GamePhase::ShowAnswer
    }

    fn advance(&mut self) -> GamePhase {
        if self.current_index + 1 < self.challenges.len() {
            self.current_index += 1;
            self.emit(GameEvent::ChallengeLoaded {
                index: self.current_index,
                count: self.challenges.len(),
            });
            GamePhase::Present
        } else {
            self.complete_level()
        }
    }

    fn complete_level(&mut self) -> GamePhase {
        self.timer_running = false;

        let perfect = self.points == self.scoring.perfect_score(self.challenges.len());
        let best_time = (perfect && self.settings.timer_enabled).then_some(self.elapsed);
        let new_best = self.best_scores.record(self.level, self.points, best_time);
        log::info!(
            "Level {} complete: {} points in {:.1}s{}",
            self.level + 1,
            self.points,
            self.elapsed.as_secs_f64(),
            if new_best { " (new best)" } else { "" }
        );

        self.emit(GameEvent::LevelCompleted {
            level: self.level,
            points: self.points,
            elapsed: self.elapsed,
            new_best,
        });
        GamePhase::LevelComplete
    }

    fn abandon_game(&mut self) -> GamePhase {
        self.timer_running = false;
        self.observer_owners.clear();
        self.challenges.clear();
        self.current_index = 0;
        self.points = 0;
        GamePhase::LevelSelection
    }
}

//! Challenge selection per level
//!
//! Each level draws from a filtered slice of the catalog. Selection is a
//! uniform shuffle of the eligible entries, so no entry repeats within a
//! game and the same seed always yields the same game.

use rand::Rng;
use rand::seq::SliceRandom;

use super::state::GameChallenge;
use crate::consts::LEVEL_COUNT;
use crate::error::ChallengeError;
use crate::model::{CatalogEntry, EquationCatalog, ReactionKind};
use crate::settings::BalancedRepresentation;

/// Which catalog entries a level may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelPolicy {
    pub kinds: &'static [ReactionKind],
    pub allow_big_molecules: bool,
}

impl LevelPolicy {
    pub fn for_level(level: usize) -> Result<Self, ChallengeError> {
        use ReactionKind::*;
        match level {
            0 => Ok(Self {
                kinds: &[Synthesis, Decomposition],
                allow_big_molecules: false,
            }),
            1 => Ok(Self {
                kinds: &[Synthesis, Decomposition],
                allow_big_molecules: true,
            }),
            2 => Ok(Self {
                kinds: &[Displacement],
                allow_big_molecules: true,
            }),
            _ => Err(ChallengeError::UnknownLevel {
                level,
                levels: LEVEL_COUNT,
            }),
        }
    }

    pub fn admits(&self, entry: &CatalogEntry) -> bool {
        self.kinds.contains(&entry.kind) && (self.allow_big_molecules || !entry.has_big_molecule)
    }
}

/// Picks the challenges for one game
#[derive(Debug, Clone, Copy)]
pub struct ChallengeGenerator<'a> {
    catalog: &'a EquationCatalog,
}

impl<'a> ChallengeGenerator<'a> {
    pub fn new(catalog: &'a EquationCatalog) -> Self {
        Self { catalog }
    }

    /// Catalog entries a level may draw from, in catalog order
    pub fn eligible(&self, level: usize) -> Result<Vec<&'a CatalogEntry>, ChallengeError> {
        let policy = LevelPolicy::for_level(level)?;
        Ok(self
            .catalog
            .entries()
            .iter()
            .filter(|e| policy.admits(e))
            .collect())
    }

    /// Draw `count` distinct challenges for `level`
    pub fn generate<R: Rng + ?Sized>(
        &self,
        level: usize,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<GameChallenge>, ChallengeError> {
        let mut eligible = self.eligible(level)?;
        if eligible.len() < count {
            return Err(ChallengeError::NotEnoughEquations {
                level,
                requested: count,
                available: eligible.len(),
            });
        }

        eligible.shuffle(rng);
        eligible.truncate(count);
        log::debug!(
            "Level {} challenges: {:?}",
            level,
            eligible.iter().map(|e| e.id).collect::<Vec<_>>()
        );

        Ok(eligible
            .into_iter()
            .map(|entry| {
                let equation = self.catalog.create(entry);
                let representation = representation_for(level, entry);
                GameChallenge::new(entry.id, equation, representation)
            })
            .collect())
    }
}

/// Balance scales don't fit big molecules, and harder levels use bar charts
fn representation_for(level: usize, entry: &CatalogEntry) -> BalancedRepresentation {
    if level == 0 && !entry.has_big_molecule {
        BalancedRepresentation::BalanceScales
    } else {
        BalancedRepresentation::BarCharts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_easiest_level_has_no_big_molecules() {
        let catalog = EquationCatalog::standard();
        let generator = ChallengeGenerator::new(&catalog);
        let mut rng = Pcg32::seed_from_u64(7);

        for _ in 0..20 {
            let challenges = generator.generate(0, 5, &mut rng).unwrap();
            assert_eq!(challenges.len(), 5);
            assert!(challenges.iter().all(|c| !c.equation().has_big_molecule()));
        }
    }

    #[test]
    fn test_no_duplicates_within_a_game() {
        let catalog = EquationCatalog::standard();
        let generator = ChallengeGenerator::new(&catalog);
        let mut rng = Pcg32::seed_from_u64(12345);

        for level in 0..LEVEL_COUNT {
            let challenges = generator.generate(level, 5, &mut rng).unwrap();
            for (i, a) in challenges.iter().enumerate() {
                assert!(challenges[i + 1..].iter().all(|b| b.entry_id() != a.entry_id()));
            }
        }
    }

    #[test]
    fn test_same_seed_same_game() {
        let catalog = EquationCatalog::standard();
        let generator = ChallengeGenerator::new(&catalog);
        let ids = |seed| {
            let mut rng = Pcg32::seed_from_u64(seed);
            generator
                .generate(1, 5, &mut rng)
                .unwrap()
                .iter()
                .map(|c| c.entry_id())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(99), ids(99));
    }

    #[test]
    fn test_whole_pool_can_be_drawn() {
        let catalog = EquationCatalog::standard();
        let generator = ChallengeGenerator::new(&catalog);
        let available = generator.eligible(2).unwrap().len();
        let mut rng = Pcg32::seed_from_u64(3);
        let challenges = generator.generate(2, available, &mut rng).unwrap();
        assert_eq!(challenges.len(), available);
        assert!(
            challenges
                .iter()
                .all(|c| c.equation().kind() == ReactionKind::Displacement)
        );
    }

    #[test]
    fn test_too_many_requested_is_an_error() {
        let catalog = EquationCatalog::standard();
        let generator = ChallengeGenerator::new(&catalog);
        let available = generator.eligible(0).unwrap().len();
        let mut rng = Pcg32::seed_from_u64(1);

        let err = generator.generate(0, available + 1, &mut rng).unwrap_err();
        assert_eq!(
            err,
            ChallengeError::NotEnoughEquations {
                level: 0,
                requested: available + 1,
                available,
            }
        );
    }

    #[test]
    fn test_unknown_level() {
        let catalog = EquationCatalog::standard();
        let generator = ChallengeGenerator::new(&catalog);
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(matches!(
            generator.generate(LEVEL_COUNT, 1, &mut rng),
            Err(ChallengeError::UnknownLevel { .. })
        ));
    }

    #[test]
    fn test_policy_filters() {
        let catalog = EquationCatalog::standard();
        let easy = LevelPolicy::for_level(0).unwrap();
        let big = catalog.entry("PCl3_Cl2_PCl5").unwrap();
        let small = catalog.entry("N2_O2_2NO").unwrap();
        let combustion = catalog.entry("CH4_2O2_CO2_2H2O").unwrap();
        assert!(!easy.admits(big));
        assert!(easy.admits(small));
        assert!(!easy.admits(combustion));
        assert!(LevelPolicy::for_level(1).unwrap().admits(big));
    }
}

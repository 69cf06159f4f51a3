//! Introduction screen model
//!
//! Free exploration: pick one of a few fixed equations and adjust its
//! coefficients with no scoring. Each choice keeps its own equation for the
//! lifetime of the screen, so switching back shows the earlier edits.

use crate::model::catalog::equation;
use crate::model::{Equation, EquationFactory, MoleculeLibrary, TermRef};
use crate::settings::{BalancedRepresentation, Settings};

const CHOICES: &[(&str, EquationFactory)] = &[
    ("Make Ammonia", |m| {
        equation(&[(1, &m.n2), (3, &m.h2)], &[(2, &m.nh3)])
    }),
    ("Separate Water", |m| {
        equation(&[(2, &m.h2o)], &[(2, &m.h2), (1, &m.o2)])
    }),
    ("Combust Methane", |m| {
        equation(&[(1, &m.ch4), (2, &m.o2)], &[(1, &m.co2), (2, &m.h2o)])
    }),
];

#[derive(Debug)]
pub struct IntroductionModel {
    equations: Vec<Equation>,
    selected: usize,
    representation: BalancedRepresentation,
    default_representation: BalancedRepresentation,
    max_coefficient: u32,
}

impl IntroductionModel {
    pub fn new(molecules: &MoleculeLibrary, settings: &Settings) -> Self {
        let equations = CHOICES
            .iter()
            .map(|&(name, factory)| factory(molecules).with_name(name))
            .collect();
        Self {
            equations,
            selected: 0,
            representation: settings.representation,
            default_representation: settings.representation,
            max_coefficient: settings.max_coefficient,
        }
    }

    /// Names of the available equations, in menu order
    pub fn choices(&self) -> impl Iterator<Item = &str> + '_ {
        self.equations.iter().map(Equation::name)
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Switch equations. Returns false for an unknown index.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.equations.len() {
            return false;
        }
        self.selected = index;
        true
    }

    pub fn equation(&self) -> &Equation {
        &self.equations[self.selected]
    }

    /// Mutable access for registering coefficient observers
    pub fn equation_mut(&mut self) -> &mut Equation {
        &mut self.equations[self.selected]
    }

    /// Edit a coefficient of the selected equation, clamped to 0..=max
    pub fn set_user_coefficient(&mut self, term: TermRef, value: u32) -> bool {
        let value = value.min(self.max_coefficient);
        self.equation_mut().set_user_coefficient(term, value)
    }

    pub fn representation(&self) -> BalancedRepresentation {
        self.representation
    }

    pub fn set_representation(&mut self, representation: BalancedRepresentation) {
        self.representation = representation;
    }

    /// Back to the first equation, all coefficients 1, default representation
    pub fn reset(&mut self) {
        for equation in &mut self.equations {
            equation.reset();
        }
        self.selected = 0;
        self.representation = self.default_representation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intro() -> IntroductionModel {
        IntroductionModel::new(&MoleculeLibrary::new(), &Settings::default())
    }

    #[test]
    fn test_choices() {
        let model = intro();
        let names: Vec<&str> = model.choices().collect();
        assert_eq!(names, vec!["Make Ammonia", "Separate Water", "Combust Methane"]);
        assert_eq!(model.equation().name(), "Make Ammonia");
    }

    #[test]
    fn test_edits_survive_switching() {
        let mut model = intro();
        model.set_user_coefficient(TermRef::product(0), 2);
        model.set_user_coefficient(TermRef::reactant(1), 3);
        assert!(model.equation().is_balanced_and_simplified());

        assert!(model.select(2));
        assert!(!model.equation().is_balanced());
        assert!(model.select(0));
        assert!(model.equation().is_balanced_and_simplified());
        assert!(!model.select(3));
    }

    #[test]
    fn test_coefficient_range() {
        let mut model = intro();
        model.set_user_coefficient(TermRef::reactant(0), 100);
        assert_eq!(model.equation().reactants()[0].user_coefficient(), 7);
    }

    #[test]
    fn test_reset() {
        let mut model = intro();
        model.select(1);
        model.set_user_coefficient(TermRef::reactant(0), 2);
        model.set_representation(BalancedRepresentation::BarCharts);

        model.reset();
        assert_eq!(model.selected(), 0);
        assert_eq!(model.representation(), BalancedRepresentation::BalanceScales);
        model.select(1);
        assert_eq!(model.equation().reactants()[0].user_coefficient(), 1);
    }
}

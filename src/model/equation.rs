//! Chemical equations and the balance check
//!
//! An equation has two sets of terms, reactants and products. It is
//! "balanced" when every term's user coefficient is the same multiple N of
//! its balanced coefficient with N > 0, and "balanced and simplified" when
//! additionally N = 1. N is taken from the first reactant.
//!
//! Derived state (coefficient sum, balanced flags) is pushed on every
//! coefficient edit. Observers are notified synchronously, per edit, in
//! this order:
//! 1. `CoefficientChanged` for the edited term
//! 2. `CoefficientsSum` with the recomputed sum
//! 3. `BalanceUpdated` with the recomputed flags

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use super::atom::Element;
use super::molecule::Molecule;

/// Which side of the arrow a term sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Reactants,
    Products,
}

/// Address of one term within an equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TermRef {
    pub side: Side,
    pub index: usize,
}

impl TermRef {
    pub fn reactant(index: usize) -> Self {
        Self {
            side: Side::Reactants,
            index,
        }
    }

    pub fn product(index: usize) -> Self {
        Self {
            side: Side::Products,
            index,
        }
    }
}

/// Classification by term count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReactionKind {
    /// Several reactants combine into one product
    Synthesis,
    /// One reactant breaks down into several products
    Decomposition,
    /// Several reactants exchange parts into several products
    Displacement,
}

/// A molecule paired with its coefficients on one side of an equation
#[derive(Debug, Clone)]
pub struct EquationTerm {
    molecule: Arc<Molecule>,
    balanced_coefficient: u32,
    user_coefficient: u32,
}

impl EquationTerm {
    /// Create a term with the user coefficient at 1
    pub fn new(balanced_coefficient: u32, molecule: Arc<Molecule>) -> Self {
        assert!(
            balanced_coefficient >= 1,
            "balanced coefficient for {} must be positive",
            molecule.symbol()
        );
        Self {
            molecule,
            balanced_coefficient,
            user_coefficient: 1,
        }
    }

    pub fn molecule(&self) -> &Arc<Molecule> {
        &self.molecule
    }

    pub fn balanced_coefficient(&self) -> u32 {
        self.balanced_coefficient
    }

    pub fn user_coefficient(&self) -> u32 {
        self.user_coefficient
    }
}

/// Number of atoms of one element on each side, weighted by user coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomCount {
    pub element: Element,
    pub reactants_count: u32,
    pub products_count: u32,
}

impl AtomCount {
    pub fn is_balanced(&self) -> bool {
        self.reactants_count == self.products_count
    }
}

/// Change notification delivered to coefficient observers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquationEvent {
    CoefficientChanged { term: TermRef, old: u32, new: u32 },
    CoefficientsSum { sum: u32 },
    BalanceUpdated {
        balanced: bool,
        balanced_and_simplified: bool,
    },
}

/// Handle returned when registering a coefficient observer, unique across
/// all equations in the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

static NEXT_OBSERVER_ID: AtomicU64 = AtomicU64::new(1);

type CoefficientsObserver = Box<dyn FnMut(&EquationEvent)>;

/// A chemical equation
pub struct Equation {
    name: String,
    reactants: Vec<EquationTerm>,
    products: Vec<EquationTerm>,
    balanced: bool,
    balanced_and_simplified: bool,
    coefficients_sum: u32,
    observers: Vec<(ObserverId, CoefficientsObserver)>,
}

impl fmt::Debug for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Equation")
            .field("name", &self.name)
            .field("reactants", &self.reactants)
            .field("products", &self.products)
            .field("balanced", &self.balanced)
            .field("balanced_and_simplified", &self.balanced_and_simplified)
            .field("coefficients_sum", &self.coefficients_sum)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Shows user coefficients, e.g. "2 H2 + 1 O2 → 2 H2O"
impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_side(&self.reactants, |t| t.user_coefficient))?;
        f.write_str(" \u{2192} ")?;
        f.write_str(&format_side(&self.products, |t| t.user_coefficient))
    }
}

fn format_side(terms: &[EquationTerm], coefficient: impl Fn(&EquationTerm) -> u32) -> String {
    terms
        .iter()
        .map(|t| format!("{} {}", coefficient(t), t.molecule.symbol()))
        .collect::<Vec<_>>()
        .join(" + ")
}

impl Equation {
    /// Create an equation named after its balanced formula.
    ///
    /// Panics if either side is empty.
    pub fn new(reactants: Vec<EquationTerm>, products: Vec<EquationTerm>) -> Self {
        assert!(!reactants.is_empty(), "equation needs at least one reactant");
        assert!(!products.is_empty(), "equation needs at least one product");

        let name = format!(
            "{} \u{2192} {}",
            format_side(&reactants, |t| t.balanced_coefficient),
            format_side(&products, |t| t.balanced_coefficient)
        );
        let mut equation = Self {
            name,
            reactants,
            products,
            balanced: false,
            balanced_and_simplified: false,
            coefficients_sum: 0,
            observers: Vec::new(),
        };
        equation.update_coefficients_sum();
        equation.update_balanced_state();
        equation
    }

    /// Replace the formula-derived name with a friendly one
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reactants(&self) -> &[EquationTerm] {
        &self.reactants
    }

    pub fn products(&self) -> &[EquationTerm] {
        &self.products
    }

    /// All terms, reactants first, with their addresses
    pub fn terms(&self) -> impl Iterator<Item = (TermRef, &EquationTerm)> + '_ {
        let reactants = self
            .reactants
            .iter()
            .enumerate()
            .map(|(i, t)| (TermRef::reactant(i), t));
        let products = self
            .products
            .iter()
            .enumerate()
            .map(|(i, t)| (TermRef::product(i), t));
        reactants.chain(products)
    }

    pub fn term(&self, term: TermRef) -> Option<&EquationTerm> {
        match term.side {
            Side::Reactants => self.reactants.get(term.index),
            Side::Products => self.products.get(term.index),
        }
    }

    fn term_mut(&mut self, term: TermRef) -> Option<&mut EquationTerm> {
        match term.side {
            Side::Reactants => self.reactants.get_mut(term.index),
            Side::Products => self.products.get_mut(term.index),
        }
    }

    pub fn kind(&self) -> ReactionKind {
        match (self.reactants.len(), self.products.len()) {
            (r, 1) if r > 1 => ReactionKind::Synthesis,
            (1, _) => ReactionKind::Decomposition,
            _ => ReactionKind::Displacement,
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.balanced
    }

    pub fn is_balanced_and_simplified(&self) -> bool {
        self.balanced_and_simplified
    }

    /// Sum of all user coefficients
    pub fn coefficients_sum(&self) -> u32 {
        self.coefficients_sum
    }

    /// Set one term's user coefficient. Returns false if the term doesn't exist.
    ///
    /// Setting the current value is a no-op and notifies nobody.
    pub fn set_user_coefficient(&mut self, term: TermRef, value: u32) -> bool {
        let Some(slot) = self.term_mut(term) else {
            return false;
        };
        let old = slot.user_coefficient;
        if old == value {
            return true;
        }
        slot.user_coefficient = value;

        self.notify(EquationEvent::CoefficientChanged {
            term,
            old,
            new: value,
        });
        self.update_coefficients_sum();
        self.update_balanced_state();
        true
    }

    /// Recompute the balanced flags from the current user coefficients
    pub fn update_balanced_state(&mut self) {
        let anchor = &self.reactants[0];
        let anchor_user = u64::from(anchor.user_coefficient);
        let anchor_balanced = u64::from(anchor.balanced_coefficient);

        // multiplier = anchor_user / anchor_balanced; compare cross-multiplied to stay exact
        let balanced = anchor_user > 0
            && self.terms().all(|(_, t)| {
                u64::from(t.user_coefficient) * anchor_balanced
                    == anchor_user * u64::from(t.balanced_coefficient)
            });

        self.balanced_and_simplified = balanced && anchor_user == anchor_balanced;
        self.balanced = balanced;

        self.notify(EquationEvent::BalanceUpdated {
            balanced: self.balanced,
            balanced_and_simplified: self.balanced_and_simplified,
        });
    }

    fn update_coefficients_sum(&mut self) {
        let sum = self
            .terms()
            .fold(0u32, |acc, (_, t)| acc.saturating_add(t.user_coefficient));
        self.coefficients_sum = sum;
        self.notify(EquationEvent::CoefficientsSum { sum });
    }

    /// Copy every balanced coefficient into the user coefficient
    pub fn balance(&mut self) {
        self.assign_all(|t| t.balanced_coefficient);
    }

    /// Put every user coefficient back to 1
    pub fn reset(&mut self) {
        self.assign_all(|_| 1);
    }

    fn assign_all(&mut self, value: impl Fn(&EquationTerm) -> u32) {
        let targets: Vec<(TermRef, u32)> = self.terms().map(|(r, t)| (r, value(t))).collect();
        for (term, value) in targets {
            self.set_user_coefficient(term, value);
        }
    }

    /// Does any term use a big molecule?
    pub fn has_big_molecule(&self) -> bool {
        self.terms().any(|(_, t)| t.molecule.is_big())
    }

    /// Count atoms of each element on both sides.
    ///
    /// Elements appear in the order first encountered scanning reactants then
    /// products, so CH4 + O2 gives [C, H, O].
    pub fn atom_counts(&self) -> Vec<AtomCount> {
        let mut counts = Vec::new();
        tally_atoms(&mut counts, &self.reactants, Side::Reactants);
        tally_atoms(&mut counts, &self.products, Side::Products);
        counts
    }

    /// Balanced coefficients only, e.g. "2 + 1 → 2"
    pub fn coefficients_string(&self) -> String {
        let join = |terms: &[EquationTerm]| {
            terms
                .iter()
                .map(|t| t.balanced_coefficient.to_string())
                .collect::<Vec<_>>()
                .join(" + ")
        };
        format!("{} \u{2192} {}", join(&self.reactants), join(&self.products))
    }

    /// Register an observer for coefficient changes on every term
    pub fn add_coefficients_observer(
        &mut self,
        observer: impl FnMut(&EquationEvent) + 'static,
    ) -> ObserverId {
        let id = ObserverId(NEXT_OBSERVER_ID.fetch_add(1, Ordering::Relaxed));
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if it was not registered on this
    /// equation.
    pub fn remove_coefficients_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    fn notify(&mut self, event: EquationEvent) {
        for (_, observer) in self.observers.iter_mut() {
            observer(&event);
        }
    }
}

// Brute force, but equations never have more than four terms or four elements.
fn tally_atoms(counts: &mut Vec<AtomCount>, terms: &[EquationTerm], side: Side) {
    for term in terms {
        for atom in term.molecule.atoms() {
            let index = match counts.iter().position(|c| c.element == atom.element) {
                Some(index) => index,
                None => {
                    counts.push(AtomCount {
                        element: atom.element,
                        reactants_count: 0,
                        products_count: 0,
                    });
                    counts.len() - 1
                }
            };
            let count = &mut counts[index];
            match side {
                Side::Reactants => {
                    count.reactants_count = count.reactants_count.saturating_add(term.user_coefficient)
                }
                Side::Products => {
                    count.products_count = count.products_count.saturating_add(term.user_coefficient)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MoleculeLibrary;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// 2 H2O -> 2 H2 + O2
    fn separate_water() -> Equation {
        let m = MoleculeLibrary::new();
        Equation::new(
            vec![EquationTerm::new(2, m.h2o.clone())],
            vec![
                EquationTerm::new(2, m.h2.clone()),
                EquationTerm::new(1, m.o2.clone()),
            ],
        )
    }

    /// CH4 + 2 O2 -> CO2 + 2 H2O
    fn combust_methane() -> Equation {
        let m = MoleculeLibrary::new();
        Equation::new(
            vec![
                EquationTerm::new(1, m.ch4.clone()),
                EquationTerm::new(2, m.o2.clone()),
            ],
            vec![
                EquationTerm::new(1, m.co2.clone()),
                EquationTerm::new(2, m.h2o.clone()),
            ],
        )
    }

    fn set_all(equation: &mut Equation, values: &[u32]) {
        let refs: Vec<TermRef> = equation.terms().map(|(r, _)| r).collect();
        for (term, &value) in refs.into_iter().zip(values) {
            assert!(equation.set_user_coefficient(term, value));
        }
    }

    #[test]
    fn test_new_equation_starts_at_one() {
        let equation = separate_water();
        assert!(equation.terms().all(|(_, t)| t.user_coefficient() == 1));
        assert_eq!(equation.coefficients_sum(), 3);
        assert!(!equation.is_balanced());
        assert_eq!(equation.name(), "2 H2O \u{2192} 2 H2 + 1 O2");
    }

    #[test]
    fn test_water_balance_scenarios() {
        let mut equation = separate_water();

        set_all(&mut equation, &[2, 2, 1]);
        assert!(equation.is_balanced());
        assert!(equation.is_balanced_and_simplified());

        set_all(&mut equation, &[4, 4, 2]);
        assert!(equation.is_balanced());
        assert!(!equation.is_balanced_and_simplified());

        set_all(&mut equation, &[2, 1, 1]);
        assert!(!equation.is_balanced());
        assert!(!equation.is_balanced_and_simplified());
    }

    #[test]
    fn test_zero_anchor_is_unbalanced() {
        let mut equation = separate_water();
        set_all(&mut equation, &[0, 0, 0]);
        assert!(!equation.is_balanced());
        assert_eq!(equation.coefficients_sum(), 0);
    }

    #[test]
    fn test_fractional_multiplier_never_matches() {
        // multiplier 1/2 would need half an O2
        let mut equation = separate_water();
        set_all(&mut equation, &[1, 1, 1]);
        assert!(!equation.is_balanced());
    }

    #[test]
    fn test_atom_counts() {
        let mut equation = separate_water();
        set_all(&mut equation, &[2, 2, 1]);
        let counts = equation.atom_counts();
        assert_eq!(
            counts,
            vec![
                AtomCount {
                    element: Element::H,
                    reactants_count: 4,
                    products_count: 4
                },
                AtomCount {
                    element: Element::O,
                    reactants_count: 2,
                    products_count: 2
                },
            ]
        );
        assert!(counts.iter().all(AtomCount::is_balanced));

        set_all(&mut equation, &[2, 2, 2]);
        let o = equation.atom_counts()[1];
        assert_eq!((o.reactants_count, o.products_count), (2, 4));
    }

    #[test]
    fn test_atom_count_order_follows_reactants() {
        let equation = combust_methane();
        let elements: Vec<Element> = equation.atom_counts().iter().map(|c| c.element).collect();
        assert_eq!(elements, vec![Element::C, Element::H, Element::O]);
    }

    #[test]
    fn test_balance_and_reset() {
        let mut equation = combust_methane();
        equation.balance();
        assert!(equation.is_balanced_and_simplified());
        assert_eq!(equation.coefficients_sum(), 6);

        equation.reset();
        assert!(equation.terms().all(|(_, t)| t.user_coefficient() == 1));
        assert!(!equation.is_balanced());
    }

    #[test]
    fn test_reset_of_equation_balanced_at_one() {
        let m = MoleculeLibrary::new();
        // C + O2 -> CO2
        let mut equation = Equation::new(
            vec![
                EquationTerm::new(1, m.c.clone()),
                EquationTerm::new(1, m.o2.clone()),
            ],
            vec![EquationTerm::new(1, m.co2.clone())],
        );
        set_all(&mut equation, &[3, 3, 3]);
        equation.reset();
        assert!(equation.is_balanced_and_simplified());
    }

    #[test]
    fn test_strings_and_kind() {
        let equation = combust_methane();
        assert_eq!(equation.coefficients_string(), "1 + 2 \u{2192} 1 + 2");
        assert_eq!(equation.kind(), ReactionKind::Displacement);
        assert_eq!(separate_water().kind(), ReactionKind::Decomposition);
        assert_eq!(
            equation.to_string(),
            "1 CH4 + 1 O2 \u{2192} 1 CO2 + 1 H2O"
        );
    }

    #[test]
    fn test_has_big_molecule() {
        let m = MoleculeLibrary::new();
        let equation = Equation::new(
            vec![
                EquationTerm::new(1, m.pcl3.clone()),
                EquationTerm::new(1, m.cl2.clone()),
            ],
            vec![EquationTerm::new(1, m.pcl5.clone())],
        );
        assert!(equation.has_big_molecule());
        assert!(!separate_water().has_big_molecule());
    }

    #[test]
    fn test_unknown_term() {
        let mut equation = separate_water();
        assert!(!equation.set_user_coefficient(TermRef::reactant(3), 2));
        assert!(equation.term(TermRef::product(2)).is_none());
    }

    #[test]
    fn test_observer_order() {
        let mut equation = separate_water();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        equation.add_coefficients_observer(move |e| sink.borrow_mut().push(*e));

        equation.set_user_coefficient(TermRef::reactant(0), 2);
        assert_eq!(
            *seen.borrow(),
            vec![
                EquationEvent::CoefficientChanged {
                    term: TermRef::reactant(0),
                    old: 1,
                    new: 2
                },
                EquationEvent::CoefficientsSum { sum: 4 },
                EquationEvent::BalanceUpdated {
                    balanced: false,
                    balanced_and_simplified: false
                },
            ]
        );

        // unchanged value is silent
        seen.borrow_mut().clear();
        equation.set_user_coefficient(TermRef::reactant(0), 2);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_removed_observer_is_not_called() {
        let mut equation = separate_water();
        let calls = Rc::new(RefCell::new(0u32));
        let counter = Rc::clone(&calls);
        let id = equation.add_coefficients_observer(move |_| *counter.borrow_mut() += 1);

        equation.set_user_coefficient(TermRef::product(1), 3);
        let after_first = *calls.borrow();
        assert!(after_first > 0);

        assert!(equation.remove_coefficients_observer(id));
        assert!(!equation.remove_coefficients_observer(id));
        equation.set_user_coefficient(TermRef::product(1), 4);
        assert_eq!(*calls.borrow(), after_first);
    }

    #[test]
    fn test_observer_ids_differ_between_equations() {
        let mut first = separate_water();
        let mut second = separate_water();
        let calls = Rc::new(RefCell::new(0u32));
        let counter = Rc::clone(&calls);

        let stale = first.add_coefficients_observer(|_| {});
        let live = second.add_coefficients_observer(move |_| *counter.borrow_mut() += 1);
        assert_ne!(stale, live);

        // a handle from another equation removes nothing here
        assert!(!second.remove_coefficients_observer(stale));
        second.set_user_coefficient(TermRef::reactant(0), 2);
        assert_eq!(*calls.borrow(), 3);
        assert!(first.remove_coefficients_observer(stale));
    }

    #[test]
    fn test_reset_unchanged_is_silent() {
        let mut equation = separate_water();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        equation.add_coefficients_observer(move |e| sink.borrow_mut().push(*e));

        equation.reset();
        assert!(seen.borrow().is_empty());

        equation.set_user_coefficient(TermRef::product(0), 2);
        seen.borrow_mut().clear();
        equation.reset();
        assert_eq!(
            seen.borrow().last(),
            Some(&EquationEvent::BalanceUpdated {
                balanced: false,
                balanced_and_simplified: false
            })
        );
        assert_eq!(equation.products()[0].user_coefficient(), 1);
    }

    proptest! {
        #[test]
        fn prop_balance_simplifies(values in prop::collection::vec(0u32..50, 4)) {
            let mut equation = combust_methane();
            set_all(&mut equation, &values);
            equation.balance();
            prop_assert!(equation.is_balanced_and_simplified());
        }

        #[test]
        fn prop_uniform_multiples_balance(n in 1u32..1000) {
            let mut equation = combust_methane();
            set_all(&mut equation, &[n, 2 * n, n, 2 * n]);
            prop_assert!(equation.is_balanced());
            prop_assert_eq!(equation.is_balanced_and_simplified(), n == 1);
        }

        #[test]
        fn prop_atom_counts_stable(values in prop::collection::vec(0u32..50, 4)) {
            let mut equation = combust_methane();
            set_all(&mut equation, &values);
            prop_assert_eq!(equation.atom_counts(), equation.atom_counts());
        }

        #[test]
        fn prop_balanced_conserves_atoms(values in prop::collection::vec(1u32..8, 3)) {
            let mut equation = separate_water();
            set_all(&mut equation, &values);
            if equation.is_balanced() {
                prop_assert!(equation.atom_counts().iter().all(AtomCount::is_balanced));
            }
        }
    }
}

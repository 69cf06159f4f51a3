//! Chemistry domain model
//!
//! Pure data and arithmetic, no view or platform dependencies:
//! - Molecules are immutable and shared by reference
//! - Equations own their terms and recompute derived state on every edit
//! - Balanced coefficients come from the catalog, never from a solver

pub mod atom;
pub mod catalog;
pub mod equation;
pub mod molecule;

pub use atom::{Atom, Element};
pub use catalog::{CatalogEntry, EquationCatalog, EquationFactory};
pub use equation::{
    AtomCount, Equation, EquationEvent, EquationTerm, ObserverId, ReactionKind, Side, TermRef,
};
pub use molecule::{Molecule, MoleculeLibrary};

//! Catalog of hand-curated equations
//!
//! Every entry builds a brand-new `Equation` on each call, so two active
//! copies of the same reaction never share coefficients. Balanced
//! coefficients are catalog data.

use std::sync::Arc;

use super::equation::{Equation, EquationTerm, ReactionKind};
use super::molecule::{Molecule, MoleculeLibrary};

/// Builds a fresh equation from the shared molecule library
pub type EquationFactory = fn(&MoleculeLibrary) -> Equation;

/// One reaction in the catalog
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    /// Stable identifier, unique within the catalog
    pub id: &'static str,
    pub kind: ReactionKind,
    pub has_big_molecule: bool,
    factory: EquationFactory,
}

/// Immutable registry of equations, built once and passed to whoever needs it
#[derive(Debug, Clone)]
pub struct EquationCatalog {
    molecules: MoleculeLibrary,
    entries: Vec<CatalogEntry>,
}

impl Default for EquationCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl EquationCatalog {
    /// Build a catalog from (id, factory) pairs. Kind and big-molecule
    /// classification are read from one probe instance of each entry.
    pub fn new(molecules: MoleculeLibrary, factories: &[(&'static str, EquationFactory)]) -> Self {
        let entries = factories
            .iter()
            .map(|&(id, factory)| {
                let probe = factory(&molecules);
                CatalogEntry {
                    id,
                    kind: probe.kind(),
                    has_big_molecule: probe.has_big_molecule(),
                    factory,
                }
            })
            .collect();
        Self { molecules, entries }
    }

    /// The synthesis, decomposition and displacement reactions used by the game
    pub fn standard() -> Self {
        Self::new(MoleculeLibrary::new(), STANDARD_EQUATIONS)
    }

    pub fn molecules(&self) -> &MoleculeLibrary {
        &self.molecules
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Build a fresh instance of an entry
    pub fn create(&self, entry: &CatalogEntry) -> Equation {
        (entry.factory)(&self.molecules)
    }

    pub fn create_by_id(&self, id: &str) -> Option<Equation> {
        self.entry(id).map(|e| self.create(e))
    }
}

/// Assemble an equation from (balanced coefficient, molecule) pairs
pub fn equation(reactants: &[(u32, &Arc<Molecule>)], products: &[(u32, &Arc<Molecule>)]) -> Equation {
    let terms = |side: &[(u32, &Arc<Molecule>)]| -> Vec<EquationTerm> {
        side.iter()
            .map(|&(coefficient, molecule)| EquationTerm::new(coefficient, Arc::clone(molecule)))
            .collect()
    };
    Equation::new(terms(reactants), terms(products))
}

const STANDARD_EQUATIONS: &[(&str, EquationFactory)] = &[
    // synthesis
    ("2H2_O2_2H2O", |m| equation(&[(2, &m.h2), (1, &m.o2)], &[(2, &m.h2o)])),
    ("H2_Cl2_2HCl", |m| equation(&[(1, &m.h2), (1, &m.cl2)], &[(2, &m.hcl)])),
    ("H2_F2_2HF", |m| equation(&[(1, &m.h2), (1, &m.f2)], &[(2, &m.hf)])),
    ("CO_2H2_CH3OH", |m| equation(&[(1, &m.co), (2, &m.h2)], &[(1, &m.ch3oh)])),
    ("C_O2_CO2", |m| equation(&[(1, &m.c), (1, &m.o2)], &[(1, &m.co2)])),
    ("2C_O2_2CO", |m| equation(&[(2, &m.c), (1, &m.o2)], &[(2, &m.co)])),
    ("C_CO2_2CO", |m| equation(&[(1, &m.c), (1, &m.co2)], &[(2, &m.co)])),
    ("C_2S_CS2", |m| equation(&[(1, &m.c), (2, &m.s)], &[(1, &m.cs2)])),
    ("2CO_O2_2CO2", |m| equation(&[(2, &m.co), (1, &m.o2)], &[(2, &m.co2)])),
    ("N2_3H2_2NH3", |m| equation(&[(1, &m.n2), (3, &m.h2)], &[(2, &m.nh3)])),
    ("N2_O2_2NO", |m| equation(&[(1, &m.n2), (1, &m.o2)], &[(2, &m.no)])),
    ("2NO_O2_2NO2", |m| equation(&[(2, &m.no), (1, &m.o2)], &[(2, &m.no2)])),
    ("2SO2_O2_2SO3", |m| equation(&[(2, &m.so2), (1, &m.o2)], &[(2, &m.so3)])),
    ("C2H4_H2_C2H6", |m| equation(&[(1, &m.c2h4), (1, &m.h2)], &[(1, &m.c2h6)])),
    ("C2H2_2H2_C2H6", |m| equation(&[(1, &m.c2h2), (2, &m.h2)], &[(1, &m.c2h6)])),
    ("P4_6H2_4PH3", |m| equation(&[(1, &m.p4), (6, &m.h2)], &[(4, &m.ph3)])),
    ("P4_6F2_4PF3", |m| equation(&[(1, &m.p4), (6, &m.f2)], &[(4, &m.pf3)])),
    ("P4_6Cl2_4PCl3", |m| equation(&[(1, &m.p4), (6, &m.cl2)], &[(4, &m.pcl3)])),
    ("PCl3_Cl2_PCl5", |m| equation(&[(1, &m.pcl3), (1, &m.cl2)], &[(1, &m.pcl5)])),
    // decomposition
    ("2H2O_2H2_O2", |m| equation(&[(2, &m.h2o)], &[(2, &m.h2), (1, &m.o2)])),
    ("2HCl_H2_Cl2", |m| equation(&[(2, &m.hcl)], &[(1, &m.h2), (1, &m.cl2)])),
    ("CH3OH_CO_2H2", |m| equation(&[(1, &m.ch3oh)], &[(1, &m.co), (2, &m.h2)])),
    ("C2H6_C2H4_H2", |m| equation(&[(1, &m.c2h6)], &[(1, &m.c2h4), (1, &m.h2)])),
    ("2CO2_2CO_O2", |m| equation(&[(2, &m.co2)], &[(2, &m.co), (1, &m.o2)])),
    ("2CO_C_CO2", |m| equation(&[(2, &m.co)], &[(1, &m.c), (1, &m.co2)])),
    ("2NH3_N2_3H2", |m| equation(&[(2, &m.nh3)], &[(1, &m.n2), (3, &m.h2)])),
    ("2NO_N2_O2", |m| equation(&[(2, &m.no)], &[(1, &m.n2), (1, &m.o2)])),
    ("2NO2_2NO_O2", |m| equation(&[(2, &m.no2)], &[(2, &m.no), (1, &m.o2)])),
    ("4PCl3_P4_6Cl2", |m| equation(&[(4, &m.pcl3)], &[(1, &m.p4), (6, &m.cl2)])),
    ("PCl5_PCl3_Cl2", |m| equation(&[(1, &m.pcl5)], &[(1, &m.pcl3), (1, &m.cl2)])),
    ("2SO3_2SO2_O2", |m| equation(&[(2, &m.so3)], &[(2, &m.so2), (1, &m.o2)])),
    // displacement and combustion
    ("CH4_H2O_3H2_CO", |m| equation(&[(1, &m.ch4), (1, &m.h2o)], &[(3, &m.h2), (1, &m.co)])),
    ("CH4_2O2_CO2_2H2O", |m| equation(&[(1, &m.ch4), (2, &m.o2)], &[(1, &m.co2), (2, &m.h2o)])),
    ("2C_2H2O_CH4_CO2", |m| equation(&[(2, &m.c), (2, &m.h2o)], &[(1, &m.ch4), (1, &m.co2)])),
    ("CS2_3O2_CO2_2SO2", |m| equation(&[(1, &m.cs2), (3, &m.o2)], &[(1, &m.co2), (2, &m.so2)])),
    ("CH4_4S_CS2_2H2S", |m| equation(&[(1, &m.ch4), (4, &m.s)], &[(1, &m.cs2), (2, &m.h2s)])),
    ("2H2S_3O2_2SO2_2H2O", |m| equation(&[(2, &m.h2s), (3, &m.o2)], &[(2, &m.so2), (2, &m.h2o)])),
    ("2F2_H2O_OF2_2HF", |m| equation(&[(2, &m.f2), (1, &m.h2o)], &[(1, &m.of2), (2, &m.hf)])),
    ("4NH3_5O2_4NO_6H2O", |m| equation(&[(4, &m.nh3), (5, &m.o2)], &[(4, &m.no), (6, &m.h2o)])),
    ("4NH3_3O2_2N2_6H2O", |m| equation(&[(4, &m.nh3), (3, &m.o2)], &[(2, &m.n2), (6, &m.h2o)])),
    ("C2H5OH_3O2_2CO2_3H2O", |m| equation(&[(1, &m.c2h5oh), (3, &m.o2)], &[(2, &m.co2), (3, &m.h2o)])),
    ("2C2H6_7O2_4CO2_6H2O", |m| equation(&[(2, &m.c2h6), (7, &m.o2)], &[(4, &m.co2), (6, &m.h2o)])),
];

//! Molecules and the shared molecule library

use std::sync::Arc;

use super::atom::{Atom, Element};

/// An immutable chemical species
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Molecule {
    symbol: &'static str,
    /// Constituent atoms in formula order (repeats allowed, e.g. H2O = [H, H, O])
    atoms: Vec<Atom>,
    /// Visually complex species, kept out of the easiest game level
    big: bool,
}

impl Molecule {
    pub fn new(symbol: &'static str, atoms: &[Atom]) -> Self {
        Self {
            symbol,
            atoms: atoms.to_vec(),
            big: false,
        }
    }

    /// Create a molecule flagged as big
    pub fn big(symbol: &'static str, atoms: &[Atom]) -> Self {
        Self {
            big: true,
            ..Self::new(symbol, atoms)
        }
    }

    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn is_big(&self) -> bool {
        self.big
    }

    /// Number of atoms of `element` in one molecule
    pub fn count_of(&self, element: Element) -> usize {
        self.atoms.iter().filter(|a| a.element == element).count()
    }
}

/// Every species used by the catalog, built once and shared read-only.
#[derive(Debug, Clone)]
pub struct MoleculeLibrary {
    pub c: Arc<Molecule>,
    pub c2h2: Arc<Molecule>,
    pub c2h4: Arc<Molecule>,
    pub c2h5oh: Arc<Molecule>,
    pub c2h6: Arc<Molecule>,
    pub ch3oh: Arc<Molecule>,
    pub ch4: Arc<Molecule>,
    pub cl2: Arc<Molecule>,
    pub co: Arc<Molecule>,
    pub co2: Arc<Molecule>,
    pub cs2: Arc<Molecule>,
    pub f2: Arc<Molecule>,
    pub h2: Arc<Molecule>,
    pub h2o: Arc<Molecule>,
    pub h2s: Arc<Molecule>,
    pub hcl: Arc<Molecule>,
    pub hf: Arc<Molecule>,
    pub n2: Arc<Molecule>,
    pub nh3: Arc<Molecule>,
    pub no: Arc<Molecule>,
    pub no2: Arc<Molecule>,
    pub o2: Arc<Molecule>,
    pub of2: Arc<Molecule>,
    pub p4: Arc<Molecule>,
    pub pcl3: Arc<Molecule>,
    pub pcl5: Arc<Molecule>,
    pub pf3: Arc<Molecule>,
    pub ph3: Arc<Molecule>,
    pub s: Arc<Molecule>,
    pub so2: Arc<Molecule>,
    pub so3: Arc<Molecule>,
}

impl Default for MoleculeLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl MoleculeLibrary {
    pub fn new() -> Self {
        use Atom as A;
        let small = |symbol, atoms: &[Atom]| Arc::new(Molecule::new(symbol, atoms));
        let big = |symbol, atoms: &[Atom]| Arc::new(Molecule::big(symbol, atoms));

        Self {
            c: small("C", &[A::C]),
            c2h2: small("C2H2", &[A::C, A::C, A::H, A::H]),
            c2h4: small("C2H4", &[A::C, A::C, A::H, A::H, A::H, A::H]),
            c2h5oh: big(
                "C2H5OH",
                &[A::C, A::C, A::H, A::H, A::H, A::H, A::H, A::O, A::H],
            ),
            c2h6: big("C2H6", &[A::C, A::C, A::H, A::H, A::H, A::H, A::H, A::H]),
            ch3oh: small("CH3OH", &[A::C, A::H, A::H, A::H, A::O, A::H]),
            ch4: small("CH4", &[A::C, A::H, A::H, A::H, A::H]),
            cl2: small("Cl2", &[A::CL, A::CL]),
            co: small("CO", &[A::C, A::O]),
            co2: small("CO2", &[A::C, A::O, A::O]),
            cs2: small("CS2", &[A::C, A::S, A::S]),
            f2: small("F2", &[A::F, A::F]),
            h2: small("H2", &[A::H, A::H]),
            h2o: small("H2O", &[A::H, A::H, A::O]),
            h2s: small("H2S", &[A::H, A::H, A::S]),
            hcl: small("HCl", &[A::H, A::CL]),
            hf: small("HF", &[A::H, A::F]),
            n2: small("N2", &[A::N, A::N]),
            nh3: small("NH3", &[A::N, A::H, A::H, A::H]),
            no: small("NO", &[A::N, A::O]),
            no2: small("NO2", &[A::N, A::O, A::O]),
            o2: small("O2", &[A::O, A::O]),
            of2: small("OF2", &[A::O, A::F, A::F]),
            p4: big("P4", &[A::P, A::P, A::P, A::P]),
            pcl3: big("PCl3", &[A::P, A::CL, A::CL, A::CL]),
            pcl5: big("PCl5", &[A::P, A::CL, A::CL, A::CL, A::CL, A::CL]),
            pf3: big("PF3", &[A::P, A::F, A::F, A::F]),
            ph3: big("PH3", &[A::P, A::H, A::H, A::H]),
            s: small("S", &[A::S]),
            so2: small("SO2", &[A::S, A::O, A::O]),
            so3: small("SO3", &[A::S, A::O, A::O, A::O]),
        }
    }

    /// All species in the library
    pub fn all(&self) -> Vec<&Arc<Molecule>> {
        vec![
            &self.c, &self.c2h2, &self.c2h4, &self.c2h5oh, &self.c2h6, &self.ch3oh, &self.ch4,
            &self.cl2, &self.co, &self.co2, &self.cs2, &self.f2, &self.h2, &self.h2o, &self.h2s,
            &self.hcl, &self.hf, &self.n2, &self.nh3, &self.no, &self.no2, &self.o2, &self.of2,
            &self.p4, &self.pcl3, &self.pcl5, &self.pf3, &self.ph3, &self.s, &self.so2, &self.so3,
        ]
    }

    /// Find a species by its formula symbol
    pub fn find(&self, symbol: &str) -> Option<Arc<Molecule>> {
        self.all()
            .into_iter()
            .find(|m| m.symbol() == symbol)
            .cloned()
    }
}

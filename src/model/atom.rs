//! Elements and atoms

use std::fmt;

use serde::{Deserialize, Serialize};

/// Elements that appear in the equation catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    C,
    Cl,
    F,
    H,
    N,
    O,
    P,
    S,
}

impl Element {
    pub fn symbol(&self) -> &'static str {
        match self {
            Element::C => "C",
            Element::Cl => "Cl",
            Element::F => "F",
            Element::H => "H",
            Element::N => "N",
            Element::O => "O",
            Element::P => "P",
            Element::S => "S",
        }
    }

    /// Look up an element by its exact (case-sensitive) symbol
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "C" => Some(Element::C),
            "Cl" => Some(Element::Cl),
            "F" => Some(Element::F),
            "H" => Some(Element::H),
            "N" => Some(Element::N),
            "O" => Some(Element::O),
            "P" => Some(Element::P),
            "S" => Some(Element::S),
            _ => None,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.symbol())
    }
}

/// A single atom. Two atoms of the same element are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Atom {
    pub element: Element,
}

impl Atom {
    pub const C: Atom = Atom::new(Element::C);
    pub const CL: Atom = Atom::new(Element::Cl);
    pub const F: Atom = Atom::new(Element::F);
    pub const H: Atom = Atom::new(Element::H);
    pub const N: Atom = Atom::new(Element::N);
    pub const O: Atom = Atom::new(Element::O);
    pub const P: Atom = Atom::new(Element::P);
    pub const S: Atom = Atom::new(Element::S);

    pub const fn new(element: Element) -> Self {
        Self { element }
    }

    pub fn symbol(&self) -> &'static str {
        self.element.symbol()
    }
}

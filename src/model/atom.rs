use super::metadata::AtomResidueInfo;
use super::types::Element;
use std::fmt;

/// An atom of the input structure.
///
/// The atom's identity is its index in [`System::atoms`](super::system::System).
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub element: Element,
    pub position: [f64; 3],
    pub occupancy: f64,
    /// Formal charge read from the input model, if any.
    pub formal_charge: Option<i32>,
    pub info: AtomResidueInfo,
}

impl Atom {
    pub fn new(element: Element, position: [f64; 3]) -> Self {
        Self {
            element,
            position,
            occupancy: 1.0,
            formal_charge: None,
            info: AtomResidueInfo::default(),
        }
    }

    pub fn with_info(mut self, info: AtomResidueInfo) -> Self {
        self.info = info;
        self
    }

    pub fn with_formal_charge(mut self, charge: i32) -> Self {
        self.formal_charge = Some(charge);
        self
    }

    pub fn with_occupancy(mut self, occupancy: f64) -> Self {
        self.occupancy = occupancy;
        self
    }

    /// Atom name, falling back to the element symbol for unnamed atoms.
    pub fn name(&self) -> &str {
        let name = self.info.atom_name.trim();
        if name.is_empty() {
            self.element.symbol()
        } else {
            name
        }
    }

    /// PDB-like locator used in diagnostics, e.g. `"OD2  ASP A  12 "`.
    pub fn label(&self) -> String {
        self.to_string()
    }

    pub fn distance_squared(&self, other: &Atom) -> f64 {
        let d = [
            self.position[0] - other.position[0],
            self.position[1] - other.position[1],
            self.position[2] - other.position[2],
        ];
        d[0] * d[0] + d[1] * d[1] + d[2] * d[2]
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = &self.info;
        write!(
            f,
            "\"{:<4}{}{:>3} {}{:>4}{}\"",
            self.name(),
            info.alt_loc,
            info.residue_name,
            info.chain_id,
            info.residue_id,
            info.insertion_code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_has_full_occupancy_and_no_charge() {
        let atom = Atom::new(Element::C, [1.0, 2.0, 3.0]);
        assert_eq!(atom.occupancy, 1.0);
        assert_eq!(atom.formal_charge, None);
        assert_eq!(atom.name(), "C");
    }

    #[test]
    fn label_includes_residue_context() {
        let atom = Atom::new(Element::O, [0.0; 3])
            .with_info(AtomResidueInfo::builder("OD2", "ASP", 12, 'A').build());
        assert_eq!(atom.label(), "\"OD2  ASP A  12 \"");
    }

    #[test]
    fn squared_distance() {
        let a = Atom::new(Element::C, [0.0, 0.0, 0.0]);
        let b = Atom::new(Element::C, [1.0, 2.0, 2.0]);
        assert_eq!(a.distance_squared(&b), 9.0);
    }
}

//! Contact-analysis helpers built on the bond graph.
//!
//! These answer the geometric questions a contact-dot scorer asks about a
//! structure: which atoms share a conformation, which atoms lie within a
//! few bonds of each other, which atoms donate hydrogens, and where the
//! implicit hydrogens of a water could point.

mod neighbors;
mod phantom;
mod spatial;

pub use neighbors::{atoms_within_n_bonds, compatible_conformations, fixup_explicit_donors};
pub use phantom::{PhantomHydrogen, PhantomOptions, phantom_hydrogens_for};
pub use spatial::SpatialGrid;

use crate::model::types::Element;
use thiserror::Error;

/// Per-atom contact properties that are not part of the structure itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtraAtomInfo {
    pub vdw_radius: f64,
    pub is_acceptor: bool,
    pub is_donor: bool,
}

impl ExtraAtomInfo {
    pub fn new(vdw_radius: f64) -> Self {
        Self {
            vdw_radius,
            is_acceptor: false,
            is_donor: false,
        }
    }

    pub fn acceptor(mut self, is_acceptor: bool) -> Self {
        self.is_acceptor = is_acceptor;
        self
    }

    pub fn donor(mut self, is_donor: bool) -> Self {
        self.is_donor = is_donor;
        self
    }
}

/// Errors raised by the contact helpers.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("expected {expected} extra atom records, found {found}")]
    ExtraInfoMismatch { expected: usize, found: usize },

    #[error("atom index {index} out of range (atom count: {count})")]
    AtomOutOfRange { index: usize, count: usize },

    #[error("bond graph covers {graph} atoms but the system has {atoms}")]
    GraphMismatch { graph: usize, atoms: usize },

    #[error("spatial grid cell size {cell_size} is below the {radius} Å search radius")]
    GridTooFine { cell_size: f64, radius: f64 },

    #[error("phantom hydrogens are placed around oxygen atoms, got {element} at index {index}")]
    NotOxygen { index: usize, element: Element },
}

const AROMATIC_RING_ATOMS: &[(&str, &[&str])] = &[
    ("PHE", &["CG", "CD1", "CD2", "CE1", "CE2", "CZ"]),
    ("TYR", &["CG", "CD1", "CD2", "CE1", "CE2", "CZ"]),
    (
        "TRP",
        &["CG", "CD1", "CD2", "NE1", "CE2", "CE3", "CZ2", "CZ3", "CH2"],
    ),
    ("HIS", &["CG", "ND1", "CD2", "CE1", "NE2"]),
    ("A", &["N1", "C2", "N3", "C4", "C5", "C6", "N7", "C8", "N9"]),
    ("G", &["N1", "C2", "N3", "C4", "C5", "C6", "N7", "C8", "N9"]),
    ("C", &["N1", "C2", "N3", "C4", "C5", "C6"]),
    ("U", &["N1", "C2", "N3", "C4", "C5", "C6"]),
    ("T", &["N1", "C2", "N3", "C4", "C5", "C6"]),
    ("DA", &["N1", "C2", "N3", "C4", "C5", "C6", "N7", "C8", "N9"]),
    ("DG", &["N1", "C2", "N3", "C4", "C5", "C6", "N7", "C8", "N9"]),
    ("DC", &["N1", "C2", "N3", "C4", "C5", "C6"]),
    ("DT", &["N1", "C2", "N3", "C4", "C5", "C6"]),
];

/// Whether the named atom belongs to the aromatic ring of a standard residue.
///
/// ```
/// use elecdist::probe::is_aromatic;
///
/// assert!(is_aromatic("TYR", "CE1"));
/// assert!(!is_aromatic("TYR", "OH"));
/// ```
pub fn is_aromatic(residue_name: &str, atom_name: &str) -> bool {
    let residue_name = residue_name.trim().to_ascii_uppercase();
    let atom_name = atom_name.trim();
    AROMATIC_RING_ATOMS
        .iter()
        .find(|(res, _)| *res == residue_name)
        .is_some_and(|(_, atoms)| atoms.contains(&atom_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aromatic_lookup() {
        assert!(is_aromatic("PHE", "CZ"));
        assert!(is_aromatic(" his", "NE2"));
        assert!(is_aromatic("DG", "N7"));
        assert!(!is_aromatic("PHE", "CB"));
        assert!(!is_aromatic("ALA", "CB"));
    }

    #[test]
    fn extra_info_builder() {
        let info = ExtraAtomInfo::new(1.4).acceptor(true);
        assert_eq!(info.vdw_radius, 1.4);
        assert!(info.is_acceptor);
        assert!(!info.is_donor);
    }
}

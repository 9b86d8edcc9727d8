use super::{Error, ExtraAtomInfo};
use crate::electron::BondGraph;
use crate::model::atom::Atom;
use crate::model::system::System;
use crate::model::types::Element;
use std::collections::BTreeSet;

/// Whether two atoms can coexist in one conformation.
///
/// Atoms without an alternate location are compatible with everything.
pub fn compatible_conformations(a: &Atom, b: &Atom) -> bool {
    !a.info.has_alt_loc() || !b.info.has_alt_loc() || a.info.alt_loc == b.info.alt_loc
}

/// Atoms reachable from `atom` within `n` bonds, excluding `atom` itself.
///
/// Between heavy atoms the depth is limited to `non_hydrogen_n`; once a
/// hydrogen is met on the walk (or `atom` is one) the full depth `n`
/// applies. Only atoms in a conformation compatible with `atom` are
/// collected. The result is sorted by index.
pub fn atoms_within_n_bonds(
    system: &System,
    graph: &BondGraph,
    atom: usize,
    n: usize,
    non_hydrogen_n: usize,
) -> Result<Vec<usize>, Error> {
    check_index(system, atom)?;
    check_graph(system, graph)?;

    let origin = &system.atoms[atom];
    let mut hydrogen_found = origin.element.is_hydrogen();
    let mut found = BTreeSet::from([atom]);

    for depth in 0..n {
        let current: Vec<usize> = found.iter().copied().collect();
        for a in current {
            for &neighbor in graph.neighbors(a) {
                let candidate = &system.atoms[neighbor];
                if candidate.element.is_hydrogen() {
                    hydrogen_found = true;
                }
                if (depth < non_hydrogen_n || hydrogen_found)
                    && compatible_conformations(origin, candidate)
                {
                    found.insert(neighbor);
                }
            }
        }
    }

    found.remove(&atom);
    Ok(found.into_iter().collect())
}

fn is_polar(element: Element) -> bool {
    matches!(element, Element::N | Element::O | Element::S)
}

/// Moves donor status from polar heavy atoms onto their explicit hydrogens.
///
/// Every N, O and S loses donor status, and every hydrogen bonded to one
/// of them becomes a donor.
pub fn fixup_explicit_donors(
    system: &System,
    graph: &BondGraph,
    extra: &mut [ExtraAtomInfo],
) -> Result<(), Error> {
    check_graph(system, graph)?;
    if extra.len() != system.atom_count() {
        return Err(Error::ExtraInfoMismatch {
            expected: system.atom_count(),
            found: extra.len(),
        });
    }

    for (idx, atom) in system.atoms.iter().enumerate() {
        if atom.element.is_hydrogen() {
            for &neighbor in graph.neighbors(idx) {
                if is_polar(system.atoms[neighbor].element) {
                    extra[idx].is_donor = true;
                    extra[neighbor].is_donor = false;
                }
            }
        } else if is_polar(atom.element) {
            extra[idx].is_donor = false;
        }
    }

    let donors = extra.iter().filter(|e| e.is_donor).count();
    log::debug!("explicit donor fixup left {donors} donor atoms");
    Ok(())
}

pub(super) fn check_index(system: &System, index: usize) -> Result<(), Error> {
    if index >= system.atom_count() {
        return Err(Error::AtomOutOfRange {
            index,
            count: system.atom_count(),
        });
    }
    Ok(())
}

pub(super) fn check_graph(system: &System, graph: &BondGraph) -> Result<(), Error> {
    if graph.atom_count() != system.atom_count() {
        return Err(Error::GraphMismatch {
            graph: graph.atom_count(),
            atoms: system.atom_count(),
        });
    }
    Ok(())
}

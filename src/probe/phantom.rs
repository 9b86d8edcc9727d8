//! Implicit water hydrogens pointed at nearby heavy atoms.

use super::neighbors::{check_index, compatible_conformations};
use super::spatial::SpatialGrid;
use super::{Error, ExtraAtomInfo, is_aromatic};
use crate::model::atom::Atom;
use crate::model::system::System;
use crate::model::types::Element;

/// Radius searched around the water oxygen.
pub const SEARCH_RADIUS: f64 = 4.0;

const OH_BOND_LENGTH: f64 = 1.0;
const BEST_HBOND_OVERLAP: f64 = 0.6;
const MIN_OVERLAP: f64 = -0.1;

/// Knobs for [`phantom_hydrogens_for`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhantomOptions {
    /// Neighbors at or below this occupancy are ignored.
    pub min_occupancy: f64,
    /// Only point hydrogens at acceptors.
    pub acceptor_only: bool,
    pub placed_hydrogen_radius: f64,
}

impl Default for PhantomOptions {
    fn default() -> Self {
        Self {
            min_occupancy: 0.0,
            acceptor_only: false,
            placed_hydrogen_radius: 1.05,
        }
    }
}

/// A hydrogen that a water could donate toward `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct PhantomHydrogen {
    pub position: [f64; 3],
    /// Index of the water oxygen.
    pub parent: usize,
    /// Index of the heavy atom the hydrogen points at.
    pub target: usize,
    /// Contact overlap between the placed hydrogen and `target`.
    pub overlap: f64,
}

impl PhantomHydrogen {
    /// Materializes the hydrogen as an atom of the oxygen's residue.
    pub fn to_atom(&self, system: &System) -> Atom {
        let oxygen = &system.atoms[self.parent];
        let mut info = oxygen.info.clone();
        info.atom_name = "H?".to_string();
        Atom::new(Element::H, self.position)
            .with_info(info)
            .with_occupancy(oxygen.occupancy)
    }
}

struct Candidate {
    atom: usize,
    overlap: f64,
}

fn same_ring(system: &System, a: usize, b: usize) -> bool {
    let (a, b) = (&system.atoms[a], &system.atoms[b]);
    a.info.residue_key() == b.info.residue_key() && a.info.alt_loc == b.info.alt_loc
}

fn ring_atom(system: &System, idx: usize) -> bool {
    let atom = &system.atoms[idx];
    is_aromatic(&atom.info.residue_name, atom.name())
}

/// Places phantom hydrogens on the water oxygen `oxygen`.
///
/// Every heavy atom within [`SEARCH_RADIUS`] that is close enough to accept
/// a hydrogen bond gets one hydrogen pointed at it. Of several atoms on one
/// aromatic ring only the closest is kept. `grid` must index the positions of
/// `system.atoms` with a cell size of at least [`SEARCH_RADIUS`].
pub fn phantom_hydrogens_for(
    system: &System,
    grid: &SpatialGrid,
    oxygen: usize,
    extra: &[ExtraAtomInfo],
    options: &PhantomOptions,
) -> Result<Vec<PhantomHydrogen>, Error> {
    check_index(system, oxygen)?;
    if extra.len() != system.atom_count() {
        return Err(Error::ExtraInfoMismatch {
            expected: system.atom_count(),
            found: extra.len(),
        });
    }
    let water = &system.atoms[oxygen];
    if water.element != Element::O {
        return Err(Error::NotOxygen {
            index: oxygen,
            element: water.element,
        });
    }
    if grid.cell_size() < SEARCH_RADIUS {
        return Err(Error::GridTooFine {
            cell_size: grid.cell_size(),
            radius: SEARCH_RADIUS,
        });
    }

    let positions: Vec<[f64; 3]> = system.atoms.iter().map(|a| a.position).collect();
    let nearby = grid.neighbors(water.position, &positions, 0.001, SEARCH_RADIUS);

    let mut candidates: Vec<Candidate> = Vec::new();
    for idx in nearby {
        let atom = &system.atoms[idx];
        if !compatible_conformations(water, atom) {
            continue;
        }
        let info = &extra[idx];
        let overlap = water.distance_squared(atom).sqrt()
            - (options.placed_hydrogen_radius + info.vdw_radius + OH_BOND_LENGTH);
        if overlap >= MIN_OVERLAP
            || atom.occupancy <= options.min_occupancy
            || atom.element.is_hydrogen()
            || (options.acceptor_only && !info.is_acceptor)
        {
            continue;
        }

        if ring_atom(system, idx) {
            let sibling = candidates
                .iter_mut()
                .find(|c| ring_atom(system, c.atom) && same_ring(system, c.atom, idx));
            if let Some(sibling) = sibling {
                if overlap < sibling.overlap {
                    *sibling = Candidate { atom: idx, overlap };
                }
                continue;
            }
        }
        candidates.push(Candidate { atom: idx, overlap });
    }

    let phantoms: Vec<PhantomHydrogen> = candidates
        .into_iter()
        .filter_map(|c| {
            let target = system.atoms[c.atom].position;
            let offset = [
                target[0] - water.position[0],
                target[1] - water.position[1],
                target[2] - water.position[2],
            ];
            let length = (offset[0].powi(2) + offset[1].powi(2) + offset[2].powi(2)).sqrt();
            if length == 0.0 {
                return None;
            }
            let distance = 1.0 + (c.overlap + BEST_HBOND_OVERLAP).clamp(-1.0, 0.0);
            let scale = distance / length;
            Some(PhantomHydrogen {
                position: [
                    water.position[0] + offset[0] * scale,
                    water.position[1] + offset[1] * scale,
                    water.position[2] + offset[2] * scale,
                ],
                parent: oxygen,
                target: c.atom,
                overlap: c.overlap,
            })
        })
        .collect();

    log::debug!(
        "placed {} phantom hydrogens on {}",
        phantoms.len(),
        water.label()
    );
    Ok(phantoms)
}

//! The electron distribution: remaining electrons per atom and shared electrons per bond.
//!
//! Atom entries start at the element's valence (or minus the ionic charge
//! for metals) and are debited as bonds take electrons. Whenever an atom
//! with lone pairs would drop below -1 it takes back a pair (+2), so such
//! atoms give and take electrons two at a time.

use super::config::DistributionConfig;
use super::error::Error;
use super::graph::BondGraph;
use super::properties::element_properties;
use crate::model::atom::Atom;
use crate::model::metadata::ResidueKey;
use crate::model::system::{Bond, System};
use crate::model::types::{BondOrder, Element};
use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Write as _};

/// How a bond participates in electron accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondKind {
    /// Ordinary covalent bond that draws electrons from both atoms.
    Covalent,
    /// Metal-ligand contact that holds no electrons.
    Coordination,
}

/// Remaining electrons per atom and shared electrons per bond for one system.
///
/// Built by [`distribute`](super::distribute), or step by step with
/// [`prepare`](Self::prepare) and [`form_bonds`](Self::form_bonds).
#[derive(Debug, Clone)]
pub struct ElectronDistribution {
    pub(super) system: System,
    pub(super) graph: BondGraph,
    pub(super) atom_electrons: Vec<i32>,
    pub(super) bond_electrons: HashMap<Bond, i32>,
    pub(super) bond_kinds: HashMap<Bond, BondKind>,
    pub(super) metal_coordinated: Vec<bool>,
    pub(super) tetra_coordinate: Vec<Element>,
}

/// Applies the lone-pair rule to a new electron count for `element`.
pub(super) fn settle(element: Element, electrons: i32) -> i32 {
    if electrons < -1 && element_properties(element).has_lone_pairs() {
        electrons + 2
    } else {
        electrons
    }
}

impl ElectronDistribution {
    /// Initializes atom entries and applies charges, without placing any bond electrons.
    ///
    /// Steps, in order: conformer selection, valence initialization,
    /// built-in metal charges, input formal charges on metals, configured
    /// overrides, and the check that every metal has a charge.
    ///
    /// # Errors
    ///
    /// [`Error::EmptySystem`], [`Error::InvalidBond`],
    /// [`Error::MissingValence`], [`Error::UnresolvedMetalCharge`] and the
    /// conformer errors.
    pub fn prepare(system: &System, config: &DistributionConfig) -> Result<Self, Error> {
        let system = select_conformer(system, config.alt_loc)?;
        if system.atoms.is_empty() {
            return Err(Error::EmptySystem);
        }
        let graph = BondGraph::from_system(&system)?;

        let mut counts = Vec::with_capacity(system.atom_count());
        for (idx, atom) in system.atoms.iter().enumerate() {
            let props = element_properties(atom.element);
            let Some(valence) = props.valence else {
                return Err(Error::missing_valence(idx, atom));
            };
            let initial = if props.is_metal {
                props.default_charge.map(|c| settle(atom.element, -c))
            } else {
                Some(valence)
            };
            counts.push(initial);
        }

        apply_charges(&system, &mut counts, config);

        let mut atom_electrons = Vec::with_capacity(counts.len());
        for (idx, count) in counts.into_iter().enumerate() {
            match count {
                Some(c) => atom_electrons.push(c),
                None => return Err(Error::unresolved_metal_charge(idx, &system.atoms[idx])),
            }
        }

        let bond_electrons = graph.bonds().iter().map(|b| (*b, 0)).collect();
        let bond_kinds = graph
            .bonds()
            .iter()
            .map(|b| (*b, BondKind::Covalent))
            .collect();
        let metal_coordinated = vec![false; system.atom_count()];

        log::debug!(
            "prepared electron distribution for {} atoms and {} bonds",
            system.atom_count(),
            graph.bonds().len()
        );

        Ok(Self {
            system,
            graph,
            atom_electrons,
            bond_electrons,
            bond_kinds,
            metal_coordinated,
            tetra_coordinate: config.tetra_coordinate.clone(),
        })
    }

    /// The system this distribution describes, after conformer selection.
    #[inline]
    pub fn system(&self) -> &System {
        &self.system
    }

    #[inline]
    pub fn graph(&self) -> &BondGraph {
        &self.graph
    }

    /// Remaining electrons on `atom`.
    pub fn electrons(&self, atom: usize) -> Option<i32> {
        self.atom_electrons.get(atom).copied()
    }

    /// Electrons shared by the bond between `i` and `j`, in either order.
    pub fn bond_electrons(&self, i: usize, j: usize) -> Option<i32> {
        self.bond_electrons.get(&Bond::new(i, j)).copied()
    }

    pub fn bond_kind(&self, i: usize, j: usize) -> Option<BondKind> {
        self.bond_kinds.get(&Bond::new(i, j)).copied()
    }

    /// Bond order implied by the shared electrons, if it is one to three.
    pub fn bond_order(&self, i: usize, j: usize) -> Option<BondOrder> {
        self.bond_electrons(i, j).and_then(BondOrder::from_electrons)
    }

    /// Remaining electrons of every atom, indexed by atom.
    #[inline]
    pub fn atom_entries(&self) -> &[i32] {
        &self.atom_electrons
    }

    /// Every bond with its electron count and kind, in input order.
    pub fn bond_entries(&self) -> impl Iterator<Item = (Bond, i32, BondKind)> + '_ {
        self.graph
            .bonds()
            .iter()
            .map(|b| (*b, self.bond_electrons[b], self.bond_kinds[b]))
    }

    /// Net formal charge: minus the sum of all remaining electrons.
    pub fn total_charge(&self) -> i32 {
        -self.atom_electrons.iter().sum::<i32>()
    }

    #[inline]
    pub fn is_neutral(&self) -> bool {
        self.total_charge() == 0
    }

    /// Atoms with a non-zero formal charge, as `(atom, charge)`.
    pub fn charged_atoms(&self) -> Vec<(usize, i32)> {
        self.atom_electrons
            .iter()
            .enumerate()
            .filter(|(_, e)| **e != 0)
            .map(|(idx, e)| (idx, -e))
            .collect()
    }

    /// Formal charge summed per residue.
    pub fn residue_charges(&self) -> BTreeMap<ResidueKey, i32> {
        self.system
            .residues()
            .into_iter()
            .map(|(key, atoms)| {
                let charge = -atoms.iter().map(|&a| self.atom_electrons[a]).sum::<i32>();
                (key, charge)
            })
            .collect()
    }

    /// Every atom and bond entry, one per line.
    pub fn detailed(&self) -> String {
        self.render(true)
    }

    /// Residues with a non-zero formal charge, one per line.
    pub fn residue_summary(&self) -> String {
        let mut out = String::from("residue charges\n");
        let mut any = false;
        for (key, charge) in self.residue_charges() {
            if charge != 0 {
                any = true;
                let _ = writeln!(out, "  {key} : {charge:+}");
            }
        }
        if !any {
            out.push_str("  all residues neutral\n");
        }
        out
    }

    pub(super) fn atom(&self, idx: usize) -> &Atom {
        &self.system.atoms[idx]
    }

    pub(super) fn is_covalent(&self, bond: &Bond) -> bool {
        self.bond_kinds.get(bond) == Some(&BondKind::Covalent)
    }

    /// Electrons already placed in bonds around `atom`.
    pub(super) fn bonded_electrons(&self, atom: usize) -> i32 {
        self.graph
            .neighbors(atom)
            .iter()
            .map(|&nb| self.bond_electrons[&Bond::new(atom, nb)])
            .sum()
    }

    /// Moves one electron from each endpoint into `bond`.
    pub(super) fn add_electron_to_bond(&mut self, bond: Bond) {
        if let Some(count) = self.bond_electrons.get_mut(&bond) {
            *count += 1;
        }
        for idx in [bond.i, bond.j] {
            let element = self.system.atoms[idx].element;
            self.atom_electrons[idx] = settle(element, self.atom_electrons[idx] - 1);
        }
    }

    fn render(&self, show_all: bool) -> String {
        let mut out = String::new();
        for (bond, electrons, kind) in self.bond_entries() {
            let empty = electrons == 0 && kind == BondKind::Covalent;
            if empty || show_all {
                let _ = writeln!(
                    out,
                    "  {}-{} : {} electrons",
                    self.atom(bond.i),
                    self.atom(bond.j),
                    electrons
                );
            }
        }
        for (idx, electrons) in self.atom_electrons.iter().enumerate() {
            if *electrons != 0 || show_all {
                let _ = writeln!(out, "  {}  : {:3}", self.atom(idx), electrons);
            }
        }
        if out.is_empty() {
            out.push_str("  molecule neutral\n");
        }
        format!("elec. dist.\n{out}")
    }
}

impl fmt::Display for ElectronDistribution {
    /// Summary of atoms with leftover electrons and covalent bonds left empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

fn select_conformer(system: &System, alt_loc: Option<char>) -> Result<System, Error> {
    let alt_locs = system.alt_locs();
    match alt_loc {
        Some(c) if !alt_locs.is_empty() && !alt_locs.contains(&c) => Err(Error::UnknownAltLoc(c)),
        Some(c) => Ok(system.conformer(c)),
        None if alt_locs.len() > 1 => Err(Error::AmbiguousConformers { alt_locs }),
        None => Ok(system.clone()),
    }
}

fn apply_charges(system: &System, counts: &mut [Option<i32>], config: &DistributionConfig) {
    for (idx, atom) in system.atoms.iter().enumerate() {
        let props = element_properties(atom.element);
        if let Some(charge) = props.default_charge {
            counts[idx] = Some(settle(atom.element, -charge));
        }
        if props.is_metal
            && let Some(charge) = atom.formal_charge
        {
            counts[idx] = Some(settle(atom.element, -charge));
        }
    }

    for rule in &config.atom_charges {
        let mut hits = 0usize;
        for (idx, atom) in system.atoms.iter().enumerate() {
            if rule.selection.matches(atom) {
                counts[idx] = Some(settle(atom.element, -rule.charge));
                hits += 1;
            }
        }
        if hits == 0 {
            log::warn!("atom charge override '{}' matched no atoms", rule.selection);
        } else {
            log::debug!(
                "atom charge override '{}' set charge {:+} on {} atom(s)",
                rule.selection,
                rule.charge,
                hits
            );
        }
    }
}

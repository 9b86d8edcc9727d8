//! Placing electrons into bonds.
//!
//! Four passes run in order over the bond graph:
//!
//! 1. [`BondPass::MetalCoordination`] marks metal-ligand bonds as
//!    coordination bonds holding no electrons.
//! 2. [`BondPass::Single`] gives each covalent bond its first electron.
//! 3. [`BondPass::Multiple`] builds double bonds: terminal atoms first, then
//!    rings (tetra-coordinate bonds preferred, leftovers paired along
//!    alternating paths), then a sweep over bonds by descending lone-pair
//!    count.
//! 4. [`BondPass::Hyper`] keeps adding electrons while the bondability
//!    predicate allows, until nothing changes.
//!
//! Every placement strictly lowers the sum of positive atom counts or is
//! stopped by bond saturation, so all passes terminate.

use super::distribution::{BondKind, ElectronDistribution};
use super::error::Error;
use super::graph::ring_bonds;
use super::properties::element_properties;
use crate::model::system::Bond;
use std::collections::{HashSet, VecDeque};

/// Outcome of the bondability predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bondability {
    Yes,
    No,
    /// A hydrogen bonded to an atom without lone pairs; treated as [`No`](Self::No).
    Indeterminate,
}

impl Bondability {
    #[inline]
    pub fn is_yes(self) -> bool {
        self == Bondability::Yes
    }
}

/// One stage of bond formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondPass {
    MetalCoordination,
    Single,
    Multiple,
    Hyper,
}

impl BondPass {
    /// All passes in execution order.
    pub const ALL: [BondPass; 4] = [
        BondPass::MetalCoordination,
        BondPass::Single,
        BondPass::Multiple,
        BondPass::Hyper,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RingFilter {
    /// Both endpoints tetra-coordinate.
    Strict,
    /// At least one endpoint tetra-coordinate.
    Relaxed,
    Any,
}

impl ElectronDistribution {
    /// Runs all four passes.
    ///
    /// Running it again on a finished distribution places nothing.
    pub fn form_bonds(&mut self) -> Result<(), Error> {
        for pass in BondPass::ALL {
            self.run_pass(pass)?;
        }
        Ok(())
    }

    /// Runs a single pass and returns the number of electrons placed.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidMetalBond`] from the metal coordination pass when two
    /// metals are bonded.
    pub fn run_pass(&mut self, pass: BondPass) -> Result<usize, Error> {
        let placed = match pass {
            BondPass::MetalCoordination => {
                self.mark_metal_bonds()?;
                0
            }
            BondPass::Single => self.place_single_bonds(),
            BondPass::Multiple => self.place_terminal_and_ring_bonds() + self.place_lone_pair_bonds(),
            BondPass::Hyper => self.place_remaining_bonds(),
        };
        log::debug!("{pass:?} pass placed {placed} electron(s)");
        Ok(placed)
    }

    /// Decides whether the bond between `i` and `j` may take one more electron.
    pub fn bondability(&self, i: usize, j: usize) -> Bondability {
        let (ci, cj) = (self.atom_electrons[i], self.atom_electrons[j]);
        if ci > 0 && cj > 0 {
            return Bondability::Yes;
        }
        if ci == 0 && cj == 0 {
            return Bondability::No;
        }
        let (ei, ej) = (self.atom(i).element, self.atom(j).element);
        if (ei.is_hydrogen() && ci == 0) || (ej.is_hydrogen() && cj == 0) {
            return Bondability::No;
        }
        if self.is_saturated(i) || self.is_saturated(j) {
            return Bondability::No;
        }

        let other = if ei.is_hydrogen() {
            Some(j)
        } else if ej.is_hydrogen() {
            Some(i)
        } else {
            None
        };
        if let Some(partner) = other {
            return if element_properties(self.atom(partner).element).has_lone_pairs() {
                Bondability::Yes
            } else {
                Bondability::Indeterminate
            };
        }

        let (heavy, light) = if ej.atomic_number() > ei.atomic_number() {
            (j, i)
        } else {
            (i, j)
        };
        let lone_pairs = |idx: usize| element_properties(self.atom(idx).element).has_lone_pairs();
        let acceptor = if lone_pairs(heavy) {
            light
        } else if lone_pairs(light) {
            heavy
        } else {
            return Bondability::No;
        };
        if self.atom_electrons[acceptor] > 0 {
            Bondability::Yes
        } else {
            Bondability::No
        }
    }

    /// Whether `atom` has placed its valence plus all lone-pair electrons.
    fn is_saturated(&self, atom: usize) -> bool {
        element_properties(self.atom(atom).element)
            .max_bond_valence()
            .is_some_and(|max| max - self.bonded_electrons(atom) <= 0)
    }

    fn covalent_bonds(&self) -> Vec<Bond> {
        self.graph
            .bonds()
            .iter()
            .filter(|b| self.is_covalent(b))
            .copied()
            .collect()
    }

    fn lone_pair_sum(&self, bond: &Bond) -> i32 {
        element_properties(self.atom(bond.i).element).lone_pairs
            + element_properties(self.atom(bond.j).element).lone_pairs
    }

    fn mark_metal_bonds(&mut self) -> Result<(), Error> {
        let bonds = self.graph.bonds().to_vec();
        for bond in bonds {
            let metal_i = element_properties(self.atom(bond.i).element).is_metal;
            let metal_j = element_properties(self.atom(bond.j).element).is_metal;
            match (metal_i, metal_j) {
                (true, true) => {
                    return Err(Error::invalid_metal_bond(
                        bond.i,
                        bond.j,
                        format!("{} - {}", self.atom(bond.i), self.atom(bond.j)),
                    ));
                }
                (false, false) => {}
                _ => {
                    if self.atom(bond.i).element.is_hydrogen()
                        || self.atom(bond.j).element.is_hydrogen()
                    {
                        log::warn!(
                            "metal-hydrogen contact {} - {} holds no electrons",
                            self.atom(bond.i),
                            self.atom(bond.j)
                        );
                    }
                    self.bond_kinds.insert(bond, BondKind::Coordination);
                    self.bond_electrons.insert(bond, 0);
                    self.metal_coordinated[bond.i] = true;
                    self.metal_coordinated[bond.j] = true;
                }
            }
        }
        for (idx, atom) in self.system.atoms.iter().enumerate() {
            if element_properties(atom.element).is_metal && !self.metal_coordinated[idx] {
                log::warn!("metal {atom} has no coordinating atoms");
            }
        }
        Ok(())
    }

    fn place_single_bonds(&mut self) -> usize {
        let mut order = self.covalent_bonds();
        // cross-residue bonds first, then ascending lone-pair count; stable
        order.sort_by_key(|b| {
            let same_residue =
                self.atom(b.i).info.residue_key() == self.atom(b.j).info.residue_key();
            (same_residue, self.lone_pair_sum(b))
        });

        let mut placed = 0;
        for bond in order {
            let h_i = self.atom(bond.i).element.is_hydrogen();
            let h_j = self.atom(bond.j).element.is_hydrogen();
            if (self.metal_coordinated[bond.i] && h_j) || (self.metal_coordinated[bond.j] && h_i) {
                log::debug!(
                    "deferring hydrogen bond on metal-coordinated atom {}-{}",
                    self.atom(bond.i),
                    self.atom(bond.j)
                );
                continue;
            }
            if self.bondability(bond.i, bond.j).is_yes() {
                self.add_electron_to_bond(bond);
                placed += 1;
            }
        }
        placed
    }

    fn ring_filter_admits(&self, filter: RingFilter, bond: &Bond) -> bool {
        let tetra = |idx: usize| self.tetra_coordinate.contains(&self.atom(idx).element);
        match filter {
            RingFilter::Strict => tetra(bond.i) && tetra(bond.j),
            RingFilter::Relaxed => tetra(bond.i) || tetra(bond.j),
            RingFilter::Any => true,
        }
    }

    fn place_terminal_and_ring_bonds(&mut self) -> usize {
        let mut placed = 0;
        let mut done_rings: HashSet<Vec<usize>> = HashSet::new();
        let mut ring_adjacency: Vec<Vec<usize>> = vec![Vec::new(); self.system.atom_count()];

        for atom in 0..self.system.atom_count() {
            if self.atom(atom).element.is_hydrogen() {
                continue;
            }

            let partner = self
                .graph
                .leaf_partner(atom, |a, b| self.is_covalent(&Bond::new(a, b)));
            if let Some(nb) = partner
                && self.bondability(atom, nb).is_yes()
            {
                self.add_electron_to_bond(Bond::new(atom, nb));
                placed += 1;
            }

            let Some(ring) = self
                .graph
                .cycle_containing(atom, |a, b| self.is_covalent(&Bond::new(a, b)))
            else {
                continue;
            };
            let mut key = ring.clone();
            key.sort_unstable();
            if !done_rings.insert(key) {
                continue;
            }

            let bonds = ring_bonds(&ring);
            for filter in [RingFilter::Strict, RingFilter::Relaxed, RingFilter::Any] {
                for bond in &bonds {
                    if !self.ring_filter_admits(filter, bond) {
                        continue;
                    }
                    if self.atom_electrons[bond.i] > 0 && self.atom_electrons[bond.j] > 0 {
                        self.add_electron_to_bond(*bond);
                        placed += 1;
                    }
                }
            }
            for bond in bonds {
                if !ring_adjacency[bond.i].contains(&bond.j) {
                    ring_adjacency[bond.i].push(bond.j);
                    ring_adjacency[bond.j].push(bond.i);
                }
            }
        }
        placed + self.pair_ring_leftovers(&ring_adjacency)
    }

    /// Pairs ring atoms the greedy sweep left with electrons.
    ///
    /// Double bonds are shifted along alternating paths so that two
    /// unpaired ring atoms end up paired. The result no longer depends on
    /// the order atoms were visited in.
    fn pair_ring_leftovers(&mut self, ring_adjacency: &[Vec<usize>]) -> usize {
        let mut placed = 0;
        for start in 0..ring_adjacency.len() {
            if self.atom_electrons[start] <= 0 || ring_adjacency[start].is_empty() {
                continue;
            }
            if let Some(path) = self.alternating_path(ring_adjacency, start) {
                log::debug!(
                    "shifting {} ring double bond(s) to pair {} with {}",
                    path.len() / 2 - 1,
                    self.atom(start),
                    self.atom(path[path.len() - 1])
                );
                self.flip_path(&path);
                placed += 1;
            }
        }
        placed
    }

    fn is_ring_double(&self, i: usize, j: usize) -> bool {
        self.bond_electrons
            .get(&Bond::new(i, j))
            .is_some_and(|&e| e >= 2)
    }

    /// Ring partner that `atom` shares a double bond with.
    fn ring_mate(&self, ring_adjacency: &[Vec<usize>], atom: usize) -> Option<usize> {
        ring_adjacency[atom]
            .iter()
            .copied()
            .find(|&nb| self.is_ring_double(atom, nb))
    }

    /// Breadth-first search for a path from `start` to another unpaired
    /// ring atom that alternates single and double ring bonds.
    ///
    /// Returns the atoms along the path, `start` first.
    fn alternating_path(&self, ring_adjacency: &[Vec<usize>], start: usize) -> Option<Vec<usize>> {
        let n = ring_adjacency.len();
        let mut prev = vec![usize::MAX; n];
        let mut visited = vec![false; n];
        let mut queue = VecDeque::new();

        visited[start] = true;
        queue.push_back(start);

        while let Some(u) = queue.pop_front() {
            for &v in &ring_adjacency[u] {
                if visited[v] || self.is_ring_double(u, v) {
                    continue;
                }
                let unpaired = self.atom_electrons[v] > 0;
                let mate = self.ring_mate(ring_adjacency, v);
                if !unpaired && mate.is_none() {
                    continue;
                }
                visited[v] = true;
                prev[v] = u;

                if unpaired {
                    let mut path = vec![v];
                    let mut cur = v;
                    while cur != start {
                        cur = prev[cur];
                        path.push(cur);
                    }
                    path.reverse();
                    return Some(path);
                }

                if let Some(w) = mate
                    && !visited[w]
                {
                    visited[w] = true;
                    prev[w] = v;
                    queue.push_back(w);
                }
            }
        }
        None
    }

    /// Swaps single and double bonds along an alternating path.
    ///
    /// Inner atoms keep their counts; both ends give up one electron.
    fn flip_path(&mut self, path: &[usize]) {
        for pair in path[1..].windows(2).step_by(2) {
            let bond = Bond::new(pair[0], pair[1]);
            if let Some(count) = self.bond_electrons.get_mut(&bond) {
                *count -= 1;
            }
            self.atom_electrons[bond.i] += 1;
            self.atom_electrons[bond.j] += 1;
        }
        for pair in path.windows(2).step_by(2) {
            self.add_electron_to_bond(Bond::new(pair[0], pair[1]));
        }
    }

    fn place_lone_pair_bonds(&mut self) -> usize {
        let mut order = self.covalent_bonds();
        // stable ascending sort, then reversed: ties visit in reverse input order
        order.sort_by_key(|b| self.lone_pair_sum(b));
        order.reverse();

        let mut placed = 0;
        for bond in order {
            while self.atom_electrons[bond.i] > 0 && self.atom_electrons[bond.j] > 0 {
                self.add_electron_to_bond(bond);
                placed += 1;
            }
        }
        placed
    }

    fn place_remaining_bonds(&mut self) -> usize {
        let bonds = self.covalent_bonds();
        let mut placed = 0;
        loop {
            let mut sweep = 0;
            for &bond in &bonds {
                while self.bondability(bond.i, bond.j).is_yes() {
                    self.add_electron_to_bond(bond);
                    sweep += 1;
                }
            }
            if sweep == 0 {
                break;
            }
            placed += sweep;
        }
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::electron::config::DistributionConfig;
    use crate::electron::testing::*;
    use crate::model::system::System;
    use crate::model::types::Element;

    fn prepared(system: &System) -> ElectronDistribution {
        ElectronDistribution::prepare(system, &DistributionConfig::default()).unwrap()
    }

    fn formed(system: &System) -> ElectronDistribution {
        let mut dist = prepared(system);
        dist.form_bonds().unwrap();
        dist
    }

    #[test]
    fn single_pass_on_carbon_oxygen_hydrogen() {
        let mut dist = prepared(&make_carbon_oxygen_hydrogen());
        dist.run_pass(BondPass::MetalCoordination).unwrap();
        let placed = dist.run_pass(BondPass::Single).unwrap();
        assert_eq!(placed, 2);
        assert_eq!(dist.bond_electrons(0, 1), Some(1));
        assert_eq!(dist.bond_electrons(1, 2), Some(1));
        assert_eq!(dist.atom_entries(), &[3, 0, 0]);
    }

    #[test]
    fn oxygen_lone_pair_feeds_unsaturated_carbon() {
        // the terminal carbon keeps drawing on oxygen's lone pairs until it is saturated
        let dist = formed(&make_carbon_oxygen_hydrogen());
        assert_eq!(dist.bond_electrons(1, 2), Some(1));
        assert_eq!(dist.bond_electrons(0, 1), Some(4));
        assert_eq!(dist.electrons(0), Some(0));
        assert_eq!(dist.electrons(1), Some(-1));
        assert_eq!(dist.electrons(2), Some(0));
    }

    #[test]
    fn water_is_neutral() {
        let dist = formed(&make_water());
        assert_eq!(dist.bond_electrons(0, 1), Some(1));
        assert_eq!(dist.bond_electrons(0, 2), Some(1));
        assert_eq!(dist.atom_entries(), &[0, 0, 0]);
        assert_eq!(dist.total_charge(), 0);
        assert_eq!(dist.to_string(), "elec. dist.\n  molecule neutral\n");
    }

    #[test]
    fn ethanol_is_all_single_bonds() {
        let dist = formed(&make_ethanol());
        assert!(dist.bond_entries().all(|(_, e, _)| e == 1));
        assert!(dist.is_neutral());
    }

    #[test]
    fn acetate_gets_one_double_bond_and_minus_one() {
        let dist = formed(&make_acetate());
        assert_eq!(dist.bond_electrons(1, 2), Some(2));
        assert_eq!(dist.bond_electrons(1, 3), Some(1));
        assert_eq!(dist.electrons(3), Some(1));
        assert_eq!(dist.total_charge(), -1);
        assert_eq!(dist.charged_atoms(), vec![(3, -1)]);
    }

    #[test]
    fn benzene_kekule_structure() {
        let dist = formed(&make_benzene());
        let doubles = dist
            .bond_entries()
            .filter(|(_, e, _)| *e == 2)
            .count();
        assert_eq!(doubles, 3);
        for k in 0..6 {
            assert_eq!(dist.electrons(k), Some(0));
            let around: i32 = [(k + 5) % 6, (k + 1) % 6]
                .iter()
                .map(|&n| dist.bond_electrons(k, n).unwrap())
                .sum();
            assert_eq!(around, 3);
        }
        assert!(dist.is_neutral());
    }

    #[test]
    fn ammonium_nitrogen_donates_lone_pair_to_hydrogen() {
        let dist = formed(&make_ammonium());
        for h in 1..=4 {
            assert_eq!(dist.bond_electrons(0, h), Some(1));
        }
        assert_eq!(dist.electrons(0), Some(-1));
        assert_eq!(dist.total_charge(), 1);
    }

    #[test]
    fn zinc_water_coordination_holds_no_electrons() {
        let dist = formed(&make_zinc_aqua());
        assert_eq!(dist.bond_kind(0, 1), Some(BondKind::Coordination));
        assert_eq!(dist.bond_electrons(0, 1), Some(0));
        assert_eq!(dist.bond_electrons(1, 2), Some(1));
        assert_eq!(dist.bond_electrons(1, 3), Some(1));
        assert_eq!(dist.electrons(0), Some(-2));
        assert_eq!(dist.electrons(1), Some(0));
        assert_eq!(dist.total_charge(), 2);
    }

    #[test]
    fn hydrogens_on_coordinated_atoms_wait_for_later_passes() {
        let mut dist = prepared(&make_zinc_aqua());
        dist.run_pass(BondPass::MetalCoordination).unwrap();
        assert_eq!(dist.run_pass(BondPass::Single).unwrap(), 0);
        assert_eq!(dist.bond_electrons(1, 2), Some(0));
    }

    #[test]
    fn bonded_metals_are_rejected() {
        let system = system(
            vec![
                atom(Element::Zn, "ZN1", "ZN", 1, [0.0; 3]),
                atom(Element::Zn, "ZN2", "ZN", 2, [2.5, 0.0, 0.0]),
            ],
            &[(0, 1)],
        );
        let mut dist = prepared(&system);
        assert!(matches!(
            dist.form_bonds(),
            Err(Error::InvalidMetalBond { i: 0, j: 1, .. })
        ));
    }

    #[test]
    fn rerunning_all_passes_is_a_fixed_point() {
        for system in [
            make_water(),
            make_carbon_oxygen_hydrogen(),
            make_acetate(),
            make_benzene(),
            make_pyridine(),
            make_imidazolium(),
            make_pyrrolide(),
            make_indole(),
            make_ammonium(),
            make_zinc_aqua(),
        ] {
            let mut dist = formed(&system);
            let atoms = dist.atom_entries().to_vec();
            let bonds: Vec<_> = dist.bond_entries().collect();
            for pass in BondPass::ALL {
                assert_eq!(dist.run_pass(pass).unwrap(), 0, "{pass:?}");
            }
            assert_eq!(dist.atom_entries(), atoms.as_slice());
            assert_eq!(dist.bond_entries().collect::<Vec<_>>(), bonds);
            for (bond, _, kind) in dist.bond_entries() {
                if kind == BondKind::Covalent {
                    assert!(!dist.bondability(bond.i, bond.j).is_yes());
                }
            }
        }
    }

    #[test]
    fn total_charge_is_invariant_under_relabeling() {
        for (original, expected) in [
            (make_acetate(), -1),
            (make_benzene(), 0),
            (make_pyridine(), 0),
            (make_imidazole(), 0),
            (make_imidazolium(), 1),
            (make_indole(), 0),
        ] {
            let n = original.atom_count();
            assert_eq!(formed(&original).total_charge(), expected);

            let mut perms: Vec<Vec<usize>> = vec![(0..n).rev().collect()];
            perms.extend((1..n).map(|k| (0..n).map(|i| (i + k) % n).collect()));
            for perm in perms {
                let dist = formed(&relabeled(&original, &perm));
                assert_eq!(dist.total_charge(), expected, "{perm:?}");
            }
        }
    }

    #[test]
    fn pyridine_pairs_every_ring_atom_when_nitrogen_is_visited_late() {
        // rotating by 7 puts N after four of the carbons
        let n = make_pyridine().atom_count();
        let perm: Vec<usize> = (0..n).map(|i| (i + 7) % n).collect();
        let dist = formed(&relabeled(&make_pyridine(), &perm));

        let ring: Vec<usize> = (0..6).map(|k| perm[k]).collect();
        let doubles = dist.bond_entries().filter(|(_, e, _)| *e == 2).count();
        assert_eq!(doubles, 3);
        for &atom in &ring {
            assert_eq!(dist.electrons(atom), Some(0));
        }
        assert!(dist.is_neutral());
    }

    #[test]
    fn shifting_ring_double_bonds_pairs_two_leftover_atoms() {
        let mut dist = prepared(&make_benzene());
        dist.run_pass(BondPass::MetalCoordination).unwrap();
        dist.run_pass(BondPass::Single).unwrap();

        // C2=C3 and C5=C6 leave C1 and C4 unpaired across the ring
        for bond in [Bond::new(1, 2), Bond::new(4, 5)] {
            dist.add_electron_to_bond(bond);
        }
        let adjacency: Vec<Vec<usize>> = (0..12)
            .map(|k| if k < 6 { vec![(k + 5) % 6, (k + 1) % 6] } else { Vec::new() })
            .collect();
        assert_eq!(dist.pair_ring_leftovers(&adjacency), 1);

        let doubles: Vec<Bond> = dist
            .bond_entries()
            .filter(|(_, e, _)| *e == 2)
            .map(|(b, _, _)| b)
            .collect();
        assert_eq!(doubles.len(), 3);
        assert!(dist.atom_entries().iter().all(|&e| e == 0));
    }

    #[test]
    fn imidazolium_keeps_one_positive_nitrogen() {
        let dist = formed(&make_imidazolium());
        assert_eq!(dist.bond_electrons(3, 4), Some(2));
        let charged = dist.charged_atoms();
        assert_eq!(charged.len(), 1);
        assert!(charged[0].0 == 0 || charged[0].0 == 2);
        assert_eq!(charged[0].1, 1);
    }

    #[test]
    fn indole_is_neutral_with_four_double_bonds() {
        let dist = formed(&make_indole());
        let doubles = dist.bond_entries().filter(|(_, e, _)| *e == 2).count();
        assert_eq!(doubles, 4);
        assert_eq!(dist.bond_electrons(0, 1), Some(1));
        assert_eq!(dist.bond_electrons(0, 8), Some(1));
        assert!(dist.is_neutral());
    }

    #[test]
    fn ring_carbon_carbon_bonds_are_doubled_before_carbon_nitrogen() {
        let dist = formed(&make_pyrrolide());
        assert_eq!(dist.bond_electrons(1, 2), Some(2));
        assert_eq!(dist.bond_electrons(3, 4), Some(2));
        assert_eq!(dist.bond_electrons(0, 1), Some(1));
        assert_eq!(dist.bond_electrons(0, 4), Some(1));
        assert_eq!(dist.electrons(0), Some(1));
        assert_eq!(dist.total_charge(), -1);
    }

    fn ethane_across_residues(second_resid: i32) -> System {
        let mut atoms = vec![atom(Element::C, "C1", "LIG", 1, [0.0; 3])];
        for k in 1..=4 {
            atoms.push(atom(Element::H, &format!("H1{k}"), "LIG", 1, [-0.4, 0.0, 0.0]));
        }
        atoms.push(atom(Element::C, "C2", "LIG", second_resid, [1.54, 0.0, 0.0]));
        for k in 1..=3 {
            let name = format!("H2{k}");
            atoms.push(atom(Element::H, &name, "LIG", second_resid, [1.9, 0.0, 0.0]));
        }
        system(
            atoms,
            &[(0, 1), (0, 2), (0, 3), (0, 4), (0, 5), (5, 6), (5, 7), (5, 8)],
        )
    }

    #[test]
    fn single_pass_serves_cross_residue_bonds_first() {
        // C1 carries one hydrogen too many, the inter-residue bond still gets its electron
        let mut dist = prepared(&ethane_across_residues(2));
        dist.run_pass(BondPass::MetalCoordination).unwrap();
        dist.run_pass(BondPass::Single).unwrap();
        assert_eq!(dist.bond_electrons(0, 5), Some(1));
        assert_eq!(dist.bond_electrons(0, 4), Some(0));

        let mut dist = prepared(&ethane_across_residues(1));
        dist.run_pass(BondPass::MetalCoordination).unwrap();
        dist.run_pass(BondPass::Single).unwrap();
        assert_eq!(dist.bond_electrons(0, 5), Some(0));
        assert_eq!(dist.bond_electrons(0, 4), Some(1));
    }

    #[test]
    fn lone_pair_sweep_visits_ties_in_reverse_order() {
        // H-C1-C2-C3-H: both C-C bonds tie, the later one is filled first
        let system = system(
            vec![
                atom(Element::C, "C1", "LIG", 1, [0.0, 0.0, 0.0]),
                atom(Element::C, "C2", "LIG", 1, [1.3, 0.0, 0.0]),
                atom(Element::C, "C3", "LIG", 1, [2.5, 0.0, 0.0]),
                atom(Element::H, "H1", "LIG", 1, [-1.0, 0.0, 0.0]),
                atom(Element::H, "H3", "LIG", 1, [3.5, 0.0, 0.0]),
            ],
            &[(0, 1), (1, 2), (0, 3), (2, 4)],
        );
        let dist = formed(&system);
        assert_eq!(dist.bond_electrons(1, 2), Some(3));
        assert_eq!(dist.bond_electrons(0, 1), Some(1));
        assert_eq!(dist.electrons(0), Some(2));
        assert_eq!(dist.electrons(2), Some(0));
    }

    #[test]
    fn bondability_decision_table() {
        let mut dist = prepared(&make_carbon_oxygen_hydrogen());
        dist.atom_electrons = vec![1, 1, 1];
        assert_eq!(dist.bondability(0, 1), Bondability::Yes);

        dist.atom_electrons = vec![0, 0, 0];
        assert_eq!(dist.bondability(0, 1), Bondability::No);

        // hydrogen with nothing left never bonds further
        dist.atom_electrons = vec![0, 2, 0];
        assert_eq!(dist.bondability(1, 2), Bondability::No);

        // oxygen (heavier, lone pairs) donates to carbon only if carbon still needs electrons
        dist.atom_electrons = vec![2, 0, 0];
        assert_eq!(dist.bondability(0, 1), Bondability::Yes);
        dist.atom_electrons = vec![-1, 1, 0];
        assert_eq!(dist.bondability(0, 1), Bondability::No);

        // hydrogen next to a lone-pair atom
        dist.atom_electrons = vec![0, 0, 1];
        assert_eq!(dist.bondability(1, 2), Bondability::Yes);
    }

    #[test]
    fn hydrogen_on_carbon_is_indeterminate() {
        let system = system(
            vec![
                atom(Element::C, "C", "LIG", 1, [0.0; 3]),
                atom(Element::H, "H", "LIG", 1, [1.0, 0.0, 0.0]),
            ],
            &[(0, 1)],
        );
        let mut dist = prepared(&system);
        dist.atom_electrons = vec![0, 1];
        assert_eq!(dist.bondability(0, 1), Bondability::Indeterminate);
        assert!(!dist.bondability(0, 1).is_yes());
    }

    #[test]
    fn saturated_atoms_refuse_more_electrons() {
        let mut dist = prepared(&make_carbon_oxygen_hydrogen());
        dist.bond_electrons.insert(Bond::new(0, 1), 4);
        dist.atom_electrons = vec![0, 1, 0];
        assert_eq!(dist.bondability(0, 1), Bondability::No);
    }
}

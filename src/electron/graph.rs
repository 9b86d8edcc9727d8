//! Undirected bond graph over the atoms of a system.
//!
//! Bonds are canonicalized (`i <= j`) and de-duplicated on construction while
//! keeping their first-seen order, which every bond-formation pass iterates in.

use super::error::Error;
use crate::model::system::{Bond, System};
use std::collections::{HashSet, VecDeque};

/// Largest ring searched for by [`BondGraph::cycle_containing`].
pub const MAX_RING_SIZE: usize = 16;

/// Adjacency view of a system's covalent connectivity.
#[derive(Debug, Clone)]
pub struct BondGraph {
    bonds: Vec<Bond>,
    neighbors: Vec<Vec<usize>>,
}

impl BondGraph {
    /// Builds the graph, rejecting self-bonds and out-of-range indices.
    pub fn from_system(system: &System) -> Result<Self, Error> {
        Self::from_pairs(
            system.atom_count(),
            system.bonds.iter().map(|b| (b.i, b.j)),
        )
    }

    /// Builds the graph from raw pairs in either orientation.
    pub fn from_pairs(
        atom_count: usize,
        pairs: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, Error> {
        let mut seen = HashSet::new();
        let mut bonds = Vec::new();
        let mut neighbors = vec![Vec::new(); atom_count];

        for (a, b) in pairs {
            if a >= atom_count || b >= atom_count {
                return Err(Error::invalid_bond(
                    a,
                    b,
                    format!("atom index out of range (atom count: {atom_count})"),
                ));
            }
            if a == b {
                return Err(Error::invalid_bond(a, b, "self-bond is not allowed"));
            }
            let bond = Bond::new(a, b);
            if seen.insert(bond) {
                bonds.push(bond);
                neighbors[bond.i].push(bond.j);
                neighbors[bond.j].push(bond.i);
            }
        }

        Ok(Self { bonds, neighbors })
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Unique bonds in first-seen order.
    #[inline]
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Bonded neighbors of `atom` in insertion order.
    #[inline]
    pub fn neighbors(&self, atom: usize) -> &[usize] {
        &self.neighbors[atom]
    }

    #[inline]
    pub fn degree(&self, atom: usize) -> usize {
        self.neighbors[atom].len()
    }

    /// The only neighbor of `atom` over edges accepted by `edge_ok`, if
    /// there is exactly one.
    pub fn leaf_partner(
        &self,
        atom: usize,
        mut edge_ok: impl FnMut(usize, usize) -> bool,
    ) -> Option<usize> {
        let mut accepted = self.neighbors[atom]
            .iter()
            .copied()
            .filter(|&nb| edge_ok(atom, nb));
        match (accepted.next(), accepted.next()) {
            (Some(nb), None) => Some(nb),
            _ => None,
        }
    }

    /// Finds the smallest ring through `start`, walking only edges accepted by `edge_ok`.
    ///
    /// Returns the ring's atoms in traversal order beginning with `start`, or
    /// `None` when no ring of at most [`MAX_RING_SIZE`] atoms exists. Among
    /// rings of equal size the one reached first in neighbor order wins.
    pub fn cycle_containing(
        &self,
        start: usize,
        mut edge_ok: impl FnMut(usize, usize) -> bool,
    ) -> Option<Vec<usize>> {
        let n = self.atom_count();
        let mut parent = vec![usize::MAX; n];
        let mut branch = vec![usize::MAX; n];
        let mut depth = vec![0usize; n];
        let mut queue = VecDeque::new();

        for &nb in &self.neighbors[start] {
            if edge_ok(start, nb) {
                parent[nb] = start;
                branch[nb] = nb;
                depth[nb] = 1;
                queue.push_back(nb);
            }
        }

        let max_depth = MAX_RING_SIZE / 2;
        let mut best: Option<(usize, usize, usize)> = None;

        while let Some(u) = queue.pop_front() {
            if let Some((len, _, _)) = best
                && 2 * depth[u] + 1 > len
            {
                break;
            }
            for &v in &self.neighbors[u] {
                if v == start || v == parent[u] || !edge_ok(u, v) {
                    continue;
                }
                if branch[v] == usize::MAX {
                    if depth[u] < max_depth {
                        parent[v] = u;
                        branch[v] = branch[u];
                        depth[v] = depth[u] + 1;
                        queue.push_back(v);
                    }
                } else if branch[v] != branch[u] {
                    let len = depth[u] + depth[v] + 1;
                    if len <= MAX_RING_SIZE && best.is_none_or(|(l, _, _)| len < l) {
                        best = Some((len, u, v));
                    }
                }
            }
        }

        let (_, u, v) = best?;
        let mut ring = vec![start];
        let mut left = Vec::new();
        let mut cur = u;
        while cur != start {
            left.push(cur);
            cur = parent[cur];
        }
        ring.extend(left.into_iter().rev());
        let mut cur = v;
        while cur != start {
            ring.push(cur);
            cur = parent[cur];
        }
        Some(ring)
    }
}

/// Bonds around a ring given as an ordered list of atoms.
pub fn ring_bonds(ring: &[usize]) -> Vec<Bond> {
    ring.iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(&a, &b)| Bond::new(a, b))
        .collect()
}

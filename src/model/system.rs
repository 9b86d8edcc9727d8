use super::atom::Atom;
use super::metadata::ResidueKey;
use super::selection::AtomSelector;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Covalent connection between two atoms, stored with `i <= j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
}

impl Bond {
    pub fn new(idx1: usize, idx2: usize) -> Self {
        if idx1 <= idx2 {
            Self { i: idx1, j: idx2 }
        } else {
            Self { i: idx2, j: idx1 }
        }
    }

    #[inline]
    pub fn contains(&self, idx: usize) -> bool {
        self.i == idx || self.j == idx
    }

    /// The endpoint opposite `idx`, if `idx` is an endpoint.
    pub fn partner(&self, idx: usize) -> Option<usize> {
        if self.i == idx {
            Some(self.j)
        } else if self.j == idx {
            Some(self.i)
        } else {
            None
        }
    }
}

/// Atoms plus their covalent connectivity.
#[derive(Debug, Clone, Default)]
pub struct System {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
}

impl System {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Distinct non-blank alternate location identifiers, sorted.
    pub fn alt_locs(&self) -> Vec<char> {
        self.atoms
            .iter()
            .filter(|a| a.info.has_alt_loc())
            .map(|a| a.info.alt_loc)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Atom indices grouped by residue, ordered by chain and sequence number.
    pub fn residues(&self) -> BTreeMap<ResidueKey, Vec<usize>> {
        let mut groups: BTreeMap<ResidueKey, Vec<usize>> = BTreeMap::new();
        for (idx, atom) in self.atoms.iter().enumerate() {
            groups.entry(atom.info.residue_key()).or_default().push(idx);
        }
        groups
    }

    /// Keeps the atoms matching `selector` and the bonds among them.
    ///
    /// Atoms are renumbered in their original order.
    pub fn select(&self, selector: &AtomSelector) -> System {
        self.retain(|atom| selector.matches(atom))
    }

    /// Keeps atoms without an alternate location or with `alt_loc`.
    pub fn conformer(&self, alt_loc: char) -> System {
        self.retain(|atom| !atom.info.has_alt_loc() || atom.info.alt_loc == alt_loc)
    }

    fn retain(&self, keep: impl Fn(&Atom) -> bool) -> System {
        let mut remap = HashMap::new();
        let mut atoms = Vec::new();
        for (old, atom) in self.atoms.iter().enumerate() {
            if keep(atom) {
                remap.insert(old, atoms.len());
                atoms.push(atom.clone());
            }
        }
        let bonds = self
            .bonds
            .iter()
            .filter_map(|b| Some(Bond::new(*remap.get(&b.i)?, *remap.get(&b.j)?)))
            .collect();
        System { atoms, bonds }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::metadata::AtomResidueInfo;
    use crate::model::types::Element;

    fn atom(name: &str, resid: i32, alt_loc: Option<char>) -> Atom {
        Atom::new(Element::C, [0.0; 3]).with_info(
            AtomResidueInfo::builder(name, "SER", resid, 'A')
                .alt_loc(alt_loc)
                .build(),
        )
    }

    #[test]
    fn bond_is_canonical() {
        let b = Bond::new(5, 2);
        assert_eq!((b.i, b.j), (2, 5));
        assert_eq!(b, Bond::new(2, 5));
        assert_eq!(b.partner(2), Some(5));
        assert_eq!(b.partner(3), None);
        assert!(b.contains(5));
    }

    #[test]
    fn conformer_keeps_blank_and_matching_alt_locs() {
        let system = System {
            atoms: vec![
                atom("CA", 1, None),
                atom("CB", 1, Some('A')),
                atom("CB", 1, Some('B')),
                atom("OG", 1, Some('B')),
            ],
            bonds: vec![Bond::new(0, 1), Bond::new(0, 2), Bond::new(2, 3)],
        };
        assert_eq!(system.alt_locs(), vec!['A', 'B']);

        let b = system.conformer('B');
        assert_eq!(b.atom_count(), 3);
        assert_eq!(b.bonds, vec![Bond::new(0, 1), Bond::new(1, 2)]);
        assert!(b.alt_locs() == vec!['B']);
    }

    #[test]
    fn residues_group_atoms() {
        let system = System {
            atoms: vec![atom("N", 2, None), atom("N", 1, None), atom("CA", 2, None)],
            bonds: Vec::new(),
        };
        let groups = system.residues();
        let members: Vec<_> = groups.values().cloned().collect();
        assert_eq!(members, vec![vec![1], vec![0, 2]]);
    }

    #[test]
    fn select_renumbers_bonds() {
        let system = System {
            atoms: vec![atom("N", 1, None), atom("CA", 2, None), atom("C", 2, None)],
            bonds: vec![Bond::new(0, 1), Bond::new(1, 2)],
        };
        let sel: AtomSelector = "resid=2".parse().unwrap();
        let sub = system.select(&sel);
        assert_eq!(sub.atom_count(), 2);
        assert_eq!(sub.bonds, vec![Bond::new(0, 1)]);
    }
}

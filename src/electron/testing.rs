//! Small hand-built molecules shared by the unit tests.

use crate::model::atom::Atom;
use crate::model::metadata::AtomResidueInfo;
use crate::model::system::{Bond, System};
use crate::model::types::Element;

pub fn atom(element: Element, name: &str, resname: &str, resid: i32, pos: [f64; 3]) -> Atom {
    Atom::new(element, pos).with_info(AtomResidueInfo::builder(name, resname, resid, 'A').build())
}

pub fn system(atoms: Vec<Atom>, bonds: &[(usize, usize)]) -> System {
    System {
        atoms,
        bonds: bonds.iter().map(|&(i, j)| Bond::new(i, j)).collect(),
    }
}

pub fn single_atom(element: Element, name: &str, resname: &str) -> System {
    system(vec![atom(element, name, resname, 1, [0.0; 3])], &[])
}

pub fn make_water() -> System {
    system(
        vec![
            atom(Element::O, "O", "HOH", 1, [0.0, 0.0, 0.0]),
            atom(Element::H, "H1", "HOH", 1, [0.757, 0.586, 0.0]),
            atom(Element::H, "H2", "HOH", 1, [-0.757, 0.586, 0.0]),
        ],
        &[(0, 1), (0, 2)],
    )
}

/// C, O, H chain with no hydrogens on carbon.
pub fn make_carbon_oxygen_hydrogen() -> System {
    system(
        vec![
            atom(Element::C, "C1", "LIG", 1, [0.0, 0.0, 0.0]),
            atom(Element::O, "O1", "LIG", 1, [1.43, 0.0, 0.0]),
            atom(Element::H, "HO1", "LIG", 1, [1.75, 0.9, 0.0]),
        ],
        &[(0, 1), (1, 2)],
    )
}

pub fn make_ethanol() -> System {
    system(
        vec![
            atom(Element::C, "C1", "EOH", 1, [-1.270, 0.248, 0.000]),
            atom(Element::C, "C2", "EOH", 1, [0.139, -0.308, 0.000]),
            atom(Element::O, "O", "EOH", 1, [1.036, 0.789, 0.000]),
            atom(Element::H, "H11", "EOH", 1, [-1.317, 0.885, 0.883]),
            atom(Element::H, "H12", "EOH", 1, [-1.317, 0.885, -0.883]),
            atom(Element::H, "H13", "EOH", 1, [-2.030, -0.533, 0.000]),
            atom(Element::H, "H21", "EOH", 1, [0.358, -0.920, 0.876]),
            atom(Element::H, "H22", "EOH", 1, [0.358, -0.920, -0.876]),
            atom(Element::H, "HO", "EOH", 1, [1.939, 0.473, 0.000]),
        ],
        &[
            (0, 1),
            (1, 2),
            (0, 3),
            (0, 4),
            (0, 5),
            (1, 6),
            (1, 7),
            (2, 8),
        ],
    )
}

/// Acetate anion, CH3-COO⁻.
pub fn make_acetate() -> System {
    system(
        vec![
            atom(Element::C, "C1", "ACT", 1, [0.0, 0.0, 0.0]),
            atom(Element::C, "C2", "ACT", 1, [1.52, 0.0, 0.0]),
            atom(Element::O, "O1", "ACT", 1, [2.15, 1.08, 0.0]),
            atom(Element::O, "O2", "ACT", 1, [2.15, -1.08, 0.0]),
            atom(Element::H, "H1", "ACT", 1, [-0.36, 1.03, 0.0]),
            atom(Element::H, "H2", "ACT", 1, [-0.36, -0.51, 0.89]),
            atom(Element::H, "H3", "ACT", 1, [-0.36, -0.51, -0.89]),
        ],
        &[(0, 1), (1, 2), (1, 3), (0, 4), (0, 5), (0, 6)],
    )
}

pub fn make_benzene() -> System {
    let mut atoms = Vec::new();
    for k in 0..6 {
        let angle = std::f64::consts::PI / 3.0 * k as f64;
        atoms.push(atom(
            Element::C,
            &format!("C{}", k + 1),
            "BNZ",
            1,
            [1.39 * angle.cos(), 1.39 * angle.sin(), 0.0],
        ));
    }
    for k in 0..6 {
        let angle = std::f64::consts::PI / 3.0 * k as f64;
        atoms.push(atom(
            Element::H,
            &format!("H{}", k + 1),
            "BNZ",
            1,
            [2.47 * angle.cos(), 2.47 * angle.sin(), 0.0],
        ));
    }
    let mut bonds: Vec<(usize, usize)> = (0..6).map(|k| (k, (k + 1) % 6)).collect();
    bonds.extend((0..6).map(|k| (k, k + 6)));
    system(atoms, &bonds)
}

/// Ammonium cation, NH4⁺.
pub fn make_ammonium() -> System {
    system(
        vec![
            atom(Element::N, "N", "NH4", 1, [0.0, 0.0, 0.0]),
            atom(Element::H, "H1", "NH4", 1, [0.59, 0.59, 0.59]),
            atom(Element::H, "H2", "NH4", 1, [-0.59, -0.59, 0.59]),
            atom(Element::H, "H3", "NH4", 1, [-0.59, 0.59, -0.59]),
            atom(Element::H, "H4", "NH4", 1, [0.59, -0.59, -0.59]),
        ],
        &[(0, 1), (0, 2), (0, 3), (0, 4)],
    )
}

/// Zinc coordinated by one water.
pub fn make_zinc_aqua() -> System {
    system(
        vec![
            atom(Element::Zn, "ZN", "ZN", 1, [0.0, 0.0, 0.0]),
            atom(Element::O, "O", "HOH", 2, [2.05, 0.0, 0.0]),
            atom(Element::H, "H1", "HOH", 2, [2.45, 0.8, 0.0]),
            atom(Element::H, "H2", "HOH", 2, [2.45, -0.8, 0.0]),
        ],
        &[(0, 1), (1, 2), (1, 3)],
    )
}

/// Builds a planar ring of heavy atoms with one hydrogen on each atom listed
/// in `hydrogens`, ring bonds first.
fn ring_with_hydrogens(
    resname: &str,
    ring: &[(Element, &str)],
    hydrogens: &[usize],
) -> System {
    let n = ring.len();
    let mut atoms = Vec::new();
    for (k, (element, name)) in ring.iter().enumerate() {
        let angle = 2.0 * std::f64::consts::PI / n as f64 * k as f64;
        let pos = [1.39 * angle.cos(), 1.39 * angle.sin(), 0.0];
        atoms.push(atom(*element, name, resname, 1, pos));
    }
    let mut bonds: Vec<(usize, usize)> = (0..n).map(|k| (k, (k + 1) % n)).collect();
    for &k in hydrogens {
        let angle = 2.0 * std::f64::consts::PI / n as f64 * k as f64;
        let name = format!("H{}", ring[k].1);
        bonds.push((k, atoms.len()));
        let pos = [2.47 * angle.cos(), 2.47 * angle.sin(), 0.0];
        atoms.push(atom(Element::H, &name, resname, 1, pos));
    }
    system(atoms, &bonds)
}

pub fn make_pyridine() -> System {
    ring_with_hydrogens(
        "PYR",
        &[
            (Element::N, "N1"),
            (Element::C, "C2"),
            (Element::C, "C3"),
            (Element::C, "C4"),
            (Element::C, "C5"),
            (Element::C, "C6"),
        ],
        &[1, 2, 3, 4, 5],
    )
}

/// Neutral imidazole, protonated on N1 only.
pub fn make_imidazole() -> System {
    ring_with_hydrogens(
        "IMD",
        &[
            (Element::N, "N1"),
            (Element::C, "C2"),
            (Element::N, "N3"),
            (Element::C, "C4"),
            (Element::C, "C5"),
        ],
        &[0, 1, 3, 4],
    )
}

/// Imidazolium cation, protonated on both nitrogens.
pub fn make_imidazolium() -> System {
    ring_with_hydrogens(
        "IMD",
        &[
            (Element::N, "N1"),
            (Element::C, "C2"),
            (Element::N, "N3"),
            (Element::C, "C4"),
            (Element::C, "C5"),
        ],
        &[0, 1, 2, 3, 4],
    )
}

/// Pyrrolide anion, the ring nitrogen carries no hydrogen.
pub fn make_pyrrolide() -> System {
    ring_with_hydrogens(
        "PRL",
        &[
            (Element::N, "N1"),
            (Element::C, "C2"),
            (Element::C, "C3"),
            (Element::C, "C4"),
            (Element::C, "C5"),
        ],
        &[1, 2, 3, 4],
    )
}

/// Indole, a pyrrole ring fused to benzene at C3a-C7a.
pub fn make_indole() -> System {
    system(
        vec![
            atom(Element::N, "N1", "IND", 1, [-1.12, -0.70, 0.0]),
            atom(Element::C, "C2", "IND", 1, [-2.08, 0.26, 0.0]),
            atom(Element::C, "C3", "IND", 1, [-1.50, 1.49, 0.0]),
            atom(Element::C, "C3A", "IND", 1, [-0.10, 1.24, 0.0]),
            atom(Element::C, "C4", "IND", 1, [0.94, 2.17, 0.0]),
            atom(Element::C, "C5", "IND", 1, [2.25, 1.72, 0.0]),
            atom(Element::C, "C6", "IND", 1, [2.52, 0.34, 0.0]),
            atom(Element::C, "C7", "IND", 1, [1.50, -0.60, 0.0]),
            atom(Element::C, "C7A", "IND", 1, [0.18, -0.12, 0.0]),
            atom(Element::H, "H1", "IND", 1, [-1.32, -1.69, 0.0]),
            atom(Element::H, "H2", "IND", 1, [-3.14, 0.02, 0.0]),
            atom(Element::H, "H3", "IND", 1, [-2.02, 2.44, 0.0]),
            atom(Element::H, "H4", "IND", 1, [0.73, 3.24, 0.0]),
            atom(Element::H, "H5", "IND", 1, [3.08, 2.43, 0.0]),
            atom(Element::H, "H6", "IND", 1, [3.56, 0.02, 0.0]),
            atom(Element::H, "H7", "IND", 1, [1.71, -1.67, 0.0]),
        ],
        &[
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 8),
            (8, 0),
            (3, 4),
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 8),
            (0, 9),
            (1, 10),
            (2, 11),
            (4, 12),
            (5, 13),
            (6, 14),
            (7, 15),
        ],
    )
}

/// Renumbers atoms so that atom `k` becomes atom `perm[k]`.
pub fn relabeled(original: &System, perm: &[usize]) -> System {
    let mut atoms = vec![original.atoms[0].clone(); original.atom_count()];
    for (old, &new) in perm.iter().enumerate() {
        atoms[new] = original.atoms[old].clone();
    }
    let bonds: Vec<(usize, usize)> = original
        .bonds
        .iter()
        .map(|b| (perm[b.i], perm[b.j]))
        .collect();
    system(atoms, &bonds)
}

use super::{Format, Template, error::Error};
use crate::model::{
    atom::Atom,
    metadata::AtomResidueInfo,
    system::{Bond, System},
    types::Element,
};
use bio_forge as bf;
use std::collections::HashMap;
use std::io::BufRead;

/// A parsed TRIPOS MOL2 record set.
#[derive(Debug)]
struct Mol2 {
    name: String,
    atoms: Vec<Atom>,
    bonds: Vec<(Bond, String)>,
}

pub fn read<R: BufRead>(reader: R) -> Result<System, Error> {
    let mol = parse(reader)?;
    Ok(System {
        atoms: mol.atoms,
        bonds: mol.bonds.into_iter().map(|(bond, _)| bond).collect(),
    })
}

/// Reads a MOL2 file as a connectivity template for a non-standard residue.
///
/// The template takes the molecule name and keeps bond orders, so it can be
/// passed to [`TopologyConfig::hetero_templates`](super::TopologyConfig).
pub fn read_mol2_template<R: BufRead>(reader: R) -> Result<Template, Error> {
    let mol = parse(reader)?;
    let names: Vec<String> = mol.atoms.iter().map(|a| a.info.atom_name.clone()).collect();

    let bonds = mol
        .bonds
        .iter()
        .map(|(bond, kind)| {
            let order = template_bond_order(kind).ok_or_else(|| {
                Error::parse(
                    Format::Mol2,
                    0,
                    format!("bond type '{kind}' cannot be used in a template"),
                )
            })?;
            Ok((names[bond.i].clone(), names[bond.j].clone(), order))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(Template::new(&mol.name, names, bonds))
}

fn template_bond_order(kind: &str) -> Option<bf::BondOrder> {
    match kind.to_ascii_lowercase().as_str() {
        "1" | "am" => Some(bf::BondOrder::Single),
        "2" => Some(bf::BondOrder::Double),
        "3" => Some(bf::BondOrder::Triple),
        "ar" => Some(bf::BondOrder::Aromatic),
        _ => None,
    }
}

fn is_known_bond_type(kind: &str) -> bool {
    matches!(
        kind.to_ascii_lowercase().as_str(),
        "1" | "2" | "3" | "am" | "ar" | "du" | "un" | "nc"
    )
}

fn parse<R: BufRead>(reader: R) -> Result<Mol2, Error> {
    let lines = collect_lines(reader)?;

    let mol_idx = find_section(&lines, "@<TRIPOS>MOLECULE")
        .ok_or_else(|| Error::parse(Format::Mol2, 1, "missing @<TRIPOS>MOLECULE section"))?;

    let mut cursor = mol_idx + 1;
    let name = next_data_line(&lines, &mut cursor)
        .map(|(_, line)| line.trim().to_string())
        .unwrap_or_else(|| String::from("MOL"));

    let (count_line_no, count_line) = next_data_line(&lines, &mut cursor)
        .ok_or_else(|| Error::parse(Format::Mol2, cursor + 1, "missing counts line"))?;
    let (atom_count, bond_count) = parse_counts(&count_line, count_line_no)?;

    let atom_section = find_section(&lines, "@<TRIPOS>ATOM")
        .ok_or_else(|| Error::parse(Format::Mol2, cursor + 1, "missing @<TRIPOS>ATOM section"))?;
    let bond_section = find_section(&lines, "@<TRIPOS>BOND");

    let atom_end = bond_section.unwrap_or(lines.len());
    let (atoms, id_map) = parse_atoms(&lines, atom_section + 1, atom_end, atom_count, &name)?;
    let bonds = match bond_section {
        Some(start) => parse_bonds(&lines, start + 1, bond_count, &id_map)?,
        None if bond_count == 0 => Vec::new(),
        None => {
            return Err(Error::parse(
                Format::Mol2,
                lines.last().map(|(ln, _)| *ln).unwrap_or(0),
                "missing @<TRIPOS>BOND section",
            ));
        }
    };

    Ok(Mol2 { name, atoms, bonds })
}

fn collect_lines<R: BufRead>(reader: R) -> Result<Vec<(usize, String)>, Error> {
    reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|v| (i + 1, v)).map_err(Error::from))
        .collect()
}

fn find_section(lines: &[(usize, String)], name: &str) -> Option<usize> {
    lines
        .iter()
        .position(|(_, line)| line.trim().eq_ignore_ascii_case(name))
}

fn next_data_line(lines: &[(usize, String)], cursor: &mut usize) -> Option<(usize, String)> {
    while *cursor < lines.len() {
        let (ln, content) = &lines[*cursor];
        *cursor += 1;
        let trimmed = content.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        return Some((*ln, content.clone()));
    }
    None
}

fn parse_counts(line: &str, line_no: usize) -> Result<(usize, usize), Error> {
    let parts: Vec<_> = line.split_whitespace().collect();
    let atoms = parts
        .first()
        .and_then(|v| v.parse::<usize>().ok())
        .ok_or_else(|| Error::parse(Format::Mol2, line_no, "invalid atom count in counts line"))?;
    let bonds = match parts.get(1) {
        Some(v) => v.parse::<usize>().map_err(|_| {
            Error::parse(Format::Mol2, line_no, "invalid bond count in counts line")
        })?,
        None => 0,
    };
    Ok((atoms, bonds))
}

/// Element from a SYBYL type such as `C.ar` or `Zn`, falling back to the atom name.
fn guess_element(sybyl_type: &str, atom_name: &str) -> Option<Element> {
    let head = sybyl_type.split('.').next().unwrap_or(sybyl_type);
    Element::parse_symbol(head).ok().or_else(|| {
        let letters: String = atom_name
            .chars()
            .skip_while(|c| c.is_ascii_digit())
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();
        letters
            .get(..1)
            .and_then(|first| Element::parse_symbol(first).ok())
    })
}

/// Splits a substructure name like `LYS12` into its residue name.
fn residue_name(subst_name: &str) -> &str {
    let stripped = subst_name.trim_end_matches(|c: char| c.is_ascii_digit());
    if stripped.is_empty() {
        subst_name
    } else {
        stripped
    }
}

fn parse_atoms(
    lines: &[(usize, String)],
    start: usize,
    end: usize,
    expected: usize,
    molecule: &str,
) -> Result<(Vec<Atom>, HashMap<usize, usize>), Error> {
    let mut atoms = Vec::with_capacity(expected);
    let mut id_map = HashMap::new();

    let mut cursor = start;
    while atoms.len() < expected {
        let Some((ln, raw)) = next_data_line(&lines[..end], &mut cursor) else {
            return Err(Error::parse(
                Format::Mol2,
                lines.last().map(|(ln, _)| *ln).unwrap_or(0),
                "ATOM section ended before expected atom count",
            ));
        };
        let parts: Vec<_> = raw.split_whitespace().collect();
        if parts.len() < 6 {
            return Err(Error::parse(Format::Mol2, ln, "invalid ATOM line"));
        }

        let atom_id = parts[0]
            .parse::<usize>()
            .map_err(|_| Error::parse(Format::Mol2, ln, "invalid atom id in ATOM line"))?;
        let mut position = [0.0; 3];
        for (axis, value) in position.iter_mut().enumerate() {
            *value = parts[2 + axis].parse::<f64>().map_err(|_| {
                Error::parse(Format::Mol2, ln, "invalid coordinate in ATOM line")
            })?;
        }

        let element = guess_element(parts[5], parts[1])
            .ok_or_else(|| Error::parse(Format::Mol2, ln, "unable to infer element"))?;

        let subst_id = parts
            .get(6)
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(1);
        let resname = parts.get(7).map_or(molecule, |v| residue_name(v));
        let info = AtomResidueInfo::builder(parts[1], resname, subst_id, 'A').build();

        let mut atom = Atom::new(element, position).with_info(info);
        if let Some(charge) = parts.get(8).and_then(|v| v.parse::<f64>().ok())
            && charge.fract() == 0.0
            && charge != 0.0
        {
            atom = atom.with_formal_charge(charge as i32);
        }

        if id_map.insert(atom_id, atoms.len()).is_some() {
            return Err(Error::parse(Format::Mol2, ln, "duplicate atom id"));
        }
        atoms.push(atom);
    }

    Ok((atoms, id_map))
}

fn parse_bonds(
    lines: &[(usize, String)],
    start: usize,
    expected: usize,
    id_map: &HashMap<usize, usize>,
) -> Result<Vec<(Bond, String)>, Error> {
    let mut bonds = Vec::with_capacity(expected);

    let mut cursor = start;
    while bonds.len() < expected {
        let Some((ln, raw)) = next_data_line(lines, &mut cursor) else {
            return Err(Error::parse(
                Format::Mol2,
                lines.last().map(|(ln, _)| *ln).unwrap_or(0),
                "BOND section ended before expected bond count",
            ));
        };
        let parts: Vec<_> = raw.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(Error::parse(Format::Mol2, ln, "invalid BOND line"));
        }

        let lookup = |field: &str| {
            field
                .parse::<usize>()
                .ok()
                .and_then(|id| id_map.get(&id).copied())
                .ok_or_else(|| Error::parse(Format::Mol2, ln, "bond references unknown atom id"))
        };
        let i = lookup(parts[1])?;
        let j = lookup(parts[2])?;
        if i == j {
            return Err(Error::parse(Format::Mol2, ln, "bond connects an atom to itself"));
        }
        if !is_known_bond_type(parts[3]) {
            return Err(Error::parse(
                Format::Mol2,
                ln,
                "unsupported bond type in BOND line",
            ));
        }

        bonds.push((Bond::new(i, j), parts[3].to_string()));
    }

    Ok(bonds)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACETATE: &str = "\
@<TRIPOS>MOLECULE
ACT
 7 6 1 0 0
SMALL
USER_CHARGES

@<TRIPOS>ATOM
      1 C1      0.0000    0.0000    0.0000 C.3     1  ACT1       0.0000
      2 C2      1.5200    0.0000    0.0000 C.2     1  ACT1       0.0000
      3 O1      2.1500    1.0800    0.0000 O.co2   1  ACT1       0.0000
      4 O2      2.1500   -1.0800    0.0000 O.co2   1  ACT1      -1.0000
      5 H1     -0.3600    1.0300    0.0000 H       1  ACT1       0.0000
      6 H2     -0.3600   -0.5100    0.8900 H       1  ACT1       0.0000
      7 H3     -0.3600   -0.5100   -0.8900 H       1  ACT1       0.0000
@<TRIPOS>BOND
     1     1     2    1
     2     2     3    2
     3     2     4    1
     4     1     5    1
     5     1     6    1
     6     1     7    1
";

    #[test]
    fn reads_atoms_bonds_and_residues() {
        let system = read(ACETATE.as_bytes()).unwrap();
        assert_eq!(system.atom_count(), 7);
        assert_eq!(system.bond_count(), 6);
        assert_eq!(system.atoms[2].element, Element::O);
        assert_eq!(system.atoms[2].name(), "O1");
        assert_eq!(system.atoms[2].info.residue_name, "ACT");
        assert_eq!(system.atoms[2].info.residue_id, 1);
        assert_eq!(system.atoms[3].formal_charge, Some(-1));
        assert_eq!(system.atoms[2].formal_charge, None);
        assert_eq!(system.bonds[1], Bond::new(1, 2));
    }

    #[test]
    fn template_keeps_names_and_orders() {
        let template = read_mol2_template(ACETATE.as_bytes());
        assert!(template.is_ok());
    }

    #[test]
    fn element_guessing() {
        assert_eq!(guess_element("C.ar", "C1"), Some(Element::C));
        assert_eq!(guess_element("Zn", "ZN"), Some(Element::Zn));
        assert_eq!(guess_element("Du", "1HB"), Some(Element::H));
        assert_eq!(residue_name("LYS12"), "LYS");
        assert_eq!(residue_name("123"), "123");
    }

    #[test]
    fn reports_truncated_sections() {
        let truncated = ACETATE.replace("     6     1     7    1\n", "");
        let err = read(truncated.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { format: Format::Mol2, .. }));

        let unknown = ACETATE.replace("     6     1     7    1", "     6     1     9    1");
        let err = read(unknown.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("unknown atom id"));

        let missing = "@<TRIPOS>ATOM\n";
        assert!(read(missing.as_bytes()).is_err());
    }
}

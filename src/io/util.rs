use super::{HisStrategy, ProtonationConfig, TopologyConfig, error::Error};
use crate::model::{
    atom::Atom,
    metadata::{AtomResidueInfo, ResidueCategory, ResiduePosition, StandardResidue},
    system::{Bond, System},
    types::Element,
};
use bio_forge as bf;

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("encountered unsupported element '{0}' from bio-forge")]
    UnsupportedElement(String),
    #[error("bond {0}-{1} references an atom outside the structure")]
    DanglingBond(usize, usize),
}

/// Optionally protonates, then perceives bonds and converts to a [`System`].
pub fn finish_structure(
    mut bio_struct: bf::Structure,
    protonation: Option<ProtonationConfig>,
    topology: &TopologyConfig,
) -> Result<System, Error> {
    if let Some(config) = protonation {
        log::info!("adding hydrogens (target pH: {:?})", config.target_ph);
        bf::ops::add_hydrogens(&mut bio_struct, &to_bf_hydro_config(config))?;
    }

    let bf_topo = build_topology(bio_struct, topology)?;
    Ok(from_bio_topology(bf_topo)?)
}

pub fn to_bf_hydro_config(config: ProtonationConfig) -> bf::ops::HydroConfig {
    bf::ops::HydroConfig {
        target_ph: config.target_ph,
        remove_existing_h: config.remove_existing_h,
        his_strategy: match config.his_strategy {
            HisStrategy::DirectHID => bf::ops::HisStrategy::DirectHID,
            HisStrategy::DirectHIE => bf::ops::HisStrategy::DirectHIE,
            HisStrategy::Random => bf::ops::HisStrategy::Random,
            HisStrategy::HbNetwork => bf::ops::HisStrategy::HbNetwork,
        },
    }
}

pub fn build_topology(
    structure: bf::Structure,
    config: &TopologyConfig,
) -> Result<bf::Topology, bf::ops::Error> {
    let mut topology_builder =
        bf::ops::TopologyBuilder::new().disulfide_cutoff(config.disulfide_bond_cutoff);

    for tpl in &config.hetero_templates {
        topology_builder = topology_builder.add_hetero_template(tpl.clone());
    }

    topology_builder.build(structure)
}

pub fn from_bio_topology(bio_topo: bf::Topology) -> Result<System, ConversionError> {
    let bio_struct = bio_topo.structure();
    let mut atoms = Vec::with_capacity(bio_struct.atom_count());

    for (chain, residue, bio_atom) in bio_struct.iter_atoms_with_context() {
        let info = AtomResidueInfo::builder(
            bio_atom.name.clone(),
            residue.name.clone(),
            residue.id,
            chain.id.chars().next().unwrap_or(' '),
        )
        .insertion_code(residue.insertion_code)
        .standard_name(residue.standard_name.map(convert_std_res_from_bf))
        .category(convert_res_cat_from_bf(residue.category))
        .position(convert_res_pos_from_bf(residue.position))
        .build();

        let position = [bio_atom.pos.x, bio_atom.pos.y, bio_atom.pos.z];
        atoms.push(Atom::new(convert_element_from_bf(bio_atom.element)?, position).with_info(info));
    }

    let bonds = bio_topo
        .bonds()
        .iter()
        .map(|bio_bond| {
            let (i, j) = (bio_bond.a1_idx, bio_bond.a2_idx);
            if i >= atoms.len() || j >= atoms.len() {
                return Err(ConversionError::DanglingBond(i, j));
            }
            Ok(Bond::new(i, j))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(System { atoms, bonds })
}

fn convert_element_from_bf(e: bf::Element) -> Result<Element, ConversionError> {
    if matches!(e, bf::Element::Unknown) {
        return Err(ConversionError::UnsupportedElement("Unknown".to_string()));
    }
    Element::parse_symbol(e.symbol())
        .map_err(|_| ConversionError::UnsupportedElement(e.symbol().to_string()))
}

fn convert_std_res_from_bf(res: bf::StandardResidue) -> StandardResidue {
    match res {
        bf::StandardResidue::ALA => StandardResidue::ALA,
        bf::StandardResidue::ARG => StandardResidue::ARG,
        bf::StandardResidue::ASN => StandardResidue::ASN,
        bf::StandardResidue::ASP => StandardResidue::ASP,
        bf::StandardResidue::CYS => StandardResidue::CYS,
        bf::StandardResidue::GLN => StandardResidue::GLN,
        bf::StandardResidue::GLU => StandardResidue::GLU,
        bf::StandardResidue::GLY => StandardResidue::GLY,
        bf::StandardResidue::HIS => StandardResidue::HIS,
        bf::StandardResidue::ILE => StandardResidue::ILE,
        bf::StandardResidue::LEU => StandardResidue::LEU,
        bf::StandardResidue::LYS => StandardResidue::LYS,
        bf::StandardResidue::MET => StandardResidue::MET,
        bf::StandardResidue::PHE => StandardResidue::PHE,
        bf::StandardResidue::PRO => StandardResidue::PRO,
        bf::StandardResidue::SER => StandardResidue::SER,
        bf::StandardResidue::THR => StandardResidue::THR,
        bf::StandardResidue::TRP => StandardResidue::TRP,
        bf::StandardResidue::TYR => StandardResidue::TYR,
        bf::StandardResidue::VAL => StandardResidue::VAL,
        bf::StandardResidue::A => StandardResidue::A,
        bf::StandardResidue::C => StandardResidue::C,
        bf::StandardResidue::G => StandardResidue::G,
        bf::StandardResidue::U => StandardResidue::U,
        bf::StandardResidue::I => StandardResidue::I,
        bf::StandardResidue::DA => StandardResidue::DA,
        bf::StandardResidue::DC => StandardResidue::DC,
        bf::StandardResidue::DG => StandardResidue::DG,
        bf::StandardResidue::DT => StandardResidue::DT,
        bf::StandardResidue::DI => StandardResidue::DI,
        bf::StandardResidue::HOH => StandardResidue::HOH,
    }
}

fn convert_res_cat_from_bf(cat: bf::ResidueCategory) -> ResidueCategory {
    match cat {
        bf::ResidueCategory::Standard => ResidueCategory::Standard,
        bf::ResidueCategory::Hetero => ResidueCategory::Hetero,
        bf::ResidueCategory::Ion => ResidueCategory::Ion,
    }
}

fn convert_res_pos_from_bf(pos: bf::ResiduePosition) -> ResiduePosition {
    match pos {
        bf::ResiduePosition::None => ResiduePosition::None,
        bf::ResiduePosition::Internal => ResiduePosition::Internal,
        bf::ResiduePosition::NTerminal => ResiduePosition::NTerminal,
        bf::ResiduePosition::CTerminal => ResiduePosition::CTerminal,
        bf::ResiduePosition::FivePrime => ResiduePosition::FivePrime,
        bf::ResiduePosition::ThreePrime => ResiduePosition::ThreePrime,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structure_with(residue: bf::Residue) -> bf::Structure {
        let mut chain = bf::Chain::new("B");
        chain.add_residue(residue);
        let mut structure = bf::Structure::new();
        structure.add_chain(chain);
        structure
    }

    #[test]
    fn converts_atoms_residues_and_bonds() {
        let mut residue = bf::Residue::new(
            7,
            Some('A'),
            "GLY",
            Some(bf::StandardResidue::GLY),
            bf::ResidueCategory::Standard,
        );
        residue.position = bf::ResiduePosition::NTerminal;
        residue.add_atom(bf::Atom::new(
            "N",
            bf::Element::N,
            bf::Point::new(0.0, 0.0, 0.0),
        ));
        residue.add_atom(bf::Atom::new(
            "CA",
            bf::Element::C,
            bf::Point::new(1.46, 0.0, 0.0),
        ));

        let topo = bf::Topology::new(
            structure_with(residue),
            vec![bf::Bond::new(0, 1, bf::BondOrder::Single)],
        );
        let system = from_bio_topology(topo).unwrap();

        assert_eq!(system.atom_count(), 2);
        assert_eq!(system.bonds, vec![Bond::new(0, 1)]);
        let ca = &system.atoms[1];
        assert_eq!(ca.element, Element::C);
        assert_eq!(ca.name(), "CA");
        assert_eq!(ca.info.chain_id, 'B');
        assert_eq!(ca.info.insertion_code, 'A');
        assert_eq!(ca.info.standard_name, Some(StandardResidue::GLY));
        assert_eq!(ca.info.position, ResiduePosition::NTerminal);
        assert!((ca.position[0] - 1.46).abs() < 1e-12);
    }

    #[test]
    fn rejects_unknown_element_from_bio() {
        let mut residue = bf::Residue::new(1, None, "UNK", None, bf::ResidueCategory::Hetero);
        residue.position = bf::ResiduePosition::None;
        residue.add_atom(bf::Atom::new(
            "X",
            bf::Element::Unknown,
            bf::Point::new(0.0, 0.0, 0.0),
        ));

        let topo = bf::Topology::new(structure_with(residue), Vec::new());
        let err = from_bio_topology(topo).unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedElement(_)));
    }
}

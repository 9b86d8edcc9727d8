//! Structure input: PDB and mmCIF through bio-forge, MOL2 natively.
//!
//! Readers return a [`System`] whose bonds come from template-based topology
//! perception (PDB, mmCIF) or from the file itself (MOL2). Hydrogens can be
//! added on the way in for structures that lack them.

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

pub mod error;

mod mmcif;
mod mol2;
mod pdb;
mod util;

pub use bio_forge::Template;
pub use error::Error;
pub use mol2::read_mol2_template;

use crate::model::system::System;

/// Histidine protonation choice used when adding hydrogens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HisStrategy {
    DirectHID,
    DirectHIE,
    Random,
    #[default]
    HbNetwork,
}

/// Settings for adding hydrogens to structures that lack them.
#[derive(Debug, Clone)]
pub struct ProtonationConfig {
    pub target_ph: Option<f64>,
    pub remove_existing_h: bool,
    pub his_strategy: HisStrategy,
}

impl Default for ProtonationConfig {
    fn default() -> Self {
        Self {
            target_ph: None,
            remove_existing_h: false,
            his_strategy: HisStrategy::default(),
        }
    }
}

/// Settings for bond perception.
#[derive(Debug, Clone)]
pub struct TopologyConfig {
    /// Connectivity templates for non-standard residues.
    pub hetero_templates: Vec<Template>,
    pub disulfide_bond_cutoff: f64,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            hetero_templates: Vec::new(),
            disulfide_bond_cutoff: 2.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Pdb,
    Mmcif,
    Mol2,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Pdb => write!(f, "PDB"),
            Format::Mmcif => write!(f, "mmCIF"),
            Format::Mol2 => write!(f, "MOL2"),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    /// Parses a format name or file extension, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdb" | "ent" => Ok(Format::Pdb),
            "cif" | "mmcif" => Ok(Format::Mmcif),
            "mol2" => Ok(Format::Mol2),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

/// Configurable structure reader.
///
/// ```
/// use elecdist::io::{BioReader, Format};
///
/// let mol2 = "\
/// @<TRIPOS>MOLECULE
/// WAT
///  3 2 1
/// SMALL
/// NO_CHARGES
///
/// @<TRIPOS>ATOM
///       1 O     0.000  0.000  0.000 O.3   1 HOH1  0.0
///       2 H1    0.757  0.586  0.000 H     1 HOH1  0.0
///       3 H2   -0.757  0.586  0.000 H     1 HOH1  0.0
/// @<TRIPOS>BOND
///      1 1 2 1
///      2 1 3 1
/// ";
/// let system = BioReader::new(mol2.as_bytes(), Format::Mol2).read()?;
/// assert_eq!(system.atom_count(), 3);
/// assert_eq!(system.bond_count(), 2);
/// assert_eq!(system.atoms[0].info.residue_name, "HOH");
/// # Ok::<(), elecdist::io::Error>(())
/// ```
#[derive(Debug)]
pub struct BioReader<R> {
    reader: R,
    format: Format,
    protonation: Option<ProtonationConfig>,
    topology_config: TopologyConfig,
}

impl<R: BufRead> BioReader<R> {
    pub fn new(reader: R, format: Format) -> Self {
        Self {
            reader,
            format,
            protonation: None,
            topology_config: TopologyConfig::default(),
        }
    }

    /// Adds hydrogens before perceiving bonds. Ignored for MOL2 input.
    pub fn protonate(mut self, config: ProtonationConfig) -> Self {
        self.protonation = Some(config);
        self
    }

    pub fn topology(mut self, config: TopologyConfig) -> Self {
        self.topology_config = config;
        self
    }

    pub fn read(self) -> Result<System, Error> {
        let format = self.format;
        let system = match format {
            Format::Pdb => pdb::read(self)?,
            Format::Mmcif => mmcif::read(self)?,
            Format::Mol2 => {
                if self.protonation.is_some() {
                    log::warn!("hydrogen addition is not available for MOL2 input; skipping");
                }
                mol2::read(self.reader)?
            }
        };
        log::debug!(
            "read {} atoms and {} bonds from {format} input",
            system.atom_count(),
            system.bond_count()
        );
        Ok(system)
    }
}

/// Reads a structure with default settings.
pub fn read_system<R: BufRead>(reader: R, format: Format) -> Result<System, Error> {
    BioReader::new(reader, format).read()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names_and_extensions() {
        assert_eq!("pdb".parse::<Format>().unwrap(), Format::Pdb);
        assert_eq!(".CIF".parse::<Format>().unwrap(), Format::Mmcif);
        assert_eq!("mmCIF".parse::<Format>().unwrap(), Format::Mmcif);
        assert_eq!("Mol2".parse::<Format>().unwrap(), Format::Mol2);
        assert!(matches!(
            "xyz".parse::<Format>(),
            Err(Error::UnknownFormat(name)) if name == "xyz"
        ));
        assert_eq!(Format::Mmcif.to_string(), "mmCIF");
    }

    #[test]
    fn protonation_defaults_keep_existing_hydrogens() {
        let config = ProtonationConfig::default();
        assert!(!config.remove_existing_h);
        assert_eq!(config.his_strategy, HisStrategy::HbNetwork);
        assert_eq!(TopologyConfig::default().disulfide_bond_cutoff, 2.2);
    }
}

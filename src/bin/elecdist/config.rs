use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use elecdist::io::{ProtonationConfig, Template, TopologyConfig, read_mol2_template};
use elecdist::{AtomSelector, DistributionConfig, ValidationOptions};

use crate::cli::{PreparationOptions, SelectionOptions};

/// Merges the optional TOML file with command-line overrides.
///
/// Charge flags are appended after file entries so they take precedence.
pub fn build_distribution_config(opts: &SelectionOptions) -> Result<DistributionConfig> {
    let mut config = match &opts.config {
        Some(path) => load_config(path)?,
        None => DistributionConfig::default(),
    };

    for raw in &opts.atom_charges {
        let (selection, charge) = parse_atom_charge(raw)?;
        config = config.with_atom_charge(selection, charge);
    }

    if let Some(alt_loc) = opts.alt_loc {
        config = config.with_alt_loc(alt_loc);
    }

    Ok(config)
}

pub fn build_validation_options(opts: &SelectionOptions) -> ValidationOptions {
    ValidationOptions::default().ignore_water(opts.ignore_water)
}

pub fn build_protonation_config(opts: &PreparationOptions) -> Option<ProtonationConfig> {
    if !opts.add_hydrogens {
        return None;
    }

    Some(ProtonationConfig {
        target_ph: opts.ph,
        remove_existing_h: false,
        his_strategy: opts.his.into(),
    })
}

pub fn build_topology_config(opts: &PreparationOptions) -> Result<TopologyConfig> {
    let templates = load_templates(&opts.templates)?;

    Ok(TopologyConfig {
        hetero_templates: templates,
        disulfide_bond_cutoff: opts.ss_cutoff,
    })
}

/// Parses `SELECTOR:CHARGE`; the charge follows the last colon.
pub fn parse_atom_charge(raw: &str) -> Result<(AtomSelector, i32)> {
    let (selector, charge) = raw
        .rsplit_once(':')
        .ok_or_else(|| anyhow!("Atom charge '{raw}' must have the form SELECTOR:CHARGE"))?;
    let charge = charge
        .trim()
        .trim_start_matches('+')
        .parse::<i32>()
        .with_context(|| format!("Invalid charge in '{raw}'"))?;
    let selection = selector
        .parse::<AtomSelector>()
        .with_context(|| format!("Invalid atom selector in '{raw}'"))?;
    Ok((selection, charge))
}

fn load_config(path: &Path) -> Result<DistributionConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    DistributionConfig::from_toml_str(&text)
        .with_context(|| format!("Failed to parse config: {}", path.display()))
}

fn load_templates(paths: &[impl AsRef<Path>]) -> Result<Vec<Template>> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            let file = File::open(path)
                .with_context(|| format!("Failed to open template: {}", path.display()))?;
            read_mol2_template(BufReader::new(file))
                .with_context(|| format!("Failed to parse template: {}", path.display()))
        })
        .collect()
}

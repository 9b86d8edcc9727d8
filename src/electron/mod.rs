mod bonding;
mod config;
mod distribution;
mod error;
mod graph;
mod properties;
mod report;
mod validate;

#[cfg(test)]
mod testing;

pub use bonding::{BondPass, Bondability};
pub use config::{DistributionConfig, SpecificAtomCharge, ValidationOptions};
pub use distribution::{BondKind, ElectronDistribution};
pub use error::Error;
pub use graph::{BondGraph, MAX_RING_SIZE, ring_bonds};
pub use properties::{DEFAULT_METAL_CHARGES, ElementProperties, element_properties};
pub use report::hint_for;
pub use validate::{
    Offender, ValidationReport, Violation, base_residue_charge, residue_charge_tolerance,
};

use crate::model::system::System;

/// Computes the electron distribution of `system`.
///
/// Initializes atom counts, applies charges and runs all bond formation
/// passes. See [`ElectronDistribution::prepare`] and
/// [`ElectronDistribution::form_bonds`] for the individual stages.
pub fn distribute(
    system: &System,
    config: &DistributionConfig,
) -> Result<ElectronDistribution, Error> {
    let mut distribution = ElectronDistribution::prepare(system, config)?;
    distribution.form_bonds()?;

    log::info!(
        "distributed electrons over {} atoms and {} bonds; total charge {:+}",
        distribution.system().atom_count(),
        distribution.graph().bonds().len(),
        distribution.total_charge()
    );

    Ok(distribution)
}

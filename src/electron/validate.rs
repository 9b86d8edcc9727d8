//! Chemical plausibility checks over a finished distribution.
//!
//! Findings are values, not errors: [`ElectronDistribution::validate`]
//! collects all of them, while [`ElectronDistribution::check`] stops at the
//! first one for callers that want to fail fast.

use super::config::ValidationOptions;
use super::distribution::{BondKind, ElectronDistribution};
use crate::model::metadata::{ResidueKey, StandardResidue};
use crate::model::system::Bond;
use crate::model::types::Element;
use std::collections::BTreeMap;
use std::ops::ControlFlow;
use thiserror::Error;

/// Electron counts that are implausible for an element.
///
/// A negative threshold flags counts at or below it, a positive one flags
/// counts at or above it.
const DISALLOWED_ELECTRONS: [(Element, i32); 3] =
    [(Element::N, 2), (Element::O, -1), (Element::C, 1)];

/// Residues whose total formal charge is known exactly.
const KNOWN_RESIDUE_CHARGES: [(StandardResidue, i32); 1] = [(StandardResidue::HOH, 0)];

/// Usual formal charge of an amino acid side chain.
pub fn base_residue_charge(residue: StandardResidue) -> i32 {
    match residue {
        StandardResidue::ARG | StandardResidue::HIS | StandardResidue::LYS => 1,
        StandardResidue::ASP | StandardResidue::GLU => -1,
        _ => 0,
    }
}

/// Allowed deviation from [`base_residue_charge`].
pub fn residue_charge_tolerance(residue: StandardResidue) -> i32 {
    match residue {
        StandardResidue::HIS => 2,
        _ => 1,
    }
}

/// Atom or bond a finding points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Offender {
    Atom(usize),
    Bond(Bond),
    Residue(ResidueKey),
}

/// A non-fatal chemistry finding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// A covalent bond ended up without electrons.
    #[error("No electrons allocated to bond: {first}-{second}")]
    EmptyBond {
        bond: Bond,
        first: String,
        second: String,
    },

    /// Remaining electrons that match the disallowed table for the element.
    #[error("Element has strange number of electrons {element} : {electrons}")]
    StrangeElectronCount {
        atom: usize,
        element: Element,
        electrons: i32,
    },

    /// Amino acid charge too far from its usual value.
    #[error("Unlikely charge for {} of {charge}", residue.residue_name)]
    UnlikelyResidueCharge {
        residue: ResidueKey,
        charge: i32,
        expected: i32,
    },

    /// Residue with a known charge that does not match.
    #[error(
        "Residue {} has a problem with the charge : {charge}!={expected}",
        residue.residue_name
    )]
    ResidueChargeMismatch {
        residue: ResidueKey,
        charge: i32,
        expected: i32,
    },
}

impl Violation {
    pub fn offender(&self) -> Offender {
        match self {
            Violation::EmptyBond { bond, .. } => Offender::Bond(*bond),
            Violation::StrangeElectronCount { atom, .. } => Offender::Atom(*atom),
            Violation::UnlikelyResidueCharge { residue, .. }
            | Violation::ResidueChargeMismatch { residue, .. } => {
                Offender::Residue(residue.clone())
            }
        }
    }
}

/// All findings of one validation run, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Findings grouped by message, messages sorted.
    pub fn by_message(&self) -> BTreeMap<String, Vec<&Violation>> {
        let mut groups: BTreeMap<String, Vec<&Violation>> = BTreeMap::new();
        for v in &self.violations {
            groups.entry(v.to_string()).or_default().push(v);
        }
        groups
    }
}

fn is_disallowed(element: Element, electrons: i32) -> bool {
    if electrons == 0 {
        return false;
    }
    DISALLOWED_ELECTRONS
        .iter()
        .find(|(el, _)| *el == element)
        .is_some_and(|&(_, threshold)| {
            if threshold < 0 {
                electrons <= threshold
            } else {
                electrons >= threshold
            }
        })
}

impl ElectronDistribution {
    /// Runs every check and collects the findings.
    ///
    /// ```
    /// use elecdist::{Atom, AtomResidueInfo, DistributionConfig, Element, System};
    /// use elecdist::{ValidationOptions, distribute};
    ///
    /// let info = |name: &str| AtomResidueInfo::builder(name, "HOH", 1, 'W').build();
    /// let mut system = System::new();
    /// system.atoms.push(Atom::new(Element::O, [0.0, 0.0, 0.0]).with_info(info("O")));
    ///
    /// let dist = distribute(&system, &DistributionConfig::default())?;
    /// let report = dist.validate(ValidationOptions::default());
    /// assert_eq!(
    ///     report.violations()[0].to_string(),
    ///     "Residue HOH has a problem with the charge : -2!=0"
    /// );
    /// assert!(dist.validate(ValidationOptions::default().ignore_water(true)).is_empty());
    /// # Ok::<(), elecdist::ElectronError>(())
    /// ```
    pub fn validate(&self, options: ValidationOptions) -> ValidationReport {
        let mut violations = Vec::new();
        let _ = self.visit_violations(options, |v| {
            violations.push(v);
            ControlFlow::<()>::Continue(())
        });
        ValidationReport { violations }
    }

    /// Returns the first finding as an error.
    pub fn check(&self, options: ValidationOptions) -> Result<(), Violation> {
        match self.visit_violations(options, ControlFlow::Break) {
            ControlFlow::Break(v) => Err(v),
            ControlFlow::Continue(()) => Ok(()),
        }
    }

    /// Atoms whose electron count is not on the per-residue allow-list.
    ///
    /// Backbone nitrogens may carry -1, 0 or 1 electrons and terminal `OXT`
    /// 0 or 1; `LYS NZ` may carry -1 and `GLU OE2`/`ASP OD2` 1. Anything
    /// else must be neutral.
    pub fn unexpected_formal_charges(&self) -> Vec<usize> {
        self.atom_electrons
            .iter()
            .enumerate()
            .filter(|&(idx, &electrons)| {
                let info = &self.atom(idx).info;
                let name = info.atom_name.trim();
                let specific = residue_allowed(info.residue_name.trim(), name);
                let general = wildcard_allowed(name);
                !specific.contains(&electrons) && !general.contains(&electrons)
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    fn visit_violations<B>(
        &self,
        options: ValidationOptions,
        mut visit: impl FnMut(Violation) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        for (bond, electrons, kind) in self.bond_entries() {
            if kind == BondKind::Covalent && electrons == 0 {
                visit(Violation::EmptyBond {
                    bond,
                    first: self.atom(bond.i).name().to_string(),
                    second: self.atom(bond.j).name().to_string(),
                })?;
            }
        }

        for (idx, &electrons) in self.atom_electrons.iter().enumerate() {
            let element = self.atom(idx).element;
            if is_disallowed(element, electrons) {
                visit(Violation::StrangeElectronCount {
                    atom: idx,
                    element,
                    electrons,
                })?;
            }
        }

        let charges = self.residue_charges();
        for (key, &charge) in &charges {
            let Some(residue) = StandardResidue::from_name(&key.residue_name) else {
                continue;
            };
            if !residue.is_amino_acid() {
                continue;
            }
            let expected = base_residue_charge(residue);
            if (charge - expected).abs() > residue_charge_tolerance(residue) {
                visit(Violation::UnlikelyResidueCharge {
                    residue: key.clone(),
                    charge,
                    expected,
                })?;
            }
        }

        for (key, &charge) in &charges {
            let Some(residue) = StandardResidue::from_name(&key.residue_name) else {
                continue;
            };
            if residue.is_water() && options.ignore_water {
                continue;
            }
            if let Some(&(_, expected)) = KNOWN_RESIDUE_CHARGES.iter().find(|(r, _)| *r == residue)
                && charge != expected
            {
                visit(Violation::ResidueChargeMismatch {
                    residue: key.clone(),
                    charge,
                    expected,
                })?;
            }
        }

        ControlFlow::Continue(())
    }
}

fn wildcard_allowed(atom_name: &str) -> &'static [i32] {
    match atom_name {
        "N" => &[-1, 0, 1],
        "OXT" => &[1, 0],
        _ => &[0],
    }
}

fn residue_allowed(residue_name: &str, atom_name: &str) -> &'static [i32] {
    match (residue_name, atom_name) {
        ("LYS", "NZ") => &[-1],
        ("GLU", "OE2") | ("ASP", "OD2") => &[1],
        _ => &[],
    }
}

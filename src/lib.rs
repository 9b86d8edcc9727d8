//! Formal electron distribution for macromolecular structures.
//!
//! Given atoms and their covalent connectivity, the engine places shared
//! electrons into bonds so every atom reaches its valence, derives bond
//! orders and formal charges from the result, and flags chemistry that looks
//! implausible (missing hydrogens, truncated side chains, charged water).
//!
//! # Features
//!
//! - **Electron distribution** - Valence bookkeeping with lone pairs, metal
//!   coordination, ring-aware multiple bonds and hypervalent centers
//! - **Charge validation** - Per-atom and per-residue plausibility checks
//!   with remediation hints
//! - **Structure input** - PDB and mmCIF via bio-forge (with optional
//!   hydrogen addition), plus MOL2 small molecules
//! - **Contact probes** - Spatial grid, bonded-neighbor queries and phantom
//!   hydrogen placement for hydroxyl donors
//!
//! # Quick Start
//!
//! The main entry point is the [`distribute`] function, which takes a
//! [`System`] and a [`DistributionConfig`] and returns an
//! [`ElectronDistribution`]:
//!
//! ```
//! use elecdist::{Atom, Bond, Element, System};
//! use elecdist::{BondOrder, DistributionConfig, ElectronError, ValidationOptions, distribute};
//!
//! // Acetate anion (CH₃COO⁻)
//! let mut system = System::new();
//! system.atoms.push(Atom::new(Element::C, [ 0.00,  0.00,  0.00])); // methyl C
//! system.atoms.push(Atom::new(Element::C, [ 1.52,  0.00,  0.00])); // carboxyl C
//! system.atoms.push(Atom::new(Element::O, [ 2.15,  1.08,  0.00]));
//! system.atoms.push(Atom::new(Element::O, [ 2.15, -1.08,  0.00]));
//! system.atoms.push(Atom::new(Element::H, [-0.36,  1.03,  0.00]));
//! system.atoms.push(Atom::new(Element::H, [-0.36, -0.51,  0.89]));
//! system.atoms.push(Atom::new(Element::H, [-0.36, -0.51, -0.89]));
//!
//! for (i, j) in [(0, 1), (1, 2), (1, 3), (0, 4), (0, 5), (0, 6)] {
//!     system.bonds.push(Bond::new(i, j));
//! }
//!
//! let dist = distribute(&system, &DistributionConfig::default())?;
//!
//! // One carbonyl double bond, the other oxygen carries the charge
//! assert_eq!(dist.bond_order(1, 2), Some(BondOrder::Double));
//! assert_eq!(dist.bond_order(1, 3), Some(BondOrder::Single));
//! assert_eq!(dist.charged_atoms(), vec![(3, -1)]);
//! assert_eq!(dist.total_charge(), -1);
//!
//! // A lone ligand has no residue expectations to violate
//! assert!(dist.validate(ValidationOptions::default()).is_empty());
//! # Ok::<(), ElectronError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] - Structure input (PDB, mmCIF, MOL2) and hetero templates
//! - [`electron`] - Distribution engine, validation and reporting
//! - [`probe`] - Spatial neighbor search and hydrogen-bond probe helpers
//!
//! # Data Types
//!
//! - [`System`] - Atoms plus covalent connectivity
//! - [`Atom`] - Element, coordinates, occupancy, input formal charge and residue annotations
//! - [`Bond`] - Unordered atom pair
//! - [`Element`] - Chemical element (H through Og)
//! - [`AtomResidueInfo`] - Atom name, residue name, chain, sequence number, alternate location
//! - [`AtomSelector`] - Atom selection predicate used by charge overrides and `--select`
//! - [`ElectronDistribution`] - Remaining electrons per atom and shared electrons per bond
//! - [`Violation`] - A chemistry finding raised by validation

mod model;

pub mod electron;
pub mod io;
pub mod probe;

pub use model::atom::Atom;
pub use model::system::{Bond, System};
pub use model::types::{BondOrder, Element, ParseElementError};

pub use model::metadata::{
    AtomResidueBuilder, AtomResidueInfo, ResidueCategory, ResidueKey, ResiduePosition,
    StandardResidue,
};
pub use model::selection::{AtomSelector, ParseSelectorError};

pub use electron::{
    BondKind, BondPass, Bondability, DistributionConfig, ElectronDistribution, ElementProperties,
    Offender, SpecificAtomCharge, ValidationOptions, ValidationReport, Violation, distribute,
    element_properties, hint_for,
};

pub use electron::Error as ElectronError;

//! Error types for electron distribution.
//!
//! Every variant here is fatal: no partially built distribution is ever
//! returned alongside one. Non-fatal findings are reported as
//! [`Violation`](super::Violation)s instead.

use crate::model::atom::Atom;
use crate::model::types::Element;
use thiserror::Error;

/// Errors that abort building an electron distribution.
#[derive(Debug, Error)]
pub enum Error {
    /// An atom's element has no standard valence (noble gases, for instance).
    #[error("element {element} of atom {atom} (index {index}) has no valence entry")]
    MissingValence {
        /// Atom index.
        index: usize,
        /// Locator of the offending atom.
        atom: String,
        /// The element lacking a valence.
        element: Element,
    },

    /// A metal whose charge is neither a built-in default nor supplied.
    #[error(
        "metal atom {atom} (index {index}, {element}) has no charge; \
         use an atom charge override or specify the charge in the input model"
    )]
    UnresolvedMetalCharge {
        /// Atom index.
        index: usize,
        /// Locator of the offending atom.
        atom: String,
        /// The metal element.
        element: Element,
    },

    /// Two metals bonded directly to each other.
    #[error("metal-metal bond between atoms {i} and {j} is not supported: {detail}")]
    InvalidMetalBond {
        /// First atom index.
        i: usize,
        /// Second atom index.
        j: usize,
        /// Locators of both atoms.
        detail: String,
    },

    /// Invalid bond definition in the input system.
    #[error("invalid bond between atoms {i} and {j}: {detail}")]
    InvalidBond {
        /// First atom index.
        i: usize,
        /// Second atom index.
        j: usize,
        /// Description of the problem.
        detail: String,
    },

    /// The input system contains no atoms.
    #[error("input system is empty: at least one atom is required")]
    EmptySystem,

    /// Several conformers are present and none was chosen.
    #[error(
        "structure has alternate conformers {alt_locs:?}; choose one alternate location explicitly"
    )]
    AmbiguousConformers {
        /// Alternate location identifiers found in the structure.
        alt_locs: Vec<char>,
    },

    /// The chosen alternate location does not occur in the structure.
    #[error("alternate location '{0}' is not present in the structure")]
    UnknownAltLoc(char),

    /// Malformed configuration file.
    #[error("failed to parse distribution configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl Error {
    /// Creates a [`MissingValence`](Error::MissingValence) error.
    pub fn missing_valence(index: usize, atom: &Atom) -> Self {
        Self::MissingValence {
            index,
            atom: atom.label(),
            element: atom.element,
        }
    }

    /// Creates an [`UnresolvedMetalCharge`](Error::UnresolvedMetalCharge) error.
    pub fn unresolved_metal_charge(index: usize, atom: &Atom) -> Self {
        Self::UnresolvedMetalCharge {
            index,
            atom: atom.label(),
            element: atom.element,
        }
    }

    /// Creates an [`InvalidMetalBond`](Error::InvalidMetalBond) error.
    pub fn invalid_metal_bond(i: usize, j: usize, details: impl Into<String>) -> Self {
        Self::InvalidMetalBond {
            i,
            j,
            detail: details.into(),
        }
    }

    /// Creates an [`InvalidBond`](Error::InvalidBond) error.
    ///
    /// # Arguments
    ///
    /// * `i` - First atom index
    /// * `j` - Second atom index
    /// * `details` - Description of the bond problem
    pub fn invalid_bond(i: usize, j: usize, details: impl Into<String>) -> Self {
        Self::InvalidBond {
            i,
            j,
            detail: details.into(),
        }
    }
}

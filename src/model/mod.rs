//! Structure model consumed by the electron distribution engine.
//!
//! - [`types`] – Periodic table elements and bond orders.
//! - [`atom`] – Atoms with coordinates, occupancy, input formal charge and residue annotations.
//! - [`metadata`] – Residue identity and standard residue classification.
//! - [`selection`] – Atom selection predicates.
//! - [`system`] – Atoms plus covalent connectivity.

pub mod atom;
pub mod metadata;
pub mod selection;
pub mod system;
pub mod types;

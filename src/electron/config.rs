//! Configuration for building and validating electron distributions.

use super::error::Error;
use crate::model::selection::AtomSelector;
use crate::model::types::Element;
use serde::Deserialize;

/// Forces the formal charge of every atom matched by a selection.
///
/// Applied after the built-in metal charges and input formal charges, so
/// overrides always win.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpecificAtomCharge {
    /// Atoms to override.
    pub selection: AtomSelector,
    /// Formal charge in elementary charge units (`+2` for Zn²⁺).
    pub charge: i32,
}

impl SpecificAtomCharge {
    pub fn new(selection: AtomSelector, charge: i32) -> Self {
        Self { selection, charge }
    }
}

/// Settings for [`distribute`](super::distribute).
///
/// # Examples
///
/// ```
/// use elecdist::{DistributionConfig, Element};
///
/// let config = DistributionConfig::from_toml_str(
///     r#"
///     alt_loc = "A"
///
///     [[atom_charges]]
///     selection = "resname=FE"
///     charge = 3
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.alt_loc, Some('A'));
/// assert_eq!(config.atom_charges[0].charge, 3);
/// assert_eq!(config.tetra_coordinate, vec![Element::C]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DistributionConfig {
    /// Per-atom formal charge overrides, applied in order.
    pub atom_charges: Vec<SpecificAtomCharge>,

    /// Alternate conformer to distribute.
    ///
    /// Required when the structure carries more than one alternate
    /// location; atoms with a blank alternate location are always kept.
    pub alt_loc: Option<char>,

    /// Elements whose ring bonds are preferred when placing ring double bonds.
    #[serde(deserialize_with = "deserialize_elements")]
    pub tetra_coordinate: Vec<Element>,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            atom_charges: Vec::new(),
            alt_loc: None,
            tetra_coordinate: vec![Element::C],
        }
    }
}

impl DistributionConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    /// Appends a charge override after any existing ones.
    pub fn with_atom_charge(mut self, selection: AtomSelector, charge: i32) -> Self {
        self.atom_charges
            .push(SpecificAtomCharge::new(selection, charge));
        self
    }

    pub fn with_alt_loc(mut self, alt_loc: char) -> Self {
        self.alt_loc = Some(alt_loc);
        self
    }
}

fn deserialize_elements<'de, D>(deserializer: D) -> Result<Vec<Element>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let symbols = Vec::<String>::deserialize(deserializer)?;
    symbols
        .iter()
        .map(|s| Element::parse_symbol(s).map_err(serde::de::Error::custom))
        .collect()
}

/// Settings for validation of a finished distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Skip the exact-charge check on water residues.
    pub ignore_water: bool,
}

impl ValidationOptions {
    pub fn ignore_water(mut self, ignore: bool) -> Self {
        self.ignore_water = ignore;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prefers_carbon_rings_and_has_no_overrides() {
        let config = DistributionConfig::default();
        assert!(config.atom_charges.is_empty());
        assert_eq!(config.alt_loc, None);
        assert_eq!(config.tetra_coordinate, vec![Element::C]);
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = DistributionConfig::from_toml_str("").unwrap();
        assert_eq!(config, DistributionConfig::default());
    }

    #[test]
    fn toml_overrides_and_elements_are_normalized() {
        let config = DistributionConfig::from_toml_str(
            r#"
            tetra_coordinate = ["c", "SI"]

            [[atom_charges]]
            selection = "chain=A resid=101 name=ZN"
            charge = 2

            [[atom_charges]]
            selection = "resname=ASP name=OD2"
            charge = -1
            "#,
        )
        .unwrap();
        assert_eq!(config.tetra_coordinate, vec![Element::C, Element::Si]);
        assert_eq!(config.atom_charges.len(), 2);
        assert_eq!(config.atom_charges[0].selection.residue_id, Some(101));
        assert_eq!(config.atom_charges[1].charge, -1);
    }

    #[test]
    fn bad_selection_is_a_config_error() {
        let err = DistributionConfig::from_toml_str(
            r#"
            [[atom_charges]]
            selection = "colour=blue"
            charge = 1
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(DistributionConfig::from_toml_str("bogus = 1").is_err());
    }

    #[test]
    fn builder_helpers() {
        let config = DistributionConfig::default()
            .with_alt_loc('B')
            .with_atom_charge(AtomSelector::all(), 1);
        assert_eq!(config.alt_loc, Some('B'));
        assert_eq!(config.atom_charges.len(), 1);
        assert!(ValidationOptions::default().ignore_water(true).ignore_water);
    }
}

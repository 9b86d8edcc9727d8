//! Atom selection predicates.
//!
//! A selector is a conjunction of optional residue and atom terms. Its text
//! form is a whitespace-separated list of `key=value` terms:
//!
//! | Key | Matches |
//! |-----|---------|
//! | `chain` | chain identifier |
//! | `resname` | residue name |
//! | `resid` | residue sequence number |
//! | `icode` | insertion code |
//! | `name` | atom name |
//! | `element` | element symbol (normalized) |
//! | `altloc` | alternate location |
//!
//! The single word `all` selects every atom.

use super::atom::Atom;
use super::types::Element;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid atom selection '{input}': {detail}")]
pub struct ParseSelectorError {
    input: String,
    detail: String,
}

impl ParseSelectorError {
    fn new(input: &str, detail: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            detail: detail.into(),
        }
    }
}

/// Predicate over atoms and their residue annotations.
///
/// Unset terms match anything, so the default selector selects every atom.
///
/// # Examples
///
/// ```
/// use elecdist::{Atom, AtomResidueInfo, AtomSelector, Element};
///
/// let zinc = Atom::new(Element::Zn, [0.0; 3])
///     .with_info(AtomResidueInfo::builder("ZN", "ZN", 301, 'A').build());
///
/// let selector: AtomSelector = "chain=A resid=301 name=ZN".parse().unwrap();
/// assert!(selector.matches(&zinc));
///
/// let other: AtomSelector = "chain=B".parse().unwrap();
/// assert!(!other.matches(&zinc));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct AtomSelector {
    pub chain_id: Option<char>,
    pub residue_name: Option<String>,
    pub residue_id: Option<i32>,
    pub insertion_code: Option<char>,
    pub atom_name: Option<String>,
    pub element: Option<Element>,
    pub alt_loc: Option<char>,
}

impl AtomSelector {
    /// Selector matching every atom.
    pub fn all() -> Self {
        Self::default()
    }

    /// Selector for one residue, in the spirit of `CHAIN:RESID[:ICODE]`.
    pub fn residue(chain_id: char, residue_id: i32, insertion_code: Option<char>) -> Self {
        Self {
            chain_id: Some(chain_id),
            residue_id: Some(residue_id),
            insertion_code,
            ..Self::default()
        }
    }

    /// Narrows the selector to a single atom name.
    pub fn with_atom_name(mut self, name: impl Into<String>) -> Self {
        self.atom_name = Some(name.into());
        self
    }

    pub fn matches(&self, atom: &Atom) -> bool {
        let info = &atom.info;
        self.chain_id.is_none_or(|c| c == info.chain_id)
            && self
                .residue_name
                .as_deref()
                .is_none_or(|n| n == info.residue_name.trim())
            && self.residue_id.is_none_or(|r| r == info.residue_id)
            && self.insertion_code.is_none_or(|c| c == info.insertion_code)
            && self
                .atom_name
                .as_deref()
                .is_none_or(|n| n == info.atom_name.trim())
            && self.element.is_none_or(|e| e == atom.element)
            && self.alt_loc.is_none_or(|c| c == info.alt_loc)
    }

    pub fn is_all(&self) -> bool {
        *self == Self::default()
    }
}

fn single_char(input: &str, key: &str, value: &str) -> Result<char, ParseSelectorError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ParseSelectorError::new(
            input,
            format!("'{key}' expects a single character, got '{value}'"),
        )),
    }
}

impl FromStr for AtomSelector {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseSelectorError::new(s, "empty selection"));
        }
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::all());
        }

        let mut selector = Self::default();
        for term in trimmed.split_whitespace() {
            let Some((key, value)) = term.split_once('=') else {
                return Err(ParseSelectorError::new(
                    s,
                    format!("term '{term}' is not of the form key=value"),
                ));
            };
            if value.is_empty() {
                return Err(ParseSelectorError::new(s, format!("'{key}' has no value")));
            }
            match key.to_ascii_lowercase().as_str() {
                "chain" => selector.chain_id = Some(single_char(s, key, value)?),
                "resname" => selector.residue_name = Some(value.to_string()),
                "resid" | "resseq" => {
                    let id = value.parse().map_err(|_| {
                        ParseSelectorError::new(s, format!("invalid residue number '{value}'"))
                    })?;
                    selector.residue_id = Some(id);
                }
                "icode" => selector.insertion_code = Some(single_char(s, key, value)?),
                "name" => selector.atom_name = Some(value.to_string()),
                "element" => {
                    let element = Element::parse_symbol(value)
                        .map_err(|e| ParseSelectorError::new(s, e.to_string()))?;
                    selector.element = Some(element);
                }
                "altloc" => selector.alt_loc = Some(single_char(s, key, value)?),
                other => {
                    return Err(ParseSelectorError::new(s, format!("unknown key '{other}'")));
                }
            }
        }
        Ok(selector)
    }
}

impl TryFrom<String> for AtomSelector {
    type Error = ParseSelectorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for AtomSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all() {
            return f.write_str("all");
        }
        let mut terms = Vec::new();
        if let Some(c) = self.chain_id {
            terms.push(format!("chain={c}"));
        }
        if let Some(n) = &self.residue_name {
            terms.push(format!("resname={n}"));
        }
        if let Some(r) = self.residue_id {
            terms.push(format!("resid={r}"));
        }
        if let Some(c) = self.insertion_code {
            terms.push(format!("icode={c}"));
        }
        if let Some(n) = &self.atom_name {
            terms.push(format!("name={n}"));
        }
        if let Some(e) = self.element {
            terms.push(format!("element={e}"));
        }
        if let Some(c) = self.alt_loc {
            terms.push(format!("altloc={c}"));
        }
        f.write_str(&terms.join(" "))
    }
}

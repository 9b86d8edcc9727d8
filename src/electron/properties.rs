//! Per-element valence, lone-pair and metal data.
//!
//! The table is built once on first use and is read-only afterwards.
//! Non-metals follow the octet rule; metals carry the valence of their most
//! common cation, which only matters for saturation checks because
//! coordination bonds hold no electrons.

use crate::model::types::Element;
use std::sync::LazyLock;

/// Chemistry data for one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementProperties {
    pub element: Element,
    /// Standard covalent valence; `None` for elements without one (noble gases).
    pub valence: Option<i32>,
    pub lone_pairs: i32,
    pub is_metal: bool,
    /// Ionic charge assumed when the input supplies none.
    pub default_charge: Option<i32>,
}

impl ElementProperties {
    #[inline]
    pub fn atomic_number(&self) -> u8 {
        self.element.atomic_number()
    }

    #[inline]
    pub fn has_lone_pairs(&self) -> bool {
        self.lone_pairs > 0
    }

    /// Electrons the element can place into bonds: valence plus both electrons of each lone pair.
    pub fn max_bond_valence(&self) -> Option<i32> {
        self.valence.map(|v| v + 2 * self.lone_pairs)
    }
}

static TABLE: LazyLock<Vec<ElementProperties>> = LazyLock::new(|| {
    (1..=118u8)
        .filter_map(Element::from_atomic_number)
        .map(build_entry)
        .collect()
});

/// Looks up the properties of `element`.
///
/// ```
/// use elecdist::{Element, element_properties};
///
/// let n = element_properties(Element::N);
/// assert_eq!(n.valence, Some(3));
/// assert_eq!(n.lone_pairs, 1);
/// assert!(!n.is_metal);
///
/// let zn = element_properties(Element::Zn);
/// assert!(zn.is_metal);
/// assert_eq!(zn.default_charge, Some(2));
///
/// assert_eq!(element_properties(Element::Ar).valence, None);
/// ```
pub fn element_properties(element: Element) -> &'static ElementProperties {
    &TABLE[usize::from(element.atomic_number()) - 1]
}

/// Elements with a built-in ionic charge.
pub const DEFAULT_METAL_CHARGES: [(Element, i32); 6] = [
    (Element::Li, 1),
    (Element::Na, 1),
    (Element::Mg, 2),
    (Element::K, 1),
    (Element::Ca, 2),
    (Element::Zn, 2),
];

fn build_entry(element: Element) -> ElementProperties {
    let (valence, lone_pairs, is_metal) = match non_metal(element) {
        Some((valence, lone_pairs)) => (valence, lone_pairs, false),
        None => (Some(metal_valence(element)), 0, true),
    };
    let default_charge = DEFAULT_METAL_CHARGES
        .iter()
        .find(|(el, _)| *el == element)
        .map(|(_, charge)| *charge);
    ElementProperties {
        element,
        valence,
        lone_pairs,
        is_metal,
        default_charge,
    }
}

fn non_metal(element: Element) -> Option<(Option<i32>, i32)> {
    use Element::*;
    let entry = match element {
        H => (Some(1), 0),
        B => (Some(3), 0),
        C | Si | Ge => (Some(4), 0),
        N | P | As | Sb => (Some(3), 1),
        O | S | Se | Te => (Some(2), 2),
        F | Cl | Br | I | At => (Some(1), 3),
        He | Ne | Ar | Kr | Xe | Rn | Ts | Og => (None, 0),
        _ => return None,
    };
    Some(entry)
}

fn metal_valence(element: Element) -> i32 {
    use Element::*;
    match element {
        Li | Na | K | Rb | Cs | Fr | Ag | Cu => 1,
        Al | Ga | In | Tl | Sc | Y | Bi | Cr | Au => 3,
        Ti | Zr | Hf | Ce | Th => 4,
        e if (La.atomic_number()..=Lu.atomic_number()).contains(&e.atomic_number()) => 3,
        e if (Ac.atomic_number()..=Lr.atomic_number()).contains(&e.atomic_number()) => 3,
        _ => 2,
    }
}

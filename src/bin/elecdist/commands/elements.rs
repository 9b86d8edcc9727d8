use std::io;

use anyhow::{Context, Result};

use elecdist::{Element, ElementProperties, element_properties};

use crate::cli::ElementsArgs;
use crate::display::print_element_properties;

pub fn run_elements(args: ElementsArgs) -> Result<()> {
    let elements = resolve_elements(&args.symbols)?;
    let rows: Vec<&ElementProperties> = elements.into_iter().map(element_properties).collect();

    let mut stdout = io::stdout().lock();
    print_element_properties(&mut stdout, &rows).context("Failed to write element table")
}

fn resolve_elements(symbols: &[String]) -> Result<Vec<Element>> {
    if symbols.is_empty() {
        return Ok((1..=118u8).filter_map(Element::from_atomic_number).collect());
    }
    symbols
        .iter()
        .map(|s| Element::parse_symbol(s).with_context(|| format!("Unknown element '{s}'")))
        .collect()
}

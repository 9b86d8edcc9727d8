use std::collections::{BTreeSet, HashMap};
use std::io::{self, Write};

use elecdist::{BondKind, BondOrder, Element, ElectronDistribution, ElementProperties, System};

use crate::util::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

const MAX_ROWS: usize = 15;

pub fn print_structure_info(system: &System) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let chains: BTreeSet<char> = system.atoms.iter().map(|a| a.info.chain_id).collect();
    let alt_locs = system.alt_locs();

    let mut rows = vec![
        ("Total Atoms", format!("{}", system.atom_count())),
        ("Total Bonds", format!("{}", system.bond_count())),
        ("Residues", format!("{}", system.residues().len())),
        ("Chains", format!("{}", chains.len())),
    ];
    if !alt_locs.is_empty() {
        let ids: String = alt_locs.iter().collect();
        rows.push(("Alt. Locations", ids));
    }

    print_kv_table(&mut out, "Structure Summary", &rows);
    print_element_distribution(&mut out, system);
}

fn print_element_distribution(out: &mut impl Write, system: &System) {
    let mut element_counts: HashMap<Element, usize> = HashMap::new();
    for atom in &system.atoms {
        *element_counts.entry(atom.element).or_insert(0) += 1;
    }

    let total = system.atoms.len();
    let mut sorted: Vec<_> = element_counts
        .into_iter()
        .map(|(e, c)| (e.symbol().to_string(), c))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    print_distribution_table(out, "Element Distribution", &sorted, total);
}

pub fn print_charge_summary(dist: &ElectronDistribution) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let mut double = 0usize;
    let mut triple = 0usize;
    let mut coordination = 0usize;
    let mut empty = 0usize;
    for (bond, electrons, kind) in dist.bond_entries() {
        if kind == BondKind::Coordination {
            coordination += 1;
            continue;
        }
        match dist.bond_order(bond.i, bond.j) {
            Some(BondOrder::Double) => double += 1,
            Some(BondOrder::Triple) => triple += 1,
            _ if electrons == 0 => empty += 1,
            _ => {}
        }
    }

    let charged = dist.charged_atoms();
    let positive = charged.iter().filter(|(_, q)| *q > 0).count();
    let negative = charged.len() - positive;

    let rows = vec![
        ("Total Charge", format!("{:+}", dist.total_charge())),
        ("Charged Atoms", format!("{} (+{positive} / -{negative})", charged.len())),
        ("Double Bonds", format!("{double}")),
        ("Triple Bonds", format!("{triple}")),
        ("Metal Contacts", format!("{coordination}")),
        ("Empty Bonds", format!("{empty}")),
    ];

    print_kv_table(&mut out, "Electron Distribution", &rows);
}

pub fn print_residue_charges(dist: &ElectronDistribution) {
    let charged: Vec<(String, String)> = dist
        .residue_charges()
        .into_iter()
        .filter(|(_, charge)| *charge != 0)
        .map(|(key, charge)| (key.to_string(), format!("{charge:+}")))
        .collect();
    if charged.is_empty() {
        return;
    }

    let stderr = io::stderr();
    let mut out = stderr.lock();

    let mut rows: Vec<(&str, String)> = charged
        .iter()
        .take(MAX_ROWS)
        .map(|(key, charge)| (key.as_str(), charge.clone()))
        .collect();
    if charged.len() > MAX_ROWS {
        rows.push(("...", format!("({} more)", charged.len() - MAX_ROWS)));
    }

    print_kv_table(&mut out, "Charged Residues", &rows);
}

/// Writes the element property table to `out`.
pub fn print_element_properties(
    out: &mut impl Write,
    properties: &[&ElementProperties],
) -> io::Result<()> {
    writeln!(out, "┌─────┬──────┬─────────┬────────────┬───────┬────────┐")?;
    writeln!(out, "│ Sym │    Z │ Valence │ Lone Pairs │ Metal │ Charge │")?;
    writeln!(out, "├─────┼──────┼─────────┼────────────┼───────┼────────┤")?;
    for props in properties {
        let valence = props
            .valence
            .map_or_else(|| "-".to_string(), |v| v.to_string());
        let charge = props
            .default_charge
            .map_or_else(|| "-".to_string(), |q| format!("{q:+}"));
        writeln!(
            out,
            "│ {:<3} │ {:>4} │ {:>7} │ {:>10} │ {:<5} │ {:>6} │",
            props.element.symbol(),
            props.atomic_number(),
            valence,
            props.lone_pairs,
            if props.is_metal { "yes" } else { "no" },
            charge
        )?;
    }
    writeln!(out, "└─────┴──────┴─────────┴────────────┴───────┴────────┘")
}

fn print_distribution_table(
    out: &mut impl Write,
    title: &str,
    data: &[(String, usize)],
    total: usize,
) {
    let name_w = 10usize;
    let count_w = 8usize;
    let sep_overhead = 6;
    let dist_w = SAFE_TABLE_WIDTH.saturating_sub(name_w + count_w + sep_overhead);
    let max_bar_width = dist_w.saturating_sub(8).min(20);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{name_line}┬{count_line}┬{dist_line}┐",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        count_line = "─".repeat(count_w + 2),
        dist_line = "─".repeat(dist_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
        INDENT, "Element", "Count", "Distribution",
    );
    let _ = writeln!(
        out,
        "{}├{name_line}┼{count_line}┼{dist_line}┤",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        count_line = "─".repeat(count_w + 2),
        dist_line = "─".repeat(dist_w + 2)
    );

    for (name, count) in data.iter().take(MAX_ROWS) {
        let pct = if total == 0 {
            0.0
        } else {
            (*count as f64 / total as f64) * 100.0
        };
        let bar = make_bar(pct, max_bar_width);
        let dist_cell = format!("{}  {:>5.1}%", bar, pct);
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            INDENT,
            truncate(name, name_w),
            count,
            dist_cell,
        );
    }

    if data.len() > MAX_ROWS {
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            INDENT,
            "...",
            "...",
            format!("({} more elements)", data.len() - MAX_ROWS),
        );
    }

    let _ = writeln!(
        out,
        "{}└{name_line}┴{count_line}┴{dist_line}┘",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        count_line = "─".repeat(count_w + 2),
        dist_line = "─".repeat(dist_w + 2)
    );
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{k_line}┬{v_line}┐",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w),
        );
    }
    let _ = writeln!(
        out,
        "{}└{k_line}┴{v_line}┘",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
}

fn make_bar(pct: f64, max_width: usize) -> String {
    let filled = ((pct / 100.0) * max_width as f64).round() as usize;
    let empty = max_width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

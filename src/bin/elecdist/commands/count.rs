use std::io::{self, Write};

use anyhow::{Context, Result, bail};

use elecdist::io::{BioReader, Format};
use elecdist::{AtomSelector, ElectronDistribution, Offender, System, Violation, distribute};

use crate::cli::CountArgs;
use crate::config::{
    build_distribution_config, build_protonation_config, build_topology_config,
    build_validation_options,
};
use crate::display::{
    Context as DisplayContext, Progress, print_charge_summary, print_residue_charges,
    print_structure_info,
};
use crate::io::{infer_input_format, is_stdin, open_input, stdin_is_tty};

const TOTAL_STEPS: u8 = 3;

pub fn run_count(args: CountArgs, ctx: DisplayContext) -> Result<()> {
    if is_stdin(&args.input) && stdin_is_tty() {
        bail!(
            "Input is `-` but stdin is a terminal.\n\nUsage: elecdist count <INPUT> or pipe data via stdin with --infmt."
        );
    }

    let input_format = resolve_input_format(&args)?;
    let distribution_config = build_distribution_config(&args.selection)?;
    let validation_options = build_validation_options(&args.selection);

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading structure");
    let system = read_structure(&args, input_format)?;
    let system = apply_selection(&args, system)?;
    progress.complete_step("Reading structure", &build_read_substeps(&args, input_format, &system));

    if ctx.interactive {
        print_structure_info(&system);
    }

    progress.step("Distributing electrons");
    let dist = distribute(&system, &distribution_config).context("Electron distribution failed")?;
    progress.complete_step(
        "Distributing electrons",
        &build_distribution_substeps(&args, &dist),
    );

    if ctx.interactive {
        print_charge_summary(&dist);
        print_residue_charges(&dist);
    }

    write_distribution(&args, &dist)?;

    progress.step("Validating charges");
    let substeps = if args.output.fail_fast {
        dist.check(validation_options)
            .map_err(|violation| locate_violation(&dist, violation))?;
        vec!["No problems found".to_string()]
    } else {
        let report = dist.validate(validation_options);
        if !report.is_empty() {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{}", dist.render_report(&report))
                .context("Failed to write report")?;
        }
        vec![format!("{} finding(s)", report.len())]
    };
    progress.complete_step("Validating charges", &substeps);

    progress.finish();

    Ok(())
}

fn resolve_input_format(args: &CountArgs) -> Result<Format> {
    if let Some(fmt) = args.input_format {
        return Ok(fmt.into());
    }

    if is_stdin(&args.input) {
        bail!("Reading from stdin requires --infmt");
    }

    infer_input_format(&args.input).ok_or_else(|| {
        anyhow::anyhow!(
            "Cannot infer format from '{}'. Use --infmt to specify.",
            args.input.display()
        )
    })
}

fn read_structure(args: &CountArgs, format: Format) -> Result<System> {
    let input = open_input(&args.input)?;

    let topology_config = build_topology_config(&args.preparation)?;
    let mut reader = BioReader::new(input, format).topology(topology_config);
    if let Some(protonation) = build_protonation_config(&args.preparation) {
        reader = reader.protonate(protonation);
    }

    reader.read().context("Failed to read structure")
}

fn apply_selection(args: &CountArgs, system: System) -> Result<System> {
    let Some(raw) = &args.selection.select else {
        return Ok(system);
    };
    let selector: AtomSelector = raw.parse().context("Invalid --select expression")?;
    let selected = system.select(&selector);
    log::info!(
        "selection '{}' kept {} of {} atoms",
        selector,
        selected.atom_count(),
        system.atom_count()
    );
    Ok(selected)
}

fn write_distribution(args: &CountArgs, dist: &ElectronDistribution) -> Result<()> {
    let mut stdout = io::stdout().lock();

    let rendered = if args.output.detailed {
        dist.detailed()
    } else {
        dist.to_string()
    };
    write!(stdout, "{rendered}").context("Failed to write distribution")?;

    if args.output.residues {
        write!(stdout, "{}", dist.residue_summary()).context("Failed to write residue charges")?;
    }

    Ok(())
}

fn locate_violation(dist: &ElectronDistribution, violation: Violation) -> anyhow::Error {
    let system = dist.system();
    let location = match violation.offender() {
        Offender::Atom(idx) => system.atoms[idx].label(),
        Offender::Bond(bond) => format!(
            "{} - {}",
            system.atoms[bond.i].label(),
            system.atoms[bond.j].label()
        ),
        Offender::Residue(key) => key.to_string(),
    };
    anyhow::Error::new(violation).context(format!("Validation failed at {}", location.trim()))
}

fn build_read_substeps(args: &CountArgs, format: Format, system: &System) -> Vec<String> {
    use crate::cli::HisStrategy;

    let mut steps = vec![format!("Parse {format} input")];

    let prep = &args.preparation;
    if prep.add_hydrogens && format != Format::Mol2 {
        let his_method = match prep.his {
            HisStrategy::Network => "network analysis",
            HisStrategy::Hid => "HID",
            HisStrategy::Hie => "HIE",
            HisStrategy::Random => "random",
        };
        match prep.ph {
            Some(ph) => steps.push(format!("Add hydrogens (pH {ph:.1}, HIS: {his_method})")),
            None => steps.push(format!("Add hydrogens (HIS: {his_method})")),
        }
    }

    if format != Format::Mol2 {
        steps.push(format!(
            "Detect disulfide bonds (cutoff: {:.1} Å)",
            prep.ss_cutoff
        ));
        if !prep.templates.is_empty() {
            steps.push(format!("Load {} hetero template(s)", prep.templates.len()));
        }
    }

    if let Some(select) = &args.selection.select {
        steps.push(format!("Select '{select}'"));
    }

    steps.push(format!(
        "{} atoms, {} bonds",
        system.atom_count(),
        system.bond_count()
    ));
    steps
}

fn build_distribution_substeps(args: &CountArgs, dist: &ElectronDistribution) -> Vec<String> {
    let mut steps = Vec::new();

    if let Some(alt_loc) = args.selection.alt_loc {
        steps.push(format!("Use alternate location {alt_loc}"));
    }
    if let Some(path) = &args.selection.config {
        steps.push(format!("Load settings from {}", path.display()));
    }
    if !args.selection.atom_charges.is_empty() {
        steps.push(format!(
            "Apply {} charge override(s)",
            args.selection.atom_charges.len()
        ));
    }
    steps.push(format!("Total charge {:+}", dist.total_charge()));
    steps
}

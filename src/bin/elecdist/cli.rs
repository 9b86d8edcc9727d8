use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "elecdist",
    about = "Formal electron distribution and charge checks for macromolecular structures",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: Verbosity,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Distribute electrons over a structure and report charge problems
    #[command(visible_alias = "c")]
    Count(CountArgs),

    /// Print the element property table
    #[command(visible_alias = "e")]
    Elements(ElementsArgs),
}

/// Logging and progress verbosity shared by all commands.
#[derive(Args)]
pub struct Verbosity {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output and warnings (for scripting)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Verbosity {
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Args)]
pub struct CountArgs {
    /// Input structure file, or `-` for stdin (requires --infmt)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Input format (inferred from extension if not specified)
    #[arg(long = "infmt", value_name = "FORMAT")]
    pub input_format: Option<InputFormat>,

    #[command(flatten)]
    pub selection: SelectionOptions,

    #[command(flatten)]
    pub preparation: PreparationOptions,

    #[command(flatten)]
    pub output: OutputOptions,
}

#[derive(Args)]
#[command(next_help_heading = "Selection & Charges")]
pub struct SelectionOptions {
    /// Restrict the analysis to matching atoms, e.g. "chain=A resid=12"
    #[arg(long, value_name = "SELECTOR")]
    pub select: Option<String>,

    /// Alternate location to analyze when the model has several
    #[arg(long = "alt-loc", value_name = "ID")]
    pub alt_loc: Option<char>,

    /// Formal charge override (SELECTOR:CHARGE), repeatable
    #[arg(
        long = "atom-charge",
        value_name = "SEL:Q",
        action = ArgAction::Append,
        allow_hyphen_values = true
    )]
    pub atom_charges: Vec<String>,

    /// Distribution settings (TOML file)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not require water residues to be neutral
    #[arg(long)]
    pub ignore_water: bool,
}

#[derive(Args)]
#[command(next_help_heading = "Structure Preparation")]
pub struct PreparationOptions {
    /// Add missing hydrogens before counting (PDB/mmCIF only)
    #[arg(long)]
    pub add_hydrogens: bool,

    /// Target pH for protonation state assignment
    #[arg(long, value_name = "PH", requires = "add_hydrogens")]
    pub ph: Option<f64>,

    /// Histidine tautomer selection strategy
    #[arg(long, value_name = "STRATEGY", default_value = "network")]
    pub his: HisStrategy,

    /// Disulfide bond detection cutoff (Å)
    #[arg(long = "ss-cutoff", value_name = "Å", default_value = "2.2")]
    pub ss_cutoff: f64,

    /// Hetero residue template files (MOL2), repeatable
    #[arg(long = "template", value_name = "FILE", action = ArgAction::Append)]
    pub templates: Vec<PathBuf>,
}

#[derive(Args)]
#[command(next_help_heading = "Output")]
pub struct OutputOptions {
    /// List every atom and bond entry, not only the non-zero ones
    #[arg(long)]
    pub detailed: bool,

    /// Print per-residue formal charges
    #[arg(long)]
    pub residues: bool,

    /// Stop at the first validation problem and exit with an error
    #[arg(long)]
    pub fail_fast: bool,
}

#[derive(Args)]
pub struct ElementsArgs {
    /// Element symbols to show (all when omitted)
    #[arg(value_name = "SYMBOL")]
    pub symbols: Vec<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum InputFormat {
    Pdb,
    #[value(alias = "cif")]
    Mmcif,
    Mol2,
}

impl From<InputFormat> for elecdist::io::Format {
    fn from(value: InputFormat) -> Self {
        match value {
            InputFormat::Pdb => Self::Pdb,
            InputFormat::Mmcif => Self::Mmcif,
            InputFormat::Mol2 => Self::Mol2,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum HisStrategy {
    Network,
    Hid,
    Hie,
    Random,
}

impl From<HisStrategy> for elecdist::io::HisStrategy {
    fn from(value: HisStrategy) -> Self {
        match value {
            HisStrategy::Network => Self::HbNetwork,
            HisStrategy::Hid => Self::DirectHID,
            HisStrategy::Hie => Self::DirectHIE,
            HisStrategy::Random => Self::Random,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_count_flags() {
        let cli = Cli::try_parse_from([
            "elecdist",
            "count",
            "model.pdb",
            "--atom-charge",
            "name=ZN:2",
            "--atom-charge",
            "chain=B resid=4 name=OD1:-1",
            "--alt-loc",
            "B",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbosity.log_filter(), "debug");
        let Command::Count(args) = cli.command else {
            panic!("expected count");
        };
        assert_eq!(args.selection.atom_charges.len(), 2);
        assert_eq!(args.selection.alt_loc, Some('B'));
        assert!(!args.output.fail_fast);
    }

    #[test]
    fn ph_requires_hydrogen_addition() {
        assert!(Cli::try_parse_from(["elecdist", "count", "x.pdb", "--ph", "7.0"]).is_err());
        assert!(
            Cli::try_parse_from(["elecdist", "count", "x.pdb", "--add-hydrogens", "--ph", "7.0"])
                .is_ok()
        );
    }
}

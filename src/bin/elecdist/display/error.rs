use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    let msg = err.to_string();
    for line in wrap(&msg, 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 59) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    if let Some(hints) = HintCollector::collect(err) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn new() -> Self {
        Self {
            hints: Vec::new(),
            has_typed_hints: false,
        }
    }

    fn collect(err: &Error) -> Option<Vec<String>> {
        let mut collector = Self::new();

        collector.collect_io_hints(err);
        collector.collect_distribution_hints(err);
        collector.collect_violation_hints(err);

        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        if collector.hints.is_empty() {
            None
        } else {
            Some(collector.hints)
        }
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn mark_typed(&mut self) {
        self.has_typed_hints = true;
    }

    fn collect_io_hints(&mut self, err: &Error) {
        use elecdist::io::Error as IoError;

        let Some(io_err) = err.downcast_ref::<IoError>() else {
            return;
        };

        self.mark_typed();

        match io_err {
            IoError::Io { source } => {
                self.collect_std_io_hints(source);
            }

            IoError::Parse { format, line, .. } => {
                self.add(format!(
                    "Parser encountered an issue near line {} in {} format",
                    line, format
                ));
                self.add("Inspect the file around that line for malformed entries");
                self.add("Try specifying --infmt to ensure correct format detection");
                self.add_format_specific_parse_hints(*format);
            }

            IoError::UnknownFormat(name) => {
                self.add(format!("'{}' is not a recognized structure format", name));
                self.add("Supported input formats: pdb, mmcif, mol2");
            }

            IoError::BioForgePreparation(msg) => {
                self.add("Structure preparation failed before counting");
                self.collect_bioforge_prep_hints(msg);
            }

            IoError::BioForgeIo(msg) => {
                self.add("Underlying bio-forge I/O operation failed");
                self.collect_bioforge_io_hints(msg);
            }

            IoError::Conversion(msg) => {
                self.add("Data model conversion failed between internal formats");
                if msg.to_lowercase().contains("element") {
                    self.add("Check the element columns of the input file");
                } else {
                    self.add("Input may have inconsistent bonding information");
                }
            }
        }
    }

    fn collect_std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure the file exists");
            }

            ErrorKind::PermissionDenied => {
                self.add("Permission denied accessing the file");
                self.add("Check file permissions with `ls -la`");
            }

            ErrorKind::InvalidData => {
                self.add("File contains invalid or corrupt data");
                self.add("Verify the file is not truncated or corrupted");
            }

            ErrorKind::UnexpectedEof => {
                self.add("Unexpected end of file encountered");
                self.add("The file may be truncated or incomplete");
            }

            _ => {
                self.add("I/O operation failed");
                self.add("Check file path and permissions");
            }
        }
    }

    fn add_format_specific_parse_hints(&mut self, format: elecdist::io::Format) {
        use elecdist::io::Format;

        match format {
            Format::Pdb => {
                self.add("PDB: Check ATOM/HETATM record formatting (columns 1-80)");
                self.add("PDB: Ensure proper spacing in coordinate fields");
            }

            Format::Mmcif => {
                self.add("mmCIF: Verify _atom_site loop structure and data alignment");
                self.add("mmCIF: Check for unquoted strings containing special chars");
            }

            Format::Mol2 => {
                self.add("MOL2: Verify @<TRIPOS>ATOM and @<TRIPOS>BOND sections");
                self.add("MOL2: Check that the counts line matches both sections");
            }
        }
    }

    fn collect_bioforge_prep_hints(&mut self, msg: &str) {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("residue") || msg_lower.contains("template") {
            self.add("Unknown residue encountered without a template");
            self.add("Provide a template via --template <file.mol2>");
        } else if msg_lower.contains("proton") || msg_lower.contains("hydrogen") {
            self.add("Hydrogen addition failed");
            self.add("Retry without --add-hydrogens if the model is already protonated");
        } else if msg_lower.contains("topology") || msg_lower.contains("bond") {
            self.add("Bond perception failed");
            self.add("Check --ss-cutoff for disulfide bond detection");
        } else {
            self.add("Check residue names and ensure templates are available");
        }
    }

    fn collect_bioforge_io_hints(&mut self, msg: &str) {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("parse") || msg_lower.contains("read") {
            self.add("Failed to parse input file via bio-forge");
            self.add("Verify the input file format is correct");
        } else {
            self.add("Bio-forge encountered an I/O issue");
            self.add("Verify the input file format");
        }
    }

    fn collect_distribution_hints(&mut self, err: &Error) {
        use elecdist::ElectronError;

        let Some(dist_err) = err.downcast_ref::<ElectronError>() else {
            return;
        };

        self.mark_typed();

        match dist_err {
            ElectronError::MissingValence { element, .. } => {
                self.add(format!("{} has no bonding valence (noble gas?)", element));
                self.add("Exclude the atom with --select");
            }

            ElectronError::UnresolvedMetalCharge { atom, element, .. } => {
                self.add(format!("No default charge is known for {}", element));
                self.add(format!(
                    "Supply one for {} with --atom-charge 'SELECTOR:CHARGE'",
                    atom.trim_matches('"').trim()
                ));
                self.add("Or list it under [[atom_charges]] in a --config file");
            }

            ElectronError::InvalidMetalBond { .. } => {
                self.add("Metal-metal bonds cannot be distributed");
                self.add("Check the connectivity records around the metal cluster");
            }

            ElectronError::InvalidBond { detail, .. } => {
                self.add(format!("Issue: {}", detail));
                self.add("Check input structure for malformed CONECT or BOND records");
            }

            ElectronError::EmptySystem => {
                self.add("No atoms left to analyze");
                self.add("Check the --select expression and the chosen --alt-loc");
            }

            ElectronError::AmbiguousConformers { alt_locs } => {
                let ids: Vec<String> = alt_locs.iter().map(char::to_string).collect();
                self.add(format!("Alternate locations present: {}", ids.join(", ")));
                self.add("Pick one with --alt-loc (e.g. --alt-loc A)");
            }

            ElectronError::UnknownAltLoc(_) => {
                self.add("The requested alternate location does not occur in the model");
                self.add("Omit --alt-loc or choose one listed in the input");
            }

            ElectronError::ConfigParse(_) => {
                self.add("Distribution config has invalid TOML");
                self.add("Allowed keys: alt_loc, tetra_coordinate, [[atom_charges]]");
            }
        }
    }

    fn collect_violation_hints(&mut self, err: &Error) {
        let Some(violation) = err.downcast_ref::<elecdist::Violation>() else {
            return;
        };

        self.mark_typed();
        self.add("Stopped at the first problem (--fail-fast)");
        if let Some(hint) = elecdist::hint_for(violation) {
            self.add(hint);
        }
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("stdin") || msg.contains("terminal") {
            self.add("Input appears to be from a terminal");
            self.add("Provide an input file or pipe data with `-` and --infmt");
            return;
        }

        if msg.contains("selector") || msg.contains("selection") {
            self.add("Selectors are key=value terms: chain, resname, resid, icode, name, element, altloc");
            return;
        }

        if msg.contains("no such file") || msg.contains("not found") {
            self.add("Check that the file path is correct");
            self.add("Verify the file exists and is readable");
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    let mut text = String::new();

    text.push_str(&err.to_string());

    let mut source = err.source();
    while let Some(cause) = source {
        text.push('\n');
        text.push_str(&cause.to_string());
        source = cause.source();
    }

    text.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_hints_for_distribution_errors() {
        let err = Error::new(elecdist::ElectronError::AmbiguousConformers {
            alt_locs: vec!['A', 'B'],
        });
        let hints = HintCollector::collect(&err).unwrap();
        assert!(hints.iter().any(|h| h.contains("A, B")));
        assert!(hints.iter().any(|h| h.contains("--alt-loc")));
    }

    #[test]
    fn fallback_hints_for_untyped_errors() {
        let err = anyhow::anyhow!("invalid atom selection 'colour=red'");
        let hints = HintCollector::collect(&err).unwrap();
        assert!(hints[0].contains("key=value"));
        assert!(HintCollector::collect(&anyhow::anyhow!("boom")).is_none());
    }
}

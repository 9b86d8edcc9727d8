//! Human-readable validation report with remediation hints.

use super::config::ValidationOptions;
use super::distribution::ElectronDistribution;
use super::validate::{Offender, ValidationReport, Violation};
use std::fmt::Write as _;

/// Hints for messages that recur verbatim.
const HINTS: [(&str, &str); 3] = [
    (
        "Residue HOH has a problem with the charge : -2!=0",
        "Hydrogen atoms not added to water",
    ),
    (
        "Element has strange number of electrons N : 2",
        "N terminal (or break) missing hydrogen atoms",
    ),
    (
        "Element has strange number of electrons O : -1",
        "C terminal (or break) missing oxygen atoms",
    ),
];

/// Looks up a remediation hint for a finding.
///
/// Exact message matches win; otherwise a few finding kinds carry a
/// generic hint.
pub fn hint_for(violation: &Violation) -> Option<&'static str> {
    let message = violation.to_string();
    if let Some((_, hint)) = HINTS.iter().find(|(m, _)| *m == message) {
        return Some(hint);
    }
    match violation {
        Violation::UnlikelyResidueCharge {
            charge, expected, ..
        } if charge - expected < -1 => Some("Missing side chain atoms"),
        Violation::EmptyBond { .. } => Some("Too many hydrogen atoms"),
        _ => None,
    }
}

impl ElectronDistribution {
    /// Validates and renders the findings grouped by message.
    ///
    /// Returns an empty string when nothing was found.
    pub fn report(&self, options: ValidationOptions) -> String {
        self.render_report(&self.validate(options))
    }

    /// Renders an already computed report.
    pub fn render_report(&self, report: &ValidationReport) -> String {
        if report.is_empty() {
            return String::new();
        }
        let mut out = String::from("Validation report\n");
        for (message, findings) in report.by_message() {
            let _ = writeln!(out, "\n  {message}");
            for finding in &findings {
                let _ = writeln!(out, "    {}", self.locate(&finding.offender()));
            }
            if let Some(hint) = findings.first().and_then(|v| hint_for(v)) {
                let _ = writeln!(out, "\n     HINT: {hint}");
            }
        }
        out
    }

    fn locate(&self, offender: &Offender) -> String {
        match offender {
            Offender::Atom(idx) => self.atom(*idx).label(),
            Offender::Bond(bond) => {
                format!("{} - {}", self.atom(bond.i).label(), self.atom(bond.j).label())
            }
            Offender::Residue(key) => key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::electron::config::DistributionConfig;
    use crate::electron::distribute;
    use crate::electron::testing::*;
    use crate::model::metadata::ResidueKey;
    use crate::model::system::Bond;
    use crate::model::types::Element;

    fn key(name: &str) -> ResidueKey {
        ResidueKey {
            chain_id: 'A',
            residue_id: 1,
            insertion_code: ' ',
            residue_name: name.to_string(),
        }
    }

    #[test]
    fn exact_message_hints() {
        let water = Violation::ResidueChargeMismatch {
            residue: key("HOH"),
            charge: -2,
            expected: 0,
        };
        assert_eq!(hint_for(&water), Some("Hydrogen atoms not added to water"));

        let n_term = Violation::StrangeElectronCount {
            atom: 0,
            element: Element::N,
            electrons: 2,
        };
        assert_eq!(
            hint_for(&n_term),
            Some("N terminal (or break) missing hydrogen atoms")
        );

        let c_term = Violation::StrangeElectronCount {
            atom: 0,
            element: Element::O,
            electrons: -1,
        };
        assert_eq!(
            hint_for(&c_term),
            Some("C terminal (or break) missing oxygen atoms")
        );
    }

    #[test]
    fn pattern_hints_and_unmatched_messages() {
        let short = Violation::UnlikelyResidueCharge {
            residue: key("LYS"),
            charge: -2,
            expected: 1,
        };
        assert_eq!(hint_for(&short), Some("Missing side chain atoms"));

        let surplus = Violation::UnlikelyResidueCharge {
            residue: key("ASP"),
            charge: 1,
            expected: -1,
        };
        assert_eq!(hint_for(&surplus), None);

        let empty = Violation::EmptyBond {
            bond: Bond::new(0, 1),
            first: "O".into(),
            second: "H1".into(),
        };
        assert_eq!(hint_for(&empty), Some("Too many hydrogen atoms"));

        let carbon = Violation::StrangeElectronCount {
            atom: 0,
            element: Element::C,
            electrons: 2,
        };
        assert_eq!(hint_for(&carbon), None);
    }

    #[test]
    fn report_groups_and_hints() {
        let system = system(
            vec![
                atom(Element::O, "O", "HOH", 1, [0.0; 3]),
                atom(Element::O, "O", "HOH", 2, [3.0, 0.0, 0.0]),
            ],
            &[],
        );
        let dist = distribute(&system, &DistributionConfig::default()).unwrap();
        let text = dist.report(ValidationOptions::default());
        assert!(text.starts_with("Validation report\n"));
        assert_eq!(
            text.matches("Residue HOH has a problem with the charge : -2!=0")
                .count(),
            1
        );
        assert!(text.contains("HOH A   1"));
        assert!(text.contains("HOH A   2"));
        assert!(text.contains("HINT: Hydrogen atoms not added to water"));
    }

    #[test]
    fn clean_structure_reports_nothing() {
        let dist = distribute(&make_water(), &DistributionConfig::default()).unwrap();
        assert!(dist.report(ValidationOptions::default()).is_empty());
    }
}

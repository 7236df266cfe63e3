use std::io::{self, Write};

use credit_risk::workflows::risk::{evaluate, Applicant, Portfolio, RiskEvaluation};
use serde::Serialize;

pub(crate) fn write_evaluation<W: Write>(
    out: &mut W,
    applicant: &Applicant,
    evaluation: &RiskEvaluation,
) -> io::Result<()> {
    writeln!(out, "{}", applicant.render())?;
    writeln!(
        out,
        "   DTI: {:.3} | Risk: {:<9} | Flags(bits): {}",
        evaluation.dti, evaluation.tier, evaluation.flags
    )
}

/// Per-applicant lines followed by the statistics block. Statistics are skipped when
/// the portfolio is empty.
pub(crate) fn write_portfolio_view<W: Write>(out: &mut W, portfolio: &Portfolio) -> io::Result<()> {
    let Some(summary) = portfolio.summary_statistics() else {
        return writeln!(out, "No applicants to display.");
    };

    writeln!(out, "\n--- All Applicants ---")?;
    for applicant in portfolio {
        write_evaluation(out, applicant, &evaluate(applicant))?;
    }

    writeln!(
        out,
        "\nDTI Statistics -> Min: {:.3}  Max: {:.3}  Avg: {:.3}",
        summary.min_dti, summary.max_dti, summary.mean_dti
    )?;
    writeln!(out, "Number of EXCELLENT profiles: {}", summary.excellent_count)?;

    let breakdown: Vec<String> = summary
        .tier_counts
        .iter()
        .map(|entry| format!("{} {}", entry.tier, entry.count))
        .collect();
    writeln!(out, "Tier breakdown: {}", breakdown.join(" | "))
}

#[derive(Debug, Serialize)]
pub(crate) struct ApplicantReportView<'a> {
    pub(crate) applicant: &'a Applicant,
    pub(crate) evaluation: RiskEvaluation,
    pub(crate) flag_labels: Vec<&'static str>,
}

impl<'a> ApplicantReportView<'a> {
    pub(crate) fn new(applicant: &'a Applicant) -> Self {
        let evaluation = evaluate(applicant);
        Self {
            applicant,
            evaluation,
            flag_labels: evaluation.flags.labels(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credit_risk::workflows::risk::EmploymentCategory;

    fn render_to_string(portfolio: &Portfolio) -> String {
        let mut out = Vec::new();
        write_portfolio_view(&mut out, portfolio).expect("write to vec");
        String::from_utf8(out).expect("utf8 output")
    }

    #[test]
    fn empty_portfolio_prints_placeholder_only() {
        assert_eq!(render_to_string(&Portfolio::new()), "No applicants to display.\n");
    }

    #[test]
    fn view_lists_applicants_then_statistics() {
        let mut portfolio = Portfolio::new();
        portfolio.add(Applicant::new(
            "Meera",
            29,
            40_000.0,
            EmploymentCategory::SelfEmployed,
            600_000.0,
            4,
            0.11,
            "ICICI",
        ));

        let output = render_to_string(&portfolio);

        assert!(output.contains(
            "Name: Meera      | Bank: ICICI      | Loan: 600000.00 | Years: 4 | Rate: 11.00%"
        ));
        assert!(output.contains("   DTI: 0.450 | Risk: FAIR      | Flags(bits): 001"));
        assert!(output.contains("DTI Statistics -> Min: 0.450  Max: 0.450  Avg: 0.450"));
        assert!(output.contains("Number of EXCELLENT profiles: 0"));
        assert!(output.contains("Tier breakdown: EXCELLENT 0 | GOOD 0 | FAIR 1 | POOR 0"));
    }
}

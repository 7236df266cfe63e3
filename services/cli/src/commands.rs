use std::io::{self, Write};

use clap::{Args, ValueEnum};
use credit_risk::config::AppConfig;
use credit_risk::error::AppError;
use credit_risk::workflows::risk::{
    evaluate, total_payable_compound, total_payable_simple, Applicant, EmploymentCategory,
    FileRecordStore, LoadReport, PortfolioSummary, RecordStore,
};
use serde::Serialize;

use crate::render::{write_evaluation, write_portfolio_view, ApplicantReportView};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum CategoryArg {
    Salaried,
    SelfEmployed,
    Student,
}

impl From<CategoryArg> for EmploymentCategory {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::Salaried => EmploymentCategory::Salaried,
            CategoryArg::SelfEmployed => EmploymentCategory::SelfEmployed,
            CategoryArg::Student => EmploymentCategory::Student,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Applicant name
    #[arg(long)]
    pub(crate) name: String,
    /// Applicant age in years
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) age: i32,
    /// Monthly income
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) income: f64,
    /// Employment category
    #[arg(long, value_enum)]
    pub(crate) category: CategoryArg,
    /// Requested loan amount
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) loan: f64,
    /// Repayment period in years
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) years: i32,
    /// Yearly interest rate as a fraction (0.08 for 8%)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) rate: f64,
    /// Lending bank
    #[arg(long)]
    pub(crate) bank: String,
    /// Print the evaluation as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl EvaluateArgs {
    fn applicant(&self) -> Applicant {
        Applicant::new(
            self.name.clone(),
            self.age,
            self.income,
            self.category.into(),
            self.loan,
            self.years,
            self.rate,
            self.bank.clone(),
        )
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct PortfolioReportView<'a> {
    source: String,
    applicants: Vec<ApplicantReportView<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<PortfolioSummary>,
    malformed_rows: usize,
    rejected_rows: usize,
}

pub(crate) fn run_interactive(config: &AppConfig) -> Result<(), AppError> {
    let store = FileRecordStore::new(config.storage.data_file.clone());
    let stdin = io::stdin();
    let mut session = Session::new(
        store,
        config.storage.invalid_rows,
        stdin.lock(),
        io::stdout(),
    );
    session.run()?;
    Ok(())
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let mut stdout = io::stdout().lock();
    write_applicant_evaluation(&mut stdout, &args)?;
    Ok(())
}

pub(crate) fn run_report(config: &AppConfig, args: ReportArgs) -> Result<(), AppError> {
    let store = FileRecordStore::new(config.storage.data_file.clone());
    let report = store.load(config.storage.invalid_rows)?;
    let mut stdout = io::stdout().lock();
    write_report(&mut stdout, &store.location(), &report, args.json)?;
    Ok(())
}

fn write_applicant_evaluation<W: Write>(out: &mut W, args: &EvaluateArgs) -> io::Result<()> {
    let applicant = args.applicant();

    if args.json {
        let view = ApplicantReportView::new(&applicant);
        serde_json::to_writer_pretty(&mut *out, &view)?;
        return writeln!(out);
    }

    let evaluation = evaluate(&applicant);
    write_evaluation(out, &applicant, &evaluation)?;
    writeln!(
        out,
        "   Adjusted DTI ({}): {:.3}",
        applicant.employment_category().label(),
        evaluation.adjusted_dti
    )?;
    writeln!(
        out,
        "   Total payable: {:.2} simple | {:.2} compounded yearly",
        total_payable_simple(args.loan, args.years, args.rate),
        total_payable_compound(args.loan, args.years, args.rate)
    )?;
    let labels = evaluation.flags.labels();
    if labels.is_empty() {
        writeln!(out, "   Risk flags: none")
    } else {
        writeln!(out, "   Risk flags: {}", labels.join(", "))
    }
}

fn write_report<W: Write>(
    out: &mut W,
    source: &str,
    report: &LoadReport,
    json: bool,
) -> io::Result<()> {
    if json {
        let view = PortfolioReportView {
            source: source.to_string(),
            applicants: report
                .portfolio
                .iter()
                .map(ApplicantReportView::new)
                .collect(),
            summary: report.portfolio.summary_statistics(),
            malformed_rows: report.malformed_rows,
            rejected_rows: report.rejected_rows.len(),
        };
        serde_json::to_writer_pretty(&mut *out, &view)?;
        return writeln!(out);
    }

    writeln!(
        out,
        "Loaded {} applicants from {}",
        report.portfolio.len(),
        source
    )?;
    for rejected in &report.rejected_rows {
        writeln!(out, "Skipped line {}: {}", rejected.line, rejected.error)?;
    }
    write_portfolio_view(out, &report.portfolio)
}

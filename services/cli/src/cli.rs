use std::path::PathBuf;

use clap::{Parser, Subcommand};
use credit_risk::config::AppConfig;
use credit_risk::error::AppError;
use credit_risk::telemetry;
use credit_risk::workflows::risk::InvalidRowPolicy;
use tracing::info;

use crate::commands::{run_evaluate, run_interactive, run_report, EvaluateArgs, ReportArgs};

#[derive(Parser, Debug)]
#[command(
    name = "Smart Credit Score Predictor",
    about = "Estimate loan applicant credit risk and manage a flat-file applicant portfolio",
    version
)]
struct Cli {
    /// Override the configured applicant data file
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,
    /// Stop a load at the first unreadable row instead of skipping it
    #[arg(long, global = true)]
    abort_on_invalid_rows: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the interactive menu (default command)
    Interactive,
    /// Evaluate a single applicant without touching the data file
    Evaluate(EvaluateArgs),
    /// Load the data file and print every applicant with portfolio statistics
    Report(ReportArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(data_file) = cli.data_file {
        config.storage.data_file = data_file;
    }
    if cli.abort_on_invalid_rows {
        config.storage.invalid_rows = InvalidRowPolicy::Abort;
    }

    telemetry::init(&config.telemetry)?;
    info!(?config.environment, data_file = %config.storage.data_file.display(), "credit score predictor starting");

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => run_interactive(&config),
        Command::Evaluate(args) => run_evaluate(args),
        Command::Report(args) => run_report(&config, args),
    }
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
    fn defaults_to_interactive_without_subcommand() {
        let cli = Cli::try_parse_from(["credit-score"]).expect("parses");
        assert!(cli.command.is_none());
        assert!(!cli.abort_on_invalid_rows);
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "credit-score",
            "report",
            "--data-file",
            "/tmp/profiles.txt",
            "--abort-on-invalid-rows",
        ])
        .expect("parses");

        assert!(matches!(cli.command, Some(Command::Report(_))));
        assert_eq!(cli.data_file, Some(PathBuf::from("/tmp/profiles.txt")));
        assert!(cli.abort_on_invalid_rows);
    }
}

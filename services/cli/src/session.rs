use std::io::{self, BufRead, Write};
use std::str::FromStr;

use credit_risk::workflows::risk::{
    Applicant, EmploymentCategory, InvalidRowPolicy, LoadError, Portfolio, RecordStore,
    StoreError,
};
use tracing::info;

use crate::render::write_portfolio_view;

const TITLE: &str = "Smart Credit Score Predictor";

enum Flow {
    Continue,
    Exit,
}

/// Menu-driven session owning the in-memory portfolio for the life of the process.
pub(crate) struct Session<S, R, W> {
    portfolio: Portfolio,
    store: S,
    policy: InvalidRowPolicy,
    input: R,
    output: W,
}

impl<S, R, W> Session<S, R, W>
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    pub(crate) fn new(store: S, policy: InvalidRowPolicy, input: R, output: W) -> Self {
        Self {
            portfolio: Portfolio::new(),
            store,
            policy,
            input,
            output,
        }
    }

    #[cfg(test)]
    pub(crate) fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.output
    }

    /// Runs until the operator picks Exit or input is closed.
    pub(crate) fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt_parsed::<i32>("Enter your choice: ", "integer")? else {
                break;
            };

            let flow = match choice {
                1 => self.add_applicant()?,
                2 => self.view()?,
                3 => self.save()?,
                4 => self.load()?,
                5 => Flow::Exit,
                _ => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                break;
            }
        }

        writeln!(self.output, "Thank you for using {TITLE}.")?;
        self.output.flush()
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n===== {TITLE} =====")?;
        writeln!(self.output, "1. Add Applicant Profile")?;
        writeln!(self.output, "2. View All Applicants & Statistics")?;
        writeln!(self.output, "3. Save Applicants to File")?;
        writeln!(self.output, "4. Load Applicants from File")?;
        writeln!(self.output, "5. Exit")
    }

    fn add_applicant(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "\n--- Add Applicant ---")?;

        let Some(name) = self.prompt_required("Name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(age) = self.prompt_parsed("Age: ", "integer")? else {
            return Ok(Flow::Exit);
        };
        let Some(income) = self.prompt_parsed("Monthly Income: ", "number")? else {
            return Ok(Flow::Exit);
        };
        let Some(category) = self.prompt_category()? else {
            return Ok(Flow::Exit);
        };
        let Some(loan_amount) = self.prompt_parsed("Loan Amount: ", "number")? else {
            return Ok(Flow::Exit);
        };
        let Some(years) = self.prompt_parsed("Repayment Period (years): ", "integer")? else {
            return Ok(Flow::Exit);
        };
        let Some(rate) = self.prompt_parsed(
            "Yearly Interest Rate (decimal, e.g., 0.08 for 8%): ",
            "number",
        )?
        else {
            return Ok(Flow::Exit);
        };
        let Some(bank_name) = self.prompt_required("Bank Name: ")? else {
            return Ok(Flow::Exit);
        };

        let applicant =
            Applicant::new(name, age, income, category, loan_amount, years, rate, bank_name);
        info!(category = %applicant.employment_category(), "applicant added");
        self.portfolio.add(applicant);
        writeln!(self.output, "Applicant added successfully.")?;
        Ok(Flow::Continue)
    }

    fn view(&mut self) -> io::Result<Flow> {
        write_portfolio_view(&mut self.output, &self.portfolio)?;
        Ok(Flow::Continue)
    }

    fn save(&mut self) -> io::Result<Flow> {
        match self.store.save(&self.portfolio) {
            Ok(()) => writeln!(
                self.output,
                "Applicants saved to {}",
                self.store.location()
            )?,
            Err(err) => {
                tracing::error!(error = %err, "save failed");
                writeln!(self.output, "Error while saving: {err}")?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Replaces the portfolio on success. Any failure leaves the current portfolio untouched.
    fn load(&mut self) -> io::Result<Flow> {
        match self.store.load(self.policy) {
            Ok(report) => {
                self.portfolio = report.portfolio;
                writeln!(
                    self.output,
                    "Loaded {} applicants from {}",
                    self.portfolio.len(),
                    self.store.location()
                )?;
                if !report.rejected_rows.is_empty() {
                    writeln!(
                        self.output,
                        "Skipped {} unreadable row(s).",
                        report.rejected_rows.len()
                    )?;
                }
            }
            Err(StoreError::Load(LoadError::InvalidRow {
                line,
                source,
                loaded,
            })) => {
                tracing::error!(line, error = %source, "load aborted");
                writeln!(
                    self.output,
                    "Error while loading: line {line}: {source} ({} row(s) read before it; nothing replaced)",
                    loaded.len()
                )?;
            }
            Err(err) => {
                tracing::error!(error = %err, "load failed");
                writeln!(self.output, "Error while loading: {err}")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn prompt_category(&mut self) -> io::Result<Option<EmploymentCategory>> {
        loop {
            writeln!(
                self.output,
                "Employment Type: 1.Salaried  2.Self-Employed  3.Student"
            )?;
            let Some(choice) = self.prompt_parsed::<i32>("Choose (1-3): ", "integer")? else {
                return Ok(None);
            };
            let category = match choice {
                1 => EmploymentCategory::Salaried,
                2 => EmploymentCategory::SelfEmployed,
                3 => EmploymentCategory::Student,
                _ => {
                    writeln!(self.output, "Invalid choice, try again.")?;
                    continue;
                }
            };
            return Ok(Some(category));
        }
    }

    /// Re-prompts until the line parses. `None` means input was closed.
    fn prompt_parsed<T: FromStr>(&mut self, message: &str, kind: &str) -> io::Result<Option<T>> {
        loop {
            let Some(line) = self.prompt_text(message)? else {
                return Ok(None);
            };
            match line.trim().parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "Please enter a valid {kind}.")?,
            }
        }
    }

    /// Trims the answer and re-prompts while it is empty.
    fn prompt_required(&mut self, message: &str) -> io::Result<Option<String>> {
        loop {
            let Some(line) = self.prompt_text(message)? else {
                return Ok(None);
            };
            let value = line.trim();
            if value.is_empty() {
                writeln!(self.output, "This field cannot be empty.")?;
                continue;
            }
            return Ok(Some(value.to_string()));
        }
    }

    fn prompt_text(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

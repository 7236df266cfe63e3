use std::io::Read;
use std::str::FromStr;

use csv::{ByteRecord, StringRecord};
use serde::{Deserialize, Serialize};

use super::super::domain::{Applicant, EmploymentCategory, UnknownCategory};
use super::Portfolio;

pub(crate) const FIELD_COUNT: usize = 8;

/// What to do with a row that has eight fields but cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidRowPolicy {
    /// Drop the row, keep loading, and report it.
    #[default]
    Skip,
    /// Stop at the row and hand back what was loaded before it.
    Abort,
}

impl InvalidRowPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "skip" => Some(Self::Skip),
            "abort" => Some(Self::Abort),
            _ => None,
        }
    }
}

/// Reason a well-shaped row was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),
    #[error("field '{field}' has invalid value '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    pub line: u64,
    pub error: RowError,
}

/// Result of reading record lines into a fresh portfolio.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub portfolio: Portfolio,
    /// Rows dropped for having the wrong number of fields.
    pub malformed_rows: usize,
    /// Rows with eight fields that failed to parse, skipped under [`InvalidRowPolicy::Skip`].
    pub rejected_rows: Vec<RejectedRow>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read record lines: {0}")]
    Read(#[from] csv::Error),
    #[error("line {line}: {source}")]
    InvalidRow {
        line: u64,
        source: RowError,
        loaded: Portfolio,
    },
}

pub(crate) fn read_portfolio<R: Read>(
    mut reader: R,
    policy: InvalidRowPolicy,
) -> Result<LoadReport, LoadError> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input).map_err(csv::Error::from)?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(input.as_slice());
    let mut lines = LineCounter::new(&input);
    let mut report = LoadReport::default();

    for record in csv_reader.byte_records() {
        let raw = record?;
        let line = raw
            .position()
            .map_or(0, |position| lines.line_at(position.byte()));
        let record = decode_record(raw, line);

        if record.len() != FIELD_COUNT {
            tracing::debug!(line, fields = record.len(), "skipping malformed record line");
            report.malformed_rows += 1;
            continue;
        }

        match parse_applicant(&record) {
            Ok(applicant) => report.portfolio.add(applicant),
            Err(error) => match policy {
                InvalidRowPolicy::Skip => {
                    tracing::warn!(line, %error, "skipping invalid record line");
                    report.rejected_rows.push(RejectedRow { line, error });
                }
                InvalidRowPolicy::Abort => {
                    return Err(LoadError::InvalidRow {
                        line,
                        source: error,
                        loaded: report.portfolio,
                    });
                }
            },
        }
    }

    Ok(report)
}

/// Non-UTF-8 bytes become U+FFFD so one badly encoded row does not end the load.
fn decode_record(raw: ByteRecord, line: u64) -> StringRecord {
    match StringRecord::from_byte_record(raw) {
        Ok(record) => record,
        Err(error) => {
            tracing::debug!(line, error = %error.utf8_error(), "decoding record line lossily");
            error
                .into_byte_record()
                .iter()
                .map(String::from_utf8_lossy)
                .collect()
        }
    }
}

/// Maps record byte offsets to 1-based physical line numbers, blank lines included.
///
/// The reader reports a record's offset before it skips the blank lines ahead of it, so
/// line terminators at the offset are stepped over first. Offsets must be non-decreasing.
struct LineCounter<'a> {
    input: &'a [u8],
    scanned: usize,
    line: u64,
}

impl<'a> LineCounter<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            scanned: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, offset: u64) -> u64 {
        let mut start = usize::try_from(offset)
            .unwrap_or(usize::MAX)
            .clamp(self.scanned, self.input.len());
        while matches!(self.input.get(start), Some(b'\r' | b'\n')) {
            start += 1;
        }

        let newlines = self.input[self.scanned..start]
            .iter()
            .filter(|&&byte| byte == b'\n')
            .count();
        self.line += newlines as u64;
        self.scanned = start;
        self.line
    }
}

fn parse_applicant(record: &StringRecord) -> Result<Applicant, RowError> {
    let age = parse_field(record, 1, "age")?;
    let monthly_income = parse_field(record, 2, "monthly_income")?;
    let category: EmploymentCategory = record[3].parse()?;

    Ok(Applicant::new(
        &record[0],
        age,
        monthly_income,
        category,
        parse_field(record, 4, "loan_amount")?,
        parse_field(record, 5, "repayment_years")?,
        parse_field(record, 6, "yearly_interest_rate")?,
        &record[7],
    ))
}

fn parse_field<T: FromStr>(
    record: &StringRecord,
    index: usize,
    field: &'static str,
) -> Result<T, RowError> {
    let raw = &record[index];
    raw.parse().map_err(|_| RowError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
pub(crate) fn parse_line_for_tests(line: &str) -> Result<Applicant, RowError> {
    let record = StringRecord::from(line.split(',').collect::<Vec<_>>());
    parse_applicant(&record)
}

mod codec;
mod summary;

pub use codec::{InvalidRowPolicy, LoadError, LoadReport, RejectedRow, RowError};
pub use summary::{PortfolioSummary, TierCountEntry};

#[cfg(test)]
pub(crate) use codec::parse_line_for_tests;

use std::io::Read;

use serde::{Deserialize, Serialize};

use super::domain::Applicant;

/// Ordered collection of applicants owned by the running session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Portfolio {
    applicants: Vec<Applicant>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends without deduplication.
    pub fn add(&mut self, applicant: Applicant) {
        self.applicants.push(applicant);
    }

    pub fn applicants(&self) -> &[Applicant] {
        &self.applicants
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Applicant> {
        self.applicants.iter()
    }

    pub fn len(&self) -> usize {
        self.applicants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applicants.is_empty()
    }

    pub fn clear(&mut self) {
        self.applicants.clear();
    }

    /// `None` when the portfolio is empty.
    pub fn summary_statistics(&self) -> Option<PortfolioSummary> {
        summary::summarize(&self.applicants)
    }

    /// One record line per applicant, in insertion order.
    pub fn serialize(&self) -> Vec<String> {
        self.applicants.iter().map(Applicant::to_record_line).collect()
    }

    /// Builds a new portfolio from record lines read out of `reader`.
    ///
    /// Lines without exactly eight fields are dropped and only counted. Rows that have eight
    /// fields but fail to parse are handled according to `policy`.
    pub fn deserialize<R: Read>(
        reader: R,
        policy: InvalidRowPolicy,
    ) -> Result<LoadReport, LoadError> {
        codec::read_portfolio(reader, policy)
    }

    pub fn from_lines<I, S>(lines: I, policy: InvalidRowPolicy) -> Result<LoadReport, LoadError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut buffer = String::new();
        for line in lines {
            buffer.push_str(line.as_ref());
            buffer.push('\n');
        }
        Self::deserialize(buffer.as_bytes(), policy)
    }
}

impl From<Vec<Applicant>> for Portfolio {
    fn from(applicants: Vec<Applicant>) -> Self {
        Self { applicants }
    }
}

impl FromIterator<Applicant> for Portfolio {
    fn from_iter<T: IntoIterator<Item = Applicant>>(iter: T) -> Self {
        Self {
            applicants: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Portfolio {
    type Item = &'a Applicant;
    type IntoIter = std::slice::Iter<'a, Applicant>;

    fn into_iter(self) -> Self::IntoIter {
        self.applicants.iter()
    }
}

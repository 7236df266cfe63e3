use std::fs;
use std::path::{Path, PathBuf};

use super::portfolio::{InvalidRowPolicy, LoadError, LoadReport, Portfolio};

/// Storage abstraction so the session can be exercised without touching disk.
pub trait RecordStore {
    fn save(&self, portfolio: &Portfolio) -> Result<(), StoreError>;
    fn load(&self, policy: InvalidRowPolicy) -> Result<LoadReport, StoreError>;
    fn location(&self) -> String;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Flat text file holding one record line per applicant.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    path: PathBuf,
}

impl FileRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl RecordStore for FileRecordStore {
    /// Writes a sibling staging file and renames it over the target, so a failed save
    /// leaves the previous file intact.
    fn save(&self, portfolio: &Portfolio) -> Result<(), StoreError> {
        let mut contents = String::new();
        for line in portfolio.serialize() {
            contents.push_str(&line);
            contents.push('\n');
        }

        let staging = self.staging_path();
        fs::write(&staging, contents).map_err(|source| StoreError::Io {
            action: "failed to write",
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &self.path).map_err(|source| {
            let _ = fs::remove_file(&staging);
            StoreError::Io {
                action: "failed to replace",
                path: self.path.clone(),
                source,
            }
        })?;

        tracing::info!(path = %self.path.display(), applicants = portfolio.len(), "portfolio saved");
        Ok(())
    }

    fn load(&self, policy: InvalidRowPolicy) -> Result<LoadReport, StoreError> {
        let file = fs::File::open(&self.path).map_err(|source| StoreError::Io {
            action: "failed to open",
            path: self.path.clone(),
            source,
        })?;
        let report = Portfolio::deserialize(file, policy)?;

        tracing::info!(
            path = %self.path.display(),
            applicants = report.portfolio.len(),
            malformed = report.malformed_rows,
            rejected = report.rejected_rows.len(),
            "portfolio loaded"
        );
        Ok(report)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

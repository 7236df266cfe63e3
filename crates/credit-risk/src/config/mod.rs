use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::workflows::risk::InvalidRowPolicy;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub storage: StorageConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("CREDIT_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let data_file = env::var("CREDIT_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_FILE));

        let invalid_rows = match env::var("CREDIT_INVALID_ROWS") {
            Ok(raw) => InvalidRowPolicy::parse(&raw)
                .ok_or(ConfigError::InvalidRowPolicy { value: raw })?,
            Err(_) => InvalidRowPolicy::default(),
        };

        let log_level = env::var("CREDIT_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        Ok(Self {
            environment,
            storage: StorageConfig {
                data_file,
                invalid_rows,
            },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
        })
    }
}

pub const DEFAULT_DATA_FILE: &str = "credit_profiles.txt";

/// Where applicant records live and how unreadable rows are treated on load.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_file: PathBuf,
    pub invalid_rows: InvalidRowPolicy,
}

/// Tracing controls. Colored output is only used in development.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidRowPolicy { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidRowPolicy { value } => write!(
                f,
                "CREDIT_INVALID_ROWS must be 'skip' or 'abort' (got '{}')",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

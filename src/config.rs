use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_BUDGET_PERIOD: &str = "February 2024";
pub const DEFAULT_PERFORMANCE_PERIOD: &str = "March 2024";

/// Top-level configuration for the reporting CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub reports: ReportConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let data_dir =
            PathBuf::from(env::var("REPORTS_DATA_DIR").unwrap_or_else(|_| "data".to_string()));
        let output_dir =
            PathBuf::from(env::var("REPORTS_OUTPUT_DIR").unwrap_or_else(|_| ".".to_string()));

        let seed = match env::var("REPORTS_SEED") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed(raw))?,
            ),
            _ => None,
        };

        let budget_period = env::var("REPORTS_BUDGET_PERIOD")
            .unwrap_or_else(|_| DEFAULT_BUDGET_PERIOD.to_string());
        let performance_period = env::var("REPORTS_PERFORMANCE_PERIOD")
            .unwrap_or_else(|_| DEFAULT_PERFORMANCE_PERIOD.to_string());

        let log_level = env::var("REPORTS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            data_dir,
            output_dir,
            reports: ReportConfig {
                seed,
                budget_period,
                performance_period,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Knobs that change report contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Fixes the synthetic figures (monthly budgets, satisfaction bonus,
    /// fallback timesheets) so runs are reproducible.
    pub seed: Option<u64>,
    pub budget_period: String,
    pub performance_period: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            seed: None,
            budget_period: DEFAULT_BUDGET_PERIOD.to_string(),
            performance_period: DEFAULT_PERFORMANCE_PERIOD.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("REPORTS_SEED must be an unsigned integer, got '{0}'")]
    InvalidSeed(String),
}

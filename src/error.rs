use crate::config::ConfigError;
use crate::store::StoreError;
use crate::telemetry::TelemetryError;
use thiserror::Error;

/// Top-level error for report generation and the CLI around it.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{collection} unavailable: {source}")]
    DataUnavailable {
        collection: &'static str,
        #[source]
        source: StoreError,
    },
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl ReportError {
    pub(crate) fn unavailable(collection: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::DataUnavailable { collection, source }
    }
}

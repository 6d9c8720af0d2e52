//! Contractor workforce reporting.
//!
//! Reads contractor, timesheet and baseline spend records through a
//! [`RecordStore`] and aggregates them into three JSON reports: a
//! contractor summary, a budget analysis and a performance metrics
//! report. [`ReportEngine`] is the entry point.

pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod output;
pub mod reports;
pub mod store;
pub mod telemetry;
pub mod types;
pub mod util;

pub use config::{AppConfig, ReportConfig};
pub use engine::{EngineOptions, ReportEngine};
pub use error::ReportError;
pub use reports::{Report, ReportKind};
pub use store::{CsvStore, MemoryStore, RecordStore, StoreError};
pub use types::{BaselineSnapshot, Contractor, ContractorStatus, TimesheetEntry};

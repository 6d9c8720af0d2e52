//! Record store access.
//!
//! The report engine only depends on [`RecordStore`]; where the records
//! come from (CSV exports, an in-memory fixture) is the caller's choice.

use crate::loader;
use crate::types::{BaselineSnapshot, Contractor, TimesheetEntry};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{collection} is not available from this store")]
    Unavailable { collection: &'static str },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed csv in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("malformed json in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read contract for the collections reports are built from.
pub trait RecordStore {
    fn contractors(&self) -> Result<Vec<Contractor>, StoreError>;

    /// May report [`StoreError::Unavailable`] instead of an empty list
    /// when the store has no timesheet feed at all.
    fn timesheets(&self) -> Result<Vec<TimesheetEntry>, StoreError>;

    fn baseline_snapshot(&self) -> Result<BaselineSnapshot, StoreError>;
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn contractors(&self) -> Result<Vec<Contractor>, StoreError> {
        (**self).contractors()
    }

    fn timesheets(&self) -> Result<Vec<TimesheetEntry>, StoreError> {
        (**self).timesheets()
    }

    fn baseline_snapshot(&self) -> Result<BaselineSnapshot, StoreError> {
        (**self).baseline_snapshot()
    }
}

/// Store backed by values held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contractors: Vec<Contractor>,
    timesheets: Option<Vec<TimesheetEntry>>,
    baseline: BaselineSnapshot,
}

impl MemoryStore {
    pub fn new(contractors: Vec<Contractor>) -> Self {
        Self {
            contractors,
            ..Self::default()
        }
    }

    pub fn with_timesheets(mut self, timesheets: Vec<TimesheetEntry>) -> Self {
        self.timesheets = Some(timesheets);
        self
    }

    pub fn with_baseline(mut self, baseline: BaselineSnapshot) -> Self {
        self.baseline = baseline;
        self
    }
}

impl RecordStore for MemoryStore {
    fn contractors(&self) -> Result<Vec<Contractor>, StoreError> {
        Ok(self.contractors.clone())
    }

    fn timesheets(&self) -> Result<Vec<TimesheetEntry>, StoreError> {
        self.timesheets.clone().ok_or(StoreError::Unavailable {
            collection: "timesheets",
        })
    }

    fn baseline_snapshot(&self) -> Result<BaselineSnapshot, StoreError> {
        Ok(self.baseline.clone())
    }
}

/// Store reading the exports found in a data directory:
/// `contractors.csv`, `timesheets.csv` and `baseline.json`.
#[derive(Debug, Clone)]
pub struct CsvStore {
    root: PathBuf,
}

impl CsvStore {
    pub const CONTRACTORS_FILE: &'static str = "contractors.csv";
    pub const TIMESHEETS_FILE: &'static str = "timesheets.csv";
    pub const BASELINE_FILE: &'static str = "baseline.json";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl RecordStore for CsvStore {
    fn contractors(&self) -> Result<Vec<Contractor>, StoreError> {
        let path = self.root.join(Self::CONTRACTORS_FILE);
        let (contractors, report) = loader::load_contractors(&path)?;
        info!(
            path = %path.display(),
            rows = report.total_rows,
            loaded = report.loaded_rows,
            skipped = report.parse_errors,
            "loaded contractors"
        );
        Ok(contractors)
    }

    fn timesheets(&self) -> Result<Vec<TimesheetEntry>, StoreError> {
        let path = self.root.join(Self::TIMESHEETS_FILE);
        if !path.exists() {
            return Err(StoreError::Unavailable {
                collection: "timesheets",
            });
        }
        let (entries, report) = loader::load_timesheets(&path)?;
        info!(
            path = %path.display(),
            rows = report.total_rows,
            loaded = report.loaded_rows,
            skipped = report.parse_errors,
            "loaded timesheets"
        );
        Ok(entries)
    }

    fn baseline_snapshot(&self) -> Result<BaselineSnapshot, StoreError> {
        loader::load_baseline(&self.root.join(Self::BASELINE_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_without_timesheets_reports_unavailable() {
        let store = MemoryStore::new(vec![Contractor::new(1, "Ada", "Tech", "active")]);
        assert_eq!(store.contractors().expect("contractors").len(), 1);
        assert!(matches!(
            store.timesheets(),
            Err(StoreError::Unavailable {
                collection: "timesheets"
            })
        ));
    }

    #[test]
    fn csv_store_missing_timesheet_file_is_unavailable() {
        let store = CsvStore::new(std::env::temp_dir().join("contractor-reports-no-such-dir"));
        assert!(matches!(
            store.timesheets(),
            Err(StoreError::Unavailable { .. })
        ));
        assert!(matches!(store.contractors(), Err(StoreError::Csv { .. })));
    }
}

use crate::store::StoreError;
use crate::types::{
    BaselineSnapshot, Contractor, ContractorStatus, RawContractorRow, RawTimesheetRow,
    TimesheetEntry,
};
use crate::util::{clean_text, parse_f64_safe, parse_i64_safe, parse_u32_safe};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub parse_errors: usize,
}

fn csv_error(path: &Path) -> impl FnOnce(csv::Error) -> StoreError + '_ {
    move |source| StoreError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

pub fn load_contractors(path: &Path) -> Result<(Vec<Contractor>, LoadReport), StoreError> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_error(path))?;
    let mut report = LoadReport::default();
    let mut contractors = Vec::new();

    for (line, result) in rdr.deserialize::<RawContractorRow>().enumerate() {
        report.total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(err) => {
                warn!(line = line + 2, error = %err, "skipping unreadable contractor row");
                report.parse_errors += 1;
                continue;
            }
        };

        let Some(id) = parse_u32_safe(row.id.as_deref()) else {
            warn!(line = line + 2, "skipping contractor row without a numeric id");
            report.parse_errors += 1;
            continue;
        };

        let status = clean_text(row.status)
            .map(ContractorStatus::from)
            .unwrap_or(ContractorStatus::Inactive);

        contractors.push(Contractor {
            id,
            name: clean_text(row.name).unwrap_or_else(|| format!("Contractor {id}")),
            department: clean_text(row.department).unwrap_or_else(|| "Unassigned".to_string()),
            status,
            hourly_rate: parse_f64_safe(row.hourly_rate.as_deref()),
            monthly_cost: parse_f64_safe(row.monthly_cost.as_deref()),
            days_remaining: parse_i64_safe(row.days_remaining.as_deref()),
        });
    }

    report.loaded_rows = contractors.len();
    Ok((contractors, report))
}

pub fn load_timesheets(path: &Path) -> Result<(Vec<TimesheetEntry>, LoadReport), StoreError> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_error(path))?;
    let mut report = LoadReport::default();
    let mut entries = Vec::new();

    for (line, result) in rdr.deserialize::<RawTimesheetRow>().enumerate() {
        report.total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(err) => {
                warn!(line = line + 2, error = %err, "skipping unreadable timesheet row");
                report.parse_errors += 1;
                continue;
            }
        };

        let Some(contractor_id) = parse_u32_safe(row.contractor_id.as_deref()) else {
            report.parse_errors += 1;
            continue;
        };

        // Blank measures fall back to the placeholder figures rather than
        // dropping the contractor from the period.
        entries.push(TimesheetEntry {
            contractor_id,
            hours_worked: parse_f64_safe(row.hours_worked.as_deref())
                .unwrap_or(TimesheetEntry::PLACEHOLDER_HOURS),
            projects_completed: parse_u32_safe(row.projects_completed.as_deref())
                .unwrap_or(TimesheetEntry::PLACEHOLDER_PROJECTS),
            efficiency: parse_f64_safe(row.efficiency.as_deref())
                .unwrap_or(TimesheetEntry::PLACEHOLDER_EFFICIENCY),
        });
    }

    report.loaded_rows = entries.len();
    Ok((entries, report))
}

pub fn load_baseline(path: &Path) -> Result<BaselineSnapshot, StoreError> {
    let raw = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

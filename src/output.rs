use crate::error::ReportError;
use crate::reports::Report;
use crate::util::{format_amount, format_int};
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};
use tracing::info;

pub fn to_json<T: Serialize>(value: &T) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ReportError> {
    let s = to_json(value)?;
    std::fs::write(path, s)?;
    info!(path = %path.display(), "wrote json");
    Ok(())
}

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    info!(path = %path.display(), rows = rows.len(), "wrote csv");
    Ok(())
}

/// Writes the main breakdown of a report, one row per department.
pub fn write_report_csv(path: &Path, report: &Report) -> Result<(), ReportError> {
    match report {
        Report::ContractorSummary(r) => write_csv(path, &r.department_breakdown),
        Report::BudgetAnalysis(r) => write_csv(path, &r.department_breakdown),
        Report::PerformanceMetrics(r) => write_csv(path, &r.department_performance),
    }
}

pub fn render_table<T>(rows: &[T], max_rows: usize) -> String
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(slice).with(Style::markdown()).to_string()
}

pub fn preview_table<T>(title: &str, note: Option<&str>, rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    println!("\n{}", title);
    if let Some(n) = note {
        println!("({})", n);
    }
    println!();
    println!("{}\n", render_table(rows, max_rows));
}

/// Prints the headline line and main table of a generated report.
pub fn preview_report(report: &Report, max_rows: usize) {
    let title = report.kind().title();
    match report {
        Report::ContractorSummary(r) => {
            let note = format!(
                "{} contractors, {} active, monthly cost ${}",
                format_int(r.summary.total_contractors as u64),
                format_int(r.summary.active_contractors as u64),
                format_amount(r.summary.total_monthly_cost)
            );
            preview_table(title, Some(&note), &r.department_breakdown, max_rows);
            preview_table("Status Distribution", None, &r.status_distribution, max_rows);
        }
        Report::BudgetAnalysis(r) => {
            let note = format!(
                "{}: budget ${}, actual ${}, variance {}%",
                r.summary.budget_period,
                format_int(r.summary.total_budget),
                format_amount(r.summary.actual_spend),
                r.summary.variance_percentage
            );
            preview_table(title, Some(&note), &r.department_breakdown, max_rows);
            for alert in &r.budget_alerts {
                println!("[{}] {}: {}", alert.severity.label(), alert.department, alert.message);
            }
        }
        Report::PerformanceMetrics(r) => {
            let note = format!(
                "{}: {} contractors, avg efficiency {}%",
                r.summary.performance_period,
                format_int(r.summary.total_contractors as u64),
                r.summary.avg_efficiency
            );
            preview_table(title, Some(&note), &r.department_performance, max_rows);
            preview_table("Top Performers", None, &r.top_performers, max_rows);
        }
    }
}

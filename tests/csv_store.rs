//! End-to-end runs over the sample exports in `data/`.

use contractor_reports::output;
use contractor_reports::reports::{AlertSeverity, PerformanceRating, Report, ReportKind};
use contractor_reports::{CsvStore, EngineOptions, RecordStore, ReportEngine};
use std::path::PathBuf;

fn sample_store() -> CsvStore {
    CsvStore::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"))
}

fn engine() -> ReportEngine<CsvStore> {
    ReportEngine::new(sample_store(), EngineOptions::seeded(17))
}

#[test]
fn loads_sample_collections() {
    let store = sample_store();
    let contractors = store.contractors().expect("contractors");
    assert_eq!(contractors.len(), 10);
    assert_eq!(contractors[0].monthly_cost, Some(21_000.0));
    assert!(contractors[8].is_active());

    assert_eq!(store.timesheets().expect("timesheets").len(), 7);
    assert_eq!(store.baseline_snapshot().expect("baseline").department_breakdown.len(), 6);
}

#[test]
fn contractor_summary_from_sample_data() {
    let report = engine().build_contractor_summary().expect("summary");

    assert_eq!(report.summary.total_contractors, 10);
    assert_eq!(report.summary.active_contractors, 7);
    assert_eq!(report.summary.active_departments, 5);
    assert_eq!(report.summary.total_monthly_cost, 111_000.0);

    let order: Vec<_> = report
        .department_breakdown
        .iter()
        .map(|d| d.department.as_str())
        .collect();
    assert_eq!(
        order,
        vec!["Technology", "Risk Management", "Operations", "Finance", "Analytics", "Compliance"]
    );
    // Tom's zero rate is left out of the Technology average.
    assert_eq!(report.department_breakdown[0].average_rate, 118);

    let statuses: Vec<_> = report
        .status_distribution
        .iter()
        .map(|s| (s.status.as_str(), s.percentage))
        .collect();
    assert_eq!(statuses, vec![("Active", 70), ("Inactive", 20), ("Pending", 10)]);

    assert_eq!(report.contract_analysis.ending_in_30_days, 2);
    assert_eq!(report.contract_analysis.ending_in_60_days, 2);
    assert_eq!(report.contract_analysis.long_term, 3);
}

#[test]
fn budget_analysis_from_sample_data() {
    let report = engine().build_budget_analysis().expect("budget");

    assert_eq!(report.summary.total_budget, 600_000);
    assert_eq!(report.summary.actual_spend, 587_500.0);
    assert_eq!(report.summary.variance, 12_500.0);
    assert_eq!(report.summary.variance_percentage, 2);
    assert_eq!(report.cost_analysis.budget_utilization, 98);
    assert_eq!(report.cost_analysis.avg_cost_per_contractor, 83_929);
    assert_eq!(report.cost_analysis.highest_spend_dept.as_deref(), Some("Technology"));

    let alerts: Vec<_> = report
        .budget_alerts
        .iter()
        .map(|a| (a.department.as_str(), a.severity))
        .collect();
    assert_eq!(
        alerts,
        vec![
            ("Technology", AlertSeverity::Critical),
            ("Risk Management", AlertSeverity::Warning),
            ("Operations", AlertSeverity::Warning),
            ("Finance", AlertSeverity::Warning),
        ]
    );
    assert_eq!(report.budget_alerts[0].message, "Over budget by 8% ($18,000)");
    assert_eq!(report.monthly_trends.len(), 5);
    assert_eq!(report.department_breakdown.last().map(|d| d.department.as_str()), Some("Analytics"));
}

#[test]
fn performance_metrics_from_sample_data() {
    let report = engine().build_performance_metrics().expect("performance");

    assert_eq!(report.summary.total_contractors, 7);
    assert_eq!(report.summary.total_hours_worked, 1095.0);
    assert_eq!(report.summary.total_projects_completed, 41);
    assert_eq!(report.summary.avg_efficiency, 83);
    assert_eq!(report.summary.avg_hours_per_contractor, 156);
    assert_eq!(report.summary.performance_period, "March 2024");

    let categories = &report.performance_categories;
    assert_eq!(
        (categories.high_performers, categories.good_performers, categories.needs_improvement),
        (2, 4, 1)
    );
    assert_eq!(categories.high_performer_percentage, 29);

    assert_eq!(report.department_performance[0].department, "Risk Management");
    assert_eq!(report.top_performers[0].name, "Sarah Chen");
    assert_eq!(report.top_performers[0].rating, PerformanceRating::Excellent);
    // Tom has no timesheet and gets the placeholder efficiency.
    let tom = report
        .top_performers
        .iter()
        .find(|p| p.name == "Tom Becker")
        .expect("Tom");
    assert_eq!((tom.hours_worked, tom.projects_completed, tom.efficiency), (150.0, 5, 75.0));

    assert_eq!(report.insights.len(), 1);
    assert_eq!(report.insights[0].message, "Risk Management leads with 91% efficiency");
    assert_eq!(report.kpi_metrics.project_completion_rate, 98);
    assert_eq!(report.kpi_metrics.utilization_rate, 98);
    assert!((83..=92).contains(&report.kpi_metrics.client_satisfaction));
}

#[test]
fn overview_reads_baseline_headline() {
    let overview = engine().dashboard_overview().expect("overview");
    assert_eq!(overview.total_contractors, 47);
    assert_eq!(overview.active_departments, 6);
    assert_eq!(overview.avg_contract_length, 8);
}

#[test]
fn exports_report_json_and_csv() {
    let dir = std::env::temp_dir().join(format!("contractor-reports-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let json_path = dir.join("budget-analysis.json");
    let csv_path = dir.join("budget-analysis.csv");

    let report = engine().build(ReportKind::BudgetAnalysis).expect("report");
    output::write_json(&json_path, &report).expect("json");
    output::write_report_csv(&csv_path, &report).expect("csv");

    let back: Report =
        serde_json::from_str(&std::fs::read_to_string(&json_path).expect("read json"))
            .expect("parse json");
    assert_eq!(back, report);

    let csv = std::fs::read_to_string(&csv_path).expect("read csv");
    assert_eq!(
        csv.lines().next(),
        Some("department,budget,actual,variance,usagePercentage,contractors")
    );
    assert_eq!(csv.lines().count(), 7);
    std::fs::remove_dir_all(&dir).ok();
}

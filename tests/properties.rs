//! Property-based checks over arbitrary contractor collections.

use contractor_reports::reports::Report;
use contractor_reports::types::{Contractor, TimesheetEntry};
use contractor_reports::{EngineOptions, MemoryStore, ReportEngine};
use proptest::prelude::*;

const DEPARTMENTS: [&str; 5] = ["Technology", "Finance", "Operations", "Analytics", "Legal"];
const STATUSES: [&str; 4] = ["active", "inactive", "pending", "on-hold"];

fn contractor_strategy() -> impl Strategy<Value = (usize, usize, Option<u32>, Option<u32>, Option<i64>)> {
    (
        0..DEPARTMENTS.len(),
        0..STATUSES.len(),
        proptest::option::of(0u32..250),
        proptest::option::of(0u32..30_000),
        proptest::option::of(-30i64..400),
    )
}

fn contractors_strategy() -> impl Strategy<Value = Vec<Contractor>> {
    prop::collection::vec(contractor_strategy(), 0..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (dept, status, rate, cost, days))| {
                let id = i as u32 + 1;
                let mut c = Contractor::new(id, format!("C{id}"), DEPARTMENTS[dept], STATUSES[status]);
                c.hourly_rate = rate.map(f64::from);
                c.monthly_cost = cost.map(f64::from);
                c.days_remaining = days;
                c
            })
            .collect()
    })
}

/// Timesheets for a subset of ids; the rest fall back to placeholders.
fn timesheets_strategy() -> impl Strategy<Value = Vec<TimesheetEntry>> {
    prop::collection::vec((1u32..45, 0u32..300, 0u32..15, 0u32..=100), 0..40).prop_map(|rows| {
        rows.into_iter()
            .map(|(contractor_id, hours, projects, efficiency)| TimesheetEntry {
                contractor_id,
                hours_worked: f64::from(hours),
                projects_completed: projects,
                efficiency: f64::from(efficiency),
            })
            .collect()
    })
}

fn in_percent_range(value: i64) -> bool {
    (0..=100).contains(&value)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn department_counts_cover_every_contractor(contractors in contractors_strategy()) {
        let total = contractors.len();
        let mut engine = ReportEngine::new(MemoryStore::new(contractors), EngineOptions::seeded(1));
        let report = engine.build_contractor_summary().expect("summary");

        let counted: usize = report
            .department_breakdown
            .iter()
            .map(|d| d.active_count + d.inactive_count)
            .sum();
        prop_assert_eq!(counted, total);
        prop_assert_eq!(report.summary.total_contractors, total);
    }

    #[test]
    fn status_percentages_are_bounded(contractors in contractors_strategy()) {
        let mut engine = ReportEngine::new(MemoryStore::new(contractors), EngineOptions::seeded(1));
        let report = engine.build_contractor_summary().expect("summary");

        for share in &report.status_distribution {
            prop_assert!(in_percent_range(share.percentage), "{:?}", share);
        }
    }

    #[test]
    fn performance_percentages_are_bounded(
        contractors in contractors_strategy(),
        timesheets in timesheets_strategy(),
        seed in any::<u64>(),
    ) {
        let store = MemoryStore::new(contractors).with_timesheets(timesheets);
        let mut engine = ReportEngine::new(store, EngineOptions::seeded(seed));
        let report = engine.build_performance_metrics().expect("performance");

        let categories = &report.performance_categories;
        prop_assert!(in_percent_range(categories.high_performer_percentage));
        prop_assert!(in_percent_range(categories.good_performer_percentage));
        prop_assert!(in_percent_range(categories.needs_improvement_percentage));
        prop_assert_eq!(
            categories.high_performers + categories.good_performers + categories.needs_improvement,
            report.summary.total_contractors
        );
        for dept in &report.department_performance {
            prop_assert!(in_percent_range(dept.high_performer_rate), "{:?}", dept);
        }
        prop_assert!(report.kpi_metrics.client_satisfaction <= 95);
        prop_assert!(report.top_performers.len() <= 10);
    }

    #[test]
    fn reports_survive_json_round_trip(
        contractors in contractors_strategy(),
        timesheets in timesheets_strategy(),
    ) {
        let store = MemoryStore::new(contractors).with_timesheets(timesheets);
        let mut engine = ReportEngine::new(store, EngineOptions::seeded(5));

        for report in [
            Report::from(engine.build_contractor_summary().expect("summary")),
            Report::from(engine.build_performance_metrics().expect("performance")),
        ] {
            let json = serde_json::to_string(&report).expect("serialize");
            let back: Report = serde_json::from_str(&json).expect("deserialize");
            prop_assert_eq!(back, report);
        }
    }
}

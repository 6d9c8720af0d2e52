use super::model::{
    DepartmentPerformance, Insight, InsightKind, KpiMetrics, MonthlyPerformance,
    PerformanceCategories, PerformanceMetricsReport, PerformanceRating, PerformanceSummary,
    ReportStamp, TopPerformer,
};
use super::DepartmentMap;
use crate::types::{Contractor, TimesheetEntry};
use crate::util::{percentage, ratio, round_half_up, rounded_mean};
use rand::Rng;
use std::collections::HashMap;
use tracing::debug;

pub const HIGH_PERFORMER_EFFICIENCY: f64 = 90.0;
pub const GOOD_PERFORMER_EFFICIENCY: f64 = 75.0;
pub const TOP_PERFORMER_LIMIT: usize = 10;

/// Monthly targets the KPI block is measured against.
pub const PROJECTS_TARGET: f64 = 6.0;
pub const HOURS_TARGET: f64 = 160.0;

const STRONG_TEAM_EFFICIENCY: i64 = 85;
const HIGH_PERFORMER_SHARE: f64 = 0.3;
const CLIENT_SATISFACTION_CAP: i64 = 95;

/// Closed months shown ahead of the current period:
/// (month, avg efficiency, projects completed, hours worked).
const HISTORY: [(&str, i64, u64, f64); 2] = [
    ("Jan 2024", 78, 145, 6240.0),
    ("Feb 2024", 82, 167, 6890.0),
];

/// Plausible stand-in timesheets, one per contractor, for when the
/// timesheet feed cannot be read.
pub fn synthesize_timesheets<R: Rng>(
    contractors: &[Contractor],
    rng: &mut R,
) -> Vec<TimesheetEntry> {
    contractors
        .iter()
        .map(|c| TimesheetEntry {
            contractor_id: c.id,
            hours_worked: f64::from(rng.random_range(120u32..280)),
            projects_completed: rng.random_range(2u32..10),
            efficiency: f64::from(rng.random_range(70u32..100)),
        })
        .collect()
}

pub fn build<R: Rng>(
    stamp: ReportStamp,
    contractors: &[Contractor],
    timesheets: &[TimesheetEntry],
    performance_period: &str,
    rng: &mut R,
) -> PerformanceMetricsReport {
    #[derive(Default)]
    struct Acc {
        contractor_count: usize,
        total_hours: f64,
        total_projects: u64,
        total_efficiency: f64,
        high_performers: usize,
    }

    // First entry wins when a contractor has several.
    let mut by_contractor: HashMap<u32, &TimesheetEntry> = HashMap::new();
    for entry in timesheets {
        by_contractor.entry(entry.contractor_id).or_insert(entry);
    }

    let resolved: Vec<(&Contractor, TimesheetEntry)> = contractors
        .iter()
        .filter(|c| c.is_active())
        .map(|c| {
            let record = by_contractor
                .get(&c.id)
                .map(|entry| (*entry).clone())
                .unwrap_or_else(|| TimesheetEntry::placeholder(c.id));
            (c, record)
        })
        .collect();

    let count = resolved.len();
    let total_hours_worked: f64 = resolved.iter().map(|(_, r)| r.hours_worked).sum();
    let total_projects_completed: u64 = resolved
        .iter()
        .map(|(_, r)| u64::from(r.projects_completed))
        .sum();
    let efficiencies: Vec<f64> = resolved.iter().map(|(_, r)| r.efficiency).collect();
    let avg_efficiency = rounded_mean(&efficiencies);
    let avg_hours_per_contractor = round_half_up(ratio(total_hours_worked, count as f64));

    let mut categories = PerformanceCategories::default();
    for efficiency in &efficiencies {
        if *efficiency >= HIGH_PERFORMER_EFFICIENCY {
            categories.high_performers += 1;
        } else if *efficiency >= GOOD_PERFORMER_EFFICIENCY {
            categories.good_performers += 1;
        } else {
            categories.needs_improvement += 1;
        }
    }
    categories.high_performer_percentage =
        percentage(categories.high_performers as f64, count as f64);
    categories.good_performer_percentage =
        percentage(categories.good_performers as f64, count as f64);
    categories.needs_improvement_percentage =
        percentage(categories.needs_improvement as f64, count as f64);

    let mut departments: DepartmentMap<Acc> = DepartmentMap::new();
    for (contractor, record) in &resolved {
        let acc = departments.entry(&contractor.department);
        acc.contractor_count += 1;
        acc.total_hours += record.hours_worked;
        acc.total_projects += u64::from(record.projects_completed);
        acc.total_efficiency += record.efficiency;
        if record.efficiency >= HIGH_PERFORMER_EFFICIENCY {
            acc.high_performers += 1;
        }
    }

    let mut department_performance: Vec<DepartmentPerformance> = departments
        .into_groups()
        .map(|(department, acc)| {
            let n = acc.contractor_count as f64;
            DepartmentPerformance {
                department,
                contractor_count: acc.contractor_count,
                avg_hours: round_half_up(ratio(acc.total_hours, n)),
                avg_projects: round_half_up(ratio(acc.total_projects as f64, n)),
                avg_efficiency: round_half_up(ratio(acc.total_efficiency, n)),
                high_performer_rate: percentage(acc.high_performers as f64, n),
                total_projects: acc.total_projects,
            }
        })
        .collect();
    department_performance.sort_by(|a, b| b.avg_efficiency.cmp(&a.avg_efficiency));

    let mut ranked: Vec<TopPerformer> = resolved
        .iter()
        .map(|(contractor, record)| TopPerformer {
            name: contractor.name.clone(),
            department: contractor.department.clone(),
            hours_worked: record.hours_worked,
            projects_completed: record.projects_completed,
            efficiency: record.efficiency,
            rating: PerformanceRating::for_efficiency(record.efficiency),
        })
        .collect();
    ranked.sort_by(|a, b| b.efficiency.total_cmp(&a.efficiency));
    ranked.truncate(TOP_PERFORMER_LIMIT);

    let mut monthly_performance: Vec<MonthlyPerformance> = HISTORY
        .iter()
        .map(|(month, efficiency, projects, hours)| MonthlyPerformance {
            month: (*month).to_string(),
            avg_efficiency: *efficiency,
            projects_completed: *projects,
            hours_worked: *hours,
        })
        .collect();
    monthly_performance.push(MonthlyPerformance {
        month: performance_period.to_string(),
        avg_efficiency,
        projects_completed: total_projects_completed,
        hours_worked: total_hours_worked,
    });

    let insights = build_insights(
        avg_efficiency,
        department_performance.first(),
        categories.high_performers,
        count,
    );

    let satisfaction_bonus: i64 = rng.random_range(0..10);
    let kpi_metrics = KpiMetrics {
        project_completion_rate: percentage(
            total_projects_completed as f64,
            count as f64 * PROJECTS_TARGET,
        ),
        utilization_rate: percentage(total_hours_worked, count as f64 * HOURS_TARGET),
        quality_score: avg_efficiency,
        client_satisfaction: (avg_efficiency + satisfaction_bonus).min(CLIENT_SATISFACTION_CAP),
    };

    debug!(
        active = count,
        timesheets = timesheets.len(),
        departments = department_performance.len(),
        "aggregated performance metrics"
    );

    PerformanceMetricsReport {
        report_id: stamp.report_id,
        generated_at: stamp.generated_at,
        summary: PerformanceSummary {
            total_contractors: count,
            avg_efficiency,
            total_projects_completed,
            total_hours_worked,
            avg_hours_per_contractor,
            performance_period: performance_period.to_string(),
        },
        performance_categories: categories,
        department_performance,
        top_performers: ranked,
        monthly_performance,
        insights,
        kpi_metrics,
    }
}

fn build_insights(
    avg_efficiency: i64,
    top_department: Option<&DepartmentPerformance>,
    high_performers: usize,
    count: usize,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    // An empty population has no team efficiency to judge.
    let judged = count > 0;
    if judged && avg_efficiency >= STRONG_TEAM_EFFICIENCY {
        insights.push(Insight {
            kind: InsightKind::Success,
            title: "Strong Overall Performance".to_string(),
            message: format!("Team efficiency of {avg_efficiency}% exceeds target benchmarks"),
        });
    } else if judged && (avg_efficiency as f64) < GOOD_PERFORMER_EFFICIENCY {
        insights.push(Insight {
            kind: InsightKind::Warning,
            title: "Performance Below Target".to_string(),
            message: format!(
                "Team efficiency of {avg_efficiency}% requires attention and improvement plans"
            ),
        });
    }

    if let Some(dept) = top_department {
        insights.push(Insight {
            kind: InsightKind::Info,
            title: "Top Performing Department".to_string(),
            message: format!(
                "{} leads with {}% efficiency",
                dept.department, dept.avg_efficiency
            ),
        });
    }

    if ratio(high_performers as f64, count as f64) > HIGH_PERFORMER_SHARE {
        insights.push(Insight {
            kind: InsightKind::Success,
            title: "Strong Talent Pool".to_string(),
            message: format!(
                "{}% of contractors are high performers",
                percentage(high_performers as f64, count as f64)
            ),
        });
    }

    insights
}

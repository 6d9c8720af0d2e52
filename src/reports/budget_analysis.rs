use super::budget::BudgetTable;
use super::model::{
    AlertSeverity, BudgetAlert, BudgetAnalysisReport, BudgetSummary, CostAnalysis,
    DepartmentBudget, MonthlyBudgetTrend, ReportStamp, Trend,
};
use super::DepartmentMap;
use crate::types::{BaselineSnapshot, Contractor};
use crate::util::{format_amount, percentage, ratio, round_half_up};
use rand::Rng;
use tracing::debug;

const WARNING_USAGE: i64 = 90;
const CRITICAL_USAGE: i64 = 100;

/// Spend above `budget * UP_FACTOR` trends up, below `budget * DOWN_FACTOR`
/// trends down.
const UP_FACTOR: f64 = 1.05;
const DOWN_FACTOR: f64 = 0.9;

pub fn build<R: Rng>(
    stamp: ReportStamp,
    contractors: &[Contractor],
    baseline: &BaselineSnapshot,
    table: &BudgetTable,
    budget_period: &str,
    rng: &mut R,
) -> BudgetAnalysisReport {
    #[derive(Default)]
    struct Acc {
        spend: f64,
        contractors: u32,
    }

    let total_budget = table.total();
    let actual_spend = baseline.monthly_spend;
    let variance = total_budget as f64 - actual_spend;

    // The feed should carry one row per department; repeated rows are folded.
    let mut departments: DepartmentMap<Acc> = DepartmentMap::new();
    for row in &baseline.department_breakdown {
        let acc = departments.entry(&row.department);
        acc.spend += row.spend;
        acc.contractors += row.contractors;
    }

    let mut department_breakdown: Vec<DepartmentBudget> = departments
        .into_groups()
        .map(|(department, acc)| {
            let budget = table.ceiling(&department);
            DepartmentBudget {
                usage_percentage: percentage(acc.spend, budget as f64),
                variance: budget as f64 - acc.spend,
                actual: acc.spend,
                contractors: acc.contractors,
                budget,
                department,
            }
        })
        .collect();

    let budget_alerts: Vec<BudgetAlert> = department_breakdown
        .iter()
        .filter_map(department_alert)
        .collect();

    let monthly_trends: Vec<MonthlyBudgetTrend> = baseline
        .monthly_trends
        .iter()
        .map(|month| {
            let jitter: f64 = rng.random();
            let budget = round_half_up(
                total_budget as f64 * 0.95 + jitter * 0.1 * total_budget as f64,
            );
            MonthlyBudgetTrend {
                month: month.month.clone(),
                budget,
                actual: month.spend,
                variance: budget as f64 - month.spend,
                trend: classify_trend(month.spend, budget as f64),
            }
        })
        .collect();

    let active_contractors = contractors.iter().filter(|c| c.is_active()).count();
    let highest = department_breakdown
        .iter()
        .fold(None::<&DepartmentBudget>, |max, dept| match max {
            Some(current) if dept.actual <= current.actual => Some(current),
            _ => Some(dept),
        });

    let cost_analysis = CostAnalysis {
        avg_cost_per_contractor: round_half_up(ratio(actual_spend, active_contractors as f64)),
        highest_spend_dept: highest.map(|d| d.department.clone()),
        highest_spend_amount: highest.map(|d| d.actual).unwrap_or(0.0),
        budget_utilization: percentage(actual_spend, total_budget as f64),
    };

    debug!(
        departments = department_breakdown.len(),
        alerts = budget_alerts.len(),
        months = monthly_trends.len(),
        "aggregated budget analysis"
    );

    department_breakdown.sort_by(|a, b| b.actual.total_cmp(&a.actual));

    BudgetAnalysisReport {
        report_id: stamp.report_id,
        generated_at: stamp.generated_at,
        summary: BudgetSummary {
            budget_period: budget_period.to_string(),
            total_budget,
            actual_spend,
            variance,
            variance_percentage: percentage(variance, total_budget as f64),
        },
        department_breakdown,
        budget_alerts,
        monthly_trends,
        cost_analysis,
    }
}

fn department_alert(dept: &DepartmentBudget) -> Option<BudgetAlert> {
    let (severity, message) = if dept.usage_percentage > CRITICAL_USAGE {
        (
            AlertSeverity::Critical,
            format!(
                "Over budget by {}% (${})",
                dept.usage_percentage - CRITICAL_USAGE,
                format_amount(dept.variance.abs())
            ),
        )
    } else if dept.usage_percentage > WARNING_USAGE {
        (
            AlertSeverity::Warning,
            format!(
                "At {}% of budget - monitor closely",
                dept.usage_percentage
            ),
        )
    } else {
        return None;
    };

    Some(BudgetAlert {
        department: dept.department.clone(),
        severity,
        message,
    })
}

fn classify_trend(spend: f64, budget: f64) -> Trend {
    if spend > budget * UP_FACTOR {
        Trend::Up
    } else if spend < budget * DOWN_FACTOR {
        Trend::Down
    } else {
        Trend::Neutral
    }
}

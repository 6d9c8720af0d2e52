use super::model::{
    ContractAnalysis, ContractorSummary, ContractorSummaryReport, DepartmentBreakdown,
    ReportStamp, StatusShare,
};
use super::DepartmentMap;
use crate::types::{Contractor, ContractorStatus};
use crate::util::{percentage, round_half_up};
use tracing::debug;

pub fn build(stamp: ReportStamp, contractors: &[Contractor]) -> ContractorSummaryReport {
    #[derive(Default)]
    struct Acc {
        active_count: usize,
        inactive_count: usize,
        total_rate: f64,
        rate_count: usize,
        monthly_cost: f64,
    }

    let total_contractors = contractors.len();
    let mut active_contractors = 0usize;
    let mut total_monthly_cost = 0.0;
    let mut departments: DepartmentMap<Acc> = DepartmentMap::new();
    let mut statuses: Vec<(ContractorStatus, usize)> = Vec::new();
    let mut contract_analysis = ContractAnalysis::default();

    for c in contractors {
        let acc = departments.entry(&c.department);
        if c.is_active() {
            let cost = c.monthly_cost.unwrap_or(0.0);
            active_contractors += 1;
            total_monthly_cost += cost;
            acc.active_count += 1;
            acc.monthly_cost += cost;

            match c.days_remaining.unwrap_or(0) {
                d if d <= 30 => contract_analysis.ending_in_30_days += 1,
                d if d <= 60 => contract_analysis.ending_in_60_days += 1,
                _ => contract_analysis.long_term += 1,
            }
        } else {
            acc.inactive_count += 1;
        }

        // A zero rate counts as "no rate on file".
        if let Some(rate) = c.hourly_rate.filter(|r| *r != 0.0) {
            acc.total_rate += rate;
            acc.rate_count += 1;
        }

        match statuses.iter_mut().find(|(status, _)| *status == c.status) {
            Some((_, count)) => *count += 1,
            None => statuses.push((c.status.clone(), 1)),
        }
    }

    debug!(
        contractors = total_contractors,
        departments = departments.len(),
        statuses = statuses.len(),
        "aggregated contractor summary"
    );

    let mut department_breakdown: Vec<DepartmentBreakdown> = departments
        .into_groups()
        .map(|(department, acc)| DepartmentBreakdown {
            department,
            active_count: acc.active_count,
            inactive_count: acc.inactive_count,
            total_rate: acc.total_rate,
            rate_count: acc.rate_count,
            monthly_cost: acc.monthly_cost,
            average_rate: if acc.rate_count > 0 {
                round_half_up(acc.total_rate / acc.rate_count as f64)
            } else {
                0
            },
        })
        .collect();

    let mut status_distribution: Vec<StatusShare> = statuses
        .into_iter()
        .map(|(status, count)| StatusShare {
            status: status.label(),
            count,
            percentage: percentage(count as f64, total_contractors as f64),
        })
        .collect();

    let active_departments = department_breakdown
        .iter()
        .filter(|d| d.active_count > 0)
        .count();

    department_breakdown.sort_by(|a, b| b.active_count.cmp(&a.active_count));
    status_distribution.sort_by(|a, b| b.count.cmp(&a.count));

    ContractorSummaryReport {
        report_id: stamp.report_id,
        generated_at: stamp.generated_at,
        summary: ContractorSummary {
            total_contractors,
            active_contractors,
            active_departments,
            total_monthly_cost,
        },
        department_breakdown,
        status_distribution,
        contract_analysis,
    }
}

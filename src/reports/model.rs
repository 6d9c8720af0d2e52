//! Report shapes as exported to JSON.
//!
//! Field names are camelCase on the wire; the `reportType` tag selects the
//! variant. Every type derives `Deserialize` and `PartialEq` so an exported
//! document can be read back and compared.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tabled::Tabled;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    ContractorSummary,
    BudgetAnalysis,
    PerformanceMetrics,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [
        ReportKind::ContractorSummary,
        ReportKind::BudgetAnalysis,
        ReportKind::PerformanceMetrics,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContractorSummary => "contractor-summary",
            Self::BudgetAnalysis => "budget-analysis",
            Self::PerformanceMetrics => "performance-metrics",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::ContractorSummary => "Contractor Summary",
            Self::BudgetAnalysis => "Budget Analysis",
            Self::PerformanceMetrics => "Performance Metrics",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "unknown report type '{0}' (expected contractor-summary, budget-analysis or performance-metrics)"
)]
pub struct UnknownReportKind(pub String);

impl FromStr for ReportKind {
    type Err = UnknownReportKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownReportKind(s.to_string()))
    }
}

/// Identity of one generated report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportStamp {
    pub report_id: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reportType")]
pub enum Report {
    #[serde(rename = "contractor-summary")]
    ContractorSummary(ContractorSummaryReport),
    #[serde(rename = "budget-analysis")]
    BudgetAnalysis(BudgetAnalysisReport),
    #[serde(rename = "performance-metrics")]
    PerformanceMetrics(PerformanceMetricsReport),
}

impl Report {
    pub fn kind(&self) -> ReportKind {
        match self {
            Self::ContractorSummary(_) => ReportKind::ContractorSummary,
            Self::BudgetAnalysis(_) => ReportKind::BudgetAnalysis,
            Self::PerformanceMetrics(_) => ReportKind::PerformanceMetrics,
        }
    }

    pub fn report_id(&self) -> &str {
        match self {
            Self::ContractorSummary(r) => &r.report_id,
            Self::BudgetAnalysis(r) => &r.report_id,
            Self::PerformanceMetrics(r) => &r.report_id,
        }
    }
}

impl From<ContractorSummaryReport> for Report {
    fn from(value: ContractorSummaryReport) -> Self {
        Self::ContractorSummary(value)
    }
}

impl From<BudgetAnalysisReport> for Report {
    fn from(value: BudgetAnalysisReport) -> Self {
        Self::BudgetAnalysis(value)
    }
}

impl From<PerformanceMetricsReport> for Report {
    fn from(value: PerformanceMetricsReport) -> Self {
        Self::PerformanceMetrics(value)
    }
}

// ---------------------------------------------------------------------------
// Contractor summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractorSummaryReport {
    pub report_id: String,
    pub generated_at: DateTime<Utc>,
    pub summary: ContractorSummary,
    pub department_breakdown: Vec<DepartmentBreakdown>,
    pub status_distribution: Vec<StatusShare>,
    pub contract_analysis: ContractAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractorSummary {
    pub total_contractors: usize,
    pub active_contractors: usize,
    pub active_departments: usize,
    pub total_monthly_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentBreakdown {
    #[tabled(rename = "Department")]
    pub department: String,
    #[tabled(rename = "Active")]
    pub active_count: usize,
    #[tabled(rename = "Inactive")]
    pub inactive_count: usize,
    #[tabled(skip)]
    pub total_rate: f64,
    #[tabled(skip)]
    pub rate_count: usize,
    #[tabled(rename = "MonthlyCost")]
    pub monthly_cost: f64,
    #[tabled(rename = "AvgRate")]
    pub average_rate: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct StatusShare {
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Count")]
    pub count: usize,
    #[tabled(rename = "Percentage")]
    pub percentage: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractAnalysis {
    #[serde(rename = "endingIn30Days")]
    pub ending_in_30_days: usize,
    #[serde(rename = "endingIn60Days")]
    pub ending_in_60_days: usize,
    #[serde(rename = "longTerm")]
    pub long_term: usize,
}

// ---------------------------------------------------------------------------
// Budget analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAnalysisReport {
    pub report_id: String,
    pub generated_at: DateTime<Utc>,
    pub summary: BudgetSummary,
    pub department_breakdown: Vec<DepartmentBudget>,
    pub budget_alerts: Vec<BudgetAlert>,
    pub monthly_trends: Vec<MonthlyBudgetTrend>,
    pub cost_analysis: CostAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub budget_period: String,
    pub total_budget: i64,
    pub actual_spend: f64,
    pub variance: f64,
    pub variance_percentage: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentBudget {
    #[tabled(rename = "Department")]
    pub department: String,
    #[tabled(rename = "Budget")]
    pub budget: i64,
    #[tabled(rename = "Actual")]
    pub actual: f64,
    #[tabled(rename = "Variance")]
    pub variance: f64,
    #[tabled(rename = "Usage%")]
    pub usage_percentage: i64,
    #[tabled(rename = "Contractors")]
    pub contractors: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
    Warning,
}

impl AlertSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Warning => "Warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAlert {
    pub department: String,
    pub severity: AlertSeverity,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBudgetTrend {
    pub month: String,
    pub budget: i64,
    pub actual: f64,
    pub variance: f64,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostAnalysis {
    pub avg_cost_per_contractor: i64,
    /// `None` when the baseline has no department rows.
    pub highest_spend_dept: Option<String>,
    pub highest_spend_amount: f64,
    pub budget_utilization: i64,
}

// ---------------------------------------------------------------------------
// Performance metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetricsReport {
    pub report_id: String,
    pub generated_at: DateTime<Utc>,
    pub summary: PerformanceSummary,
    pub performance_categories: PerformanceCategories,
    pub department_performance: Vec<DepartmentPerformance>,
    pub top_performers: Vec<TopPerformer>,
    pub monthly_performance: Vec<MonthlyPerformance>,
    pub insights: Vec<Insight>,
    pub kpi_metrics: KpiMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    /// Active contractors only.
    pub total_contractors: usize,
    pub avg_efficiency: i64,
    pub total_projects_completed: u64,
    pub total_hours_worked: f64,
    pub avg_hours_per_contractor: i64,
    pub performance_period: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceCategories {
    pub high_performers: usize,
    pub good_performers: usize,
    pub needs_improvement: usize,
    pub high_performer_percentage: i64,
    pub good_performer_percentage: i64,
    pub needs_improvement_percentage: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentPerformance {
    #[tabled(rename = "Department")]
    pub department: String,
    #[tabled(rename = "Contractors")]
    pub contractor_count: usize,
    #[tabled(rename = "AvgHours")]
    pub avg_hours: i64,
    #[tabled(rename = "AvgProjects")]
    pub avg_projects: i64,
    #[tabled(rename = "AvgEfficiency")]
    pub avg_efficiency: i64,
    #[tabled(rename = "HighPerformer%")]
    pub high_performer_rate: i64,
    #[tabled(rename = "TotalProjects")]
    pub total_projects: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceRating {
    Excellent,
    Good,
    Average,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl PerformanceRating {
    pub fn for_efficiency(efficiency: f64) -> Self {
        if efficiency >= 90.0 {
            Self::Excellent
        } else if efficiency >= 80.0 {
            Self::Good
        } else if efficiency >= 70.0 {
            Self::Average
        } else {
            Self::NeedsImprovement
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl fmt::Display for PerformanceRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformer {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Department")]
    pub department: String,
    #[tabled(rename = "Hours")]
    pub hours_worked: f64,
    #[tabled(rename = "Projects")]
    pub projects_completed: u32,
    #[tabled(rename = "Efficiency")]
    pub efficiency: f64,
    #[tabled(rename = "Rating")]
    pub rating: PerformanceRating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPerformance {
    pub month: String,
    pub avg_efficiency: i64,
    pub projects_completed: u64,
    pub hours_worked: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Success,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiMetrics {
    pub project_completion_rate: i64,
    /// Not capped; more than 160 hours per head reads above 100.
    pub utilization_rate: i64,
    pub quality_score: i64,
    pub client_satisfaction: i64,
}

// ---------------------------------------------------------------------------
// Dashboard headline
// ---------------------------------------------------------------------------

/// Headline figures shown above the report list, read straight from the
/// baseline snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub total_contractors: u32,
    pub active_departments: u32,
    pub monthly_spend: f64,
    pub avg_contract_length: u32,
}

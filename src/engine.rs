//! Report engine.
//!
//! Binds a [`RecordStore`] to the report builders. The engine owns the
//! random source used for synthetic figures; seeding it makes every
//! report reproducible apart from its id and timestamp.

use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::reports::{
    budget_analysis, contractor_summary, performance_metrics, BudgetAnalysisReport, BudgetTable,
    ContractorSummaryReport, DashboardOverview, PerformanceMetricsReport, Report, ReportKind,
    ReportStamp,
};
use crate::store::RecordStore;
use crate::types::{Contractor, TimesheetEntry};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub seed: Option<u64>,
    pub budget_table: BudgetTable,
    pub budget_period: String,
    pub performance_period: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::from(&ReportConfig::default())
    }
}

impl From<&ReportConfig> for EngineOptions {
    fn from(config: &ReportConfig) -> Self {
        Self {
            seed: config.seed,
            budget_table: BudgetTable::standard().clone(),
            budget_period: config.budget_period.clone(),
            performance_period: config.performance_period.clone(),
        }
    }
}

impl EngineOptions {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn with_budget_table(mut self, table: BudgetTable) -> Self {
        self.budget_table = table;
        self
    }
}

pub struct ReportEngine<S> {
    store: S,
    options: EngineOptions,
    rng: StdRng,
}

impl<S: RecordStore> ReportEngine<S> {
    pub fn new(store: S, options: EngineOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            store,
            options,
            rng,
        }
    }

    pub fn build(&mut self, kind: ReportKind) -> Result<Report, ReportError> {
        let report = match kind {
            ReportKind::ContractorSummary => self.build_contractor_summary()?.into(),
            ReportKind::BudgetAnalysis => self.build_budget_analysis()?.into(),
            ReportKind::PerformanceMetrics => self.build_performance_metrics()?.into(),
        };
        Ok(report)
    }

    pub fn build_contractor_summary(&mut self) -> Result<ContractorSummaryReport, ReportError> {
        let contractors = self.contractors()?;
        let report = contractor_summary::build(Self::stamp(), &contractors);
        info!(
            report_id = %report.report_id,
            kind = %ReportKind::ContractorSummary,
            contractors = report.summary.total_contractors,
            "report generated"
        );
        Ok(report)
    }

    pub fn build_budget_analysis(&mut self) -> Result<BudgetAnalysisReport, ReportError> {
        let contractors = self.contractors()?;
        let baseline = self
            .store
            .baseline_snapshot()
            .map_err(ReportError::unavailable("baseline snapshot"))?;
        let report = budget_analysis::build(
            Self::stamp(),
            &contractors,
            &baseline,
            &self.options.budget_table,
            &self.options.budget_period,
            &mut self.rng,
        );
        info!(
            report_id = %report.report_id,
            kind = %ReportKind::BudgetAnalysis,
            alerts = report.budget_alerts.len(),
            "report generated"
        );
        Ok(report)
    }

    pub fn build_performance_metrics(&mut self) -> Result<PerformanceMetricsReport, ReportError> {
        let contractors = self.contractors()?;
        let timesheets = self.timesheets_or_synthetic(&contractors);
        let report = performance_metrics::build(
            Self::stamp(),
            &contractors,
            &timesheets,
            &self.options.performance_period,
            &mut self.rng,
        );
        info!(
            report_id = %report.report_id,
            kind = %ReportKind::PerformanceMetrics,
            contractors = report.summary.total_contractors,
            "report generated"
        );
        Ok(report)
    }

    pub fn dashboard_overview(&self) -> Result<DashboardOverview, ReportError> {
        let baseline = self
            .store
            .baseline_snapshot()
            .map_err(ReportError::unavailable("baseline snapshot"))?;
        Ok(DashboardOverview {
            total_contractors: baseline.total_contractors,
            active_departments: baseline.active_departments,
            monthly_spend: baseline.monthly_spend,
            avg_contract_length: baseline.avg_contract_length,
        })
    }

    fn contractors(&self) -> Result<Vec<Contractor>, ReportError> {
        self.store
            .contractors()
            .map_err(ReportError::unavailable("contractors"))
    }

    // Timesheet problems never fail the report.
    fn timesheets_or_synthetic(&mut self, contractors: &[Contractor]) -> Vec<TimesheetEntry> {
        match self.store.timesheets() {
            Ok(entries) => entries,
            Err(err) => {
                warn!(error = %err, "timesheets unavailable; synthesizing performance data");
                performance_metrics::synthesize_timesheets(contractors, &mut self.rng)
            }
        }
    }

    fn stamp() -> ReportStamp {
        ReportStamp {
            report_id: Uuid::new_v4().simple().to_string(),
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};
    use crate::types::{BaselineSnapshot, DepartmentSpend, MonthlySpend};

    fn contractors() -> Vec<Contractor> {
        vec![
            Contractor::new(1, "Ada", "Technology", "active")
                .with_monthly_cost(12_000.0)
                .with_hourly_rate(95.0)
                .with_days_remaining(20),
            Contractor::new(2, "Bo", "Finance", "active")
                .with_monthly_cost(8_000.0)
                .with_hourly_rate(70.0)
                .with_days_remaining(120),
            Contractor::new(3, "Cy", "Finance", "inactive"),
        ]
    }

    fn baseline() -> BaselineSnapshot {
        BaselineSnapshot {
            monthly_spend: 540_000.0,
            department_breakdown: vec![DepartmentSpend {
                department: "Technology".to_string(),
                spend: 250_000.0,
                contractors: 10,
            }],
            monthly_trends: vec![MonthlySpend {
                month: "Jan 2024".to_string(),
                spend: 520_000.0,
            }],
            total_contractors: 47,
            active_departments: 6,
            avg_contract_length: 8,
        }
    }

    struct BrokenStore;

    impl RecordStore for BrokenStore {
        fn contractors(&self) -> Result<Vec<Contractor>, StoreError> {
            Err(StoreError::Unavailable {
                collection: "contractors",
            })
        }

        fn timesheets(&self) -> Result<Vec<TimesheetEntry>, StoreError> {
            Ok(Vec::new())
        }

        fn baseline_snapshot(&self) -> Result<BaselineSnapshot, StoreError> {
            Err(StoreError::Unavailable {
                collection: "baseline snapshot",
            })
        }
    }

    #[test]
    fn build_dispatches_on_kind() {
        let store = MemoryStore::new(contractors()).with_baseline(baseline());
        let mut engine = ReportEngine::new(store, EngineOptions::seeded(3));

        for kind in ReportKind::ALL {
            let report = engine.build(kind).expect("report");
            assert_eq!(report.kind(), kind);
            assert!(!report.report_id().is_empty());
        }
    }

    #[test]
    fn report_ids_are_unique() {
        let store = MemoryStore::new(contractors());
        let mut engine = ReportEngine::new(store, EngineOptions::seeded(3));

        let first = engine.build_contractor_summary().expect("first");
        let second = engine.build_contractor_summary().expect("second");
        assert_ne!(first.report_id, second.report_id);
    }

    #[test]
    fn missing_timesheets_fall_back_to_synthetic_entries() {
        let store = MemoryStore::new(contractors());
        let mut engine = ReportEngine::new(store, EngineOptions::seeded(11));

        let report = engine.build_performance_metrics().expect("report");
        assert_eq!(report.summary.total_contractors, 2);
        assert_eq!(report.top_performers.len(), 2);
        for performer in &report.top_performers {
            assert!((120.0..280.0).contains(&performer.hours_worked));
            assert!((2..10).contains(&performer.projects_completed));
            assert!((70.0..100.0).contains(&performer.efficiency));
        }
    }

    #[test]
    fn supplied_timesheets_are_used() {
        let store = MemoryStore::new(contractors()).with_timesheets(vec![
            TimesheetEntry {
                contractor_id: 1,
                hours_worked: 160.0,
                projects_completed: 8,
                efficiency: 95.0,
            },
            TimesheetEntry {
                contractor_id: 2,
                hours_worked: 140.0,
                projects_completed: 4,
                efficiency: 80.0,
            },
        ]);
        let mut engine = ReportEngine::new(store, EngineOptions::seeded(11));

        let report = engine.build_performance_metrics().expect("report");
        assert_eq!(report.summary.total_projects_completed, 12);
        assert_eq!(report.summary.total_hours_worked, 300.0);
        assert_eq!(report.performance_categories.high_performers, 1);
    }

    #[test]
    fn same_seed_gives_same_figures() {
        let build = || {
            let store = MemoryStore::new(contractors()).with_baseline(baseline());
            let mut engine = ReportEngine::new(store, EngineOptions::seeded(42));
            (
                engine.build_budget_analysis().expect("budget"),
                engine.build_performance_metrics().expect("performance"),
            )
        };

        let (budget_a, perf_a) = build();
        let (budget_b, perf_b) = build();
        assert_eq!(budget_a.monthly_trends, budget_b.monthly_trends);
        assert_eq!(perf_a.top_performers, perf_b.top_performers);
        assert_eq!(perf_a.kpi_metrics, perf_b.kpi_metrics);
    }

    #[test]
    fn custom_budget_table_drives_totals_and_ceilings() {
        let table = BudgetTable::new([("Technology", 200_000), ("Finance", 100_000)]);
        let store = MemoryStore::new(contractors()).with_baseline(baseline());
        let mut engine =
            ReportEngine::new(store, EngineOptions::seeded(5).with_budget_table(table));

        let report = engine.build_budget_analysis().expect("budget");
        assert_eq!(report.summary.total_budget, 300_000);
        assert_eq!(report.summary.variance, -240_000.0);
        let technology = &report.department_breakdown[0];
        assert_eq!(technology.budget, 200_000);
        assert_eq!(technology.usage_percentage, 125);
        assert_eq!(report.budget_alerts[0].message, "Over budget by 25% ($50,000)");
    }

    #[test]
    fn store_failures_surface_as_data_unavailable() {
        let mut engine = ReportEngine::new(BrokenStore, EngineOptions::seeded(1));

        assert!(matches!(
            engine.build_contractor_summary(),
            Err(ReportError::DataUnavailable {
                collection: "contractors",
                ..
            })
        ));
        assert!(matches!(
            engine.dashboard_overview(),
            Err(ReportError::DataUnavailable {
                collection: "baseline snapshot",
                ..
            })
        ));
    }

    #[test]
    fn dashboard_overview_reads_baseline_headline() {
        let store = MemoryStore::new(Vec::new()).with_baseline(baseline());
        let engine = ReportEngine::new(store, EngineOptions::default());

        let overview = engine.dashboard_overview().expect("overview");
        assert_eq!(overview.total_contractors, 47);
        assert_eq!(overview.active_departments, 6);
        assert_eq!(overview.monthly_spend, 540_000.0);
        assert_eq!(overview.avg_contract_length, 8);
    }
}

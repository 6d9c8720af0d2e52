use crate::util::capitalize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw contractor row as exported from the workforce spreadsheet.
#[derive(Debug, Deserialize)]
pub struct RawContractorRow {
    #[serde(rename = "Id")]
    pub id: Option<String>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Department")]
    pub department: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "HourlyRate")]
    pub hourly_rate: Option<String>,
    #[serde(rename = "MonthlyCost")]
    pub monthly_cost: Option<String>,
    #[serde(rename = "DaysRemaining")]
    pub days_remaining: Option<String>,
}

/// Raw timesheet row; one per contractor for the reporting period.
#[derive(Debug, Deserialize)]
pub struct RawTimesheetRow {
    #[serde(rename = "ContractorId")]
    pub contractor_id: Option<String>,
    #[serde(rename = "HoursWorked")]
    pub hours_worked: Option<String>,
    #[serde(rename = "ProjectsCompleted")]
    pub projects_completed: Option<String>,
    #[serde(rename = "Efficiency")]
    pub efficiency: Option<String>,
}

/// Engagement status of a contractor.
///
/// Known values get their own variant; anything else the source system
/// sends is kept verbatim so it still shows up in the status distribution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContractorStatus {
    Active,
    Inactive,
    Pending,
    Other(String),
}

impl ContractorStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
            Self::Other(value) => value,
        }
    }

    /// Display label with the first character upper-cased.
    pub fn label(&self) -> String {
        capitalize(self.as_str())
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl From<String> for ContractorStatus {
    /// Case and surrounding whitespace are ignored.
    fn from(value: String) -> Self {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "active" => Self::Active,
            "inactive" => Self::Inactive,
            "pending" => Self::Pending,
            _ => Self::Other(normalized),
        }
    }
}

impl From<&str> for ContractorStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<ContractorStatus> for String {
    fn from(value: ContractorStatus) -> Self {
        match value {
            ContractorStatus::Other(value) => value,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ContractorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contractor {
    pub id: u32,
    pub name: String,
    pub department: String,
    pub status: ContractorStatus,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    /// Only meaningful while the contractor is active.
    #[serde(default)]
    pub monthly_cost: Option<f64>,
    /// Days left on the current contract.
    #[serde(default)]
    pub days_remaining: Option<i64>,
}

impl Contractor {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        department: impl Into<String>,
        status: impl Into<ContractorStatus>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            department: department.into(),
            status: status.into(),
            hourly_rate: None,
            monthly_cost: None,
            days_remaining: None,
        }
    }

    pub fn with_hourly_rate(mut self, rate: f64) -> Self {
        self.hourly_rate = Some(rate);
        self
    }

    pub fn with_monthly_cost(mut self, cost: f64) -> Self {
        self.monthly_cost = Some(cost);
        self
    }

    pub fn with_days_remaining(mut self, days: i64) -> Self {
        self.days_remaining = Some(days);
        self
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetEntry {
    pub contractor_id: u32,
    pub hours_worked: f64,
    pub projects_completed: u32,
    /// 0-100 score for the period.
    pub efficiency: f64,
}

impl TimesheetEntry {
    pub const PLACEHOLDER_HOURS: f64 = 150.0;
    pub const PLACEHOLDER_PROJECTS: u32 = 5;
    pub const PLACEHOLDER_EFFICIENCY: f64 = 75.0;

    /// Stand-in record for a contractor with no timesheet on file.
    pub fn placeholder(contractor_id: u32) -> Self {
        Self {
            contractor_id,
            hours_worked: Self::PLACEHOLDER_HOURS,
            projects_completed: Self::PLACEHOLDER_PROJECTS,
            efficiency: Self::PLACEHOLDER_EFFICIENCY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSpend {
    pub department: String,
    pub spend: f64,
    #[serde(default)]
    pub contractors: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySpend {
    pub month: String,
    pub spend: f64,
}

/// Pre-aggregated figures maintained by the finance feed.
///
/// The budget report reads spend from here rather than recomputing it
/// from contractor costs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineSnapshot {
    pub monthly_spend: f64,
    #[serde(default)]
    pub department_breakdown: Vec<DepartmentSpend>,
    #[serde(default)]
    pub monthly_trends: Vec<MonthlySpend>,
    #[serde(default)]
    pub total_contractors: u32,
    #[serde(default)]
    pub active_departments: u32,
    #[serde(default)]
    pub avg_contract_length: u32,
}

//! Monthly budget ceilings per department.

use once_cell::sync::Lazy;

/// Ceiling applied to departments missing from the table.
pub const DEFAULT_DEPARTMENT_BUDGET: i64 = 50_000;

static STANDARD_TABLE: Lazy<BudgetTable> = Lazy::new(|| {
    BudgetTable::new([
        ("Technology", 220_000),
        ("Risk Management", 95_000),
        ("Operations", 85_000),
        ("Finance", 75_000),
        ("Compliance", 65_000),
        ("Analytics", 60_000),
    ])
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetTable {
    ceilings: Vec<(String, i64)>,
    fallback: i64,
}

impl BudgetTable {
    pub fn new<I, K>(ceilings: I) -> Self
    where
        I: IntoIterator<Item = (K, i64)>,
        K: Into<String>,
    {
        Self {
            ceilings: ceilings
                .into_iter()
                .map(|(department, ceiling)| (department.into(), ceiling))
                .collect(),
            fallback: DEFAULT_DEPARTMENT_BUDGET,
        }
    }

    pub fn with_fallback(mut self, fallback: i64) -> Self {
        self.fallback = fallback;
        self
    }

    /// The configured monthly ceilings (600,000 in total).
    pub fn standard() -> &'static BudgetTable {
        &STANDARD_TABLE
    }

    pub fn ceiling(&self, department: &str) -> i64 {
        self.ceilings
            .iter()
            .find(|(name, _)| name == department)
            .map(|(_, ceiling)| *ceiling)
            .unwrap_or(self.fallback)
    }

    /// Organisation-wide budget: the sum of the configured ceilings.
    /// The fallback ceiling is not part of it.
    pub fn total(&self) -> i64 {
        self.ceilings.iter().map(|(_, ceiling)| ceiling).sum()
    }
}

impl Default for BudgetTable {
    fn default() -> Self {
        Self::standard().clone()
    }
}

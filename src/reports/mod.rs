//! Report builders.
//!
//! Each builder is a pure function over the collections it is handed plus
//! a [`ReportStamp`]; anything random is drawn from the caller's rng.

pub mod budget;
pub mod budget_analysis;
pub mod contractor_summary;
pub mod model;
pub mod performance_metrics;

pub use budget::BudgetTable;
pub use model::*;

use std::collections::HashMap;

/// Per-department accumulators kept in first-seen order.
///
/// Output rows are produced in insertion order and then stable-sorted, so
/// ties keep the order in which departments first appeared in the input.
#[derive(Debug)]
pub(crate) struct DepartmentMap<A> {
    index: HashMap<String, usize>,
    groups: Vec<(String, A)>,
}

impl<A: Default> DepartmentMap<A> {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    pub(crate) fn entry(&mut self, department: &str) -> &mut A {
        let slot = match self.index.get(department) {
            Some(slot) => *slot,
            None => {
                self.groups.push((department.to_string(), A::default()));
                self.index
                    .insert(department.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        &mut self.groups[slot].1
    }

    pub(crate) fn len(&self) -> usize {
        self.groups.len()
    }

    pub(crate) fn into_groups(self) -> impl Iterator<Item = (String, A)> {
        self.groups.into_iter()
    }
}

//! Pure aggregation of per-budget figures into overview totals.

use crate::budget::core::{Budget, BudgetInformation};

/// The aggregated data the budgets overview renders.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSummary {
    /// The slice of active budgets for the requested page.
    pub page_budgets: Vec<Budget>,
    /// How many active budgets exist across all pages.
    pub total: usize,
    /// Sum of the spent figures over all active budgets.
    pub spent_total: f64,
    /// Sum of the budgeted figures over all active budgets.
    pub budgeted_total: f64,
    /// The per-budget figures the totals were built from.
    pub information: Vec<BudgetInformation>,
    /// Budgets excluded from tracking, shown separately and never paginated.
    pub inactive: Vec<Budget>,
}

/// Combine the active/inactive budget sets and their per-budget figures into
/// the overview summary.
///
/// Only active budgets take part in the totals and in pagination. Page
/// numbers below 1 are treated as page 1. An empty budget list produces zero
/// totals and an empty page.
pub fn aggregate_budgets(
    active: Vec<Budget>,
    inactive: Vec<Budget>,
    information: Vec<BudgetInformation>,
    page: u64,
    page_size: u64,
) -> BudgetSummary {
    let page = page.max(1);
    let total = active.len();

    let spent_total = information.iter().map(|info| info.spent).sum();
    let budgeted_total = information.iter().map(|info| info.budgeted).sum();

    let offset = (page - 1) * page_size;
    let page_budgets = active
        .into_iter()
        .skip(offset as usize)
        .take(page_size as usize)
        .collect();

    BudgetSummary {
        page_budgets,
        total,
        spent_total,
        budgeted_total,
        information,
        inactive,
    }
}

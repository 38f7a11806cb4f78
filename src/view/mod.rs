//! Derived views over the expense working set
//!
//! Everything in this module is a pure function of its arguments: the full
//! collection, the current criteria and the requested page go in, and the
//! filtered list, totals, breakdown and page slice come out. Nothing is
//! cached between calls, so the output can be recomputed on every render.

pub mod aggregate;
pub mod filter;
pub mod pagination;

pub use aggregate::{
    aggregate_by_category, total_amount, trend_series, CategoryBreakdown, CategoryTotal,
    TrendPoint,
};
pub use filter::{filter, FilterCriteria};
pub use pagination::{clamp_page, paginate, total_pages, PageCursor, DEFAULT_PAGE_SIZE};

use crate::models::{Expense, Money};

/// Everything a dashboard render needs, derived in one pass
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    /// Expenses matching the criteria, in input order
    pub filtered: Vec<Expense>,
    /// Sum of the filtered amounts
    pub total: Money,
    /// Per-category sums of the filtered expenses
    pub breakdown: CategoryBreakdown,
    /// The page that was requested (not clamped)
    pub page: usize,
    /// Items per page
    pub page_size: usize,
    /// Pages needed for the filtered expenses
    pub total_pages: usize,
}

impl Dashboard {
    /// The expenses on the requested page
    pub fn page_items(&self) -> &[Expense] {
        paginate(&self.filtered, self.page, self.page_size)
    }

    /// Title/amount series for the trend chart
    pub fn trend(&self) -> Vec<TrendPoint> {
        trend_series(&self.filtered)
    }

    /// Navigation state for the requested page
    pub fn cursor(&self) -> PageCursor {
        PageCursor::new(self.page, self.total_pages)
    }
}

/// Stateless entry point for the view computations
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpenseView;

impl ExpenseView {
    /// Filter, total, aggregate and page `expenses` in one call
    pub fn compute(
        expenses: &[Expense],
        criteria: &FilterCriteria,
        page: usize,
        page_size: usize,
    ) -> Dashboard {
        let filtered = filter(expenses, criteria);
        let total = total_amount(&filtered);
        let breakdown = aggregate_by_category(&filtered);
        let total_pages = total_pages(filtered.len(), page_size);

        Dashboard {
            filtered,
            total,
            breakdown,
            page,
            page_size,
            total_pages,
        }
    }
}

//! Totals, per-category breakdown and the trend series
//!
//! All sums are accumulated in integer cents, so the breakdown always
//! reconciles with the total to the cent.

use serde::Serialize;

use crate::models::{Category, Expense, Money};

/// Sum of the amounts of `expenses`; zero for an empty slice
pub fn total_amount(expenses: &[Expense]) -> Money {
    expenses.iter().map(|expense| expense.amount).sum()
}

/// Spending for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Money,
    pub count: usize,
}

/// Per-category sums, in order of first appearance
///
/// Each category is stored together with its sum, so a chart built from
/// [`CategoryBreakdown::labels`] and [`CategoryBreakdown::values`] always pairs
/// every label with its own value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    entries: Vec<CategoryTotal>,
}

impl CategoryBreakdown {
    /// The category entries
    pub fn entries(&self) -> &[CategoryTotal] {
        &self.entries
    }

    /// Look up the sum for a category
    pub fn get(&self, category: &Category) -> Option<Money> {
        self.entries
            .iter()
            .find(|entry| &entry.category == category)
            .map(|entry| entry.total)
    }

    /// Number of categories present
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no expense was aggregated
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Category labels, aligned with [`CategoryBreakdown::values`]
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.category.as_str()).collect()
    }

    /// Category sums, aligned with [`CategoryBreakdown::labels`]
    pub fn values(&self) -> Vec<Money> {
        self.entries.iter().map(|e| e.total).collect()
    }

    /// Sum over all categories
    pub fn total(&self) -> Money {
        self.entries.iter().map(|e| e.total).sum()
    }

    /// Entries sorted by spending, largest first
    pub fn sorted_by_total(&self) -> Vec<&CategoryTotal> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by(|a, b| b.total.cmp(&a.total));
        entries
    }
}

/// Group expenses by category and sum each group
///
/// Categories without expenses are left out rather than reported as zero.
pub fn aggregate_by_category(expenses: &[Expense]) -> CategoryBreakdown {
    let mut entries: Vec<CategoryTotal> = Vec::new();

    for expense in expenses {
        match entries
            .iter_mut()
            .find(|entry| entry.category == expense.category)
        {
            Some(entry) => {
                entry.total += expense.amount;
                entry.count += 1;
            }
            None => entries.push(CategoryTotal {
                category: expense.category.clone(),
                total: expense.amount,
                count: 1,
            }),
        }
    }

    CategoryBreakdown { entries }
}

/// One point of the spending trend line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub label: String,
    pub amount: Money,
}

/// One point per expense, labelled by title, in the order given
pub fn trend_series(expenses: &[Expense]) -> Vec<TrendPoint> {
    expenses
        .iter()
        .map(|expense| TrendPoint {
            label: expense.title.clone(),
            amount: expense.amount,
        })
        .collect()
}

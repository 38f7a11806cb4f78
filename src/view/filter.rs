//! Filtering of the expense working set
//!
//! Criteria are optional and combine with AND. Dates are inclusive on both
//! ends and compared as calendar dates.

use chrono::NaiveDate;

use crate::models::{Category, Expense};

/// Options for filtering expenses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Exact, case-sensitive category match
    pub category: Option<Category>,
    /// Earliest date to include
    pub start_date: Option<NaiveDate>,
    /// Latest date to include
    pub end_date: Option<NaiveDate>,
}

impl FilterCriteria {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by category
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Only include expenses on or after `start`
    pub fn from(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    /// Only include expenses on or before `end`
    pub fn to(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    /// Filter by an inclusive date range
    pub fn date_range(self, start: NaiveDate, end: NaiveDate) -> Self {
        self.from(start).to(end)
    }

    /// True when no constraint is set
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }

    /// Check whether a single expense satisfies every set constraint
    pub fn matches(&self, expense: &Expense) -> bool {
        let category_ok = self
            .category
            .as_ref()
            .map_or(true, |category| &expense.category == category);
        let start_ok = self.start_date.map_or(true, |start| expense.date >= start);
        let end_ok = self.end_date.map_or(true, |end| expense.date <= end);

        category_ok && start_ok && end_ok
    }
}

/// Return the expenses matching `criteria`, in their original order
pub fn filter(expenses: &[Expense], criteria: &FilterCriteria) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|expense| criteria.matches(expense))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::test_utils::{date, expense};

    fn sample() -> Vec<Expense> {
        vec![
            expense("1", "Groceries", 1000, Category::Food, date(2024, 1, 1)),
            expense("2", "Train", 2000, Category::Transport, date(2024, 2, 1)),
            expense("3", "Snacks", 500, Category::Food, date(2024, 3, 1)),
        ]
    }

    #[test]
    fn test_empty_criteria_returns_input_unchanged() {
        let expenses = sample();
        assert_eq!(filter(&expenses, &FilterCriteria::new()), expenses);
        assert!(FilterCriteria::new().is_empty());
    }

    #[test]
    fn test_filter_by_category_preserves_order() {
        let expenses = sample();
        let result = filter(&expenses, &FilterCriteria::new().category(Category::Food));

        let ids: Vec<_> = result.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let expenses = sample();
        let criteria = FilterCriteria::new().date_range(date(2024, 1, 1), date(2024, 2, 1));
        let result = filter(&expenses, &criteria);

        let ids: Vec<_> = result.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_open_ended_ranges() {
        let expenses = sample();

        let after = filter(&expenses, &FilterCriteria::new().from(date(2024, 2, 1)));
        assert_eq!(after.len(), 2);

        let before = filter(&expenses, &FilterCriteria::new().to(date(2024, 1, 31)));
        assert_eq!(before.len(), 1);
        assert_eq!(before[0].id.as_str(), "1");
    }

    #[test]
    fn test_all_constraints_combine() {
        let expenses = sample();
        let criteria = FilterCriteria::new()
            .category(Category::Food)
            .from(date(2024, 2, 1));
        let result = filter(&expenses, &criteria);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.as_str(), "3");
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let expenses = sample();
        let criteria = FilterCriteria::new().date_range(date(2024, 3, 1), date(2024, 1, 1));
        assert!(filter(&expenses, &criteria).is_empty());
    }

    #[test]
    fn test_unrecognized_category_only_matches_itself() {
        let mut expenses = sample();
        expenses.push(expense(
            "4",
            "Flight",
            30000,
            Category::Unrecognized("Travel".into()),
            date(2024, 4, 1),
        ));

        // Passes through when no category filter is set
        assert_eq!(filter(&expenses, &FilterCriteria::new()).len(), 4);

        // Never matches a fixed category
        for category in Category::KNOWN {
            let result = filter(&expenses, &FilterCriteria::new().category(category));
            assert!(result.iter().all(|e| e.id.as_str() != "4"));
        }
    }

    #[test]
    fn test_result_is_subset_satisfying_predicate() {
        let expenses = sample();
        let criteria = FilterCriteria::new()
            .category(Category::Transport)
            .to(date(2024, 12, 31));
        let result = filter(&expenses, &criteria);

        assert!(result.iter().all(|e| expenses.contains(e)));
        assert!(result.iter().all(|e| criteria.matches(e)));
        assert!(expenses
            .iter()
            .filter(|e| !result.contains(e))
            .all(|e| !criteria.matches(e)));
    }
}

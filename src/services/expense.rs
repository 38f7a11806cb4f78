//! Expense service
//!
//! Holds the working set of expenses fetched for the logged-in user and
//! applies create, update and delete through the remote API. After every
//! successful mutation the working set is fetched again in full; the client
//! never patches it locally.

use chrono::NaiveDate;

use crate::api::ExpenseApi;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Expense, ExpenseId, ExpenseInput, Money};
use crate::storage::Session;
use crate::view::{Dashboard, ExpenseView, FilterCriteria, DEFAULT_PAGE_SIZE};

/// Partial changes to an existing expense; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub title: Option<String>,
    pub amount: Option<Money>,
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
}

impl ExpenseUpdate {
    /// Check if no field would change
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.amount.is_none() && self.category.is_none() && self.date.is_none()
    }

    /// Apply the changes on top of an existing expense
    pub fn apply_to(&self, expense: &Expense) -> ExpenseInput {
        let mut input = expense.to_input();
        if let Some(title) = &self.title {
            input.title = title.trim().to_string();
        }
        if let Some(amount) = self.amount {
            input.amount = amount;
        }
        if let Some(category) = &self.category {
            input.category = category.clone();
        }
        if let Some(date) = self.date {
            input.date = date;
        }
        input
    }
}

/// Service for the expense working set
pub struct ExpenseService<'a, A: ExpenseApi> {
    api: &'a A,
    session: Session,
    expenses: Vec<Expense>,
    page_size: usize,
}

impl<'a, A: ExpenseApi> ExpenseService<'a, A> {
    /// Fetch the user's expenses and build the service around them
    pub fn load(api: &'a A, session: Session) -> ExpenseResult<Self> {
        session.ensure_valid()?;
        let mut service = Self {
            api,
            session,
            expenses: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
        };
        service.refresh()?;
        Ok(service)
    }

    /// Set the number of expenses per dashboard page
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// The session requests are made with
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The current working set, in the order the API returned it
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Look up an expense in the working set
    pub fn find(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| &e.id == id)
    }

    /// Replace the working set with a fresh fetch
    ///
    /// On error the previous working set is left untouched.
    pub fn refresh(&mut self) -> ExpenseResult<()> {
        self.expenses = self.api.list_expenses(&self.session)?;
        Ok(())
    }

    /// Create a new expense
    pub fn create(&mut self, input: ExpenseInput) -> ExpenseResult<Expense> {
        validate(&input)?;

        let created = self.api.create_expense(&self.session, &input)?;
        tracing::info!(id = %created.id, title = %created.title, "expense created");

        self.refresh_after("create")?;
        Ok(created)
    }

    /// Replace the editable fields of an expense
    pub fn update(&mut self, id: &ExpenseId, input: ExpenseInput) -> ExpenseResult<Expense> {
        validate(&input)?;

        let updated = self.api.update_expense(&self.session, id, &input)?;
        tracing::info!(id = %updated.id, "expense updated");

        self.refresh_after("update")?;
        Ok(updated)
    }

    /// Change some fields of an expense, keeping the rest
    pub fn edit(&mut self, id: &ExpenseId, changes: &ExpenseUpdate) -> ExpenseResult<Expense> {
        if changes.is_empty() {
            return Err(ExpenseError::Validation(
                "Nothing to change. Pass at least one field to edit".into(),
            ));
        }

        let current = self
            .find(id)
            .ok_or_else(|| ExpenseError::expense_not_found(id.as_str()))?;
        let input = changes.apply_to(current);

        self.update(id, input)
    }

    /// Delete an expense
    pub fn delete(&mut self, id: &ExpenseId) -> ExpenseResult<()> {
        self.api.delete_expense(&self.session, id)?;
        tracing::info!(%id, "expense deleted");

        self.refresh_after("delete")
    }

    /// Compute the dashboard for the current working set
    pub fn view(&self, criteria: &FilterCriteria, page: usize) -> Dashboard {
        ExpenseView::compute(&self.expenses, criteria, page, self.page_size)
    }

    fn refresh_after(&mut self, operation: &str) -> ExpenseResult<()> {
        self.refresh().map_err(|e| {
            tracing::warn!(operation, error = %e, "change was saved but refreshing expenses failed");
            e
        })
    }
}

fn validate(input: &ExpenseInput) -> ExpenseResult<()> {
    input
        .validate()
        .map_err(|e| ExpenseError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::models::UserId;
    use crate::view::test_utils::{date, expense};

    fn seeded() -> FakeApi {
        FakeApi::with_expenses(vec![
            expense("a", "Groceries", 4250, Category::Food, date(2024, 1, 3)),
            expense("b", "Bus pass", 6000, Category::Transport, date(2024, 1, 5)),
            expense("c", "Dinner", 3100, Category::Food, date(2024, 2, 10)),
        ])
    }

    fn input(title: &str, cents: i64, category: Category) -> ExpenseInput {
        ExpenseInput::new(title, Money::from_cents(cents), category, date(2024, 3, 1))
    }

    #[test]
    fn test_load_fetches_working_set() {
        let api = seeded();
        let service = ExpenseService::load(&api, api.session()).unwrap();

        assert_eq!(service.expenses().len(), 3);
        assert_eq!(api.list_calls.get(), 1);
        assert_eq!(
            service.find(&ExpenseId::new("b")).map(|e| e.title.as_str()),
            Some("Bus pass")
        );
        assert!(service.find(&ExpenseId::new("zzz")).is_none());
    }

    #[test]
    fn test_load_with_foreign_session_is_unauthorized() {
        let api = seeded();
        let session = Session::new("token", UserId::new("someone-else"), "mallory");
        let err = ExpenseService::load(&api, session).err().unwrap();
        assert!(err.requires_login());
    }

    #[test]
    fn test_create_refreshes_working_set() {
        let api = seeded();
        let mut service = ExpenseService::load(&api, api.session()).unwrap();

        let created = service.create(input(" Cinema ", 1800, Category::Entertainment)).unwrap();

        assert_eq!(created.id, ExpenseId::new("new-1"));
        assert_eq!(created.title, "Cinema");
        assert_eq!(api.list_calls.get(), 2);
        assert_eq!(service.expenses().len(), 4);
        assert!(service.find(&created.id).is_some());
    }

    #[test]
    fn test_create_rejects_invalid_input_without_request() {
        let api = seeded();
        let mut service = ExpenseService::load(&api, api.session()).unwrap();

        let err = service.create(input("   ", 100, Category::Food)).unwrap_err();
        assert!(err.is_validation());

        let err = service
            .create(input("Flight", 100, Category::Unrecognized("Travel".into())))
            .unwrap_err();
        assert!(err.is_validation());

        assert_eq!(api.expenses.borrow().len(), 3);
        assert_eq!(api.list_calls.get(), 1);
    }

    #[test]
    fn test_failed_request_leaves_working_set_unchanged() {
        let api = seeded();
        let mut service = ExpenseService::load(&api, api.session()).unwrap();
        let before = service.expenses().to_vec();

        api.fail_next.set(true);
        let err = service.create(input("Cinema", 1800, Category::Entertainment)).unwrap_err();

        assert!(matches!(err, ExpenseError::Network(_)));
        assert_eq!(service.expenses(), before.as_slice());
    }

    #[test]
    fn test_failed_refresh_after_create_reports_error() {
        let api = seeded();
        let mut service = ExpenseService::load(&api, api.session()).unwrap();

        api.fail_lists.set(true);
        let err = service.create(input("Cinema", 1800, Category::Entertainment)).unwrap_err();

        assert!(matches!(err, ExpenseError::Network(_)));
        // The record was stored remotely, the local copy is stale until the next refresh
        assert_eq!(api.expenses.borrow().len(), 4);
        assert_eq!(service.expenses().len(), 3);

        api.fail_lists.set(false);
        service.refresh().unwrap();
        assert_eq!(service.expenses().len(), 4);
    }

    #[test]
    fn test_update_replaces_fields() {
        let api = seeded();
        let mut service = ExpenseService::load(&api, api.session()).unwrap();

        let id = ExpenseId::new("a");
        service.update(&id, input("Weekly shop", 5000, Category::Food)).unwrap();

        let stored = service.find(&id).unwrap();
        assert_eq!(stored.title, "Weekly shop");
        assert_eq!(stored.amount, Money::from_cents(5000));
        assert_eq!(stored.date, date(2024, 3, 1));
    }

    #[test]
    fn test_update_missing_expense() {
        let api = seeded();
        let mut service = ExpenseService::load(&api, api.session()).unwrap();

        let err = service
            .update(&ExpenseId::new("zzz"), input("Ghost", 100, Category::Other))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_edit_keeps_unchanged_fields() {
        let api = seeded();
        let mut service = ExpenseService::load(&api, api.session()).unwrap();

        let id = ExpenseId::new("b");
        let changes = ExpenseUpdate {
            amount: Some(Money::from_cents(6500)),
            ..Default::default()
        };
        let updated = service.edit(&id, &changes).unwrap();

        assert_eq!(updated.title, "Bus pass");
        assert_eq!(updated.category, Category::Transport);
        assert_eq!(updated.date, date(2024, 1, 5));
        assert_eq!(updated.amount, Money::from_cents(6500));
    }

    #[test]
    fn test_edit_requires_changes_and_known_id() {
        let api = seeded();
        let mut service = ExpenseService::load(&api, api.session()).unwrap();

        let err = service
            .edit(&ExpenseId::new("a"), &ExpenseUpdate::default())
            .unwrap_err();
        assert!(err.is_validation());

        let changes = ExpenseUpdate {
            title: Some("New".into()),
            ..Default::default()
        };
        let err = service.edit(&ExpenseId::new("zzz"), &changes).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete() {
        let api = seeded();
        let mut service = ExpenseService::load(&api, api.session()).unwrap();

        service.delete(&ExpenseId::new("a")).unwrap();
        assert_eq!(service.expenses().len(), 2);
        assert!(service.find(&ExpenseId::new("a")).is_none());

        let err = service.delete(&ExpenseId::new("a")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_view_over_working_set() {
        let api = seeded();
        let service = ExpenseService::load(&api, api.session())
            .unwrap()
            .with_page_size(1);

        let dashboard = service.view(&FilterCriteria::new().category(Category::Food), 2);

        assert_eq!(dashboard.filtered.len(), 2);
        assert_eq!(dashboard.total, Money::from_cents(7350));
        assert_eq!(dashboard.breakdown.len(), 1);
        assert_eq!(dashboard.total_pages, 2);
        assert_eq!(dashboard.page_items()[0].title, "Dinner");
    }
}

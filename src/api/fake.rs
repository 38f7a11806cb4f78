//! In-memory [`ExpenseApi`] for service tests

use std::cell::{Cell, RefCell};

use serde_json::json;

use super::token::encode_test_token;
use super::{Credentials, ExpenseApi};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseId, ExpenseInput, UserId};
use crate::storage::Session;

pub struct FakeApi {
    pub user_id: UserId,
    pub password: String,
    pub expenses: RefCell<Vec<Expense>>,
    pub registered: RefCell<Vec<String>>,
    pub fail_next: Cell<bool>,
    pub fail_lists: Cell<bool>,
    pub list_calls: Cell<usize>,
    next_id: Cell<usize>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            user_id: UserId::new("user-1"),
            password: "hunter2".into(),
            expenses: RefCell::new(Vec::new()),
            registered: RefCell::new(Vec::new()),
            fail_next: Cell::new(false),
            fail_lists: Cell::new(false),
            list_calls: Cell::new(0),
            next_id: Cell::new(1),
        }
    }

    pub fn with_expenses(expenses: Vec<Expense>) -> Self {
        let api = Self::new();
        *api.expenses.borrow_mut() = expenses;
        api
    }

    pub fn session(&self) -> Session {
        Session::new("token", self.user_id.clone(), "alice")
    }

    fn check_failure(&self) -> ExpenseResult<()> {
        if self.fail_next.replace(false) {
            return Err(ExpenseError::Network("connection refused".into()));
        }
        Ok(())
    }

    fn check_session(&self, session: &Session) -> ExpenseResult<()> {
        if session.user_id != self.user_id {
            return Err(ExpenseError::Unauthorized);
        }
        Ok(())
    }

    fn record(&self, id: ExpenseId, input: &ExpenseInput) -> Expense {
        let mut expense = Expense::new(
            id,
            input.title.clone(),
            input.amount,
            input.category.clone(),
            input.date,
        );
        expense.owner_id = Some(self.user_id.clone());
        expense
    }
}

impl ExpenseApi for FakeApi {
    fn login(&self, credentials: &Credentials) -> ExpenseResult<String> {
        self.check_failure()?;
        if credentials.password != self.password {
            return Err(ExpenseError::InvalidCredentials);
        }
        Ok(encode_test_token(&json!({ "userId": self.user_id.as_str() })))
    }

    fn register(&self, credentials: &Credentials) -> ExpenseResult<()> {
        self.check_failure()?;
        if self.registered.borrow().contains(&credentials.username) {
            return Err(ExpenseError::Api {
                status: 400,
                message: "User already exists".into(),
            });
        }
        self.registered.borrow_mut().push(credentials.username.clone());
        Ok(())
    }

    fn list_expenses(&self, session: &Session) -> ExpenseResult<Vec<Expense>> {
        self.check_failure()?;
        self.check_session(session)?;
        if self.fail_lists.get() {
            return Err(ExpenseError::Network("connection reset".into()));
        }
        self.list_calls.set(self.list_calls.get() + 1);
        Ok(self.expenses.borrow().clone())
    }

    fn create_expense(&self, session: &Session, input: &ExpenseInput) -> ExpenseResult<Expense> {
        self.check_failure()?;
        self.check_session(session)?;
        let id = self.next_id.replace(self.next_id.get() + 1);
        let expense = self.record(ExpenseId::new(format!("new-{}", id)), input);
        self.expenses.borrow_mut().push(expense.clone());
        Ok(expense)
    }

    fn update_expense(
        &self,
        session: &Session,
        id: &ExpenseId,
        input: &ExpenseInput,
    ) -> ExpenseResult<Expense> {
        self.check_failure()?;
        self.check_session(session)?;
        let updated = self.record(id.clone(), input);
        let mut expenses = self.expenses.borrow_mut();
        let slot = expenses
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| ExpenseError::expense_not_found(id.as_str()))?;
        *slot = updated.clone();
        Ok(updated)
    }

    fn delete_expense(&self, session: &Session, id: &ExpenseId) -> ExpenseResult<()> {
        self.check_failure()?;
        self.check_session(session)?;
        let mut expenses = self.expenses.borrow_mut();
        let before = expenses.len();
        expenses.retain(|e| &e.id != id);
        if expenses.len() == before {
            return Err(ExpenseError::expense_not_found(id.as_str()));
        }
        Ok(())
    }
}

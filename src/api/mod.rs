//! Remote expense API
//!
//! The API owns the expense records and the user accounts. [`ExpenseApi`] is
//! the seam the service layer talks through; [`HttpExpenseApi`] is the real
//! implementation, and tests substitute an in-memory fake.

pub mod client;
pub mod token;

pub use client::HttpExpenseApi;
pub use token::{decode_claims, TokenClaims};

use serde::Serialize;
use std::fmt;

use crate::error::ExpenseResult;
use crate::models::{Expense, ExpenseId, ExpenseInput};
use crate::storage::Session;

/// Username and password sent to the login and register endpoints
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// Operations offered by the remote API
///
/// Every call is a single request; nothing is retried. Calls that act on
/// expenses take the session explicitly.
pub trait ExpenseApi {
    /// Exchange credentials for a bearer token
    fn login(&self, credentials: &Credentials) -> ExpenseResult<String>;

    /// Create a new user account
    fn register(&self, credentials: &Credentials) -> ExpenseResult<()>;

    /// Fetch every expense owned by the session's user
    fn list_expenses(&self, session: &Session) -> ExpenseResult<Vec<Expense>>;

    /// Create an expense and return the stored record
    fn create_expense(&self, session: &Session, input: &ExpenseInput) -> ExpenseResult<Expense>;

    /// Replace the editable fields of an expense and return the stored record
    fn update_expense(
        &self,
        session: &Session,
        id: &ExpenseId,
        input: &ExpenseInput,
    ) -> ExpenseResult<Expense>;

    /// Delete an expense
    fn delete_expense(&self, session: &Session, id: &ExpenseId) -> ExpenseResult<()>;
}

#[cfg(test)]
pub(crate) mod fake;

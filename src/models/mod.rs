//! Core data models for expense-cli
//!
//! This module contains the data structures that describe an expense record
//! as the remote API owns it, plus the typed building blocks (money, IDs,
//! categories) used by the view and service layers.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;

pub use category::{Category, CategoryParseError};
pub use expense::{parse_calendar_date, Expense, ExpenseInput, ExpenseValidationError};
pub use ids::{ExpenseId, IdParseError, UserId};
pub use money::{Money, MoneyParseError};

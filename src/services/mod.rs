//! Service layer for expense-cli
//!
//! The service layer sits between the command handlers and the remote API,
//! handling validation, the saved session and the expense working set.

pub mod auth;
pub mod expense;

pub use auth::AuthService;
pub use expense::{ExpenseService, ExpenseUpdate};

//! expense-cli - Terminal client for a personal expense tracker
//!
//! This library provides the core functionality for the `expense` binary. The
//! expense records live on a remote HTTP API; the client fetches the user's
//! working set and derives the dashboard views (filtered list, totals,
//! per-category breakdown, pages) from it on every run.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `view`: Pure filter, aggregation and pagination over a list of expenses
//! - `models`: Core data models (expenses, categories, money, IDs)
//! - `api`: The remote API trait and its HTTP client
//! - `services`: Business logic layer (authentication, expense working set)
//! - `storage`: Saved session and atomic JSON file helpers
//! - `config`: Configuration and path management
//! - `display`: Text formatting for terminal output
//! - `cli`: Command definitions and handlers
//! - `logging`: Tracing subscriber setup
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use expense_cli::models::{Category, Expense, Money};
//! use expense_cli::view::{ExpenseView, FilterCriteria};
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let expenses = vec![
//!     Expense::new("1", "Lunch", Money::from_cents(1000), Category::Food, day),
//!     Expense::new("2", "Bus", Money::from_cents(2000), Category::Transport, day),
//!     Expense::new("3", "Snack", Money::from_cents(500), Category::Food, day),
//! ];
//!
//! let criteria = FilterCriteria::new().category(Category::Food);
//! let dashboard = ExpenseView::compute(&expenses, &criteria, 1, 5);
//! assert_eq!(dashboard.total, Money::from_cents(1500));
//! assert_eq!(dashboard.breakdown.get(&Category::Food), Some(Money::from_cents(1500)));
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;
pub mod view;

pub use error::{ExpenseError, ExpenseResult};

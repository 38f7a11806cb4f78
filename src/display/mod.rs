//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses and dashboard summaries for
//! terminal display. Everything returns a `String`; printing is left to the
//! command handlers.

pub mod expense;
pub mod format;
pub mod summary;

pub use expense::{format_expense_details, format_expense_row, format_expense_table};
pub use format::DisplayStyle;
pub use summary::{format_breakdown, format_dashboard, format_pager, format_total, format_trend};

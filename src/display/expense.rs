//! Expense display formatting
//!
//! Provides the expense table shown by `list` and the detail view shown
//! after a create or edit.

use super::format::{fit, DisplayStyle};
use crate::models::Expense;

const TITLE_WIDTH: usize = 24;
const CATEGORY_WIDTH: usize = 14;

/// Format a single expense as a table row
pub fn format_expense_row(expense: &Expense, style: &DisplayStyle) -> String {
    format!(
        "{:26} {:10} {} {} {:>12}",
        expense.id,
        style.date(expense.date),
        fit(&expense.title, TITLE_WIDTH),
        fit(expense.category.as_str(), CATEGORY_WIDTH),
        style.money(expense.amount)
    )
}

/// Format a list of expenses as a table
pub fn format_expense_table(expenses: &[Expense], style: &DisplayStyle) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:26} {:10} {:width_t$} {:width_c$} {:>12}\n",
        "ID",
        "Date",
        "Title",
        "Category",
        "Amount",
        width_t = TITLE_WIDTH,
        width_c = CATEGORY_WIDTH
    ));
    output.push_str(&"-".repeat(26 + 10 + TITLE_WIDTH + CATEGORY_WIDTH + 12 + 4));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, style));
        output.push('\n');
    }

    output
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, style: &DisplayStyle) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:   {}\n", expense.id));
    output.push_str(&format!("Title:     {}\n", expense.title));
    output.push_str(&format!("Amount:    {}\n", style.money(expense.amount)));
    output.push_str(&format!("Category:  {}\n", expense.category));
    output.push_str(&format!("Date:      {}\n", style.date(expense.date)));

    output
}

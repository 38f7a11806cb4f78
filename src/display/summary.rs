//! Dashboard summary formatting
//!
//! The total line, the pager, the per-category breakdown and the trend
//! listing that stand in for the dashboard's charts.

use super::expense::format_expense_table;
use super::format::{fit, format_bar, format_percentage, separator, DisplayStyle};
use crate::view::{CategoryBreakdown, Dashboard, TrendPoint};

const BAR_WIDTH: usize = 20;

/// "Total Expenses: $X"
pub fn format_total(dashboard: &Dashboard, style: &DisplayStyle) -> String {
    format!("Total Expenses: {}\n", style.money(dashboard.total))
}

/// "Page N of M", or nothing when everything fits on one page
pub fn format_pager(dashboard: &Dashboard) -> String {
    let cursor = dashboard.cursor();
    if cursor.total_pages() <= 1 {
        return String::new();
    }
    let mut output = format!("Page {} of {}", cursor.page(), cursor.total_pages());
    if cursor.has_prev() {
        output.push_str(&format!("  (--page {} for previous)", cursor.page() - 1));
    }
    if cursor.has_next() {
        output.push_str(&format!("  (--page {} for next)", cursor.page() + 1));
    }
    output.push('\n');
    output
}

/// The full `list` screen: table for the requested page, pager and total
pub fn format_dashboard(dashboard: &Dashboard, style: &DisplayStyle) -> String {
    let items = dashboard.page_items();
    let mut output = if !dashboard.filtered.is_empty() && items.is_empty() {
        format!(
            "Page {} is out of range ({} page{}).\n",
            dashboard.page,
            dashboard.total_pages,
            if dashboard.total_pages == 1 { "" } else { "s" }
        )
    } else {
        let mut table = format_expense_table(items, style);
        table.push_str(&format_pager(dashboard));
        table
    };
    output.push('\n');
    output.push_str(&format_total(dashboard, style));
    output
}

/// Per-category totals with share of the whole, largest first
pub fn format_breakdown(breakdown: &CategoryBreakdown, style: &DisplayStyle) -> String {
    if breakdown.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let total = breakdown.total();
    let max = breakdown
        .entries()
        .iter()
        .map(|e| e.total.as_f64())
        .fold(0.0, f64::max);

    let mut output = String::new();
    output.push_str("Spending by Category\n");
    output.push_str(&separator(70));
    output.push('\n');

    for entry in breakdown.sorted_by_total() {
        output.push_str(&format!(
            "{} {:>12} {:>6} {:>4}x {}\n",
            fit(entry.category.as_str(), 14),
            style.money(entry.total),
            format_percentage(entry.total.percentage_of(total)),
            entry.count,
            format_bar(entry.total.as_f64(), max, BAR_WIDTH)
        ));
    }

    output.push_str(&separator(70));
    output.push('\n');
    output.push_str(&format!("{} {:>12}\n", fit("Total", 14), style.money(total)));

    output
}

/// Title/amount pairs in input order, one bar each
pub fn format_trend(points: &[TrendPoint], style: &DisplayStyle) -> String {
    if points.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let max = points.iter().map(|p| p.amount.as_f64()).fold(0.0, f64::max);

    let mut output = String::new();
    output.push_str("Expense Trend\n");
    output.push_str(&separator(60));
    output.push('\n');
    for point in points {
        output.push_str(&format!(
            "{} {:>12} {}\n",
            fit(&point.label, 20),
            style.money(point.amount),
            format_bar(point.amount.as_f64(), max, BAR_WIDTH)
        ));
    }

    output
}

//! Expense CLI commands
//!
//! Implements the dashboard views (list, summary, trend) and the expense
//! mutations. Every command loads the working set for the saved session first.

use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};

use super::confirm;
use crate::api::ExpenseApi;
use crate::config::Settings;
use crate::display::{
    format_breakdown, format_dashboard, format_expense_details, format_total, format_trend,
    DisplayStyle,
};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{parse_calendar_date, Category, ExpenseId, ExpenseInput, Money};
use crate::services::{AuthService, ExpenseService, ExpenseUpdate};
use crate::storage::SessionStore;
use crate::view::FilterCriteria;

/// Filter options shared by the dashboard views
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only show this category
    #[arg(short, long, value_parser = parse_category)]
    pub category: Option<Category>,

    /// Earliest date to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Latest date to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub to: Option<NaiveDate>,
}

impl FilterArgs {
    /// Build filter criteria from the options
    pub fn criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::new();
        if let Some(category) = &self.category {
            criteria = criteria.category(category.clone());
        }
        if let Some(from) = self.from {
            criteria = criteria.from(from);
        }
        if let Some(to) = self.to {
            criteria = criteria.to(to);
        }
        criteria
    }
}

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// List expenses, one page at a time
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// Page to show (starts at 1)
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Show the total and the spending per category
    Summary {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show the amount of each expense in order
    Trend {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Add a new expense
    Add {
        /// Expense title
        title: String,
        /// Amount (e.g., "12.50")
        #[arg(value_parser = parse_amount)]
        amount: Money,
        /// Category
        #[arg(short, long, value_parser = parse_category)]
        category: Category,
        /// Expense date (YYYY-MM-DD, defaults to today)
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Edit an expense; omitted fields keep their current values
    Edit {
        /// Expense ID
        id: ExpenseId,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New amount
        #[arg(short, long, value_parser = parse_amount)]
        amount: Option<Money>,
        /// New category
        #[arg(short, long, value_parser = parse_category)]
        category: Option<Category>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        id: ExpenseId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command<A: ExpenseApi>(
    api: &A,
    sessions: &SessionStore,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let session = AuthService::new(api, sessions).current()?;
    let mut service = ExpenseService::load(api, session)?.with_page_size(settings.page_size);
    let style = DisplayStyle::from_settings(settings);

    match cmd {
        ExpenseCommands::List { filters, page } => {
            let dashboard = service.view(&filters.criteria(), page);
            print!("{}", format_dashboard(&dashboard, &style));
        }

        ExpenseCommands::Summary { filters } => {
            let dashboard = service.view(&filters.criteria(), 1);
            print!("{}", format_total(&dashboard, &style));
            println!();
            print!("{}", format_breakdown(&dashboard.breakdown, &style));
        }

        ExpenseCommands::Trend { filters } => {
            let dashboard = service.view(&filters.criteria(), 1);
            print!("{}", format_trend(&dashboard.trend(), &style));
        }

        ExpenseCommands::Add {
            title,
            amount,
            category,
            date,
        } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let expense = service.create(ExpenseInput::new(title, amount, category, date))?;
            println!("Created expense:");
            print!("{}", format_expense_details(&expense, &style));
        }

        ExpenseCommands::Edit {
            id,
            title,
            amount,
            category,
            date,
        } => {
            let changes = ExpenseUpdate {
                title,
                amount,
                category,
                date,
            };
            let expense = service.edit(&id, &changes)?;
            println!("Updated expense:");
            print!("{}", format_expense_details(&expense, &style));
        }

        ExpenseCommands::Delete { id, force } => {
            let title = service
                .find(&id)
                .map(|e| e.title.clone())
                .ok_or_else(|| ExpenseError::expense_not_found(id.as_str()))?;

            if !force && !confirm(&format!("Delete expense '{}'? [y/N]: ", title))? {
                println!("Aborted.");
                return Ok(());
            }

            service.delete(&id)?;
            println!("Deleted expense: {}", title);
        }
    }

    Ok(())
}

fn parse_category(s: &str) -> Result<Category, String> {
    s.parse::<Category>().map_err(|e| e.to_string())
}

fn parse_amount(s: &str) -> Result<Money, String> {
    let amount = Money::parse(s).map_err(|e| e.to_string())?;
    if amount.is_negative() {
        return Err(format!("Amount cannot be negative: {}", amount));
    }
    Ok(amount)
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    parse_calendar_date(s)
}

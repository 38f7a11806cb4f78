//! Expense model
//!
//! An expense is owned by the remote API; the client only ever holds copies of
//! what the API returned. `ExpenseInput` is the user-editable part, validated
//! here before anything is sent.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::{ExpenseId, UserId};
use super::money::Money;

/// A single expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Identifier assigned by the remote store
    #[serde(rename = "_id")]
    pub id: ExpenseId,

    /// Display title
    pub title: String,

    /// Amount spent
    pub amount: Money,

    /// Expense category
    pub category: Category,

    /// Calendar date of the expense
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub date: NaiveDate,

    /// The user who owns this record
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
}

impl Expense {
    /// Create an expense as the remote store would return it
    pub fn new(
        id: impl Into<ExpenseId>,
        title: impl Into<String>,
        amount: Money,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            amount,
            category,
            date,
            owner_id: None,
        }
    }

    /// The editable fields of this expense, used as the base for edits
    pub fn to_input(&self) -> ExpenseInput {
        ExpenseInput {
            title: self.title.clone(),
            amount: self.amount,
            category: self.category.clone(),
            date: self.date,
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date.format("%Y-%m-%d"),
            self.title,
            self.amount,
            self.category
        )
    }
}

/// Accepts "2024-01-31" as well as the RFC 3339 timestamps document stores
/// tend to hand back ("2024-01-31T00:00:00.000Z"). Only the date part is kept.
fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).map_err(serde::de::Error::custom)
}

/// Parse a calendar date from either a plain date or a full timestamp
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD", raw))
}

/// The user-supplied fields of an expense, for create and update requests
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseInput {
    pub title: String,
    pub amount: Money,
    pub category: Category,
    pub date: NaiveDate,
}

impl ExpenseInput {
    /// Create a new input with the title trimmed
    pub fn new(title: impl Into<String>, amount: Money, category: Category, date: NaiveDate) -> Self {
        Self {
            title: title.into().trim().to_string(),
            amount,
            category,
            date,
        }
    }

    /// Validate the input
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.title.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyTitle);
        }

        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount(self.amount));
        }

        if !self.category.is_known() {
            return Err(ExpenseValidationError::UnknownCategory(
                self.category.as_str().to_string(),
            ));
        }

        Ok(())
    }
}

/// Validation errors for expense input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyTitle,
    NegativeAmount(Money),
    UnknownCategory(String),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Expense title cannot be empty"),
            Self::NegativeAmount(amount) => {
                write!(f, "Expense amount cannot be negative: {}", amount)
            }
            Self::UnknownCategory(label) => write!(
                f,
                "Unknown category '{}'. Expected one of: {}",
                label,
                Category::known_labels()
            ),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

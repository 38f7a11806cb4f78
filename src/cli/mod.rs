//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod auth;
pub mod expense;

pub use auth::{handle_auth_command, AuthCommands, CredentialArgs};
pub use expense::{handle_expense_command, ExpenseCommands, FilterArgs};

use std::io::{self, Write};

use crate::error::{ExpenseError, ExpenseResult};

/// Read one trimmed line from stdin after printing `prompt`
pub(crate) fn prompt_line(prompt: &str) -> ExpenseResult<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Prompt for a password (hidden input)
pub(crate) fn prompt_password(prompt: &str) -> ExpenseResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| ExpenseError::Io(format!("Failed to read password: {}", e)))
}

/// Ask a yes/no question; anything but "y" or "yes" is a no
pub(crate) fn confirm(prompt: &str) -> ExpenseResult<bool> {
    let answer = prompt_line(prompt)?.to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

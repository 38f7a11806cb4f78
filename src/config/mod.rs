//! Configuration module for expense-cli
//!
//! This module provides configuration management including:
//! - Platform config directory resolution with an environment override
//! - User settings persistence (API location, page size, display format)

pub mod paths;
pub mod settings;

pub use paths::ExpensePaths;
pub use settings::Settings;

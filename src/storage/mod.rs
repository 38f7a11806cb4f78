//! Storage layer for expense-cli
//!
//! Expense records live on the remote API; the only local state is the saved
//! session, written atomically as JSON.

pub mod file_io;
pub mod session;

pub use file_io::{read_json_optional, remove_if_exists, write_json_atomic};
pub use session::{Session, SessionStore};

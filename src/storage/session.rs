//! Saved login session
//!
//! The session is the only state the client keeps between runs. It is loaded
//! once and handed explicitly to every call that talks to the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use super::file_io::{read_json_optional, remove_if_exists, write_json_atomic};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::UserId;

/// An authenticated session against the remote API
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token returned by the login endpoint
    pub token: String,

    /// The user the token was issued for
    pub user_id: UserId,

    /// Username used to log in, for display
    #[serde(default)]
    pub username: String,

    /// Token expiry, when the token carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// When the session was created
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session
    pub fn new(token: impl Into<String>, user_id: UserId, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_id,
            username: username.into(),
            expires_at: None,
            created_at: Utc::now(),
        }
    }

    /// Set the expiry time
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Check if the token has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| expiry <= now)
    }

    /// Fail with [`ExpenseError::SessionExpired`] if the token has expired
    pub fn ensure_valid(&self) -> ExpenseResult<()> {
        if self.is_expired_at(Utc::now()) {
            return Err(ExpenseError::SessionExpired);
        }
        Ok(())
    }
}

// The token must never end up in logs
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("expires_at", &self.expires_at)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Reads and writes the session file
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store backed by the given file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the session file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the saved session, if any
    pub fn load(&self) -> ExpenseResult<Option<Session>> {
        read_json_optional(&self.path)
    }

    /// Load the saved session or fail with [`ExpenseError::NotLoggedIn`]
    pub fn require(&self) -> ExpenseResult<Session> {
        self.load()?.ok_or(ExpenseError::NotLoggedIn)
    }

    /// Persist a session, replacing any previous one
    pub fn save(&self, session: &Session) -> ExpenseResult<()> {
        write_json_atomic(&self.path, session)?;
        tracing::debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Remove the saved session; returns whether one existed
    pub fn clear(&self) -> ExpenseResult<bool> {
        let removed = remove_if_exists(&self.path)?;
        if removed {
            tracing::debug!(path = %self.path.display(), "session removed");
        }
        Ok(removed)
    }
}

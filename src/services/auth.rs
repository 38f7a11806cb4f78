//! Authentication service
//!
//! Logs users in and out against the remote API and keeps the resulting
//! session on disk.

use crate::api::{decode_claims, Credentials, ExpenseApi};
use crate::error::{ExpenseError, ExpenseResult};
use crate::storage::{Session, SessionStore};

/// Service for login, registration and session lookup
pub struct AuthService<'a, A: ExpenseApi> {
    api: &'a A,
    sessions: &'a SessionStore,
}

impl<'a, A: ExpenseApi> AuthService<'a, A> {
    /// Create a new auth service
    pub fn new(api: &'a A, sessions: &'a SessionStore) -> Self {
        Self { api, sessions }
    }

    /// Log in and save the session
    ///
    /// The user id is read from the token issued by the API.
    pub fn login(&self, username: &str, password: &str) -> ExpenseResult<Session> {
        let credentials = validated_credentials(username, password)?;

        let token = self.api.login(&credentials)?;
        let claims = decode_claims(&token)?;

        let mut session = Session::new(token, claims.user_id.clone(), credentials.username);
        if let Some(expires_at) = claims.expires_at() {
            session = session.with_expiry(expires_at);
        }

        self.sessions.save(&session)?;
        tracing::info!(user_id = %session.user_id, username = %session.username, "logged in");

        Ok(session)
    }

    /// Create a new account on the remote API
    ///
    /// Registration does not log the user in.
    pub fn register(&self, username: &str, password: &str) -> ExpenseResult<()> {
        let credentials = validated_credentials(username, password)?;
        self.api.register(&credentials)?;
        tracing::info!(username = %credentials.username, "registered new user");
        Ok(())
    }

    /// Forget the saved session; returns whether one existed
    pub fn logout(&self) -> ExpenseResult<bool> {
        let removed = self.sessions.clear()?;
        tracing::info!(removed, "logged out");
        Ok(removed)
    }

    /// The saved session, if it exists and has not expired
    pub fn current(&self) -> ExpenseResult<Session> {
        let session = self.sessions.require()?;
        session.ensure_valid()?;
        Ok(session)
    }
}

fn validated_credentials(username: &str, password: &str) -> ExpenseResult<Credentials> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ExpenseError::Validation("Username cannot be empty".into()));
    }
    if password.is_empty() {
        return Err(ExpenseError::Validation("Password cannot be empty".into()));
    }
    Ok(Credentials::new(username, password))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::models::UserId;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn setup() -> (TempDir, SessionStore, FakeApi) {
        let temp_dir = TempDir::new().unwrap();
        let sessions = SessionStore::new(temp_dir.path().join("session.json"));
        (temp_dir, sessions, FakeApi::new())
    }

    #[test]
    fn test_login_saves_session_with_user_from_token() {
        let (_temp_dir, sessions, api) = setup();
        let service = AuthService::new(&api, &sessions);

        let session = service.login("  alice ", "hunter2").unwrap();

        assert_eq!(session.user_id, UserId::new("user-1"));
        assert_eq!(session.username, "alice");
        assert_eq!(sessions.load().unwrap(), Some(session.clone()));
        assert_eq!(service.current().unwrap(), session);
    }

    #[test]
    fn test_failed_login_keeps_previous_state() {
        let (_temp_dir, sessions, api) = setup();
        let service = AuthService::new(&api, &sessions);

        let err = service.login("alice", "wrong").unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidCredentials));
        assert_eq!(sessions.load().unwrap(), None);
    }

    #[test]
    fn test_blank_credentials_rejected_before_request() {
        let (_temp_dir, sessions, api) = setup();
        let service = AuthService::new(&api, &sessions);

        // A request would consume the failure flag
        api.fail_next.set(true);
        assert!(service.login("  ", "pw").unwrap_err().is_validation());
        assert!(service.register("bob", "").unwrap_err().is_validation());
        assert!(api.fail_next.get());
    }

    #[test]
    fn test_register() {
        let (_temp_dir, sessions, api) = setup();
        let service = AuthService::new(&api, &sessions);

        service.register("bob", "pw").unwrap();
        assert_eq!(*api.registered.borrow(), vec!["bob".to_string()]);
        assert_eq!(sessions.load().unwrap(), None);

        let err = service.register("bob", "pw").unwrap_err();
        assert!(matches!(err, ExpenseError::Api { status: 400, .. }));
    }

    #[test]
    fn test_logout() {
        let (_temp_dir, sessions, api) = setup();
        let service = AuthService::new(&api, &sessions);

        assert!(!service.logout().unwrap());
        service.login("alice", "hunter2").unwrap();
        assert!(service.logout().unwrap());
        assert!(matches!(service.current(), Err(ExpenseError::NotLoggedIn)));
    }

    #[test]
    fn test_expired_session_is_rejected() {
        let (_temp_dir, sessions, api) = setup();
        let service = AuthService::new(&api, &sessions);

        let expired = Session::new("tok", UserId::new("user-1"), "alice")
            .with_expiry(Utc::now() - Duration::hours(1));
        sessions.save(&expired).unwrap();

        assert!(matches!(service.current(), Err(ExpenseError::SessionExpired)));
    }
}

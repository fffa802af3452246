//! The in-memory session and its four-operation mutation surface
//!
//! The session is the single source of truth for "is the user authenticated".
//! Screens gate their data fetches on it and never read-modify-write it
//! directly; all mutation goes through [`Session::initialize`],
//! [`Session::establish`], [`Session::clear`], and [`Session::refresh_user`].

use crate::storage::{SessionStorage, StorageError};
use sanad_core::Customer;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("No session is established")]
    NotAuthenticated,
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Coarse session state, reported to the navigation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Restore has not completed; do not redirect based on session presence
    Pending,
    Unauthenticated,
    Authenticated,
}

/// Token and user are stored as one unit so a token-without-user state is
/// unrepresentable.
#[derive(Debug, Clone)]
struct Authenticated {
    token: String,
    user: Customer,
}

#[derive(Debug)]
struct Inner {
    state: SessionState,
    auth: Option<Authenticated>,
}

/// Process-wide authentication session, shared via `Arc`.
pub struct Session {
    storage: SessionStorage,
    inner: RwLock<Inner>,
}

impl Session {
    /// Create a session backed by the given storage, in the Pending state.
    pub fn new(storage: SessionStorage) -> Self {
        Self {
            storage,
            inner: RwLock::new(Inner {
                state: SessionState::Pending,
                auth: None,
            }),
        }
    }

    /// Restore a persisted session, resolving Pending.
    ///
    /// Missing, partial, or malformed persisted state all degrade to
    /// Unauthenticated; this never fails and never blocks on anything but
    /// the single storage read.
    pub async fn initialize(&self) {
        let restored = self.storage.load();
        let mut inner = self.inner.write().await;
        match restored {
            Some((token, user)) => {
                inner.auth = Some(Authenticated { token, user });
                inner.state = SessionState::Authenticated;
            }
            None => {
                inner.auth = None;
                inner.state = SessionState::Unauthenticated;
            }
        }
    }

    /// Persist and adopt a new session after login or registration.
    ///
    /// Persists before updating memory: on a storage failure the error
    /// propagates and the in-memory state is left untouched, so memory never
    /// claims a session the disk does not hold.
    pub async fn establish(&self, token: String, user: Customer) -> SessionResult<()> {
        self.storage.store(&token, &user)?;
        let mut inner = self.inner.write().await;
        info!("Session established for {}", user.email);
        inner.auth = Some(Authenticated { token, user });
        inner.state = SessionState::Authenticated;
        Ok(())
    }

    /// Drop the session on logout. Safe to call when no session exists.
    pub async fn clear(&self) -> SessionResult<()> {
        self.storage.clear()?;
        let mut inner = self.inner.write().await;
        inner.auth = None;
        inner.state = SessionState::Unauthenticated;
        Ok(())
    }

    /// Replace only the user profile, leaving the token untouched.
    ///
    /// Used after a profile edit so the cached display data stays consistent
    /// without re-authenticating. Errors if no session is established.
    pub async fn refresh_user(&self, user: Customer) -> SessionResult<()> {
        let mut inner = self.inner.write().await;
        let auth = inner.auth.as_mut().ok_or(SessionError::NotAuthenticated)?;
        self.storage.store(&auth.token, &user)?;
        auth.user = user;
        Ok(())
    }

    /// Current coarse state
    pub async fn state(&self) -> SessionState {
        self.inner.read().await.state
    }

    /// The bearer token, if authenticated
    pub async fn token(&self) -> Option<String> {
        self.inner
            .read()
            .await
            .auth
            .as_ref()
            .map(|a| a.token.clone())
    }

    /// The authenticated user profile, if any
    pub async fn user(&self) -> Option<Customer> {
        self.inner.read().await.auth.as_ref().map(|a| a.user.clone())
    }

    /// Whether a session is currently established
    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.state == SessionState::Authenticated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn user(name: &str) -> Customer {
        serde_json::from_str(&format!(
            r#"{{"id": 1, "name": "{name}", "email": "demo@sanad.app"}}"#
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn test_starts_pending_then_unauthenticated() {
        let dir = tempdir().unwrap();
        let session = Session::new(SessionStorage::with_path(dir.path().join("s.json")));

        assert_eq!(session.state().await, SessionState::Pending);
        session.initialize().await;
        assert_eq!(session.state().await, SessionState::Unauthenticated);
        assert!(session.token().await.is_none());
    }

    #[tokio::test]
    async fn test_establish_then_restart_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("s.json");

        {
            let session = Session::new(SessionStorage::with_path(path.clone()));
            session.initialize().await;
            session.establish("tok-1".to_string(), user("Demo User")).await.unwrap();
            assert!(session.is_authenticated().await);
        }

        // Simulated app restart
        let session = Session::new(SessionStorage::with_path(path));
        session.initialize().await;
        assert_eq!(session.state().await, SessionState::Authenticated);
        assert_eq!(session.token().await.unwrap(), "tok-1");
        assert_eq!(session.user().await.unwrap().name, "Demo User");
    }

    #[tokio::test]
    async fn test_clear_from_any_state() {
        let dir = tempdir().unwrap();
        let session = Session::new(SessionStorage::with_path(dir.path().join("s.json")));
        session.initialize().await;

        // Clear with no session
        session.clear().await.unwrap();
        assert_eq!(session.state().await, SessionState::Unauthenticated);

        session.establish("tok-1".to_string(), user("Demo User")).await.unwrap();
        session.clear().await.unwrap();
        session.clear().await.unwrap();
        assert_eq!(session.state().await, SessionState::Unauthenticated);
        assert!(session.user().await.is_none());
    }

    #[tokio::test]
    async fn test_refresh_user_keeps_token() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("s.json");
        let session = Session::new(SessionStorage::with_path(path.clone()));
        session.initialize().await;

        session.establish("tok-1".to_string(), user("Old Name")).await.unwrap();
        session.refresh_user(user("New Name")).await.unwrap();

        assert_eq!(session.token().await.unwrap(), "tok-1");
        assert_eq!(session.user().await.unwrap().name, "New Name");

        // The refreshed profile survives a restart
        let session = Session::new(SessionStorage::with_path(path));
        session.initialize().await;
        assert_eq!(session.user().await.unwrap().name, "New Name");
    }

    #[tokio::test]
    async fn test_refresh_user_requires_session() {
        let dir = tempdir().unwrap();
        let session = Session::new(SessionStorage::with_path(dir.path().join("s.json")));
        session.initialize().await;

        let result = session.refresh_user(user("Nobody")).await;
        assert!(matches!(result, Err(SessionError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_malformed_persisted_state_degrades() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("s.json");
        std::fs::write(&path, "not json at all").unwrap();

        let session = Session::new(SessionStorage::with_path(path));
        session.initialize().await;
        assert_eq!(session.state().await, SessionState::Unauthenticated);
    }
}

//! Shared session state.
//!
//! One [`SessionHolder`] is created at startup and cloned into every
//! environment that needs it. It restores the previous session from
//! storage, persists logins, and feeds the `Authorization` header to the
//! API client through [`TokenProvider`].
//!
//! # Storage keys
//!
//! The token is written under both `auth_token` and the legacy `token` key
//! so that session files written by older builds keep working in either
//! direction. The full session is stored separately under `current_user`;
//! a file holding only a token still counts as logged in, just without a
//! profile.

use crate::storage::{KeyValueStore, StorageError};
use parkdeck_api::{Session, TokenProvider};
use std::sync::Arc;
use tokio::sync::watch;

const TOKEN_KEY: &str = "auth_token";
const LEGACY_TOKEN_KEY: &str = "token";
const USER_KEY: &str = "current_user";

/// Holds the current session and keeps storage in sync with it.
///
/// Clones share the same session; a login through one clone is visible to
/// all of them and to every [`subscribe`](Self::subscribe) receiver.
#[derive(Debug, Clone)]
pub struct SessionHolder<K> {
    storage: K,
    current: Arc<watch::Sender<Option<Session>>>,
}

impl<K: KeyValueStore> SessionHolder<K> {
    /// Create a holder, restoring any session found in `storage`.
    pub fn new(storage: K) -> Self {
        let restored = restore(&storage);
        let (current, _) = watch::channel(restored);
        Self {
            storage,
            current: Arc::new(current),
        }
    }

    /// Persist a fresh session and publish it to all clones.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the session cannot be persisted. The
    /// in-memory session is not updated in that case; callers decide
    /// whether to retry or carry on without persistence.
    pub fn login(&self, session: &Session) -> Result<(), StorageError> {
        self.storage.set(TOKEN_KEY, &session.token)?;
        self.storage.set(LEGACY_TOKEN_KEY, &session.token)?;
        let encoded =
            serde_json::to_string(session).map_err(|e| StorageError::Serde(e.to_string()))?;
        self.storage.set(USER_KEY, &encoded)?;

        self.current.send_replace(Some(session.clone()));
        Ok(())
    }

    /// Drop the session, wiping all storage keys.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when storage cannot be updated.
    pub fn logout(&self) -> Result<(), StorageError> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(LEGACY_TOKEN_KEY)?;
        self.storage.remove(USER_KEY)?;

        self.current.send_replace(None);
        Ok(())
    }

    /// The current session, if any.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    /// Watch for session changes.
    ///
    /// The receiver yields the current value immediately and then once per
    /// login or logout.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.current.subscribe()
    }

    /// The raw bearer token, when one exists.
    ///
    /// Prefers the dedicated token keys over the token embedded in the
    /// stored session, matching what older builds wrote.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.storage
            .get(TOKEN_KEY)
            .or_else(|| self.storage.get(LEGACY_TOKEN_KEY))
            .or_else(|| self.current.borrow().as_ref().map(|s| s.token.clone()))
    }

    /// Whether any credential is available.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }
}

impl<K: KeyValueStore> TokenProvider for SessionHolder<K> {
    fn authorization(&self) -> Option<String> {
        let token = self.token()?;
        let scheme = self
            .current
            .borrow()
            .as_ref()
            .map_or_else(|| "Bearer".to_string(), |s| s.token_type.clone());
        Some(format!("{scheme} {token}"))
    }
}

fn restore<K: KeyValueStore>(storage: &K) -> Option<Session> {
    let raw = storage.get(USER_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!(error = %e, "Stored session is unreadable, starting logged out");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::storage::MemoryStore;
    use parkdeck_api::Role;

    fn session(token: &str) -> Session {
        Session {
            token: token.to_string(),
            token_type: "Bearer".to_string(),
            user_id: 7,
            email: "user@example.com".to_string(),
            first_name: "Mila".to_string(),
            last_name: "Petrov".to_string(),
            role: Role::User,
        }
    }

    #[test]
    fn test_login_persists_both_token_keys_and_the_session() {
        let storage = MemoryStore::new();
        let holder = SessionHolder::new(storage.clone());

        holder.login(&session("jwt-1")).unwrap();

        assert_eq!(storage.get("auth_token").as_deref(), Some("jwt-1"));
        assert_eq!(storage.get("token").as_deref(), Some("jwt-1"));
        assert!(storage.get("current_user").is_some());
        assert_eq!(holder.current().unwrap().token, "jwt-1");
    }

    #[test]
    fn test_restores_session_written_by_a_previous_run() {
        let storage = MemoryStore::new();
        {
            let holder = SessionHolder::new(storage.clone());
            holder.login(&session("jwt-1")).unwrap();
        }

        let restored = SessionHolder::new(storage);
        assert_eq!(restored.current().unwrap().token, "jwt-1");
        assert!(restored.is_logged_in());
    }

    #[test]
    fn test_bare_legacy_token_still_counts_as_logged_in() {
        let storage = MemoryStore::new();
        storage.set("token", "legacy-jwt").unwrap();

        let holder = SessionHolder::new(storage);
        assert!(holder.current().is_none());
        assert!(holder.is_logged_in());
        assert_eq!(
            holder.authorization().as_deref(),
            Some("Bearer legacy-jwt")
        );
    }

    #[test]
    fn test_dedicated_token_key_wins_over_embedded_token() {
        let storage = MemoryStore::new();
        let holder = SessionHolder::new(storage.clone());
        holder.login(&session("jwt-1")).unwrap();

        // Another writer rotated the token without touching the session.
        storage.set("auth_token", "jwt-2").unwrap();

        assert_eq!(holder.token().as_deref(), Some("jwt-2"));
        assert_eq!(holder.authorization().as_deref(), Some("Bearer jwt-2"));
    }

    #[test]
    fn test_logout_wipes_everything() {
        let storage = MemoryStore::new();
        let holder = SessionHolder::new(storage.clone());
        holder.login(&session("jwt-1")).unwrap();

        holder.logout().unwrap();

        assert!(storage.get("auth_token").is_none());
        assert!(storage.get("token").is_none());
        assert!(storage.get("current_user").is_none());
        assert!(!holder.is_logged_in());
        assert!(holder.authorization().is_none());
    }

    #[test]
    fn test_unreadable_stored_session_starts_logged_out() {
        let storage = MemoryStore::new();
        storage.set("current_user", "{ not json").unwrap();

        let holder = SessionHolder::new(storage);
        assert!(holder.current().is_none());
    }

    #[test]
    fn test_clones_share_the_session() {
        let holder = SessionHolder::new(MemoryStore::new());
        let clone = holder.clone();
        let mut watcher = holder.subscribe();

        holder.login(&session("jwt-1")).unwrap();

        assert_eq!(clone.current().unwrap().token, "jwt-1");
        assert!(watcher.has_changed().unwrap());
    }
}

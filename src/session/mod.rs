//! Session store
//!
//! Holds the authenticated identity and bearer token, mirrors them into durable
//! storage and clears them on logout or expiry.

pub mod service;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::storage::{KeyValueStore, StorageError};
use crate::types::User;

pub use service::SessionService;

/// Durable key holding the bearer token
pub const TOKEN_KEY: &str = "authToken";
/// Durable key holding the serialized user
pub const USER_KEY: &str = "currentUser";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

pub struct SessionStore {
    current: RwLock<Option<Session>>,
    storage: Arc<dyn KeyValueStore>,
    expired: AtomicBool,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            current: RwLock::new(None),
            storage,
            expired: AtomicBool::new(false),
        }
    }

    /// Make `token`/`user` the active session and persist both entries.
    ///
    /// The in-memory session is set even when persisting fails.
    pub fn activate(&self, token: String, user: User) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(&user)?;
        self.set_active(Session { token: token.clone(), user });
        self.storage.set(TOKEN_KEY, &token)?;
        self.storage.set(USER_KEY, &user_json)?;
        Ok(())
    }

    /// Replace the in-memory session without touching durable storage.
    pub fn set_active(&self, session: Session) {
        *self.current.write().expect("session lock poisoned") = Some(session);
        self.expired.store(false, Ordering::SeqCst);
    }

    /// Refresh the stored user (e.g. from `/api/auth/me`), keeping the token.
    pub fn update_user(&self, user: User) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(&user)?;
        if let Some(session) = self.current.write().expect("session lock poisoned").as_mut() {
            session.user = user;
        }
        self.storage.set(USER_KEY, &user_json)
    }

    /// Read a previously persisted session. Both entries must exist and the user must parse.
    pub fn restore(&self) -> Option<Session> {
        let token = match self.storage.get(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => return None,
            Err(e) => {
                tracing::warn!("Failed to read stored token: {}", e);
                return None;
            }
        };

        let user_json = match self.storage.get(USER_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read stored user: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<User>(&user_json) {
            Ok(user) => Some(Session { token, user }),
            Err(e) => {
                tracing::warn!("Stored user is not valid JSON: {}", e);
                None
            }
        }
    }

    /// Drop both in-memory fields and both durable entries.
    ///
    /// Memory is always cleared; both removals are attempted even if the first fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        *self.current.write().expect("session lock poisoned") = None;
        let token_result = self.storage.remove(TOKEN_KEY);
        let user_result = self.storage.remove(USER_KEY);
        token_result.and(user_result)
    }

    /// Clear the session because the backend rejected its token.
    pub fn expire(&self) {
        if let Err(e) = self.clear() {
            tracing::error!("Failed to clear stored session: {}", e);
        }
        self.expired.store(true, Ordering::SeqCst);
    }

    /// Returns whether an expiry happened since the last call, and resets the flag.
    pub fn take_expired(&self) -> bool {
        self.expired.swap(false, Ordering::SeqCst)
    }

    pub fn token(&self) -> Option<String> {
        self.current
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|session| session.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.current
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|session| session.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().expect("session lock poisoned").is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn user() -> User {
        User {
            id: "u1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            created_at: None,
        }
    }

    #[test]
    fn test_activate_persists_both_entries() {
        let storage = Arc::new(MemoryStore::new());
        let store = SessionStore::new(storage.clone());

        store.activate("tok".into(), user()).unwrap();

        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("tok"));
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("tok"));
        let stored_user: User = serde_json::from_str(&storage.get(USER_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored_user, user());
    }

    #[test]
    fn test_restore_requires_both_entries() {
        let storage = Arc::new(MemoryStore::new());
        let store = SessionStore::new(storage.clone());
        assert!(store.restore().is_none());

        storage.set(TOKEN_KEY, "tok").unwrap();
        assert!(store.restore().is_none());

        storage.set(USER_KEY, "{broken").unwrap();
        assert!(store.restore().is_none());

        storage.set(USER_KEY, &serde_json::to_string(&user()).unwrap()).unwrap();
        let session = store.restore().expect("session");
        assert_eq!(session.token, "tok");
        // restore alone never activates
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_clear_regardless_of_prior_state() {
        let storage = Arc::new(MemoryStore::new());
        let store = SessionStore::new(storage.clone());

        store.clear().unwrap();
        assert!(!store.is_authenticated());
        assert!(storage.is_empty());

        store.activate("tok".into(), user()).unwrap();
        store.clear().unwrap();
        assert!(store.token().is_none());
        assert!(store.user().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_expire_sets_flag_once() {
        let storage = Arc::new(MemoryStore::new());
        let store = SessionStore::new(storage.clone());
        store.activate("tok".into(), user()).unwrap();

        store.expire();

        assert!(!store.is_authenticated());
        assert!(storage.is_empty());
        assert!(store.take_expired());
        assert!(!store.take_expired());
    }
}

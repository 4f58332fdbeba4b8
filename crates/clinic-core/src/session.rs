//! Session identity and persistence
//!
//! The session is the only mutable state shared across the UI: read on
//! every outgoing request, written only by login/logout. Token and
//! user identity are always written and cleared as a pair, so a
//! present token always implies a present identity.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Storage key for the bearer token
pub const TOKEN_KEY: &str = "authToken";
/// Storage key for the serialized user identity
pub const USER_KEY: &str = "userData";

/// The authenticated user's identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Identity plus bearer token, as held by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: SessionUser,
    pub token: String,
}

/// Key-value persistence for the session; localStorage in the browser
#[cfg_attr(test, mockall::automock)]
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory [`SessionStorage`], for tests and non-browser targets
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Holds the current session and keeps it in sync with persistence
pub struct SessionStore {
    storage: Rc<dyn SessionStorage>,
    current: RefCell<Option<Session>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl SessionStore {
    pub fn new(storage: Rc<dyn SessionStorage>) -> Self {
        Self {
            storage,
            current: RefCell::new(None),
        }
    }

    /// Load a persisted session at startup. Missing or unparseable
    /// data leaves the store unauthenticated; a half-written pair is
    /// discarded entirely.
    pub fn restore(&self) {
        let token = self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let user = self
            .storage
            .get(USER_KEY)
            .and_then(|raw| serde_json::from_str::<SessionUser>(&raw).ok());

        match (token, user) {
            (Some(token), Some(user)) => {
                tracing::debug!("Restored session for {}", user.email);
                *self.current.borrow_mut() = Some(Session { user, token });
            }
            (None, None) => {}
            _ => {
                tracing::warn!("Discarding inconsistent persisted session");
                self.storage.remove(TOKEN_KEY);
                self.storage.remove(USER_KEY);
            }
        }
    }

    /// Establish a session, persisting user and token together
    pub fn login(&self, user: SessionUser, token: String) {
        if let Ok(raw) = serde_json::to_string(&user) {
            // User first, then token: a present token must always have
            // an identity next to it.
            self.storage.set(USER_KEY, &raw);
            self.storage.set(TOKEN_KEY, &token);
        }
        tracing::info!("Session established for {}", user.email);
        *self.current.borrow_mut() = Some(Session { user, token });
    }

    /// Clear the session everywhere. Safe to call repeatedly.
    pub fn logout(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
        if self.current.borrow_mut().take().is_some() {
            tracing::info!("Session cleared");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.borrow().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.current.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.current.borrow().as_ref().map(|s| s.user.clone())
    }

    pub fn session(&self) -> Option<Session> {
        self.current.borrow().clone()
    }
}

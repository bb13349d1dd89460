//! # Session Manager
//!
//! Tracks who is signed in and keeps that identity across restarts.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   start ──► restore() ──┬── record found ──────────┐                   │
//! │                         │                          ▼                   │
//! │                         │                  ┌───────────────┐           │
//! │                         ▼                  │ Authenticated │           │
//! │                  ┌───────────┐  login()    │    (User)     │           │
//! │                  │ Anonymous │ ──────────► │               │◄─┐        │
//! │                  │           │  register() │               │  │        │
//! │                  │           │ ◄────────── │               │  │        │
//! │                  └───────────┘  logout()   └───────┬───────┘  │        │
//! │                                                    └──────────┘        │
//! │                                                   update_profile()     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persistence
//! The identity is stored as JSON under [`crate::SESSION_KEY`] in an opaque
//! [`KeyValueStore`]. Each transition writes the store first and changes
//! in-memory state only once the write succeeded.
//!
//! ## Credentials
//! Credentials go through a [`CredentialVerifier`]. The bundled
//! [`MockVerifier`] accepts any non-empty input.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, StoreError};
use crate::types::User;
use crate::validation::{required_trimmed, validate_credentials, validate_profile};
use crate::SESSION_KEY;

// =============================================================================
// Key-Value Store
// =============================================================================

/// Minimal string key-value persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Process-local store, used in tests and when persistence is disabled.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// Credential Verification
// =============================================================================

/// Turns submitted credentials into an identity.
pub trait CredentialVerifier {
    fn verify_login(&self, email: &str, password: &str) -> CoreResult<User>;

    fn verify_registration(&self, username: &str, email: &str, password: &str)
        -> CoreResult<User>;
}

/// Accepts any non-empty credentials.
///
/// Every identity it produces has the fixed id `user1`, so listings created
/// in one session stay owned after signing in again.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockVerifier;

impl MockVerifier {
    pub const USER_ID: &'static str = "user1";
}

impl CredentialVerifier for MockVerifier {
    fn verify_login(&self, email: &str, password: &str) -> CoreResult<User> {
        let email = validate_credentials(email, password)?;

        // Username is the email local part, or the whole input when there is none.
        let username = match email.split('@').next() {
            Some(local) if !local.is_empty() => local.to_string(),
            _ => email.clone(),
        };

        Ok(User {
            id: Self::USER_ID.to_string(),
            username,
            email,
        })
    }

    fn verify_registration(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> CoreResult<User> {
        let username = required_trimmed("username", username, 100)?;
        let email = validate_credentials(email, password)?;

        Ok(User {
            id: Self::USER_ID.to_string(),
            username,
            email,
        })
    }
}

// =============================================================================
// Session State
// =============================================================================

/// Current authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", content = "user", rename_all = "kebab-case")]
#[ts(export)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Authenticated(user) => Some(user),
        }
    }
}

/// What [`SessionManager::restore`] found in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// No record was stored.
    Anonymous,
    Restored(User),
    /// A record was stored but could not be read; it has been removed.
    Discarded { reason: String },
}

impl RestoreOutcome {
    pub fn user(&self) -> Option<&User> {
        match self {
            RestoreOutcome::Restored(user) => Some(user),
            _ => None,
        }
    }
}

// =============================================================================
// Session Manager
// =============================================================================

/// Owns the session state and its persisted record.
pub struct SessionManager<S: KeyValueStore> {
    store: S,
    verifier: Box<dyn CredentialVerifier + Send + Sync>,
    state: SessionState,
}

impl<S: KeyValueStore> SessionManager<S> {
    /// Creates an anonymous session backed by `store`, using [`MockVerifier`].
    ///
    /// Call [`SessionManager::restore`] to pick up a persisted identity.
    pub fn new(store: S) -> Self {
        Self::with_verifier(store, Box::new(MockVerifier))
    }

    pub fn with_verifier(store: S, verifier: Box<dyn CredentialVerifier + Send + Sync>) -> Self {
        SessionManager {
            store,
            verifier,
            state: SessionState::Anonymous,
        }
    }

    /// Loads the persisted identity, if any.
    ///
    /// An unreadable record is removed and the session stays anonymous;
    /// the caller learns about it through [`RestoreOutcome::Discarded`].
    ///
    /// ## Errors
    /// `Storage` when the store cannot be read, or the bad record cannot be
    /// removed.
    pub fn restore(&mut self) -> CoreResult<RestoreOutcome> {
        let Some(raw) = self.store.get(SESSION_KEY)? else {
            self.state = SessionState::Anonymous;
            return Ok(RestoreOutcome::Anonymous);
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => {
                self.state = SessionState::Authenticated(user.clone());
                Ok(RestoreOutcome::Restored(user))
            }
            Err(e) => {
                self.store.remove(SESSION_KEY)?;
                self.state = SessionState::Anonymous;
                Ok(RestoreOutcome::Discarded {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Signs in with email and password.
    ///
    /// ## User Workflow
    /// ```text
    /// Login screen: "demo@ecofinds.com" / "secret"
    ///      │
    ///      ▼
    /// login() ← THIS FUNCTION
    ///      │
    ///      ├── verifier → User { id: "user1", username: "demo", .. }
    ///      ├── store.set("ecofinds-user", json)
    ///      └── state = Authenticated
    /// ```
    pub fn login(&mut self, email: &str, password: &str) -> CoreResult<User> {
        let user = self.verifier.verify_login(email, password)?;
        self.establish(user)
    }

    /// Creates an account and signs in.
    pub fn register(&mut self, username: &str, email: &str, password: &str) -> CoreResult<User> {
        let user = self.verifier.verify_registration(username, email, password)?;
        self.establish(user)
    }

    /// Signs out and deletes the persisted record.
    pub fn logout(&mut self) -> CoreResult<()> {
        self.store.remove(SESSION_KEY)?;
        self.state = SessionState::Anonymous;
        Ok(())
    }

    /// Changes the active user's name and email, keeping the id.
    ///
    /// ## Errors
    /// - `NotAuthenticated` when nobody is signed in
    /// - `Validation` when either field is blank
    pub fn update_profile(&mut self, username: &str, email: &str) -> CoreResult<User> {
        let current = self.require_user()?;
        let (username, email) = validate_profile(username, email)?;

        let user = User {
            id: current.id.clone(),
            username,
            email,
        };
        self.establish(user)
    }

    /// The signed-in user or `NotAuthenticated`.
    pub fn require_user(&self) -> CoreResult<&User> {
        self.state.user().ok_or(CoreError::NotAuthenticated)
    }

    pub fn current_user(&self) -> Option<&User> {
        self.state.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.user().is_some()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn establish(&mut self, user: User) -> CoreResult<User> {
        let record = serde_json::to_string(&user).map_err(StoreError::from)?;
        self.store.set(SESSION_KEY, &record)?;
        self.state = SessionState::Authenticated(user.clone());
        Ok(user)
    }
}

impl<S: KeyValueStore + std::fmt::Debug> std::fmt::Debug for SessionManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("store", &self.store)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Store whose writes always fail.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io("read-only".to_string()))
        }
        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Io("read-only".to_string()))
        }
    }

    #[test]
    fn test_login_derives_username_and_persists() {
        let mut session = SessionManager::new(MemoryStore::new());
        let user = session.login("demo@ecofinds.com", "password").unwrap();

        assert_eq!(user.id, "user1");
        assert_eq!(user.username, "demo");
        assert_eq!(user.email, "demo@ecofinds.com");
        assert!(session.is_authenticated());

        let stored = session.store().get(SESSION_KEY).unwrap().unwrap();
        let persisted: User = serde_json::from_str(&stored).unwrap();
        assert_eq!(persisted, user);
    }

    #[test]
    fn test_login_rejects_empty_input() {
        let mut session = SessionManager::new(MemoryStore::new());
        assert!(matches!(
            session.login("", "password"),
            Err(CoreError::Validation(_))
        ));
        assert!(session.login("demo@x.com", "").is_err());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_register_uses_given_username() {
        let mut session = SessionManager::new(MemoryStore::new());
        let user = session.register("Green Shopper", "g@x.com", "pw").unwrap();
        assert_eq!(user.username, "Green Shopper");
        assert!(session.register("  ", "g@x.com", "pw").is_err());
    }

    #[test]
    fn test_restore_persisted_identity() {
        let mut store = MemoryStore::new();
        store
            .set(
                SESSION_KEY,
                r#"{"id":"u1","username":"demo","email":"demo@x.com"}"#,
            )
            .unwrap();

        let expected = User {
            id: "u1".to_string(),
            username: "demo".to_string(),
            email: "demo@x.com".to_string(),
        };
        let mut session = SessionManager::new(store);
        assert_eq!(
            session.restore().unwrap(),
            RestoreOutcome::Restored(expected.clone())
        );
        assert_eq!(session.current_user(), Some(&expected));
    }

    #[test]
    fn test_restore_discards_corrupt_record() {
        let mut store = MemoryStore::new();
        store.set(SESSION_KEY, "{not json").unwrap();

        let mut session = SessionManager::new(store);
        let outcome = session.restore().unwrap();

        assert!(matches!(outcome, RestoreOutcome::Discarded { ref reason } if !reason.is_empty()));
        assert_eq!(outcome.user(), None);
        assert!(!session.is_authenticated());
        assert_eq!(session.store().get(SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn test_restore_without_record_is_anonymous() {
        let mut session = SessionManager::new(MemoryStore::new());
        assert_eq!(session.restore().unwrap(), RestoreOutcome::Anonymous);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_logout_clears_record() {
        let mut session = SessionManager::new(MemoryStore::new());
        session.login("demo@x.com", "pw").unwrap();
        session.logout().unwrap();

        assert_eq!(session.state(), &SessionState::Anonymous);
        assert_eq!(session.store().get(SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn test_update_profile_keeps_id() {
        let mut session = SessionManager::new(MemoryStore::new());
        assert!(matches!(
            session.update_profile("x", "y@z.com"),
            Err(CoreError::NotAuthenticated)
        ));

        session.login("demo@x.com", "pw").unwrap();
        let updated = session.update_profile(" Renamed ", "new@x.com").unwrap();
        assert_eq!(updated.id, "user1");
        assert_eq!(updated.username, "Renamed");

        let stored = session.store().get(SESSION_KEY).unwrap().unwrap();
        assert!(stored.contains("new@x.com"));
    }

    #[test]
    fn test_failed_write_leaves_session_anonymous() {
        let mut session = SessionManager::new(ReadOnlyStore);
        assert!(matches!(
            session.login("demo@x.com", "pw"),
            Err(CoreError::Storage(_))
        ));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_session_state_serialization() {
        let json = serde_json::to_string(&SessionState::Anonymous).unwrap();
        assert_eq!(json, r#"{"status":"anonymous"}"#);
    }
}

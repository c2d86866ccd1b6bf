//! Session store: the one place that knows who is currently logged in.
//!
//! The identity lives in memory and is mirrored synchronously to a
//! `KeyValueStore` backend, so a restart restores the session without
//! forcing re-login.

mod store;

pub use store::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};

use anyhow::Result;
use encore_core::models::Identity;

/// Storage key under which the identity is persisted.
pub const SESSION_KEY: &str = "karaoke_user";

pub struct SessionStore {
    backend: Box<dyn KeyValueStore>,
    current: Option<Identity>,
}

impl SessionStore {
    /// Restore any persisted identity from the backend. A corrupt persisted
    /// value is logged, cleared from the backend, and treated as absent;
    /// construction never fails because of it.
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        let current = match backend.get(SESSION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => Some(identity),
                Err(e) => {
                    tracing::warn!(error = %e, "Error parsing saved user, clearing session");
                    if let Err(e) = backend.remove(SESSION_KEY) {
                        tracing::warn!(error = %e, "Failed to clear corrupt session value");
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read saved session");
                None
            }
        };

        Self { backend, current }
    }

    /// Replace the current identity and persist it.
    pub fn login(&mut self, identity: Identity) -> Result<()> {
        let raw = serde_json::to_string(&identity)?;
        self.backend.set(SESSION_KEY, &raw)?;
        self.current = Some(identity);
        Ok(())
    }

    /// Clear the current identity and remove the persisted copy.
    pub fn logout(&mut self) -> Result<()> {
        self.backend.remove(SESSION_KEY)?;
        self.current = None;
        Ok(())
    }

    /// The logged-in identity, if any. Callers must handle the absent case.
    pub fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_core::models::Provider;
    use std::sync::Arc;

    fn identity() -> Identity {
        Identity {
            id: "108".to_string(),
            name: "Megan".to_string(),
            email: "megan@example.com".to_string(),
            picture: Some("https://img.example.com/megan.jpg".to_string()),
            provider: Provider::Google,
        }
    }

    #[test]
    fn login_persists_and_reload_restores() {
        let backing = Arc::new(MemoryKeyValueStore::default());

        let mut session = SessionStore::new(Box::new(backing.clone()));
        assert!(session.current().is_none());
        session.login(identity()).unwrap();
        assert_eq!(session.current(), Some(&identity()));

        // Simulated reload: a fresh store over the same backend
        let reloaded = SessionStore::new(Box::new(backing));
        assert_eq!(reloaded.current(), Some(&identity()));
    }

    #[test]
    fn logout_clears_memory_and_backend() {
        let backing = Arc::new(MemoryKeyValueStore::default());

        let mut session = SessionStore::new(Box::new(backing.clone()));
        session.login(identity()).unwrap();
        session.logout().unwrap();
        assert!(session.current().is_none());

        let reloaded = SessionStore::new(Box::new(backing));
        assert!(reloaded.current().is_none());
    }

    #[test]
    fn corrupt_persisted_value_is_cleared_and_absent() {
        let backing = Arc::new(MemoryKeyValueStore::default());
        backing.set(SESSION_KEY, "{not valid json").unwrap();

        let session = SessionStore::new(Box::new(backing.clone()));
        assert!(session.current().is_none());
        // The corrupt value was removed, not left to fail again
        assert_eq!(backing.get(SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn file_backend_round_trips_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut session = SessionStore::new(Box::new(FileKeyValueStore::new(&path)));
        session.login(identity()).unwrap();

        let reloaded = SessionStore::new(Box::new(FileKeyValueStore::new(&path)));
        assert_eq!(reloaded.current(), Some(&identity()));

        let mut reloaded = reloaded;
        reloaded.logout().unwrap();
        let after_logout = SessionStore::new(Box::new(FileKeyValueStore::new(&path)));
        assert!(after_logout.current().is_none());
    }

    #[test]
    fn corrupt_session_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "garbage").unwrap();

        let session = SessionStore::new(Box::new(FileKeyValueStore::new(&path)));
        assert!(session.current().is_none());
    }
}

//! In-memory session store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::SessionError;
use crate::session::TriageSession;

use super::traits::SessionStore;

/// Reference `SessionStore` backed by a `RwLock`-guarded map.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<Uuid, TriageSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, session: TriageSession) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id, session);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<TriageSession, SessionError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .cloned()
            .ok_or(SessionError::NotFound { id })
    }

    async fn update(&self, session: TriageSession) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&session.id) {
            Some(slot) => {
                *slot = session;
                Ok(())
            }
            None => Err(SessionError::NotFound { id: session.id }),
        }
    }

    async fn remove(&self, id: Uuid) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        sessions
            .remove(&id)
            .map(|_| ())
            .ok_or(SessionError::NotFound { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::IntakeForm;

    fn session() -> TriageSession {
        let submission = IntakeForm::new("Maria", "maria@example.com", "A dispute")
            .submit()
            .unwrap();
        TriageSession::new(submission)
    }

    #[tokio::test]
    async fn insert_and_get() {
        let store = MemorySessionStore::new();
        let s = session();
        let id = s.id;
        store.insert(s).await.unwrap();

        let loaded = store.get(id).await.unwrap();
        assert_eq!(loaded.id, id);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn get_missing_returns_not_found() {
        let store = MemorySessionStore::new();
        let err = store.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, SessionError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_replaces_existing() {
        let store = MemorySessionStore::new();
        let mut s = session();
        let id = s.id;
        store.insert(s.clone()).await.unwrap();

        s.transition_to(crate::session::SessionState::Analyzing)
            .unwrap();
        store.update(s).await.unwrap();

        let loaded = store.get(id).await.unwrap();
        assert_eq!(loaded.state, crate::session::SessionState::Analyzing);
    }

    #[tokio::test]
    async fn update_missing_returns_not_found() {
        let store = MemorySessionStore::new();
        let err = store.update(session()).await.unwrap_err();
        assert!(matches!(err, SessionError::NotFound { .. }));
    }

    #[tokio::test]
    async fn remove_discards_session() {
        let store = MemorySessionStore::new();
        let s = session();
        let id = s.id;
        store.insert(s).await.unwrap();

        store.remove(id).await.unwrap();
        assert!(store.is_empty().await);
        assert!(store.get(id).await.is_err());
        assert!(store.remove(id).await.is_err());
    }
}

//! Backend-agnostic session store trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::SessionError;
use crate::session::TriageSession;

/// Persistence port for triage sessions, keyed by session id.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a new session.
    async fn insert(&self, session: TriageSession) -> Result<(), SessionError>;

    /// Load a session by id.
    async fn get(&self, id: Uuid) -> Result<TriageSession, SessionError>;

    /// Replace an existing session.
    async fn update(&self, session: TriageSession) -> Result<(), SessionError>;

    /// Remove a session (abandonment). No downstream side effects.
    async fn remove(&self, id: Uuid) -> Result<(), SessionError>;
}

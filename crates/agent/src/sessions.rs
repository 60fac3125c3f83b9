//! Session registry
//!
//! Concurrent map from session id to exclusively-locked session state.
//! Isolation is enforced here: each handle locks one session only, so
//! turns for different candidates never contend and never share state.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::session::InterviewSession;

/// Shared handle to one session; lock it for the duration of a turn
pub type SessionHandle = Arc<Mutex<InterviewSession>>;

/// Registry of live screening sessions
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<Uuid, SessionHandle>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session, returning its id
    pub fn insert(&self, session: InterviewSession) -> Uuid {
        let id = session.id();
        self.sessions.insert(id, Arc::new(Mutex::new(session)));
        tracing::info!(session = %id, "Session registered");
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<SessionHandle> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    /// Remove a session, returning its handle if it existed
    pub fn remove(&self, id: &Uuid) -> Option<SessionHandle> {
        let removed = self.sessions.remove(id).map(|(_, handle)| handle);
        if removed.is_some() {
            tracing::info!(session = %id, "Session removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sessions_are_isolated() {
        let registry = SessionRegistry::new();
        let a = registry.insert(InterviewSession::new("English"));
        let b = registry.insert(InterviewSession::new("English"));
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);

        {
            let handle = registry.get(&a).unwrap();
            let mut session = handle.lock().await;
            session.mark_ended();
        }

        let handle = registry.get(&b).unwrap();
        assert!(!handle.lock().await.is_ended());
    }

    #[tokio::test]
    async fn remove_drops_the_entry() {
        let registry = SessionRegistry::new();
        let id = registry.insert(InterviewSession::new("English"));
        assert!(registry.remove(&id).is_some());
        assert!(registry.get(&id).is_none());
        assert!(registry.is_empty());
    }
}

// Storage module - Session store implementations
use crate::core::session::session::Session;
use crate::core::session::store::SessionStore;
use crate::domain::error::OpsBotResult;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// In-memory session store.
///
/// The single RwLock serializes writers, which covers the per-id mutual
/// exclusion the store contract requires.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save(&self, session: &Session) -> OpsBotResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.session_id().to_string(), session.clone());
        info!("Session saved: {}", session.session_id());
        Ok(())
    }

    async fn load(&self, session_id: &str) -> OpsBotResult<Option<Session>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).cloned())
    }

    async fn delete(&self, session_id: &str) -> OpsBotResult<()> {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(session_id).is_some() {
            info!("Session deleted: {}", session_id);
        } else {
            debug!("Delete of absent session: {}", session_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::{Duration, SystemTime};

    fn session(id: &str) -> Session {
        let now = SystemTime::now();
        Session::new(
            id.to_string(),
            HashMap::new(),
            now,
            now + Duration::from_secs(3600),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let store = InMemorySessionStore::new();
        let session = session("abc");

        store.save(&session).await.unwrap();
        assert_eq!(store.load("abc").await.unwrap(), Some(session));
        assert_eq!(store.load("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_is_last_writer_wins() {
        let store = InMemorySessionStore::new();
        let mut session = session("abc");

        store.save(&session).await.unwrap();
        session.deactivate().unwrap();
        store.save(&session).await.unwrap();

        let stored = store.load("abc").await.unwrap().unwrap();
        assert!(!stored.is_active());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemorySessionStore::new();
        store.save(&session("abc")).await.unwrap();

        store.delete("abc").await.unwrap();
        assert!(store.is_empty().await);

        // Deleting an absent id is not an error
        store.delete("abc").await.unwrap();
    }
}

use crate::core::session::session::Session;
use crate::domain::error::OpsBotResult;
use async_trait::async_trait;

/// Persistence contract for sessions.
///
/// Last-writer-wins semantics; the core never assumes atomic
/// read-modify-write across calls. Implementations must provide mutual
/// exclusion per session id for save/delete so concurrent transports do not
/// lose updates.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a session, replacing any previous record with the same id.
    async fn save(&self, session: &Session) -> OpsBotResult<()>;

    /// Load a session by id, if present.
    async fn load(&self, session_id: &str) -> OpsBotResult<Option<Session>>;

    /// Delete a session record. Deleting an absent id is not an error.
    async fn delete(&self, session_id: &str) -> OpsBotResult<()>;
}

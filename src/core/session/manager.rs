use crate::core::automation::{AutomationDriver, Credentials};
use crate::core::session::lifecycle::SessionLifecycleService;
use crate::core::session::session::Session;
use crate::core::session::store::SessionStore;
use crate::domain::error::{OpsBotError, OpsBotResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Orchestrates the session lifecycle across the automation driver, the
/// lifecycle service and the store.
///
/// Holds no locks of its own; per-id mutual exclusion is the store's
/// contract. There is no retry logic here: a failed operation is reported
/// once and the caller decides what to do next.
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    driver: Arc<dyn AutomationDriver>,
    lifecycle: SessionLifecycleService,
    session_ttl: Duration,
    login_timeout: Duration,
}

impl SessionManager {
    pub fn new(
        store: Arc<dyn SessionStore>,
        driver: Arc<dyn AutomationDriver>,
        session_ttl: Duration,
        login_timeout: Duration,
    ) -> Self {
        Self {
            store,
            driver,
            lifecycle: SessionLifecycleService::new(),
            session_ttl,
            login_timeout,
        }
    }

    /// Log in to the target application and persist the resulting session.
    ///
    /// The driver call is bounded by the configured login timeout; on
    /// timeout or driver failure no session is produced or stored.
    pub async fn open_session(
        &self,
        url: &str,
        credentials: &Credentials,
    ) -> OpsBotResult<Session> {
        let outcome = tokio::time::timeout(self.login_timeout, self.driver.login(url, credentials))
            .await
            .map_err(|_| {
                error!("Login timed out after {:?}", self.login_timeout);
                OpsBotError::session_creation(OpsBotError::LoginTimeout)
            })?
            .map_err(|e| {
                error!("Login failed: {}", e);
                OpsBotError::session_creation(e)
            })?;

        let session =
            self.lifecycle
                .create_session(outcome.session_id, outcome.cookies, self.session_ttl)?;
        self.store.save(&session).await?;

        info!("Session opened: {}", session.session_id());
        Ok(session)
    }

    /// Deactivate a stored session and save the record back.
    pub async fn close_session(&self, session_id: &str) -> OpsBotResult<()> {
        let mut session = self.load_required(session_id).await?;
        self.lifecycle.deactivate_session(&mut session)?;
        self.store.save(&session).await?;
        info!("Session closed: {}", session_id);
        Ok(())
    }

    /// Delete a session record from the store.
    pub async fn remove_session(&self, session_id: &str) -> OpsBotResult<()> {
        self.store.delete(session_id).await?;
        info!("Session removed: {}", session_id);
        Ok(())
    }

    /// Load a session by id, if present.
    pub async fn get_session(&self, session_id: &str) -> OpsBotResult<Option<Session>> {
        self.store.load(session_id).await
    }

    /// Whether a stored session is currently usable. Absent sessions are
    /// simply not valid.
    pub async fn is_session_valid(&self, session_id: &str) -> OpsBotResult<bool> {
        match self.store.load(session_id).await? {
            Some(session) => Ok(self.lifecycle.validate_session(&session)),
            None => Ok(false),
        }
    }

    /// Human-readable summary for a session id, resolved by lookup at
    /// processing time.
    pub async fn describe_session(&self, session_id: &str) -> OpsBotResult<String> {
        match self.store.load(session_id).await? {
            Some(session) => {
                let valid = self.lifecycle.validate_session(&session);
                Ok(format!(
                    "Session {}: active={}, valid={}, cookies={}",
                    session.session_id(),
                    session.is_active(),
                    valid,
                    session.cookies().len(),
                ))
            }
            None => {
                warn!("Session not found: {}", session_id);
                Ok(format!("Session {} not found.", session_id))
            }
        }
    }

    pub fn lifecycle(&self) -> &SessionLifecycleService {
        &self.lifecycle
    }

    async fn load_required(&self, session_id: &str) -> OpsBotResult<Session> {
        self.store
            .load(session_id)
            .await?
            .ok_or_else(|| OpsBotError::Storage(format!("session '{}' not found", session_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::automation::LoginOutcome;
    use crate::infrastructure::storage::InMemorySessionStore;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct StubDriver;

    #[async_trait]
    impl AutomationDriver for StubDriver {
        async fn login(
            &self,
            _url: &str,
            _credentials: &Credentials,
        ) -> OpsBotResult<LoginOutcome> {
            let mut cookies = HashMap::new();
            cookies.insert("sid".to_string(), "cookie-value".to_string());
            Ok(LoginOutcome {
                session_id: "stub-session".to_string(),
                cookies,
            })
        }
    }

    struct HangingDriver;

    #[async_trait]
    impl AutomationDriver for HangingDriver {
        async fn login(
            &self,
            _url: &str,
            _credentials: &Credentials,
        ) -> OpsBotResult<LoginOutcome> {
            std::future::pending().await
        }
    }

    struct FailingDriver;

    #[async_trait]
    impl AutomationDriver for FailingDriver {
        async fn login(
            &self,
            _url: &str,
            _credentials: &Credentials,
        ) -> OpsBotResult<LoginOutcome> {
            Err(OpsBotError::Automation("login form rejected".to_string()))
        }
    }

    fn manager(driver: Arc<dyn AutomationDriver>) -> (SessionManager, Arc<InMemorySessionStore>) {
        let store = Arc::new(InMemorySessionStore::new());
        let manager = SessionManager::new(
            store.clone(),
            driver,
            Duration::from_secs(3600),
            Duration::from_millis(100),
        );
        (manager, store)
    }

    fn credentials() -> Credentials {
        Credentials::new("admin", "secret")
    }

    #[tokio::test]
    async fn test_open_session_stores_session() {
        let (manager, store) = manager(Arc::new(StubDriver));
        let session = manager
            .open_session("https://example.com/login", &credentials())
            .await
            .unwrap();

        assert_eq!(session.session_id(), "stub-session");
        assert!(session.is_active());

        let stored = store.load("stub-session").await.unwrap();
        assert_eq!(stored, Some(session));
    }

    #[tokio::test]
    async fn test_login_timeout_stores_nothing() {
        let (manager, store) = manager(Arc::new(HangingDriver));
        let result = manager
            .open_session("https://example.com/login", &credentials())
            .await;

        match result {
            Err(OpsBotError::SessionCreation { source }) => {
                assert!(matches!(*source, OpsBotError::LoginTimeout));
            }
            other => panic!("expected SessionCreation error, got {:?}", other),
        }
        assert_eq!(store.load("stub-session").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_driver_failure_stores_nothing() {
        let (manager, store) = manager(Arc::new(FailingDriver));
        let result = manager
            .open_session("https://example.com/login", &credentials())
            .await;

        assert!(matches!(result, Err(OpsBotError::SessionCreation { .. })));
        assert_eq!(store.load("stub-session").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_close_session_deactivates_and_saves() {
        let (manager, store) = manager(Arc::new(StubDriver));
        manager
            .open_session("https://example.com/login", &credentials())
            .await
            .unwrap();

        manager.close_session("stub-session").await.unwrap();

        let stored = store.load("stub-session").await.unwrap().unwrap();
        assert!(!stored.is_active());
        assert!(!manager.is_session_valid("stub-session").await.unwrap());
    }

    #[tokio::test]
    async fn test_close_twice_fails() {
        let (manager, _store) = manager(Arc::new(StubDriver));
        manager
            .open_session("https://example.com/login", &credentials())
            .await
            .unwrap();

        manager.close_session("stub-session").await.unwrap();
        let result = manager.close_session("stub-session").await;
        assert!(matches!(
            result,
            Err(OpsBotError::SessionDeactivation { .. })
        ));
    }

    #[tokio::test]
    async fn test_close_missing_session_fails() {
        let (manager, _store) = manager(Arc::new(StubDriver));
        let result = manager.close_session("nope").await;
        assert!(matches!(result, Err(OpsBotError::Storage(_))));
    }

    #[tokio::test]
    async fn test_remove_session_deletes_record() {
        let (manager, store) = manager(Arc::new(StubDriver));
        manager
            .open_session("https://example.com/login", &credentials())
            .await
            .unwrap();

        manager.remove_session("stub-session").await.unwrap();
        assert_eq!(store.load("stub-session").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_describe_session() {
        let (manager, _store) = manager(Arc::new(StubDriver));
        manager
            .open_session("https://example.com/login", &credentials())
            .await
            .unwrap();

        let summary = manager.describe_session("stub-session").await.unwrap();
        assert!(summary.contains("stub-session"));
        assert!(summary.contains("valid=true"));

        let missing = manager.describe_session("nope").await.unwrap();
        assert!(missing.contains("not found"));
    }
}

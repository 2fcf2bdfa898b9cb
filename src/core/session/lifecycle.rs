use crate::core::session::session::Session;
use crate::domain::error::{OpsBotError, OpsBotResult};
use std::collections::HashMap;
use std::time::{Duration, SystemTime};
use tracing::{debug, info, warn};

/// Business rules for creating, validating and deactivating sessions.
///
/// The service owns no state: persistence is the caller's concern through a
/// `SessionStore`, and validity is derived at call time rather than swept by
/// a background task.
#[derive(Debug, Default, Clone)]
pub struct SessionLifecycleService;

impl SessionLifecycleService {
    pub fn new() -> Self {
        Self
    }

    /// Create a new session expiring `ttl` after now.
    ///
    /// The identity is supplied by the caller (normally the automation
    /// driver); any invariant violation is surfaced as a creation failure
    /// with the cause preserved.
    pub fn create_session(
        &self,
        session_id: String,
        cookies: HashMap<String, String>,
        ttl: Duration,
    ) -> OpsBotResult<Session> {
        let created_at = SystemTime::now();
        let expires_at = created_at + ttl;

        match Session::new(session_id, cookies, created_at, expires_at) {
            Ok(session) => {
                info!("Session created: {}", session.session_id());
                Ok(session)
            }
            Err(e) => Err(OpsBotError::session_creation(e)),
        }
    }

    /// Check whether a session is currently usable.
    ///
    /// Returns false for a deactivated or expired session; neither is a
    /// fault, both are logged at warn level.
    pub fn validate_session(&self, session: &Session) -> bool {
        self.validate_session_at(session, SystemTime::now())
    }

    /// Validity check against an explicit clock instant.
    pub fn validate_session_at(&self, session: &Session, now: SystemTime) -> bool {
        if !session.is_active() {
            warn!("Session deactivated: {}", session.session_id());
            return false;
        }
        if now > session.expires_at() {
            warn!("Session expired: {}", session.session_id());
            return false;
        }
        debug!("Session valid: {}", session.session_id());
        true
    }

    /// Deactivate a session. Double deactivation surfaces as a
    /// lifecycle-level error with the cause preserved.
    pub fn deactivate_session(&self, session: &mut Session) -> OpsBotResult<()> {
        match session.deactivate() {
            Ok(()) => {
                info!("Session deactivated: {}", session.session_id());
                Ok(())
            }
            Err(e) => Err(OpsBotError::session_deactivation(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::OpsBotError;

    fn service() -> SessionLifecycleService {
        SessionLifecycleService::new()
    }

    #[test]
    fn test_create_session_sets_expiry_from_ttl() {
        let ttl = Duration::from_secs(3600);
        let session = service()
            .create_session("abc".to_string(), HashMap::new(), ttl)
            .unwrap();

        assert!(session.is_active());
        assert_eq!(session.expires_at(), session.created_at() + ttl);
    }

    #[test]
    fn test_create_session_wraps_invariant_violation() {
        let result = service().create_session(
            String::new(),
            HashMap::new(),
            Duration::from_secs(3600),
        );

        match result {
            Err(OpsBotError::SessionCreation { source }) => {
                assert!(matches!(*source, OpsBotError::InvalidSession { .. }));
            }
            other => panic!("expected SessionCreation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_session_over_time() {
        let svc = service();
        let session = svc
            .create_session("abc".to_string(), HashMap::new(), Duration::from_secs(3600))
            .unwrap();
        let t0 = session.created_at();

        assert!(svc.validate_session_at(&session, t0 + Duration::from_secs(30 * 60)));
        assert!(!svc.validate_session_at(&session, t0 + Duration::from_secs(90 * 60)));
    }

    #[test]
    fn test_validate_session_rejects_deactivated() {
        let svc = service();
        let mut session = svc
            .create_session("abc".to_string(), HashMap::new(), Duration::from_secs(3600))
            .unwrap();

        assert!(svc.validate_session(&session));
        svc.deactivate_session(&mut session).unwrap();
        // Still inside the TTL window, but deactivation wins
        assert!(!svc.validate_session_at(
            &session,
            session.created_at() + Duration::from_secs(1)
        ));
    }

    #[test]
    fn test_deactivate_twice_is_lifecycle_error() {
        let svc = service();
        let mut session = svc
            .create_session("abc".to_string(), HashMap::new(), Duration::from_secs(3600))
            .unwrap();

        svc.deactivate_session(&mut session).unwrap();
        let result = svc.deactivate_session(&mut session);
        match result {
            Err(OpsBotError::SessionDeactivation { source }) => {
                assert!(matches!(*source, OpsBotError::InvalidSession { .. }));
            }
            other => panic!("expected SessionDeactivation error, got {:?}", other),
        }
    }
}

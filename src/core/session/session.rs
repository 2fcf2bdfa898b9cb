use crate::domain::error::{OpsBotError, OpsBotResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::SystemTime;

/// An authenticated browser context: cookies plus validity window.
///
/// The identity is immutable after construction and the `is_active` flag
/// only ever transitions from true to false. Expiry is not a stored state;
/// callers derive validity through the lifecycle service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    session_id: String,
    cookies: HashMap<String, String>,
    created_at: SystemTime,
    expires_at: SystemTime,
    is_active: bool,
}

impl Session {
    /// Create a new session. Fails if the identity is empty or the expiry
    /// instant is not strictly after the creation instant.
    pub fn new(
        session_id: String,
        cookies: HashMap<String, String>,
        created_at: SystemTime,
        expires_at: SystemTime,
    ) -> OpsBotResult<Self> {
        if session_id.is_empty() {
            return Err(OpsBotError::InvalidSession {
                message: "session_id must not be empty".to_string(),
            });
        }
        if expires_at <= created_at {
            return Err(OpsBotError::InvalidSession {
                message: "expires_at must be after created_at".to_string(),
            });
        }

        Ok(Self {
            session_id,
            cookies,
            created_at,
            expires_at,
            is_active: true,
        })
    }

    /// Deactivate the session. Deactivating twice is an error, not a no-op.
    pub fn deactivate(&mut self) -> OpsBotResult<()> {
        if !self.is_active {
            return Err(OpsBotError::InvalidSession {
                message: format!("session '{}' is already deactivated", self.session_id),
            });
        }
        self.is_active = false;
        Ok(())
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn cookies(&self) -> &HashMap<String, String> {
        &self.cookies
    }

    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    pub fn expires_at(&self) -> SystemTime {
        self.expires_at
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

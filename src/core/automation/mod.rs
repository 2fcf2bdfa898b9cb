// Automation module - Browser-automation driver port
use crate::domain::error::OpsBotResult;
use async_trait::async_trait;
use std::collections::HashMap;

/// Login credentials for the target web application
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Result of a completed login: a fresh session identity plus the cookies
/// harvested from the authenticated browser context.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub session_id: String,
    pub cookies: HashMap<String, String>,
}

/// Driver that performs the login sequence against the target application.
///
/// Treated as an opaque, fallible, potentially slow collaborator; callers
/// bound it with a timeout. A failed or timed-out login never yields a
/// partial outcome.
#[async_trait]
pub trait AutomationDriver: Send + Sync {
    async fn login(&self, url: &str, credentials: &Credentials) -> OpsBotResult<LoginOutcome>;
}

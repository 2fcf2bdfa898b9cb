// Automation module - HTTP form-login driver
use crate::core::automation::{AutomationDriver, Credentials, LoginOutcome};
use crate::domain::error::{OpsBotError, OpsBotResult};
use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Url};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// Bounded wait applied to each individual login step
pub const LOGIN_STEP_TIMEOUT: Duration = Duration::from_secs(10);

/// Logs into the target application by submitting its login form and
/// harvesting the cookies the server sets on success.
pub struct FormLoginDriver {
    client: Client,
    jar: Arc<Jar>,
}

impl FormLoginDriver {
    pub fn new() -> OpsBotResult<Self> {
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(LOGIN_STEP_TIMEOUT)
            .build()?;

        Ok(Self { client, jar })
    }

    fn harvested_cookies(&self, url: &Url) -> HashMap<String, String> {
        match self.jar.cookies(url) {
            Some(header) => match header.to_str() {
                Ok(raw) => parse_cookie_header(raw),
                Err(_) => HashMap::new(),
            },
            None => HashMap::new(),
        }
    }
}

#[async_trait]
impl AutomationDriver for FormLoginDriver {
    async fn login(&self, url: &str, credentials: &Credentials) -> OpsBotResult<LoginOutcome> {
        let url: Url = url.parse().map_err(|e| {
            OpsBotError::Automation(format!("invalid login URL '{}': {}", url, e))
        })?;

        // Fetch the login page first so the server can seed its CSRF or
        // pre-session cookies into the jar.
        let page = self.client.get(url.clone()).send().await?;
        if !page.status().is_success() {
            return Err(OpsBotError::Automation(format!(
                "login page returned status {}",
                page.status()
            )));
        }
        debug!("Login page loaded: {}", url);

        let form = [
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ];
        let response = self.client.post(url.clone()).form(&form).send().await?;
        if !response.status().is_success() {
            return Err(OpsBotError::Automation(format!(
                "login rejected with status {}",
                response.status()
            )));
        }

        let cookies = self.harvested_cookies(&url);
        if cookies.is_empty() {
            return Err(OpsBotError::Automation(
                "login produced no session cookies".to_string(),
            ));
        }

        let session_id = Uuid::new_v4().to_string();
        info!("Login completed, {} cookies harvested", cookies.len());

        Ok(LoginOutcome {
            session_id,
            cookies,
        })
    }
}

/// Parse a `Cookie` header value ("a=b; c=d") into a name/value map.
fn parse_cookie_header(raw: &str) -> HashMap<String, String> {
    raw.split("; ")
        .filter_map(|pair| pair.split_once('='))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_construction() {
        let _driver = FormLoginDriver::new().unwrap();
    }

    #[test]
    fn test_parse_cookie_header() {
        let cookies = parse_cookie_header("sid=abc123; theme=dark");
        assert_eq!(cookies.get("sid").map(String::as_str), Some("abc123"));
        assert_eq!(cookies.get("theme").map(String::as_str), Some("dark"));
    }

    #[test]
    fn test_parse_cookie_header_ignores_malformed_pairs() {
        let cookies = parse_cookie_header("sid=abc; garbage; k=v");
        assert_eq!(cookies.len(), 2);
        assert!(cookies.contains_key("sid"));
        assert!(cookies.contains_key("k"));
    }

    #[test]
    fn test_parse_cookie_header_empty() {
        assert!(parse_cookie_header("").is_empty());
    }

    #[tokio::test]
    async fn test_invalid_url_fails_fast() {
        let driver = FormLoginDriver::new().unwrap();
        let result = driver
            .login("not a url", &Credentials::new("admin", "secret"))
            .await;
        assert!(matches!(result, Err(OpsBotError::Automation(_))));
    }
}

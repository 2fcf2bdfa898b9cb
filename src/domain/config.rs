use serde::{Deserialize, Serialize};

/// OpsBot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpsBotConfig {
    /// Global configuration
    #[serde(default)]
    pub global: GlobalConfig,
    /// Telegram bot configuration
    #[serde(default)]
    pub telegram: TelegramConfig,
    /// Target web application configuration
    #[serde(default)]
    pub target: TargetConfig,
}

/// Global configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Default log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Session time-to-live in hours
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u64,
    /// Overall login timeout in seconds
    #[serde(default = "default_login_timeout_secs")]
    pub login_timeout_secs: u64,
    /// Long-polling timeout in seconds
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token (opaque, never interpreted by the core)
    #[serde(default)]
    pub bot_token: String,
    /// Comma-separated list of authorized admin user ids
    #[serde(default)]
    pub admin_ids: String,
}

/// Target web application the automation driver logs into
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Login page URL
    #[serde(default)]
    pub url: String,
    /// Login username
    #[serde(default)]
    pub username: String,
    /// Login password
    #[serde(default)]
    pub password: String,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_session_ttl_hours() -> u64 {
    24
}

fn default_login_timeout_secs() -> u64 {
    30
}

fn default_poll_timeout_secs() -> u64 {
    30
}

impl Default for OpsBotConfig {
    fn default() -> Self {
        Self {
            global: GlobalConfig::default(),
            telegram: TelegramConfig::default(),
            target: TargetConfig::default(),
        }
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            session_ttl_hours: default_session_ttl_hours(),
            login_timeout_secs: default_login_timeout_secs(),
            poll_timeout_secs: default_poll_timeout_secs(),
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            admin_ids: String::new(),
        }
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            username: String::new(),
            password: String::new(),
        }
    }
}

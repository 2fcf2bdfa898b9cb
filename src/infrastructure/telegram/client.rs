use crate::domain::error::{OpsBotError, OpsBotResult};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const API_BASE: &str = "https://api.telegram.org";

/// An incoming update from the Bot API
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<ChatMessage>,
}

/// A chat message carried by an update
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

/// The sending user
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
}

/// The chat a message belongs to
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// Thin client for the Telegram Bot API (long polling + replies).
pub struct TelegramClient {
    client: Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: &str) -> OpsBotResult<Self> {
        if token.is_empty() {
            return Err(OpsBotError::Config {
                message: "Telegram bot token is not configured".to_string(),
            });
        }

        Ok(Self {
            client: Client::new(),
            base_url: format!("{}/bot{}", API_BASE, token),
        })
    }

    /// Fetch pending updates, long-polling up to `timeout_secs`.
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> OpsBotResult<Vec<Update>> {
        let url = format!("{}/getUpdates", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("offset", offset.to_string()),
                ("timeout", timeout_secs.to_string()),
            ])
            // Leave the server margin to answer after the long-poll window
            .timeout(Duration::from_secs(timeout_secs + 10))
            .send()
            .await?
            .json::<ApiResponse<Vec<Update>>>()
            .await?;

        let updates = Self::into_result(response, "getUpdates")?;
        debug!("Received {} updates", updates.len());
        Ok(updates)
    }

    /// Send a plain-text reply to a chat.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> OpsBotResult<()> {
        let url = format!("{}/sendMessage", self.base_url);
        let payload = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });
        let response = self
            .client
            .post(&url)
            .json(&payload)
            .timeout(Duration::from_secs(10))
            .send()
            .await?
            .json::<ApiResponse<ChatMessage>>()
            .await?;

        Self::into_result(response, "sendMessage")?;
        Ok(())
    }

    fn into_result<T>(response: ApiResponse<T>, method: &str) -> OpsBotResult<T> {
        if !response.ok {
            return Err(OpsBotError::Transport(format!(
                "{} failed: {}",
                method,
                response.description.unwrap_or_else(|| "unknown error".to_string())
            )));
        }
        response.result.ok_or_else(|| {
            OpsBotError::Transport(format!("{} returned an empty result", method))
        })
    }
}

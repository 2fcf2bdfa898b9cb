use crate::core::command::{Command, CommandAuthorizationService, CommandKind};
use crate::core::session::SessionManager;
use crate::domain::error::{OpsBotError, OpsBotResult};
use crate::infrastructure::telegram::client::{TelegramClient, Update};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Reply sent when command handling fails for an internal reason
pub const RESPONSE_INTERNAL_ERROR: &str = "Error processing the command.";

const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// Long-polling bot transport.
///
/// Each inbound message is parsed, authorized and answered to completion
/// before the next one is handled; the transport itself keeps no mutable
/// state beyond the update offset.
pub struct TelegramTransport {
    client: TelegramClient,
    authorizer: CommandAuthorizationService,
    sessions: Arc<SessionManager>,
    poll_timeout_secs: u64,
}

impl TelegramTransport {
    pub fn new(
        client: TelegramClient,
        authorizer: CommandAuthorizationService,
        sessions: Arc<SessionManager>,
        poll_timeout_secs: u64,
    ) -> Self {
        Self {
            client,
            authorizer,
            sessions,
            poll_timeout_secs,
        }
    }

    /// Poll for updates until the process is stopped.
    pub async fn run(&self) -> OpsBotResult<()> {
        info!("Bot transport started");
        let mut offset = 0i64;

        loop {
            match self.client.get_updates(offset, self.poll_timeout_secs).await {
                Ok(updates) => {
                    for update in updates {
                        offset = offset.max(update.update_id + 1);
                        self.handle_update(update).await;
                    }
                }
                Err(e) => {
                    error!("Failed to fetch updates: {}", e);
                    tokio::time::sleep(POLL_ERROR_BACKOFF).await;
                }
            }
        }
    }

    async fn handle_update(&self, update: Update) {
        let Some(message) = update.message else {
            return;
        };
        let (Some(text), Some(from)) = (message.text, message.from) else {
            return;
        };

        let reply = match self.respond(&text, from.id).await {
            Ok(reply) => reply,
            Err(e) => {
                // Internals are never exposed to the chat
                error!("Failed to process command: {}", e);
                RESPONSE_INTERNAL_ERROR.to_string()
            }
        };

        if let Err(e) = self.client.send_message(message.chat.id, &reply).await {
            error!("Failed to send reply: {}", e);
        }
    }

    /// Route one inbound message to its reply string.
    pub async fn respond(&self, text: &str, user_id: i64) -> OpsBotResult<String> {
        let command = match parse_message(text, user_id) {
            Ok(command) => command,
            Err(e) => {
                warn!("Malformed message from {}: {}", user_id, e);
                return Ok(RESPONSE_INTERNAL_ERROR.to_string());
            }
        };

        // `/session <id>` resolves the id against the store at processing
        // time; everything else maps to its fixed response.
        if command.kind() == Some(CommandKind::Session) {
            if let Some(args) = command.args() {
                if !self.authorizer.validate_command(&command)? {
                    return Ok(crate::core::command::RESPONSE_NOT_PERMITTED.to_string());
                }
                let session_id = args.split_whitespace().next().unwrap_or(args);
                return self
                    .sessions
                    .describe_session(session_id)
                    .await
                    .map_err(OpsBotError::command_processing);
            }
        }

        self.authorizer.process_command(&command)
    }
}

/// Parse a raw chat message into a command: first whitespace-delimited token
/// is the command name (with any `@botname` suffix stripped), the remaining
/// text joins into the arguments.
pub fn parse_message(text: &str, user_id: i64) -> OpsBotResult<Command> {
    let mut tokens = text.split_whitespace();
    let first = tokens.next().ok_or_else(|| OpsBotError::InvalidCommand {
        message: "empty message".to_string(),
    })?;
    let name = first.split('@').next().unwrap_or(first);

    let rest: Vec<&str> = tokens.collect();
    let args = if rest.is_empty() {
        None
    } else {
        Some(rest.join(" "))
    };

    Command::new(name, user_id, args)
}

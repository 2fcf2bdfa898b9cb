use crate::core::command::command::{Command, CommandKind};
use crate::domain::config::TelegramConfig;
use crate::domain::error::{OpsBotError, OpsBotResult};
use std::collections::HashSet;
use tracing::{debug, error, warn};

/// Reply sent for an unsupported command or an unauthorized principal
pub const RESPONSE_NOT_PERMITTED: &str = "Command not permitted or user not authorized.";

/// Gates inbound commands against the supported set and the configured
/// admin allow-list, and maps authorized commands to their responses.
///
/// The configuration is injected at construction and never read from
/// ambient state, so tests can supply arbitrary admin sets.
pub struct CommandAuthorizationService {
    config: TelegramConfig,
}

impl CommandAuthorizationService {
    pub fn new(config: TelegramConfig) -> Self {
        Self { config }
    }

    /// Parse the configured comma-separated admin id list.
    ///
    /// A non-integer token is a configuration fault, surfaced loudly as
    /// `CommandValidation` rather than folded into a per-command denial.
    pub fn authorized_ids(&self) -> OpsBotResult<HashSet<i64>> {
        self.config
            .admin_ids
            .split(',')
            .map(|token| {
                token.trim().parse::<i64>().map_err(|e| {
                    error!("Malformed admin id list '{}': {}", self.config.admin_ids, e);
                    OpsBotError::CommandValidation {
                        message: format!("malformed admin id '{}': {}", token.trim(), e),
                    }
                })
            })
            .collect()
    }

    /// Check that a command is supported and issued by an authorized admin.
    ///
    /// Unsupported names and unauthorized principals are expected business
    /// outcomes and return Ok(false); a malformed admin-id configuration is
    /// an operational fault and returns an error.
    pub fn validate_command(&self, command: &Command) -> OpsBotResult<bool> {
        if command.kind().is_none() {
            warn!("Unsupported command: {}", command.name());
            return Ok(false);
        }

        let admin_ids = self.authorized_ids()?;
        if !admin_ids.contains(&command.user_id()) {
            warn!("Unauthorized user: {}", command.user_id());
            return Ok(false);
        }

        debug!("Valid command: {} from {}", command.name(), command.user_id());
        Ok(true)
    }

    /// Fixed response for each supported command. Total by construction.
    pub fn response_for(kind: CommandKind) -> &'static str {
        match kind {
            CommandKind::Status => "System operational. All services active.",
            CommandKind::Logs => "Logs available. Use /logs <filter> for details.",
            CommandKind::Session => "Session tooling ready. Use /session <id> for details.",
            CommandKind::Retry => "Retrying the requested operation.",
            CommandKind::Health => "Health check: OK",
            CommandKind::Reboot => "Reboot scheduled. Confirm with /reboot confirm.",
        }
    }

    /// Validate and dispatch a command to its response string.
    ///
    /// A denial is an Ok value carrying the fixed "not permitted" reply;
    /// only operational faults propagate as errors.
    pub fn process_command(&self, command: &Command) -> OpsBotResult<String> {
        if !self.validate_command(command)? {
            return Ok(RESPONSE_NOT_PERMITTED.to_string());
        }

        match command.kind() {
            Some(kind) => {
                debug!("Command processed: {} by {}", command.name(), command.user_id());
                Ok(Self::response_for(kind).to_string())
            }
            // validate_command rejects unknown names, so this arm is a
            // defensive denial rather than a generic success fallthrough
            None => Ok(RESPONSE_NOT_PERMITTED.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authorizer(admin_ids: &str) -> CommandAuthorizationService {
        CommandAuthorizationService::new(TelegramConfig {
            bot_token: "test-token".to_string(),
            admin_ids: admin_ids.to_string(),
        })
    }

    #[test]
    fn test_supported_command_from_admin_is_valid() {
        let service = authorizer("42,7");
        let command = Command::new("/status", 42, None).unwrap();
        assert!(service.validate_command(&command).unwrap());
    }

    #[test]
    fn test_unsupported_command_denied() {
        let service = authorizer("42");
        let command = Command::new("/frobnicate", 42, None).unwrap();
        assert!(!service.validate_command(&command).unwrap());
    }

    #[test]
    fn test_unauthorized_user_denied() {
        let service = authorizer("42");
        let command = Command::new("/status", 7, None).unwrap();
        assert!(!service.validate_command(&command).unwrap());
    }

    #[test]
    fn test_malformed_admin_ids_is_configuration_fault() {
        let service = authorizer("42,abc");
        let command = Command::new("/status", 42, None).unwrap();
        let result = service.validate_command(&command);
        assert!(matches!(
            result,
            Err(OpsBotError::CommandValidation { .. })
        ));
    }

    #[test]
    fn test_admin_ids_tolerate_whitespace() {
        let service = authorizer(" 42 , 7 ");
        let ids = service.authorized_ids().unwrap();
        assert!(ids.contains(&42));
        assert!(ids.contains(&7));
    }

    #[test]
    fn test_process_authorized_health() {
        let service = authorizer("42");
        let command = Command::new("/health", 42, None).unwrap();
        assert_eq!(service.process_command(&command).unwrap(), "Health check: OK");
    }

    #[test]
    fn test_process_unauthorized_health() {
        let service = authorizer("42");
        let command = Command::new("/health", 7, None).unwrap();
        assert_eq!(
            service.process_command(&command).unwrap(),
            RESPONSE_NOT_PERMITTED
        );
    }

    #[test]
    fn test_response_mapping_is_total() {
        for kind in [
            CommandKind::Status,
            CommandKind::Logs,
            CommandKind::Session,
            CommandKind::Retry,
            CommandKind::Health,
            CommandKind::Reboot,
        ] {
            assert!(!CommandAuthorizationService::response_for(kind).is_empty());
        }
    }

    #[test]
    fn test_each_supported_command_dispatches() {
        let service = authorizer("42");
        for name in ["/status", "/logs", "/session", "/retry", "/health", "/reboot"] {
            let command = Command::new(name, 42, None).unwrap();
            let response = service.process_command(&command).unwrap();
            assert_ne!(response, RESPONSE_NOT_PERMITTED, "{} fell through", name);
        }
    }
}

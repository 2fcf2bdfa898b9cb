use crate::domain::error::{OpsBotError, OpsBotResult};

/// Prefix every inbound command name must carry
pub const COMMAND_PREFIX: char = '/';

/// The fixed set of supported administrative commands.
///
/// Dispatch is an exhaustive match over this enum, so the response mapping
/// is total by construction; there is no string table to drift out of sync
/// with the supported set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Status,
    Logs,
    Session,
    Retry,
    Health,
    Reboot,
}

impl CommandKind {
    /// Resolve a prefixed, case-sensitive command name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "/status" => Some(CommandKind::Status),
            "/logs" => Some(CommandKind::Logs),
            "/session" => Some(CommandKind::Session),
            "/retry" => Some(CommandKind::Retry),
            "/health" => Some(CommandKind::Health),
            "/reboot" => Some(CommandKind::Reboot),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Status => "/status",
            CommandKind::Logs => "/logs",
            CommandKind::Session => "/session",
            CommandKind::Retry => "/retry",
            CommandKind::Health => "/health",
            CommandKind::Reboot => "/reboot",
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An inbound administrative instruction: name, issuing principal and
/// optional free-text arguments. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    name: String,
    user_id: i64,
    args: Option<String>,
}

impl Command {
    /// Construct a command. Fails if the name lacks the command prefix or
    /// the principal id is not positive; a command never exists in an
    /// invalid state.
    pub fn new(name: impl Into<String>, user_id: i64, args: Option<String>) -> OpsBotResult<Self> {
        let name = name.into();
        if !name.starts_with(COMMAND_PREFIX) {
            return Err(OpsBotError::InvalidCommand {
                message: format!("command '{}' must start with '{}'", name, COMMAND_PREFIX),
            });
        }
        if user_id <= 0 {
            return Err(OpsBotError::InvalidCommand {
                message: format!("user_id must be positive, got {}", user_id),
            });
        }

        Ok(Self {
            name,
            user_id,
            args,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn args(&self) -> Option<&str> {
        self.args.as_deref()
    }

    /// The supported-command variant for this name, if any. Unsupported
    /// names are a validation outcome, not a construction failure.
    pub fn kind(&self) -> Option<CommandKind> {
        CommandKind::from_name(&self.name)
    }
}

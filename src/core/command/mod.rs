// Command module - Command entity and authorization
pub mod authorizer;
pub mod command;

pub use authorizer::{CommandAuthorizationService, RESPONSE_NOT_PERMITTED};
pub use command::{Command, CommandKind, COMMAND_PREFIX};

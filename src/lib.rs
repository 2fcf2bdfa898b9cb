//! OpsBot Library
//!
//! Remote administration bot managing browser-automation sessions over a
//! Telegram chat channel, with a fixed admin allow-list gating the command
//! surface.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use crate::core::command::{Command, CommandAuthorizationService, CommandKind};
pub use crate::core::session::{Session, SessionLifecycleService, SessionManager, SessionStore};
pub use crate::domain::config::OpsBotConfig;
pub use crate::domain::error::{OpsBotError, OpsBotResult};

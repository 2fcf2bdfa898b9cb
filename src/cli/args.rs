use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Command line arguments for OpsBot
#[derive(Parser, Debug)]
#[command(
    name = "opsbot",
    version = env!("CARGO_PKG_VERSION"),
    about = "Remote administration bot for browser-automation sessions",
    long_about = "A remote-control bot: administrators issue commands over a Telegram chat channel to manage browser-automation sessions against a remote web application."
)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the Telegram bot loop
    Run,
    /// Validate the configuration (token, admin id list)
    Check,
    /// Session management commands
    Session(SessionArgs),
    /// Configuration management commands
    Config(ConfigArgs),
    /// Display version information
    Version,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
}

/// Session management arguments
#[derive(ClapArgs, Debug)]
pub struct SessionArgs {
    /// Session subcommand
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Configuration management arguments
#[derive(ClapArgs, Debug)]
pub struct ConfigArgs {
    /// Configuration subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Session management subcommands
#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Log in to the target application and open a session
    Open {
        /// Login URL (defaults to the configured target)
        #[arg(short, long)]
        url: Option<String>,
        /// Login username (defaults to the configured target)
        #[arg(long)]
        username: Option<String>,
        /// Login password (defaults to the configured target)
        #[arg(long)]
        password: Option<String>,
    },
    /// Deactivate a session
    Close {
        /// Session ID
        session_id: String,
    },
    /// Show a session
    Show {
        /// Session ID
        session_id: String,
    },
    /// Delete a session record
    Remove {
        /// Session ID
        session_id: String,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Create a default project configuration
    Init {
        /// Directory to initialize (defaults to the current directory)
        #[arg(short, long)]
        path: Option<String>,
    },
    /// Show the effective configuration
    Show,
    /// Show configuration file paths
    Path,
}

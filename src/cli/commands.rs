use crate::cli::args::{Args, Command, ConfigCommand, SessionCommand};
use crate::cli::output::{ConsoleWriter, OutputWriter, SessionView};
use crate::core::automation::Credentials;
use crate::core::command::CommandAuthorizationService;
use crate::core::session::SessionManager;
use crate::domain::config::OpsBotConfig;
use crate::domain::error::{OpsBotError, OpsBotResult};
use crate::infrastructure::automation::FormLoginDriver;
use crate::infrastructure::config::ConfigManager;
use crate::infrastructure::storage::InMemorySessionStore;
use crate::infrastructure::telegram::{TelegramClient, TelegramTransport};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Execute CLI command
pub async fn execute_command(args: Args) -> OpsBotResult<()> {
    let writer = ConsoleWriter::new(args.output.clone());

    // Load configuration using ConfigManager
    let config_manager = ConfigManager::new()?;
    let config = if let Some(config_path) = &args.config {
        config_manager.load_config_from_path(config_path.as_ref())?
    } else {
        config_manager.load_config()?
    };

    // Initialize logging
    if !args.quiet {
        setup_logging(&config, args.verbose)?;
    }

    match args.command {
        Command::Run => execute_run(&config).await,
        Command::Check => execute_check(&config, &writer),
        Command::Session(session_args) => {
            execute_session_command(session_args.command, &writer, &config).await
        }
        Command::Config(config_args) => {
            execute_config_command(config_args.command, &writer, &config, &config_manager)
        }
        Command::Version => {
            writer.write_message(&format!("opsbot {}", env!("CARGO_PKG_VERSION")))?;
            Ok(())
        }
    }
}

async fn execute_run(config: &OpsBotConfig) -> OpsBotResult<()> {
    let client = TelegramClient::new(&config.telegram.bot_token)?;
    let authorizer = CommandAuthorizationService::new(config.telegram.clone());
    // Fail fast on a malformed admin list instead of denying every command
    authorizer.authorized_ids()?;

    let transport = TelegramTransport::new(
        client,
        authorizer,
        Arc::new(build_session_manager(config)?),
        config.global.poll_timeout_secs,
    );
    transport.run().await
}

fn execute_check(config: &OpsBotConfig, writer: &ConsoleWriter) -> OpsBotResult<()> {
    if config.telegram.bot_token.is_empty() {
        return Err(OpsBotError::Config {
            message: "Telegram bot token is not configured".to_string(),
        });
    }

    let authorizer = CommandAuthorizationService::new(config.telegram.clone());
    let admin_ids = authorizer.authorized_ids()?;

    writer.write_message(&format!(
        "Configuration OK: {} admin id(s) configured",
        admin_ids.len()
    ))?;
    Ok(())
}

async fn execute_session_command(
    command: SessionCommand,
    writer: &ConsoleWriter,
    config: &OpsBotConfig,
) -> OpsBotResult<()> {
    let manager = build_session_manager(config)?;

    match command {
        SessionCommand::Open {
            url,
            username,
            password,
        } => {
            let url = url.unwrap_or_else(|| config.target.url.clone());
            if url.is_empty() {
                return Err(OpsBotError::Config {
                    message: "No login URL configured; pass --url or set [target] url".to_string(),
                });
            }
            let credentials = Credentials::new(
                username.unwrap_or_else(|| config.target.username.clone()),
                password.unwrap_or_else(|| config.target.password.clone()),
            );

            let session = manager.open_session(&url, &credentials).await?;
            writer.write_value(&SessionView::from(&session))?;
            Ok(())
        }
        SessionCommand::Close { session_id } => {
            manager.close_session(&session_id).await?;
            writer.write_message(&format!("Session '{}' closed", session_id))?;
            Ok(())
        }
        SessionCommand::Show { session_id } => {
            match manager.get_session(&session_id).await? {
                Some(session) => writer.write_value(&SessionView::from(&session))?,
                None => writer.write_error(&format!("Session '{}' not found", session_id))?,
            }
            Ok(())
        }
        SessionCommand::Remove { session_id } => {
            manager.remove_session(&session_id).await?;
            writer.write_message(&format!("Session '{}' removed", session_id))?;
            Ok(())
        }
    }
}

fn execute_config_command(
    command: ConfigCommand,
    writer: &ConsoleWriter,
    config: &OpsBotConfig,
    config_manager: &ConfigManager,
) -> OpsBotResult<()> {
    match command {
        ConfigCommand::Init { path } => {
            let target = path
                .map(PathBuf::from)
                .map_or_else(std::env::current_dir, Ok)?;
            config_manager.init_project_config(&target)?;
            writer.write_message(&format!(
                "Project configuration created in {}",
                target.join(".opsbot").display()
            ))?;
            Ok(())
        }
        ConfigCommand::Show => {
            // The token and password stay out of the printed config
            let mut redacted = config.clone();
            if !redacted.telegram.bot_token.is_empty() {
                redacted.telegram.bot_token = "<redacted>".to_string();
            }
            if !redacted.target.password.is_empty() {
                redacted.target.password = "<redacted>".to_string();
            }
            writer.write_value(&redacted)?;
            Ok(())
        }
        ConfigCommand::Path => {
            writer.write_message(&format!(
                "Global: {}",
                config_manager.get_global_config_path_ref().display()
            ))?;
            match config_manager.get_project_config_path() {
                Some(path) => writer.write_message(&format!("Project: {}", path.display()))?,
                None => writer.write_message("Project: (none)")?,
            }
            Ok(())
        }
    }
}

fn build_session_manager(config: &OpsBotConfig) -> OpsBotResult<SessionManager> {
    Ok(SessionManager::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(FormLoginDriver::new()?),
        Duration::from_secs(config.global.session_ttl_hours * 60 * 60),
        Duration::from_secs(config.global.login_timeout_secs),
    ))
}

fn setup_logging(config: &OpsBotConfig, verbose: bool) -> OpsBotResult<()> {
    let level = if verbose {
        "debug"
    } else {
        config.global.log_level.as_str()
    };

    crate::infrastructure::logging::init_logging(level).map_err(|e| OpsBotError::Config {
        message: format!("Failed to initialize logging: {}", e),
    })
}

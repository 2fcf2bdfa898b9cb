use thiserror::Error;

/// OpsBot unified error type
#[derive(Error, Debug)]
pub enum OpsBotError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid session: {message}")]
    InvalidSession { message: String },

    #[error("Invalid command: {message}")]
    InvalidCommand { message: String },

    #[error("Session creation failed: {source}")]
    SessionCreation {
        #[source]
        source: Box<OpsBotError>,
    },

    #[error("Session deactivation failed: {source}")]
    SessionDeactivation {
        #[source]
        source: Box<OpsBotError>,
    },

    #[error("Command validation failed: {message}")]
    CommandValidation { message: String },

    #[error("Command processing failed: {source}")]
    CommandProcessing {
        #[source]
        source: Box<OpsBotError>,
    },

    #[error("Automation error: {0}")]
    Automation(String),

    #[error("Login step timed out")]
    LoginTimeout,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Output error: {0}")]
    Output(String),
}

impl OpsBotError {
    /// Wrap an error as a session-creation failure, keeping the cause.
    pub fn session_creation(source: OpsBotError) -> Self {
        OpsBotError::SessionCreation {
            source: Box::new(source),
        }
    }

    /// Wrap an error as a session-deactivation failure, keeping the cause.
    pub fn session_deactivation(source: OpsBotError) -> Self {
        OpsBotError::SessionDeactivation {
            source: Box::new(source),
        }
    }

    /// Wrap an error as a command-processing failure, keeping the cause.
    pub fn command_processing(source: OpsBotError) -> Self {
        OpsBotError::CommandProcessing {
            source: Box::new(source),
        }
    }
}

pub type OpsBotResult<T> = Result<T, OpsBotError>;

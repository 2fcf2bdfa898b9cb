use crate::cli::args::OutputFormat;
use crate::core::session::Session;
use crate::domain::error::{OpsBotError, OpsBotResult};
use serde::Serialize;
use std::time::SystemTime;

/// Output writer abstraction
pub trait OutputWriter {
    fn write_message(&self, message: &str) -> OpsBotResult<()>;
    fn write_error(&self, message: &str) -> OpsBotResult<()>;
    fn write_value<T: Serialize>(&self, value: &T) -> OpsBotResult<()>;
}

/// Console output writer
pub struct ConsoleWriter {
    format: OutputFormat,
}

impl ConsoleWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl OutputWriter for ConsoleWriter {
    fn write_message(&self, message: &str) -> OpsBotResult<()> {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => {
                let value = serde_json::json!({ "message": message });
                println!("{}", value);
            }
        }
        Ok(())
    }

    fn write_error(&self, message: &str) -> OpsBotResult<()> {
        match self.format {
            OutputFormat::Text => eprintln!("Error: {}", message),
            OutputFormat::Json => {
                let value = serde_json::json!({ "error": message });
                eprintln!("{}", value);
            }
        }
        Ok(())
    }

    fn write_value<T: Serialize>(&self, value: &T) -> OpsBotResult<()> {
        let rendered = serde_json::to_string_pretty(value)
            .map_err(|e| OpsBotError::Output(format!("failed to serialize output: {}", e)))?;
        println!("{}", rendered);
        Ok(())
    }
}

/// Serializable view of a session for CLI output
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub created_at: SystemTime,
    pub expires_at: SystemTime,
    pub is_active: bool,
    pub cookie_count: usize,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.session_id().to_string(),
            created_at: session.created_at(),
            expires_at: session.expires_at(),
            is_active: session.is_active(),
            cookie_count: session.cookies().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    #[test]
    fn test_session_view() {
        let now = SystemTime::now();
        let mut cookies = HashMap::new();
        cookies.insert("sid".to_string(), "abc".to_string());
        let session = Session::new(
            "abc".to_string(),
            cookies,
            now,
            now + Duration::from_secs(1),
        )
        .unwrap();

        let view = SessionView::from(&session);
        assert_eq!(view.session_id, "abc");
        assert!(view.is_active);
        assert_eq!(view.cookie_count, 1);
        assert!(serde_json::to_string(&view).is_ok());
    }

    #[test]
    fn test_writers_do_not_fail() {
        let writer = ConsoleWriter::new(OutputFormat::Text);
        writer.write_message("hello").unwrap();
        writer.write_error("oops").unwrap();

        let writer = ConsoleWriter::new(OutputFormat::Json);
        writer.write_message("hello").unwrap();
    }
}

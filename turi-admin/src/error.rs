use thiserror::Error;
use tracing::error;
use turi_client::ClientError;
use turi_receipt::RenderError;

use crate::exit_codes::{
    EXIT_ERROR, EXIT_EXPORT, EXIT_NOT_FOUND, EXIT_SESSION_EXPIRED, EXIT_USAGE,
};

/// Command failures that map to their own exit code
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Ticket {0} is not in the selected history")]
    TicketNotFound(i64),

    #[error("Token must not be empty")]
    EmptyToken,
}

impl CommandError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::TicketNotFound(_) => EXIT_NOT_FOUND,
            Self::EmptyToken => EXIT_USAGE,
        }
    }
}

/// Failure reported to the shell
#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    /// Classify a failed command
    ///
    /// Only the top-level summary is shown; the cause chain goes to the log.
    pub fn from_failure(err: anyhow::Error, session_expired: bool) -> Self {
        error!(error = %format!("{:#}", err), "Command failed");

        let expired = session_expired
            || err.chain().any(|cause| {
                cause
                    .downcast_ref::<ClientError>()
                    .is_some_and(ClientError::is_session_expired)
            });
        if expired {
            return Self::session_expired();
        }

        let code = if let Some(command) = err.downcast_ref::<CommandError>() {
            command.exit_code()
        } else if err.chain().any(|cause| cause.is::<RenderError>()) {
            EXIT_EXPORT
        } else {
            EXIT_ERROR
        };
        Self {
            code,
            message: err.to_string(),
            hint: None,
        }
    }

    pub fn session_expired() -> Self {
        Self {
            code: EXIT_SESSION_EXPIRED,
            message: "Session expired".into(),
            hint: Some("log in again with `turi-admin login --token <TOKEN>`".into()),
        }
    }

    pub fn report(&self) {
        eprintln!("error: {}", self.message);
        if let Some(hint) = &self.hint {
            eprintln!("hint:  {}", hint);
        }
    }
}

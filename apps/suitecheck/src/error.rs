//! CLI error handling

use std::fmt;

use suitecheck_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Verification or configuration failure from the library crates
    Check(suitecheck_errors::Error),
    /// The blocking verification task did not finish
    Task(String),
    /// I/O error
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Check(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                Ok(())
            }
            CliError::Task(msg) => write!(f, "Verification task failed: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Check(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::Task(_) => None,
        }
    }
}

impl CliError {
    /// Stable code for JSON error output
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Check(e) => e.user_code().unwrap_or("error.unknown"),
            CliError::Task(_) => "error.task",
            CliError::Io(_) => "error.io",
        }
    }
}

impl From<suitecheck_errors::Error> for CliError {
    fn from(e: suitecheck_errors::Error) -> Self {
        CliError::Check(e)
    }
}

impl From<tokio::task::JoinError> for CliError {
    fn from(e: tokio::task::JoinError) -> Self {
        CliError::Task(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

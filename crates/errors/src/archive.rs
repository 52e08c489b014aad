//! Tool archive error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ArchiveError {
    #[error("failed to open archive {path}: {message}")]
    OpenFailed { path: String, message: String },

    #[error("failed to read entry {entry} in {archive}: {message}")]
    EntryReadFailed {
        archive: String,
        entry: String,
        message: String,
    },

    #[error("entry {entry} not found in {archive}")]
    EntryNotFound { archive: String, entry: String },

    #[error("invalid suite info in {entry}: {message}")]
    InvalidSuiteInfo { entry: String, message: String },
}

impl UserFacingError for ArchiveError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::OpenFailed { .. } => {
                Some("Check that the suite root points at an unpacked suite with a tools/ archive.")
            }
            Self::EntryReadFailed { .. } => Some("The tool archive looks corrupt; rebuild it."),
            Self::EntryNotFound { .. } | Self::InvalidSuiteInfo { .. } => {
                Some("Rebuild the tool archive so it packages the suite metadata.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::OpenFailed { .. } => "archive.open_failed",
            Self::EntryReadFailed { .. } => "archive.entry_read_failed",
            Self::EntryNotFound { .. } => "archive.entry_not_found",
            Self::InvalidSuiteInfo { .. } => "archive.invalid_suite_info",
        };
        Some(code)
    }
}

//! Verification error types for suite consistency checks

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

/// Errors emitted while reconciling declared modules against config files.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum VerifyError {
    /// The testcases directory does not exist.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: std::path::PathBuf },

    /// No `*.config` file was found under the testcases directory.
    #[error("no test module configs found under {path}")]
    EmptyConfigSet { path: std::path::PathBuf },

    /// No include-filter declaration was found in the tool archive.
    #[error("no modules declared by include-filter in {archive}")]
    EmptyDeclaredSet { archive: std::path::PathBuf },

    /// Declared modules without a matching config file. Always carries the full list.
    #[error("{} declared module(s) not in configs: {}", missing.len(), missing.join(", "))]
    Mismatch { missing: Vec<String> },

    /// The suite metadata packaged in the archive does not match expectations.
    #[error("incorrect suite {field}: expected {expected:?}, found {actual:?}")]
    SuiteInfoMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// A module identifier failed normalization.
    #[error("invalid module identifier: {value:?}")]
    InvalidModuleId { value: String },
}

impl UserFacingError for VerifyError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::DirectoryNotFound { .. } | Self::EmptyConfigSet { .. } => {
                Some("Run inside an unpacked suite; the testcases/ folder must hold module configs.")
            }
            Self::EmptyDeclaredSet { .. } => {
                Some("Check that the tool archive packages its tests-list manifests.")
            }
            Self::Mismatch { .. } => {
                Some("Package the listed modules into testcases/ or drop them from the tests-list.")
            }
            Self::SuiteInfoMismatch { .. } => {
                Some("Rebuild the tool archive with the expected suite metadata.")
            }
            Self::InvalidModuleId { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::DirectoryNotFound { .. } => "verify.directory_not_found",
            Self::EmptyConfigSet { .. } => "verify.empty_config_set",
            Self::EmptyDeclaredSet { .. } => "verify.empty_declared_set",
            Self::Mismatch { .. } => "verify.mismatch",
            Self::SuiteInfoMismatch { .. } => "verify.suite_info_mismatch",
            Self::InvalidModuleId { .. } => "verify.invalid_module_id",
        };
        Some(code)
    }
}

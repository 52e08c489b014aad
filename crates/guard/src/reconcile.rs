//! Declared-versus-config reconciliation

use serde::Serialize;
use suitecheck_errors::{Error, VerifyError};
use suitecheck_types::{ConfigModuleSet, DeclaredModuleSet, ModuleSet};

/// Outcome of one verification run
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum VerificationResult {
    /// Every declared module has a config
    Pass,
    /// Declared modules without a config
    Fail { missing: ModuleSet },
    /// The run stopped before reconciliation
    Error {
        #[serde(serialize_with = "serialize_error")]
        cause: Error,
    },
}

impl VerificationResult {
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Collapse into a `Result`, turning a failure into `VerifyError::Mismatch`
    ///
    /// # Errors
    ///
    /// Returns the mismatch (listing every missing module) or the original cause.
    pub fn into_result(self) -> Result<(), Error> {
        match self {
            Self::Pass => Ok(()),
            Self::Fail { missing } => Err(VerifyError::Mismatch {
                missing: missing.to_strings(),
            }
            .into()),
            Self::Error { cause } => Err(cause),
        }
    }
}

impl From<Error> for VerificationResult {
    fn from(cause: Error) -> Self {
        Self::Error { cause }
    }
}

fn serialize_error<S>(err: &Error, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(err)
}

/// Compute `declared \ configs`
///
/// Pure and deterministic: calling it twice on the same sets yields equal
/// results.
#[must_use]
pub fn reconcile(declared: &DeclaredModuleSet, configs: &ConfigModuleSet) -> VerificationResult {
    let missing = declared.difference(configs);
    if missing.is_empty() {
        VerificationResult::Pass
    } else {
        VerificationResult::Fail { missing }
    }
}

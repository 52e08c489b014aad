//! Report types produced by the suite verifier

use serde::Serialize;
use std::path::PathBuf;
use suitecheck_types::ModuleSet;

/// Summary of a completed reconciliation
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub suite_dir: PathBuf,
    pub archive: PathBuf,
    /// Manifest entries scanned, in archive order
    pub manifests: Vec<String>,
    pub declared: usize,
    pub configs: usize,
    /// Declared modules without a config
    pub missing: ModuleSet,
    /// Config modules no manifest declares; informational only
    pub unreferenced: ModuleSet,
    pub passed: bool,
    pub duration_ms: u64,
}

impl VerificationReport {
    #[must_use]
    pub fn verdict(&self) -> &'static str {
        if self.passed {
            "pass"
        } else {
            "fail"
        }
    }
}

/// Both module sets of a suite, for listing
#[derive(Debug, Clone, Serialize)]
pub struct ModuleListing {
    pub declared: ModuleSet,
    pub configs: ModuleSet,
}

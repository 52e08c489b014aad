use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Events emitted while collecting configs and reconciling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VerifyEvent {
    /// Module configs found under the testcases directory
    ConfigsCollected { directory: PathBuf, configs: usize },

    /// Declared modules all have a config
    Passed { declared: usize, configs: usize },

    /// Declared modules without a config, always the full list
    Failed { missing: Vec<String> },

    /// Config modules nobody declares; informational only
    Unreferenced { modules: Vec<String> },

    /// Suite metadata matched the expected name and full name
    SuiteInfoChecked { name: String, full_name: String },
}

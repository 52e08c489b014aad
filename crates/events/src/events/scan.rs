use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Events emitted while scanning the tool archive
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScanEvent {
    /// Archive opened successfully
    ArchiveOpened { archive: PathBuf, entries: usize },

    /// One tests-list manifest was read and its declarations extracted
    ManifestScanned {
        entry: String,
        marker_lines: usize,
        extracted: usize,
    },

    /// Every selected manifest was processed
    Completed { manifests: usize, declared: usize },
}

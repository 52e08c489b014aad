//! Resolved on-disk layout of an unpacked suite
//!
//! A `SuiteLayout` is built once from the merged configuration and handed to
//! the verifier. Nothing downstream consults the environment.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::SuiteConfig;

/// Paths for one suite distribution: `<root>/<dir>/testcases` and
/// `<root>/<dir>/tools/<archive>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteLayout {
    pub root: PathBuf,
    pub suite_dir: PathBuf,
    pub testcases_dir: PathBuf,
    pub archive_path: PathBuf,
}

impl SuiteLayout {
    /// Resolve the layout below `root` using the configured directory names
    #[must_use]
    pub fn from_root(root: &Path, suite: &SuiteConfig) -> Self {
        let suite_dir = root.join(&suite.dir_name);
        let testcases_dir = suite_dir.join(&suite.testcases_dir);
        let archive_path = suite_dir.join(&suite.tools_dir).join(&suite.archive_name);
        Self {
            root: root.to_path_buf(),
            suite_dir,
            testcases_dir,
            archive_path,
        }
    }
}

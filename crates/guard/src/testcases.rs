//! Config set builder over the suite's testcases directory

use std::path::Path;

use suitecheck_errors::{Error, VerifyError};
use suitecheck_types::{ConfigModuleSet, ModuleId};
use walkdir::WalkDir;

/// Collect the module identifiers implied by `<name><suffix>` files under `dir`
///
/// The walk is recursive and follows symlinks. Files whose base name is not a
/// valid module identifier are skipped with a warning. An empty result is
/// returned as-is; the caller decides whether that is fatal.
///
/// # Errors
///
/// Returns `VerifyError::DirectoryNotFound` if `dir` is not a directory, or an
/// I/O error if part of the tree cannot be read.
pub fn collect_config_modules(dir: &Path, suffix: &str) -> Result<ConfigModuleSet, Error> {
    if !dir.is_dir() {
        return Err(VerifyError::DirectoryNotFound {
            path: dir.to_path_buf(),
        }
        .into());
    }

    let mut modules = ConfigModuleSet::new();
    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            match e.into_io_error() {
                Some(io) => Error::io_with_path(&io, path),
                None => Error::internal(format!("filesystem loop at {}", path.display())),
            }
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        let Some(stem) = file_name.strip_suffix(suffix) else {
            continue;
        };

        match ModuleId::new(stem) {
            Ok(id) => {
                tracing::trace!(module = %id, path = %entry.path().display(), "module config");
                modules.insert(id);
            }
            Err(e) => {
                tracing::warn!(path = %entry.path().display(), error = %e, "skipping config file");
            }
        }
    }

    tracing::debug!(
        directory = %dir.display(),
        configs = modules.len(),
        "collected module configs"
    );
    Ok(modules)
}

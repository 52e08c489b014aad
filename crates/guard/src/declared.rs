//! Declared module collection from the tool archive

use std::path::Path;

use suitecheck_archive::{ArchiveScanner, EntryFilter};
use suitecheck_errors::Error;
use suitecheck_events::{AppEvent, EventEmitter, ScanEvent};
use suitecheck_manifest::IncludeFilterExtractor;
use suitecheck_types::DeclaredModuleSet;

/// Modules declared by the archive plus the manifests they came from
#[derive(Debug, Clone, Default)]
pub struct DeclaredScan {
    pub modules: DeclaredModuleSet,
    pub manifests: Vec<String>,
}

/// Scan every selected manifest in `archive` and accumulate declarations
///
/// The archive is opened, scanned in entry order, and closed before
/// returning, on success and on error alike.
///
/// # Errors
///
/// Returns an archive error if the archive cannot be opened or a selected
/// manifest cannot be read, and `VerifyError::InvalidModuleId` if a
/// declaration does not name a usable module.
pub fn collect_declared_modules(
    archive: &Path,
    filter: &EntryFilter,
    extractor: &IncludeFilterExtractor,
    emitter: &impl EventEmitter,
) -> Result<DeclaredScan, Error> {
    let mut scanner = ArchiveScanner::open(archive)?;
    if scanner.is_empty() {
        tracing::warn!(archive = %archive.display(), "tool archive has no entries");
    }
    emitter.emit(AppEvent::Scan(ScanEvent::ArchiveOpened {
        archive: archive.to_path_buf(),
        entries: scanner.len(),
    }));

    let mut scan = DeclaredScan::default();
    for manifest in scanner.manifests(filter) {
        let manifest = manifest?;
        let stats = extractor
            .extract_lines(manifest.lines(), &mut scan.modules)
            .inspect_err(|e| {
                tracing::error!(
                    entry = manifest.name(),
                    error = %e,
                    "unusable include-filter value"
                );
            })?;
        emitter.emit(AppEvent::Scan(ScanEvent::ManifestScanned {
            entry: manifest.name().to_string(),
            marker_lines: stats.marker_lines,
            extracted: stats.extracted,
        }));
        scan.manifests.push(manifest.name().to_string());
    }

    emitter.emit(AppEvent::Scan(ScanEvent::Completed {
        manifests: scan.manifests.len(),
        declared: scan.modules.len(),
    }));
    Ok(scan)
}

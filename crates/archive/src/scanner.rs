//! Lazy manifest scanning over a zip/jar archive

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use suitecheck_errors::ArchiveError;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::filter::EntryFilter;

/// An open tool archive.
///
/// The file handle lives exactly as long as the scanner; entry streams are
/// opened one at a time and dropped before the next one is opened.
pub struct ArchiveScanner {
    path: PathBuf,
    archive: ZipArchive<BufReader<File>>,
}

impl std::fmt::Debug for ArchiveScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveScanner")
            .field("path", &self.path)
            .field("entries", &self.archive.len())
            .finish()
    }
}

impl ArchiveScanner {
    /// Open an archive for scanning
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::OpenFailed` if the file is missing, unreadable,
    /// or not a zip archive.
    pub fn open(path: &Path) -> Result<Self, ArchiveError> {
        let open_failed = |message: String| ArchiveError::OpenFailed {
            path: path.display().to_string(),
            message,
        };

        let file = File::open(path).map_err(|e| open_failed(e.to_string()))?;
        let archive =
            ZipArchive::new(BufReader::new(file)).map_err(|e| open_failed(e.to_string()))?;

        tracing::debug!(
            archive = %path.display(),
            entries = archive.len(),
            "opened tool archive"
        );

        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries in the archive, directories included
    #[must_use]
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    /// Lazily yield every manifest selected by `filter`, in archive order
    ///
    /// Each entry is read only when the iterator reaches it. The first read
    /// failure is yielded as an error and ends the iteration.
    pub fn manifests<'a>(&'a mut self, filter: &'a EntryFilter) -> Manifests<'a> {
        Manifests {
            scanner: self,
            filter,
            next_index: 0,
        }
    }

    /// Read a single entry by exact name
    ///
    /// Returns `Ok(None)` when the archive has no such entry.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::EntryReadFailed` if the entry exists but cannot
    /// be decompressed or is not valid UTF-8.
    pub fn read_entry(&mut self, name: &str) -> Result<Option<String>, ArchiveError> {
        let mut entry = match self.archive.by_name(name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(entry_error(&self.path, name, &e)),
        };

        let mut text = String::new();
        entry
            .read_to_string(&mut text)
            .map_err(|e| entry_error(&self.path, name, &e))?;
        Ok(Some(text))
    }

    fn read_index(&mut self, index: usize, name: &str) -> Result<String, ArchiveError> {
        let mut entry = match self.archive.by_index(index) {
            Ok(entry) => entry,
            Err(e) => return Err(entry_error(&self.path, name, &e)),
        };

        let mut text = String::new();
        entry
            .read_to_string(&mut text)
            .map_err(|e| entry_error(&self.path, name, &e))?;
        Ok(text)
    }
}

fn entry_error(archive: &Path, entry: &str, err: &dyn std::fmt::Display) -> ArchiveError {
    ArchiveError::EntryReadFailed {
        archive: archive.display().to_string(),
        entry: entry.to_string(),
        message: err.to_string(),
    }
}

/// Text of one selected manifest entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestText {
    name: String,
    text: String,
}

impl ManifestText {
    /// Entry name inside the archive
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lines of the manifest, consumed lazily
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.text.lines()
    }
}

/// Iterator returned by [`ArchiveScanner::manifests`]
pub struct Manifests<'a> {
    scanner: &'a mut ArchiveScanner,
    filter: &'a EntryFilter,
    next_index: usize,
}

impl Iterator for Manifests<'_> {
    type Item = Result<ManifestText, ArchiveError>;

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.scanner.archive.len();
        while self.next_index < len {
            let index = self.next_index;
            self.next_index += 1;

            let Some(name) = self.scanner.archive.name_for_index(index) else {
                continue;
            };
            if !self.filter.matches(name) {
                if self.filter.is_candidate(name) {
                    tracing::debug!(entry = name, "skipping excluded manifest");
                }
                continue;
            }
            let name = name.to_owned();

            return match self.scanner.read_index(index, &name) {
                Ok(text) => {
                    tracing::debug!(entry = %name, bytes = text.len(), "read manifest");
                    Some(Ok(ManifestText { name, text }))
                }
                Err(e) => {
                    self.next_index = len;
                    Some(Err(e))
                }
            };
        }
        None
    }
}

#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Include-filter extraction from tests-list manifests
//!
//! A tests-list manifest declares the modules a suite plan runs with lines
//! such as:
//!
//! ```text
//! <option name="compatibility:include-filter" value="CtsNetTestCases android.net.cts.DnsTest" />
//! ```
//!
//! The extractor keeps the module part of each declared value (everything
//! before the first space) and accumulates the identifiers into a set. A
//! declared value that does not normalize to a valid module identifier is
//! an error, never a silent skip.

use std::io::BufRead;

use regex::Regex;
use suitecheck_config::ScanConfig;
use suitecheck_errors::{Error, VerifyError};
use suitecheck_types::{DeclaredModuleSet, ModuleId};

/// Quoted `value="..."` attribute on a declaration line.
///
/// Greedy: the capture runs to the last quote on the line, so a quoted
/// attribute after the value ends up in the capture.
const VALUE_PATTERN: &str = r#"value="(.*)""#;

/// Counters for one extraction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Lines read
    pub lines: usize,
    /// Lines carrying the filter token
    pub marker_lines: usize,
    /// Identifiers extracted, duplicates included
    pub extracted: usize,
}

impl ExtractStats {
    fn absorb(&mut self, other: Self) {
        self.lines += other.lines;
        self.marker_lines += other.marker_lines;
        self.extracted += other.extracted;
    }
}

/// Extracts module identifiers from include-filter declarations
#[derive(Debug, Clone)]
pub struct IncludeFilterExtractor {
    token: String,
    value_pattern: Regex,
}

impl IncludeFilterExtractor {
    /// Create an extractor for lines containing `token`
    ///
    /// # Errors
    ///
    /// Returns an error if the value pattern fails to compile.
    pub fn new(token: impl Into<String>) -> Result<Self, Error> {
        let value_pattern = Regex::new(VALUE_PATTERN)
            .map_err(|e| Error::internal(format!("failed to compile value pattern: {e}")))?;
        Ok(Self {
            token: token.into(),
            value_pattern,
        })
    }

    /// Create an extractor for the configured filter token
    ///
    /// # Errors
    ///
    /// Returns an error if the value pattern fails to compile.
    pub fn from_scan_config(scan: &ScanConfig) -> Result<Self, Error> {
        Self::new(scan.filter_token.clone())
    }

    /// Extract the module declared on a single line, if any
    ///
    /// Lines without the token, or with the token but no quoted value, yield
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `VerifyError::InvalidModuleId` if the quoted value does not
    /// normalize to a module identifier.
    pub fn extract_line(&self, line: &str) -> Result<Option<ModuleId>, VerifyError> {
        if !line.contains(&self.token) {
            return Ok(None);
        }
        let Some(value) = self.value_pattern.captures(line).and_then(|c| c.get(1)) else {
            return Ok(None);
        };
        normalize_declared(value.as_str()).map(Some)
    }

    /// Extract every declaration from `lines` into `modules`
    ///
    /// # Errors
    ///
    /// Returns `VerifyError::InvalidModuleId` on the first declared value that
    /// is not a valid module identifier.
    pub fn extract_lines<'a, I>(
        &self,
        lines: I,
        modules: &mut DeclaredModuleSet,
    ) -> Result<ExtractStats, VerifyError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut stats = ExtractStats::default();
        for line in lines {
            stats.absorb(self.visit_line(line, modules)?);
        }
        Ok(stats)
    }

    /// Extract every declaration from a buffered reader into `modules`
    ///
    /// The reader is consumed and dropped once exhausted or on the first
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if a line cannot be read, or
    /// `VerifyError::InvalidModuleId` for an unusable declared value.
    pub fn extract_reader<R: BufRead>(
        &self,
        reader: R,
        modules: &mut DeclaredModuleSet,
    ) -> Result<ExtractStats, Error> {
        let mut stats = ExtractStats::default();
        for line in reader.lines() {
            let line = line?;
            stats.absorb(self.visit_line(&line, modules)?);
        }
        Ok(stats)
    }

    fn visit_line(
        &self,
        line: &str,
        modules: &mut DeclaredModuleSet,
    ) -> Result<ExtractStats, VerifyError> {
        let mut stats = ExtractStats {
            lines: 1,
            ..ExtractStats::default()
        };
        if !line.contains(&self.token) {
            return Ok(stats);
        }
        stats.marker_lines = 1;
        match self.extract_line(line)? {
            Some(id) => {
                stats.extracted = 1;
                if modules.insert(id) {
                    tracing::trace!(line, "declared module");
                }
            }
            None => tracing::debug!(line, "include-filter line without quoted value"),
        }
        Ok(stats)
    }
}

/// Normalize a declared value to its module identifier
///
/// `"CtsNetTestCases android.net.cts.DnsTest"` becomes `CtsNetTestCases`;
/// a value without a space is trimmed and kept whole.
///
/// # Errors
///
/// Returns `VerifyError::InvalidModuleId`, carrying the whole declared value,
/// if the module part is empty or still contains whitespace (a leading space,
/// or a tab before the qualifier).
pub fn normalize_declared(value: &str) -> Result<ModuleId, VerifyError> {
    let module = match value.find(' ') {
        Some(space) => &value[..space],
        None => value.trim(),
    };
    ModuleId::new(module).map_err(|_| VerifyError::InvalidModuleId {
        value: value.to_string(),
    })
}

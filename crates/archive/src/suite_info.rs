//! Suite metadata packaged in the tool archive

use serde::Serialize;
use std::collections::BTreeMap;
use suitecheck_config::constants::SUITE_INFO_ENTRY;
use suitecheck_errors::ArchiveError;

use crate::scanner::ArchiveScanner;

/// Contents of `test-suite-info.properties`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteInfo {
    pub name: String,
    pub full_name: String,
    pub version: Option<String>,
    pub build_number: Option<String>,
    pub target_arch: Option<String>,
}

impl SuiteInfo {
    /// Read the suite metadata entry from an open archive
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::EntryNotFound` if the archive does not package
    /// the properties file, or `ArchiveError::InvalidSuiteInfo` if `name`
    /// or `fullname` is absent.
    pub fn read_from(scanner: &mut ArchiveScanner) -> Result<Self, ArchiveError> {
        let Some(text) = scanner.read_entry(SUITE_INFO_ENTRY)? else {
            return Err(ArchiveError::EntryNotFound {
                archive: scanner.path().display().to_string(),
                entry: SUITE_INFO_ENTRY.to_string(),
            });
        };
        Self::parse(&text)
    }

    /// Parse properties text
    ///
    /// Keys end at the first `=`, `:` or whitespace. Lines starting with `#`
    /// or `!` are comments, and a line ending in an odd number of
    /// backslashes continues on the next one.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::InvalidSuiteInfo` if a required key is missing.
    pub fn parse(text: &str) -> Result<Self, ArchiveError> {
        let mut props = parse_properties(text);

        let mut required = |key: &str| {
            props
                .remove(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ArchiveError::InvalidSuiteInfo {
                    entry: SUITE_INFO_ENTRY.to_string(),
                    message: format!("missing key {key}"),
                })
        };
        let name = required("name")?;
        let full_name = required("fullname")?;

        Ok(Self {
            name,
            full_name,
            version: props.remove("version"),
            build_number: props.remove("build_number"),
            target_arch: props.remove("target_arch"),
        })
    }
}

fn parse_properties(text: &str) -> BTreeMap<String, String> {
    logical_lines(text)
        .iter()
        .map(|line| split_entry(line))
        .collect()
}

/// Join backslash-continued physical lines, dropping blanks and comments
fn logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending: Option<String> = None;

    for raw in text.lines() {
        let line = raw.trim_start();
        let mut current = match pending.take() {
            Some(joined) => joined,
            None if line.is_empty() || line.starts_with('#') || line.starts_with('!') => continue,
            None => String::new(),
        };

        let trailing = line.len() - line.trim_end_matches('\\').len();
        if trailing % 2 == 1 {
            current.push_str(&line[..line.len() - 1]);
            pending = Some(current);
        } else {
            current.push_str(line);
            lines.push(current);
        }
    }
    // A continuation on the last line just ends the entry.
    lines.extend(pending);
    lines
}

/// Split a logical line at the first unescaped `=`, `:` or whitespace
fn split_entry(line: &str) -> (String, String) {
    let mut chars = line.char_indices();
    let mut key_end = line.len();
    while let Some((index, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '=' | ':' => {
                key_end = index;
                break;
            }
            c if c.is_whitespace() => {
                key_end = index;
                break;
            }
            _ => {}
        }
    }

    let rest = line[key_end..].trim_start();
    let rest = rest
        .strip_prefix(['=', ':'])
        .map_or(rest, str::trim_start);
    (unescape(&line[..key_end]), unescape(rest.trim_end()))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

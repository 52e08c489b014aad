//! Test module identifiers and sets of them

use serde::{Deserialize, Serialize};
use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use suitecheck_errors::VerifyError;

/// Normalized identifier of a test module.
///
/// Always non-empty, trimmed, and free of whitespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleId(String);

impl ModuleId {
    /// Create a module identifier from a raw token
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns `VerifyError::InvalidModuleId` if the trimmed value is empty
    /// or still contains whitespace.
    pub fn new(value: impl AsRef<str>) -> Result<Self, VerifyError> {
        let raw = value.as_ref();
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(VerifyError::InvalidModuleId {
                value: raw.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ModuleId {
    type Err = VerifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ModuleId {
    type Error = VerifyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ModuleId> for String {
    fn from(id: ModuleId) -> Self {
        id.0
    }
}

impl AsRef<str> for ModuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered set of module identifiers.
///
/// Ordering only makes reports stable; membership is all that matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleSet(BTreeSet<ModuleId>);

/// Modules declared by include-filter lines inside the tool archive.
pub type DeclaredModuleSet = ModuleSet;

/// Modules that have a `<name>.config` file in the testcases directory.
pub type ConfigModuleSet = ModuleSet;

impl ModuleSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an identifier, returning `false` if it was already present
    pub fn insert(&mut self, id: ModuleId) -> bool {
        self.0.insert(id)
    }

    #[must_use]
    pub fn contains(&self, id: &ModuleId) -> bool {
        self.0.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, ModuleId> {
        self.0.iter()
    }

    /// Identifiers present in `self` but absent from `other`
    #[must_use]
    pub fn difference(&self, other: &ModuleSet) -> ModuleSet {
        self.0.difference(&other.0).cloned().collect()
    }

    /// Identifiers as plain strings, in sorted order
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl FromIterator<ModuleId> for ModuleSet {
    fn from_iter<I: IntoIterator<Item = ModuleId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<ModuleId> for ModuleSet {
    fn extend<I: IntoIterator<Item = ModuleId>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ModuleSet {
    type Item = ModuleId;
    type IntoIter = btree_set::IntoIter<ModuleId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ModuleSet {
    type Item = &'a ModuleId;
    type IntoIter = btree_set::Iter<'a, ModuleId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

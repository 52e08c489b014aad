//! Entry name filters for selecting manifests

use suitecheck_config::ScanConfig;

/// Substring markers that exclude an archive entry outright.
///
/// Matching is case-sensitive and applies to the full entry name, so a
/// marker hit anywhere in the path wins over every other filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionRule {
    markers: Vec<String>,
}

impl ExclusionRule {
    #[must_use]
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    /// The first marker contained in `name`, if any
    #[must_use]
    pub fn matched_marker(&self, name: &str) -> Option<&str> {
        self.markers
            .iter()
            .map(String::as_str)
            .find(|marker| name.contains(marker))
    }

    #[must_use]
    pub fn excludes(&self, name: &str) -> bool {
        self.matched_marker(name).is_some()
    }
}

/// Selects the tests-list manifests to extract declarations from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFilter {
    suffix: String,
    marker: String,
    exclusions: ExclusionRule,
}

impl EntryFilter {
    #[must_use]
    pub fn new(
        suffix: impl Into<String>,
        marker: impl Into<String>,
        exclusions: ExclusionRule,
    ) -> Self {
        Self {
            suffix: suffix.into(),
            marker: marker.into(),
            exclusions,
        }
    }

    #[must_use]
    pub fn from_scan_config(scan: &ScanConfig) -> Self {
        Self::new(
            scan.entry_suffix.clone(),
            scan.list_marker.clone(),
            ExclusionRule::new(scan.exclusions.iter().cloned()),
        )
    }

    /// Whether the entry carries the manifest suffix and marker
    #[must_use]
    pub fn is_candidate(&self, name: &str) -> bool {
        name.ends_with(&self.suffix) && name.contains(&self.marker)
    }

    /// Whether the entry should be scanned: a candidate that no exclusion hits
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.is_candidate(name) && !self.exclusions.excludes(name)
    }
}

impl Default for EntryFilter {
    fn default() -> Self {
        Self::from_scan_config(&ScanConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_selects_tests_lists() {
        let filter = EntryFilter::default();
        assert!(filter.matches("config/mts-tests-list-user.xml"));
        assert!(filter.matches("tests-list.xml"));
        assert!(!filter.matches("config/mts-tests-list.txt"));
        assert!(!filter.matches("config/mts.xml"));
    }

    #[test]
    fn exclusion_beats_every_other_filter() {
        let filter = EntryFilter::default();
        assert!(!filter.matches("bluetooth/tests-list.xml"));
        assert!(!filter.matches("config/mts-bt-tests-list.xml"));
        assert!(!filter.matches("config/mts-tests-list-smoke.xml"));
        // "bt" is a plain substring marker, so it also hits unrelated words.
        assert!(!filter.matches("config/mts-subtests-list.xml"));
    }

    #[test]
    fn exclusion_is_case_sensitive() {
        let filter = EntryFilter::default();
        assert!(filter.matches("config/Smoke-tests-list.xml"));
    }

    #[test]
    fn matched_marker_reports_first_hit() {
        let rule = ExclusionRule::new(["bluetooth", "bt"]);
        assert_eq!(rule.matched_marker("bluetooth/x.xml"), Some("bluetooth"));
        assert_eq!(rule.matched_marker("wifi/x.xml"), None);
    }
}

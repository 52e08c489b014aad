//! Integration tests for archive scanning

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;
    use suitecheck_archive::*;
    use suitecheck_errors::ArchiveError;
    use proptest::prelude::*;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    const MANIFEST: &str = r#"<configuration description="MTS tests list">
    <option name="compatibility:include-filter" value="CtsNetTestCases" />
</configuration>
"#;

    fn write_jar(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        for (name, data) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_manifests_in_archive_order() {
        let temp = tempdir().unwrap();
        let jar = temp.path().join("mts-tradefed.jar");
        write_jar(
            &jar,
            &[
                ("config/mts-tests-list-user.xml", MANIFEST.as_bytes()),
                ("com/android/Foo.class", b"\xca\xfe\xba\xbe"),
                ("config/mts-tests-list-eng.xml", MANIFEST.as_bytes()),
                ("config/mts.xml", MANIFEST.as_bytes()),
            ],
        );

        let filter = EntryFilter::default();
        let mut scanner = ArchiveScanner::open(&jar).unwrap();
        assert_eq!(scanner.len(), 4);

        let names: Vec<String> = scanner
            .manifests(&filter)
            .map(|m| m.unwrap().name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "config/mts-tests-list-user.xml".to_string(),
                "config/mts-tests-list-eng.xml".to_string(),
            ]
        );
    }

    #[test]
    fn test_excluded_entries_are_never_read() {
        let temp = tempdir().unwrap();
        let jar = temp.path().join("tools.jar");
        // An excluded entry with unreadable text must not abort the scan.
        write_jar(
            &jar,
            &[
                ("bluetooth/tests-list.xml", b"\xff\xfe not utf-8"),
                ("config/mts-smoke-tests-list.xml", MANIFEST.as_bytes()),
                ("config/mts-tests-list.xml", MANIFEST.as_bytes()),
            ],
        );

        let filter = EntryFilter::default();
        let mut scanner = ArchiveScanner::open(&jar).unwrap();
        let manifests: Vec<ManifestText> = scanner
            .manifests(&filter)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(manifests.len(), 1);
        assert_eq!(manifests[0].name(), "config/mts-tests-list.xml");
        assert_eq!(manifests[0].lines().count(), 3);
    }

    #[test]
    fn test_missing_archive_fails_to_open() {
        let temp = tempdir().unwrap();
        let err = ArchiveScanner::open(&temp.path().join("absent.jar")).unwrap_err();
        assert!(matches!(err, ArchiveError::OpenFailed { .. }));
    }

    #[test]
    fn test_non_zip_fails_to_open() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("fake.jar");
        std::fs::write(&path, b"definitely not a zip archive").unwrap();
        let err = ArchiveScanner::open(&path).unwrap_err();
        assert!(matches!(err, ArchiveError::OpenFailed { .. }));
    }

    #[test]
    fn test_non_utf8_manifest_aborts_scan() {
        let temp = tempdir().unwrap();
        let jar = temp.path().join("tools.jar");
        write_jar(
            &jar,
            &[
                ("config/a-tests-list.xml", b"\xff\xfe\xfd"),
                ("config/b-tests-list.xml", MANIFEST.as_bytes()),
            ],
        );

        let filter = EntryFilter::default();
        let mut scanner = ArchiveScanner::open(&jar).unwrap();
        let mut manifests = scanner.manifests(&filter);
        match manifests.next() {
            Some(Err(ArchiveError::EntryReadFailed { entry, .. })) => {
                assert_eq!(entry, "config/a-tests-list.xml");
            }
            other => panic!("expected entry read failure, got {other:?}"),
        }
        assert!(manifests.next().is_none());
    }

    #[test]
    fn test_corrupt_entry_fails_checksum() {
        let temp = tempdir().unwrap();
        let jar = temp.path().join("tools.jar");
        let payload = b"<option name=\"compatibility:include-filter\" value=\"CORRUPTED\" />";
        write_jar(&jar, &[("config/mts-tests-list.xml", payload)]);

        let mut bytes = std::fs::read(&jar).unwrap();
        let start = bytes
            .windows(payload.len())
            .position(|w| w == payload)
            .unwrap();
        let marker = start + payload.len() - 8;
        bytes[marker] = b'X';
        std::fs::write(&jar, &bytes).unwrap();

        let filter = EntryFilter::default();
        let mut scanner = ArchiveScanner::open(&jar).unwrap();
        let result: Result<Vec<ManifestText>, _> = scanner.manifests(&filter).collect();
        assert!(matches!(result, Err(ArchiveError::EntryReadFailed { .. })));
    }

    #[test]
    fn test_read_suite_info() {
        let temp = tempdir().unwrap();
        let jar = temp.path().join("mts-tradefed.jar");
        write_jar(
            &jar,
            &[(
                "test-suite-info.properties",
                b"name=MTS\nfullname=Mainline Test Suite\nversion=1.0\n",
            )],
        );

        let mut scanner = ArchiveScanner::open(&jar).unwrap();
        let info = SuiteInfo::read_from(&mut scanner).unwrap();
        assert_eq!(info.name, "MTS");
        assert_eq!(info.full_name, "Mainline Test Suite");
        assert_eq!(info.version.as_deref(), Some("1.0"));
    }

    #[test]
    fn test_suite_info_missing() {
        let temp = tempdir().unwrap();
        let jar = temp.path().join("mts-tradefed.jar");
        write_jar(&jar, &[("config/mts-tests-list.xml", MANIFEST.as_bytes())]);

        let mut scanner = ArchiveScanner::open(&jar).unwrap();
        let err = SuiteInfo::read_from(&mut scanner).unwrap_err();
        assert!(matches!(err, ArchiveError::EntryNotFound { .. }));
    }

    proptest! {
        #[test]
        fn prop_excluded_marker_anywhere_rejects_entry(
            prefix in "[a-z/]{0,8}",
            marker in prop::sample::select(vec!["bluetooth", "bt", "smoke"]),
            suffix in "[a-z/-]{0,8}",
        ) {
            let filter = EntryFilter::default();
            let name = format!("{prefix}{marker}{suffix}tests-list.xml");
            prop_assert!(filter.is_candidate(&name));
            prop_assert!(!filter.matches(&name));
        }

        #[test]
        fn prop_clean_candidates_are_selected(dir in "(config|suite)/[acdefg]{0,6}") {
            let filter = EntryFilter::default();
            let name = format!("{dir}-tests-list.xml");
            prop_assert!(filter.matches(&name));
        }
    }
}

//! Integration tests for suite verification

#[cfg(test)]
mod tests {
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::Path;
    use suitecheck_config::{Config, SuiteLayout};
    use suitecheck_errors::{ArchiveError, Error, VerifyError};
    use suitecheck_events::{channel, AppEvent, ScanEvent, VerifyEvent};
    use suitecheck_guard::*;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    const SUITE_INFO: &str = "name=MTS\nfullname=Mainline Test Suite\nversion=12.1\n";

    fn tests_list(modules: &[&str]) -> String {
        let mut text = String::from("<configuration description=\"MTS tests list\">\n");
        for module in modules {
            text.push_str(&format!(
                "    <option name=\"compatibility:include-filter\" value=\"{module}\" />\n"
            ));
        }
        text.push_str("</configuration>\n");
        text
    }

    struct Suite {
        _temp: TempDir,
        config: Config,
    }

    impl Suite {
        fn layout(&self) -> SuiteLayout {
            self.config.layout().unwrap()
        }

        fn verifier(&self) -> SuiteVerifier {
            SuiteVerifier::from_config(&self.config).unwrap()
        }
    }

    fn write_jar(path: &Path, entries: &[(&str, String)]) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut zip = ZipWriter::new(File::create(path).unwrap());
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        for (name, data) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    /// Lay out a suite with the given config files and archive entries
    fn suite(configs: &[&str], entries: &[(&str, String)]) -> Suite {
        let temp = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.suite.root = Some(temp.path().to_path_buf());
        let layout = config.layout().unwrap();

        fs::create_dir_all(&layout.testcases_dir).unwrap();
        for name in configs {
            fs::write(layout.testcases_dir.join(format!("{name}.config")), "<configuration />")
                .unwrap();
        }
        write_jar(&layout.archive_path, entries);

        Suite {
            _temp: temp,
            config,
        }
    }

    fn declaring(modules: &[&str]) -> Vec<(&'static str, String)> {
        vec![
            ("config/mts-tests-list-user.xml", tests_list(modules)),
            ("test-suite-info.properties", SUITE_INFO.to_string()),
        ]
    }

    #[test]
    fn test_declared_subset_passes() {
        let suite = suite(&["alpha", "beta"], &declaring(&["alpha"]));
        let report = suite.verifier().verify().unwrap();

        assert!(report.passed);
        assert_eq!(report.verdict(), "pass");
        assert_eq!(report.declared, 1);
        assert_eq!(report.configs, 2);
        assert!(report.missing.is_empty());
        assert_eq!(report.unreferenced.to_strings(), vec!["beta"]);
        assert_eq!(report.manifests, vec!["config/mts-tests-list-user.xml"]);
    }

    #[test]
    fn test_undeclared_config_reports_missing() {
        let suite = suite(&["alpha"], &declaring(&["alpha", "gamma"]));
        let verifier = suite.verifier();

        let report = verifier.verify().unwrap();
        assert!(!report.passed);
        assert_eq!(report.missing.to_strings(), vec!["gamma"]);

        let err = verifier.run().into_result().unwrap_err();
        assert!(matches!(
            err,
            Error::Verify(VerifyError::Mismatch { ref missing }) if missing == &["gamma".to_string()]
        ));
    }

    #[test]
    fn test_every_missing_module_is_listed() {
        let suite = suite(&["alpha"], &declaring(&["alpha", "gamma", "delta", "epsilon"]));
        match suite.verifier().run() {
            VerificationResult::Fail { missing } => {
                assert_eq!(missing.to_strings(), vec!["delta", "epsilon", "gamma"]);
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_excluded_manifest_never_contributes() {
        let suite = suite(
            &["alpha"],
            &[
                ("config/mts-tests-list-user.xml", tests_list(&["alpha"])),
                ("config/bluetooth/tests-list.xml", tests_list(&["BtOnly"])),
                ("config/mts-smoke-tests-list.xml", tests_list(&["SmokeOnly"])),
            ],
        );
        let report = suite.verifier().verify().unwrap();
        assert!(report.passed);
        assert_eq!(report.declared, 1);
        assert_eq!(report.manifests.len(), 1);
    }

    #[test]
    fn test_empty_config_set_fails_before_reconciliation() {
        let suite = suite(&[], &declaring(&["alpha"]));
        let verifier = suite.verifier();

        let err = verifier.verify().unwrap_err();
        assert!(matches!(
            err,
            Error::Verify(VerifyError::EmptyConfigSet { .. })
        ));
        assert!(matches!(verifier.run(), VerificationResult::Error { .. }));
    }

    #[test]
    fn test_empty_config_set_reported_even_without_archive() {
        let suite = suite(&[], &[]);
        fs::remove_file(suite.layout().archive_path).unwrap();

        let err = suite.verifier().verify().unwrap_err();
        assert!(matches!(
            err,
            Error::Verify(VerifyError::EmptyConfigSet { .. })
        ));
    }

    #[test]
    fn test_duplicate_declarations_collapse() {
        let suite = suite(
            &["alpha"],
            &[
                ("config/a-tests-list.xml", tests_list(&["alpha", "alpha"])),
                ("config/b-tests-list.xml", tests_list(&["alpha android.Foo#bar"])),
            ],
        );
        let report = suite.verifier().verify().unwrap();
        assert!(report.passed);
        assert_eq!(report.declared, 1);
        assert_eq!(report.manifests.len(), 2);
    }

    #[test]
    fn test_run_is_idempotent() {
        let suite = suite(&["alpha"], &declaring(&["alpha", "gamma"]));
        let verifier = suite.verifier();

        let first = verifier.verify().unwrap();
        let second = verifier.verify().unwrap();
        assert_eq!(first.missing, second.missing);
        assert_eq!(first.unreferenced, second.unreferenced);
        assert_eq!(first.passed, second.passed);
    }

    #[test]
    fn test_missing_testcases_directory() {
        let suite = suite(&["alpha"], &declaring(&["alpha"]));
        fs::remove_dir_all(suite.layout().testcases_dir).unwrap();

        let err = suite.verifier().verify().unwrap_err();
        assert!(matches!(
            err,
            Error::Verify(VerifyError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_archive() {
        let suite = suite(&["alpha"], &declaring(&["alpha"]));
        fs::remove_file(suite.layout().archive_path).unwrap();

        let err = suite.verifier().verify().unwrap_err();
        assert!(matches!(
            err,
            Error::Archive(ArchiveError::OpenFailed { .. })
        ));
    }

    #[test]
    fn test_empty_declared_set() {
        let suite = suite(
            &["alpha"],
            &[("config/mts-tests-list-user.xml", tests_list(&[]))],
        );
        let err = suite.verifier().verify().unwrap_err();
        assert!(matches!(
            err,
            Error::Verify(VerifyError::EmptyDeclaredSet { .. })
        ));
    }

    #[test]
    fn test_malformed_declaration_fails_the_run() {
        let suite = suite(
            &["alpha"],
            &declaring(&["alpha", "gamma\tandroid.Foo#bar", " delta"]),
        );
        let verifier = suite.verifier();

        let err = verifier.verify().unwrap_err();
        assert!(matches!(
            err,
            Error::Verify(VerifyError::InvalidModuleId { ref value }) if value == "gamma\tandroid.Foo#bar"
        ));
        assert!(matches!(verifier.run(), VerificationResult::Error { .. }));
    }

    #[test]
    fn test_suite_info_matches() {
        let suite = suite(&["alpha"], &declaring(&["alpha"]));
        let info = suite.verifier().check_suite_info().unwrap();
        assert_eq!(info.name, "MTS");
        assert_eq!(info.full_name, "Mainline Test Suite");
        assert_eq!(info.version.as_deref(), Some("12.1"));
    }

    #[test]
    fn test_suite_info_mismatch() {
        let suite = suite(
            &["alpha"],
            &[(
                "test-suite-info.properties",
                "name=CTS\nfullname=Compatibility Test Suite\n".to_string(),
            )],
        );
        let err = suite.verifier().check_suite_info().unwrap_err();
        match err {
            Error::Verify(VerifyError::SuiteInfoMismatch {
                field,
                expected,
                actual,
            }) => {
                assert_eq!(field, "name");
                assert_eq!(expected, "MTS");
                assert_eq!(actual, "CTS");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_list_modules_skips_preconditions() {
        let suite = suite(&[], &declaring(&["alpha"]));
        let listing = suite.verifier().list_modules().unwrap();
        assert!(listing.configs.is_empty());
        assert_eq!(listing.declared.to_strings(), vec!["alpha"]);
    }

    #[tokio::test]
    async fn test_events_are_emitted() {
        let suite = suite(&["alpha"], &declaring(&["alpha", "gamma"]));
        let (tx, mut rx) = channel();
        let verifier = suite.verifier().with_event_sender(tx);

        let report = tokio::task::spawn_blocking(move || verifier.verify())
            .await
            .unwrap()
            .unwrap();
        assert!(!report.passed);

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert!(events.iter().any(|e| matches!(
            e,
            AppEvent::Verify(VerifyEvent::ConfigsCollected { configs: 1, .. })
        )));
        assert!(events.iter().any(|e| matches!(
            e,
            AppEvent::Scan(ScanEvent::Completed {
                manifests: 1,
                declared: 2
            })
        )));
        assert!(events.iter().any(|e| matches!(
            e,
            AppEvent::Verify(VerifyEvent::Failed { missing }) if missing == &["gamma".to_string()]
        )));
    }

    #[test]
    fn test_verifier_without_root() {
        let config = Config::default();
        let err = SuiteVerifier::from_config(&config).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }
}

use std::time::Instant;

use suitecheck_archive::{ArchiveScanner, EntryFilter, SuiteInfo};
use suitecheck_config::{Config, ScanConfig, SuiteLayout};
use suitecheck_errors::{Error, VerifyError};
use suitecheck_events::{AppEvent, EventEmitter, EventSender, FailureContext, VerifyEvent};
use suitecheck_manifest::IncludeFilterExtractor;
use suitecheck_types::{ConfigModuleSet, ModuleSet};

use crate::declared::{collect_declared_modules, DeclaredScan};
use crate::reconcile::{reconcile, VerificationResult};
use crate::testcases::collect_config_modules;
use crate::types::{ModuleListing, VerificationReport};

/// Suite name and full name the tool archive must carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedSuite {
    pub name: String,
    pub full_name: String,
}

/// Cross-checks a suite's declared modules against its packaged configs.
///
/// Every run is sequential and blocking; callers on an async runtime should
/// move it onto a blocking task.
pub struct SuiteVerifier {
    layout: SuiteLayout,
    filter: EntryFilter,
    extractor: IncludeFilterExtractor,
    config_suffix: String,
    expected: Option<ExpectedSuite>,
    tx: Option<EventSender>,
}

impl EventEmitter for SuiteVerifier {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }
}

impl SuiteVerifier {
    /// Create a verifier for `layout` using the given scan rules
    ///
    /// # Errors
    ///
    /// Returns an error if the include-filter pattern fails to compile.
    pub fn new(layout: SuiteLayout, scan: &ScanConfig) -> Result<Self, Error> {
        Ok(Self {
            layout,
            filter: EntryFilter::from_scan_config(scan),
            extractor: IncludeFilterExtractor::from_scan_config(scan)?,
            config_suffix: scan.config_suffix.clone(),
            expected: None,
            tx: None,
        })
    }

    /// Create a verifier from a fully merged configuration
    ///
    /// The expected suite metadata is taken from the `[suite]` section.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if no suite root is configured.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let verifier = Self::new(config.layout()?, &config.scan)?;
        Ok(verifier.with_expected_suite(ExpectedSuite {
            name: config.suite.expected_name.clone(),
            full_name: config.suite.expected_full_name.clone(),
        }))
    }

    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    #[must_use]
    pub fn with_expected_suite(mut self, expected: ExpectedSuite) -> Self {
        self.expected = Some(expected);
        self
    }

    #[must_use]
    pub fn layout(&self) -> &SuiteLayout {
        &self.layout
    }

    /// Run the full check and summarize it
    ///
    /// A mismatch is not an error here: the report carries `passed = false`
    /// together with every missing module.
    ///
    /// # Errors
    ///
    /// Fails before reconciliation if the testcases directory is missing or
    /// holds no configs, if the archive cannot be opened or read, or if it
    /// declares no modules.
    pub fn verify(&self) -> Result<VerificationReport, Error> {
        let start = Instant::now();
        self.emit_operation_started("verify");

        let (scan, configs) = match self.collect_sets() {
            Ok(sets) => sets,
            Err(e) => {
                self.emit_operation_failed("verify", FailureContext::from_error(&e));
                return Err(e);
            }
        };

        let missing = match reconcile(&scan.modules, &configs) {
            VerificationResult::Fail { missing } => missing,
            VerificationResult::Pass | VerificationResult::Error { .. } => ModuleSet::new(),
        };
        let unreferenced = configs.difference(&scan.modules);
        let passed = missing.is_empty();

        if passed {
            self.emit(AppEvent::Verify(VerifyEvent::Passed {
                declared: scan.modules.len(),
                configs: configs.len(),
            }));
        } else {
            tracing::warn!(missing = missing.len(), "declared modules without configs");
            self.emit(AppEvent::Verify(VerifyEvent::Failed {
                missing: missing.to_strings(),
            }));
        }
        if !unreferenced.is_empty() {
            tracing::info!(
                unreferenced = unreferenced.len(),
                "config modules not declared by any tests-list"
            );
            self.emit(AppEvent::Verify(VerifyEvent::Unreferenced {
                modules: unreferenced.to_strings(),
            }));
        }
        self.emit_operation_completed("verify", passed);

        Ok(VerificationReport {
            suite_dir: self.layout.suite_dir.clone(),
            archive: self.layout.archive_path.clone(),
            manifests: scan.manifests,
            declared: scan.modules.len(),
            configs: configs.len(),
            missing,
            unreferenced,
            passed,
            duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        })
    }

    /// Run the check and return only its tri-state outcome
    #[must_use]
    pub fn run(&self) -> VerificationResult {
        match self.collect_sets() {
            Ok((scan, configs)) => reconcile(&scan.modules, &configs),
            Err(e) => e.into(),
        }
    }

    /// Read the suite metadata and compare it against the expected values
    ///
    /// Without expectations the metadata is returned unchecked.
    ///
    /// # Errors
    ///
    /// Returns an archive error if the metadata entry is missing or invalid,
    /// or `VerifyError::SuiteInfoMismatch` on the first differing field.
    pub fn check_suite_info(&self) -> Result<SuiteInfo, Error> {
        let mut scanner = ArchiveScanner::open(&self.layout.archive_path)?;
        let info = SuiteInfo::read_from(&mut scanner)?;
        drop(scanner);

        if let Some(expected) = &self.expected {
            let checks = [
                ("name", &expected.name, &info.name),
                ("fullname", &expected.full_name, &info.full_name),
            ];
            for (field, expected, actual) in checks {
                if expected != actual {
                    return Err(VerifyError::SuiteInfoMismatch {
                        field: field.to_string(),
                        expected: expected.clone(),
                        actual: actual.clone(),
                    }
                    .into());
                }
            }
            self.emit(AppEvent::Verify(VerifyEvent::SuiteInfoChecked {
                name: info.name.clone(),
                full_name: info.full_name.clone(),
            }));
        }
        Ok(info)
    }

    /// Collect both module sets without any precondition or reconciliation
    ///
    /// # Errors
    ///
    /// Returns an error if the testcases directory or the archive cannot be
    /// read.
    pub fn list_modules(&self) -> Result<ModuleListing, Error> {
        let configs = collect_config_modules(&self.layout.testcases_dir, &self.config_suffix)?;
        let scan = collect_declared_modules(
            &self.layout.archive_path,
            &self.filter,
            &self.extractor,
            self,
        )?;
        Ok(ModuleListing {
            declared: scan.modules,
            configs,
        })
    }

    fn collect_sets(&self) -> Result<(DeclaredScan, ConfigModuleSet), Error> {
        let testcases = &self.layout.testcases_dir;
        let configs = collect_config_modules(testcases, &self.config_suffix)?;
        self.emit(AppEvent::Verify(VerifyEvent::ConfigsCollected {
            directory: testcases.clone(),
            configs: configs.len(),
        }));
        if configs.is_empty() {
            return Err(VerifyError::EmptyConfigSet {
                path: testcases.clone(),
            }
            .into());
        }

        let scan = collect_declared_modules(
            &self.layout.archive_path,
            &self.filter,
            &self.extractor,
            self,
        )?;
        if scan.modules.is_empty() {
            return Err(VerifyError::EmptyDeclaredSet {
                archive: self.layout.archive_path.clone(),
            }
            .into());
        }

        tracing::debug!(
            declared = scan.modules.len(),
            configs = configs.len(),
            manifests = scan.manifests.len(),
            "module sets collected"
        );
        Ok((scan, configs))
    }
}

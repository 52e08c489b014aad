//! Event handling and status display

use console::Style;
use suitecheck_events::{AppEvent, GeneralEvent, ScanEvent, VerifyEvent};

/// Turns library events into log records and, in debug mode, status lines
pub struct EventHandler {
    colors_enabled: bool,
    debug_enabled: bool,
    /// Events seen, for the final summary line
    handled: usize,
}

impl EventHandler {
    pub fn new(colors_enabled: bool, debug_enabled: bool) -> Self {
        Self {
            colors_enabled,
            debug_enabled,
            handled: 0,
        }
    }

    pub fn handled(&self) -> usize {
        self.handled
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, event: AppEvent) {
        self.handled += 1;
        match event {
            AppEvent::General(event) => self.handle_general(event),
            AppEvent::Scan(event) => self.handle_scan(event),
            AppEvent::Verify(event) => self.handle_verify(event),
        }
    }

    fn handle_general(&self, event: GeneralEvent) {
        match event {
            GeneralEvent::OperationStarted { operation } => {
                tracing::info!(operation = %operation, "operation started");
                self.show_status(&format!("Starting {operation}"));
            }
            GeneralEvent::OperationCompleted { operation, success } => {
                tracing::info!(operation = %operation, success, "operation completed");
            }
            GeneralEvent::OperationFailed { operation, failure } => {
                tracing::error!(
                    operation = %operation,
                    code = failure.code.as_deref().unwrap_or("-"),
                    "{}",
                    failure.message
                );
            }
        }
    }

    fn handle_scan(&self, event: ScanEvent) {
        match event {
            ScanEvent::ArchiveOpened { archive, entries } => {
                tracing::debug!(archive = %archive.display(), entries, "archive opened");
                self.show_status(&format!(
                    "Scanning {} ({entries} entries)",
                    archive.display()
                ));
            }
            ScanEvent::ManifestScanned {
                entry,
                marker_lines,
                extracted,
            } => {
                tracing::debug!(entry = %entry, marker_lines, extracted, "manifest scanned");
                self.show_status(&format!("  {entry}: {extracted} declaration(s)"));
            }
            ScanEvent::Completed {
                manifests,
                declared,
            } => {
                tracing::info!(manifests, declared, "archive scan completed");
            }
        }
    }

    fn handle_verify(&self, event: VerifyEvent) {
        match event {
            VerifyEvent::ConfigsCollected { directory, configs } => {
                tracing::debug!(directory = %directory.display(), configs, "configs collected");
                self.show_status(&format!(
                    "Found {configs} module config(s) in {}",
                    directory.display()
                ));
            }
            VerifyEvent::Passed { declared, configs } => {
                tracing::info!(declared, configs, "all declared modules have configs");
            }
            VerifyEvent::Failed { missing } => {
                tracing::warn!(missing = missing.len(), "declared modules without configs");
                self.show_warning(&format!("Missing configs: {}", missing.join(", ")));
            }
            VerifyEvent::Unreferenced { modules } => {
                tracing::debug!(count = modules.len(), "configs without declarations");
            }
            VerifyEvent::SuiteInfoChecked { name, full_name } => {
                tracing::info!(name = %name, full_name = %full_name, "suite info matches");
            }
        }
    }

    fn show_status(&self, message: &str) {
        if self.debug_enabled {
            eprintln!("{}", self.style(Style::new().dim()).apply_to(message));
        }
    }

    fn show_warning(&self, message: &str) {
        if self.debug_enabled {
            eprintln!("{}", self.style(Style::new().yellow()).apply_to(message));
        }
    }

    fn style(&self, style: Style) -> Style {
        if self.colors_enabled {
            style.force_styling(true)
        } else {
            Style::new()
        }
    }
}

//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::{Style, Term};
use serde::Serialize;
use std::io;
use suitecheck_archive::SuiteInfo;
use suitecheck_config::SuiteLayout;
use suitecheck_guard::{ModuleListing, VerificationReport};
use suitecheck_types::{ColorChoice, ModuleSet};

/// Result of one CLI command, ready to render
#[derive(Debug, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandOutput {
    Verify(VerificationReport),
    Info { layout: SuiteLayout, info: SuiteInfo },
    Modules(ModuleListing),
}

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
    /// Color configuration
    color_choice: ColorChoice,
    /// Terminal instance
    term: Term,
}

impl OutputRenderer {
    pub fn new(json_output: bool, color_choice: ColorChoice) -> Self {
        Self {
            json_output,
            color_choice,
            term: Term::stdout(),
        }
    }

    /// Render command output
    pub fn render(&self, output: &CommandOutput) -> io::Result<()> {
        if self.json_output {
            let json = serde_json::to_string_pretty(output).map_err(io::Error::other)?;
            println!("{json}");
            return Ok(());
        }

        match output {
            CommandOutput::Verify(report) => self.render_report(report),
            CommandOutput::Info { layout, info } => self.render_info(layout, info),
            CommandOutput::Modules(listing) => self.render_listing(listing),
        }
    }

    /// Render a fatal error as a JSON object on stdout
    pub fn render_json_error(code: &str, message: &str) -> io::Result<()> {
        let value = serde_json::json!({ "error": { "code": code, "message": message } });
        let json = serde_json::to_string_pretty(&value).map_err(io::Error::other)?;
        println!("{json}");
        Ok(())
    }

    fn render_report(&self, report: &VerificationReport) -> io::Result<()> {
        println!("Suite:     {}", report.suite_dir.display());
        println!("Archive:   {}", report.archive.display());
        println!("Manifests: {}", report.manifests.len());
        for manifest in &report.manifests {
            println!("  • {manifest}");
        }
        println!("Declared:  {}", report.declared);
        println!("Configs:   {}", report.configs);
        println!();

        if report.passed {
            println!(
                "{}",
                self.style(Style::new().green().bold())
                    .apply_to("[OK] Every declared module has a config.")
            );
        } else {
            println!(
                "{}",
                self.style(Style::new().red().bold()).apply_to(format!(
                    "[FAIL] {} declared module(s) without a config:",
                    report.missing.len()
                ))
            );
            println!("{}", self.module_table(&report.missing, "Missing", Color::Red));
        }

        if !report.unreferenced.is_empty() {
            println!();
            println!(
                "{} config module(s) not declared by any tests-list:",
                report.unreferenced.len()
            );
            for module in &report.unreferenced {
                println!("  • {module}");
            }
        }

        println!();
        println!("Completed in {}ms", report.duration_ms);
        Ok(())
    }

    fn render_info(&self, layout: &SuiteLayout, info: &SuiteInfo) -> io::Result<()> {
        println!("{}", self.style(Style::new().bold()).apply_to(&info.full_name));
        println!();
        println!("Name:      {}", info.name);
        println!("Version:   {}", info.version.as_deref().unwrap_or("-"));
        println!("Build:     {}", info.build_number.as_deref().unwrap_or("-"));
        println!("Arch:      {}", info.target_arch.as_deref().unwrap_or("-"));
        println!("Suite:     {}", layout.suite_dir.display());
        println!("Archive:   {}", layout.archive_path.display());
        Ok(())
    }

    fn render_listing(&self, listing: &ModuleListing) -> io::Result<()> {
        let modules: ModuleSet = listing
            .declared
            .iter()
            .chain(listing.configs.iter())
            .cloned()
            .collect();
        if modules.is_empty() {
            println!("No modules found.");
            return Ok(());
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Module").add_attribute(Attribute::Bold),
            Cell::new("Declared").add_attribute(Attribute::Bold),
            Cell::new("Config").add_attribute(Attribute::Bold),
        ]);

        for module in &modules {
            table.add_row(vec![
                Cell::new(module),
                self.presence_cell(listing.declared.contains(module)),
                self.presence_cell(listing.configs.contains(module)),
            ]);
        }

        println!("{table}");
        println!(
            "{} declared, {} config(s)",
            listing.declared.len(),
            listing.configs.len()
        );
        Ok(())
    }

    fn module_table(&self, modules: &ModuleSet, header: &str, color: Color) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![Cell::new(header).add_attribute(Attribute::Bold)]);
        for module in modules {
            let cell = Cell::new(module);
            table.add_row(vec![if self.colors_enabled() {
                cell.fg(color)
            } else {
                cell
            }]);
        }
        table
    }

    fn presence_cell(&self, present: bool) -> Cell {
        match (present, self.colors_enabled()) {
            (true, true) => Cell::new("Yes").fg(Color::Green),
            (false, true) => Cell::new("No").fg(Color::Yellow),
            (true, false) => Cell::new("Yes"),
            (false, false) => Cell::new("No"),
        }
    }

    fn style(&self, style: Style) -> Style {
        if self.colors_enabled() {
            style.force_styling(true)
        } else {
            Style::new()
        }
    }

    fn colors_enabled(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.term.features().colors_supported(),
        }
    }
}

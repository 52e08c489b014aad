//! Command line interface definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use suitecheck_types::ColorChoice;

/// suitecheck - Consistency checker for compiled test suite distributions
#[derive(Parser)]
#[command(name = "suitecheck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Consistency checker for compiled test suite distributions")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Directory containing the unpacked suite (overrides MTS_ROOT)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Check that every declared module has a packaged config
    #[command(alias = "v")]
    Verify,

    /// Show and check the suite metadata packaged in the tool archive
    Info,

    /// List declared and config module identifiers
    #[command(alias = "ls")]
    Modules,
}

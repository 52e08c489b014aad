//! Fixed names shared by the suite layout and the archive contracts
//!
//! These describe the packaged suite format and are not exposed via TOML.

/// Environment variable naming the root of an unpacked suite.
pub const ROOT_ENV_VAR: &str = "MTS_ROOT";

/// Entry inside the tool archive holding suite metadata.
pub const SUITE_INFO_ENTRY: &str = "test-suite-info.properties";

pub const OUTPUT_ENV_VAR: &str = "SUITECHECK_OUTPUT";
pub const COLOR_ENV_VAR: &str = "SUITECHECK_COLOR";

pub const CONFIG_DIR_NAME: &str = "suitecheck";
pub const CONFIG_FILE_NAME: &str = "config.toml";

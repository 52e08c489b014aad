#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Tool archive scanning for suitecheck
//!
//! This crate opens the suite's packaged tool archive (a jar, i.e. a zip),
//! selects the tests-list manifests packaged inside it, and reads the suite
//! metadata properties. Archive and entry handles are owned values, so they
//! are released on every exit path when they go out of scope.

mod filter;
mod scanner;
mod suite_info;

pub use filter::{EntryFilter, ExclusionRule};
pub use scanner::{ArchiveScanner, ManifestText, Manifests};
pub use suite_info::SuiteInfo;

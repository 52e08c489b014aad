#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Suite consistency guard
//!
//! Builds the set of modules the tool archive declares and the set of
//! module configs the suite packages, then reports declared modules that
//! have no config.

mod declared;
mod reconcile;
mod testcases;
mod types;
mod verifier;

pub use declared::{collect_declared_modules, DeclaredScan};
pub use reconcile::{reconcile, VerificationResult};
pub use testcases::collect_config_modules;
pub use types::{ModuleListing, VerificationReport};
pub use verifier::{ExpectedSuite, SuiteVerifier};

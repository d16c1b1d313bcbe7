//! Podspec fragment merger.
//!
//! Builds one CocoaPods podspec JSON out of a base podspec plus many small
//! fragment files spread across a source tree. Each fragment names the subspec
//! it describes and the dash-joined path of its ancestors; the merger creates
//! missing branches, merges repeated subspecs field by field, and writes a
//! deterministic result regardless of filesystem order.

pub mod error;
pub mod merge;
pub mod podspec;
pub mod render;
pub mod run;
pub mod scan;

pub use error::{MergeError, Result};
pub use merge::MergeWarning;
pub use podspec::{Fragment, Manifest, Subspec};
pub use run::{MergeOptions, MergeReport, ModuleFilter, merge_in_memory, run};

//! One merge run: base manifest + fragment tree -> merged podspec.
//!
//! Stages:
//! 1) load the base manifest (needs a top-level `subspecs` array)
//! 2) for each fragment file, in sorted path order:
//!    filter by module -> validate -> resolve parent path -> merge or attach
//! 3) write the result atomically
//!
//! Any fatal error stops the run before step 3, so a failed run never leaves
//! a partial output file behind.

use crate::error::Result;
use crate::merge::{self, MergeWarning};
use crate::podspec::{self, DEPENDENCIES, Fragment, MERGE_FIELDS, Manifest, Subspec};
use crate::{render, scan};

use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Keep only fragments tagged with one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFilter {
    module: String,
}

impl ModuleFilter {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
        }
    }

    /// True when `module` is one of the dash-separated tags of `value`'s
    /// `module_name`. Fragments without `module_name` never match.
    pub fn accepts(&self, value: &Value) -> bool {
        podspec::fragment::module_tags(value).is_some_and(|mut tags| tags.any(|t| t == self.module))
    }
}

#[derive(Debug, Clone)]
pub struct MergeOptions {
    pub base: PathBuf,
    pub root: PathBuf,
    pub output: PathBuf,
    /// `None` merges every fragment.
    pub filter: Option<ModuleFilter>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeReport {
    /// `name` of the base manifest, if it has one.
    pub podspec: Option<String>,
    pub fragments_seen: usize,
    pub fragments_skipped: usize,
    /// Fragments merged into a subspec that already existed.
    pub nodes_merged: usize,
    /// Fragments appended as new subspecs.
    pub nodes_attached: usize,
    pub warnings: Vec<MergeWarning>,
}

/// Run a full merge and write `options.output`.
pub fn run(options: &MergeOptions) -> Result<MergeReport> {
    let (manifest, report) = merge_in_memory(&options.base, &options.root, options.filter.as_ref())?;
    render::write_manifest(&options.output, &manifest)?;
    Ok(report)
}

/// Merge fragment files into `manifest` in the order given.
///
/// Stops at the first fatal error; `manifest` is then partially merged and
/// should be dropped.
pub fn merge_files(
    manifest: &mut Manifest,
    files: &[PathBuf],
    filter: Option<&ModuleFilter>,
) -> Result<MergeReport> {
    let mut report = MergeReport::default();
    for path in files {
        report.fragments_seen += 1;
        let value = podspec::read_json(path)?;

        if let Some(filter) = filter {
            if !filter.accepts(&value) {
                debug!(path = %path.display(), "skipped by module filter");
                report.fragments_skipped += 1;
                continue;
            }
        }

        let fragment = Fragment::from_json(path, value)?;
        apply_fragment(manifest, fragment, &mut report);
    }
    Ok(report)
}

/// Place one validated fragment in the tree and merge it.
pub fn apply_fragment(manifest: &mut Manifest, fragment: Fragment, report: &mut MergeReport) {
    let Fragment {
        source,
        parent_path,
        mut body,
        ..
    } = fragment;
    body.normalize_tree();

    let names = merge::resolve_path(&parent_path);
    let level = merge::locate(manifest.subspecs_mut(), &names);

    match level.iter().position(|s| s.name() == body.name()) {
        Some(idx) => {
            debug!(path = %source.display(), name = body.name(), %parent_path, "merging into existing subspec");
            report.warnings.extend(merge_node(&mut level[idx], &body));
            report.nodes_merged += 1;
        }
        None => {
            debug!(path = %source.display(), name = body.name(), %parent_path, "attaching new subspec");
            body.sort_merge_fields();
            level.push(body);
            report.nodes_attached += 1;
        }
    }
}

/// Merge the eleven merge fields of `incoming` into `existing`.
/// Other attributes of `incoming` are ignored.
pub fn merge_node(existing: &mut Subspec, incoming: &Subspec) -> Vec<MergeWarning> {
    let mut warnings = Vec::new();
    for key in MERGE_FIELDS {
        let Some(value) = incoming.field(key) else {
            continue;
        };
        let outcome = if key == DEPENDENCIES {
            merge::merge_dependencies(existing, value)
        } else {
            merge::merge_field(existing, key, value)
        };
        if let Err(warning) = outcome {
            warnings.push(warning);
        }
    }
    warnings
}

/// Merge without writing, for callers that render the result themselves.
pub fn merge_in_memory(base: &Path, root: &Path, filter: Option<&ModuleFilter>) -> Result<(Manifest, MergeReport)> {
    let mut manifest = Manifest::load(base)?;
    let files = scan::fragment_files(root)?;
    debug!(count = files.len(), root = %root.display(), "found fragment files");
    let mut report = merge_files(&mut manifest, &files, filter)?;
    report.podspec = manifest.name().map(str::to_owned);
    Ok((manifest, report))
}

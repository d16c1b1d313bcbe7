//! Podspec layer: the manifest tree, fragments, and field values.
//!
//! This module only knows how to read and hold podspec JSON. Placement and
//! merging live in [`crate::merge`].

pub mod fragment;
pub mod node;
pub mod value;

pub use fragment::{Fragment, MODULE_NAME, PARENT_PATH};
pub use node::{Manifest, Subspec};
pub use value::{DEPENDENCIES, DependencyMap, FieldValue, MERGE_FIELDS, ValueKind};

use crate::error::{MergeError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read a JSON document, keeping object key order.
pub fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).map_err(|source| MergeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| MergeError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

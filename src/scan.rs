//! Fragment discovery.

use crate::error::{MergeError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Every `.json` file under `root`, sorted by full path so the merge order
/// does not depend on the filesystem.
pub fn fragment_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| MergeError::Walk {
            path: source.path().unwrap_or(root).to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

//! Fatal errors for a merge run.
//!
//! Anything in here aborts the run before the output file is touched.
//! Recoverable merge conflicts are not errors; see [`crate::merge::MergeWarning`].

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergeError {
    /// The base manifest is not shaped like a podspec tree.
    #[error("manifest format error in {}: {reason}", .path.display())]
    ManifestFormat { path: PathBuf, reason: String },

    /// A fragment lacks `name`/`parent_path` or is not a JSON object.
    #[error("fragment format error in {}: {reason}", .path.display())]
    FragmentFormat { path: PathBuf, reason: String },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to scan {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MergeError {
    pub(crate) fn manifest(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ManifestFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn fragment(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FragmentFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for the two schema errors; false for I/O and parse failures.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::ManifestFormat { .. } | Self::FragmentFormat { .. })
    }
}

pub type Result<T> = std::result::Result<T, MergeError>;

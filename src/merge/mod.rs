//! Placement and merge rules.
//!
//! - `path`: parent path -> descendant names
//! - `tree`: descendant names -> child list (created on demand)
//! - `field`: string/list union for the plain merge fields
//! - `deps`: dependency list normalization and mapping union

pub mod deps;
pub mod field;
pub mod path;
pub mod tree;
pub mod warning;

pub use deps::{merge_dependencies, merge_dependency_maps, normalize};
pub use field::merge_field;
pub use path::resolve_path;
pub use tree::locate;
pub use warning::MergeWarning;

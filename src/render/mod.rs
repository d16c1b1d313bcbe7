//! Output rendering.

pub mod json;

pub use json::{PodspecFormatter, render_manifest, write_manifest};

//! Fragment files: one small JSON object naming where it belongs in the tree.
//!
//! JSON shape:
//! {
//!   "name": "Sub",                  // subspec to create or merge into
//!   "parent_path": "root-Core",     // dash-joined ancestors, first segment ignored
//!   "module_name": "ios-arm64",     // optional, dash-joined module tags
//!   "source_files": ["a.m"],        // any merge field, string or list
//!   "dependencies": ["Foo/Core"]
//! }

use crate::error::{MergeError, Result};
use crate::podspec::node::{NAME, Subspec};

use serde_json::Value;
use std::path::{Path, PathBuf};

pub const PARENT_PATH: &str = "parent_path";
pub const MODULE_NAME: &str = "module_name";

#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub source: PathBuf,
    pub parent_path: String,
    pub module_name: Option<String>,
    /// The node contributed by this fragment, without the addressing keys.
    pub body: Subspec,
}

impl Fragment {
    /// Validate a parsed fragment. `parent_path` is checked before `name`.
    pub fn from_json(source: &Path, value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(MergeError::fragment(source, "fragment must be a JSON object"));
        };

        let module_name = match map.shift_remove(MODULE_NAME) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(_) => return Err(MergeError::fragment(source, "`module_name` must be a string")),
        };
        let parent_path = match map.shift_remove(PARENT_PATH) {
            Some(Value::String(s)) => s,
            Some(_) => return Err(MergeError::fragment(source, "`parent_path` must be a string")),
            None => return Err(MergeError::fragment(source, "can not find `parent_path`")),
        };
        match map.get(NAME) {
            Some(Value::String(_)) => {}
            Some(_) => return Err(MergeError::fragment(source, "`name` must be a string")),
            None => return Err(MergeError::fragment(source, "can not find `name`")),
        }

        let body = Subspec::from_map(map).map_err(|reason| MergeError::fragment(source, reason))?;
        Ok(Self {
            source: source.to_path_buf(),
            parent_path,
            module_name,
            body,
        })
    }

    pub fn name(&self) -> &str {
        self.body.name()
    }
}

/// Module tags of an unvalidated fragment, for filtering before validation.
pub fn module_tags(value: &Value) -> Option<impl Iterator<Item = &str>> {
    value
        .get(MODULE_NAME)
        .and_then(Value::as_str)
        .map(|m| m.split('-'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::podspec::value::FieldValue;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse(v: Value) -> Result<Fragment> {
        Fragment::from_json(Path::new("frag.json"), v)
    }

    #[test]
    fn strips_addressing_keys() {
        let f = parse(json!({
            "module_name": "ios",
            "name": "Core",
            "parent_path": "root",
            "source_files": ["b.m", "a.m"]
        }))
        .unwrap();
        assert_eq!(f.parent_path, "root");
        assert_eq!(f.module_name.as_deref(), Some("ios"));
        assert_eq!(f.name(), "Core");
        assert_eq!(
            serde_json::to_value(&f.body).unwrap(),
            json!({"name": "Core", "source_files": ["b.m", "a.m"]})
        );
        assert_eq!(
            f.body.field("source_files"),
            Some(&FieldValue::List(vec!["b.m".into(), "a.m".into()]))
        );
    }

    #[test]
    fn missing_parent_path_is_fatal() {
        let err = parse(json!({"name": "Core"})).unwrap_err();
        assert!(matches!(err, MergeError::FragmentFormat { .. }));
        assert!(err.to_string().contains("parent_path"), "{}", err);
    }

    #[test]
    fn missing_name_is_fatal() {
        let err = parse(json!({"parent_path": "root"})).unwrap_err();
        assert!(err.to_string().contains("`name`"), "{}", err);

        let err = parse(json!({"parent_path": "root", "name": null})).unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn parent_path_checked_first() {
        let err = parse(json!({"source_files": "a.m"})).unwrap_err();
        assert!(err.to_string().contains("parent_path"), "{}", err);
    }

    #[test]
    fn non_object_rejected() {
        assert!(parse(json!(["name"])).unwrap_err().is_format_error());
    }

    #[test]
    fn reads_module_tags() {
        let v = json!({"module_name": "ios-arm64"});
        let tags: Vec<&str> = module_tags(&v).unwrap().collect();
        assert_eq!(tags, vec!["ios", "arm64"]);
        assert!(module_tags(&json!({"name": "x"})).is_none());
    }
}

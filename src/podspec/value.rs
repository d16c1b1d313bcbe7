//! Field values as they appear on a subspec.
//!
//! Podspec attributes are loosely typed: `source_files` may be a single glob or
//! a list of globs, `dependencies` is a mapping, `pod_target_xcconfig` is a
//! mapping of build settings. We keep the shapes the merger understands as
//! explicit variants and carry everything else through untouched.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Dependency name -> version requirements (empty in practice).
pub type DependencyMap = IndexMap<String, Vec<String>>;

pub const DEPENDENCIES: &str = "dependencies";

/// Attributes that fragments may contribute to an existing subspec.
pub const MERGE_FIELDS: [&str; 11] = [
    "compiler_flags",
    DEPENDENCIES,
    "exclude_files",
    "frameworks",
    "header_mappings_dir",
    "libraries",
    "pod_target_xcconfig",
    "preserve_paths",
    "private_header_files",
    "public_header_files",
    "source_files",
];

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
    Dependencies(DependencyMap),
    /// Any other JSON shape; never merged, only carried.
    Other(Value),
}

/// Coarse shape of a value, used in merge diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Scalar,
    List,
    Mapping,
    Other,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Scalar => "string",
            ValueKind::List => "list",
            ValueKind::Mapping => "mapping",
            ValueKind::Other => "other",
        })
    }
}

impl FieldValue {
    /// Classify a JSON value stored under `key`.
    ///
    /// Only `dependencies` is ever read as a mapping; a mapping under any other
    /// key stays [`FieldValue::Other`].
    pub fn from_json(key: &str, value: Value) -> Self {
        match value {
            Value::String(s) => FieldValue::Scalar(s),
            Value::Array(items) => match string_items(&items) {
                Some(list) => FieldValue::List(list),
                None => FieldValue::Other(Value::Array(items)),
            },
            Value::Object(map) if key == DEPENDENCIES => {
                let deps: Option<DependencyMap> = map
                    .iter()
                    .map(|(name, reqs)| match reqs {
                        Value::Array(items) => string_items(items).map(|r| (name.clone(), r)),
                        _ => None,
                    })
                    .collect();
                match deps {
                    Some(deps) => FieldValue::Dependencies(deps),
                    None => FieldValue::Other(Value::Object(map)),
                }
            }
            other => FieldValue::Other(other),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Scalar(_) => ValueKind::Scalar,
            FieldValue::List(_) => ValueKind::List,
            FieldValue::Dependencies(_) | FieldValue::Other(Value::Object(_)) => ValueKind::Mapping,
            FieldValue::Other(_) => ValueKind::Other,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Scalar(s) => serializer.serialize_str(s),
            FieldValue::List(items) => items.serialize(serializer),
            FieldValue::Dependencies(deps) => deps.serialize(serializer),
            FieldValue::Other(value) => value.serialize(serializer),
        }
    }
}

fn string_items(items: &[Value]) -> Option<Vec<String>> {
    items
        .iter()
        .map(|v| v.as_str().map(str::to_owned))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn classifies_scalar_and_list() {
        assert_eq!(
            FieldValue::from_json("source_files", json!("a.m")),
            FieldValue::Scalar("a.m".into())
        );
        assert_eq!(
            FieldValue::from_json("source_files", json!(["b.m", "a.m"])),
            FieldValue::List(vec!["b.m".into(), "a.m".into()])
        );
    }

    #[test]
    fn mixed_array_is_other() {
        let v = FieldValue::from_json("frameworks", json!(["UIKit", 3]));
        assert_eq!(v.kind(), ValueKind::Other);
    }

    #[test]
    fn mapping_only_for_dependencies() {
        let deps = FieldValue::from_json(DEPENDENCIES, json!({"Foo/Core": [], "Bar": ["~> 1.0"]}));
        match deps {
            FieldValue::Dependencies(map) => {
                assert_eq!(map.keys().collect::<Vec<_>>(), vec!["Foo/Core", "Bar"]);
                assert_eq!(map["Bar"], vec!["~> 1.0".to_string()]);
            }
            other => panic!("expected dependencies, got {:?}", other),
        }

        let xcconfig = FieldValue::from_json("pod_target_xcconfig", json!({"OTHER_CFLAGS": "-O2"}));
        assert_eq!(xcconfig.kind(), ValueKind::Mapping);
        assert!(matches!(xcconfig, FieldValue::Other(_)));
    }

    #[test]
    fn malformed_dependency_mapping_is_carried() {
        let v = FieldValue::from_json(DEPENDENCIES, json!({"Foo": "1.0"}));
        assert_eq!(v, FieldValue::Other(json!({"Foo": "1.0"})));
    }

    #[test]
    fn serializes_as_plain_json() {
        let mut deps = DependencyMap::new();
        deps.insert("Foo/Core".into(), vec![]);
        let v = serde_json::to_value(FieldValue::Dependencies(deps)).unwrap();
        assert_eq!(v, json!({"Foo/Core": []}));
        let v = serde_json::to_value(FieldValue::List(vec!["a".into()])).unwrap();
        assert_eq!(v, json!(["a"]));
    }
}

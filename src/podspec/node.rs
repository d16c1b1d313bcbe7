//! Subspec tree and the manifest that owns it.
//!
//! Nodes remember the key order they were read with so the merged podspec
//! diffs cleanly against the base file.

use crate::error::{MergeError, Result};
use crate::merge::deps;
use crate::podspec::value::{DEPENDENCIES, FieldValue, MERGE_FIELDS};

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::path::Path;

pub const NAME: &str = "name";
pub const SUBSPECS: &str = "subspecs";

/// What sits at a key position. `name` and `subspecs` live in dedicated
/// struct fields; the slot only records where they serialize.
#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Name,
    Subspecs,
    Field(FieldValue),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subspec {
    name: String,
    subspecs: Vec<Subspec>,
    slots: IndexMap<String, Slot>,
}

impl Subspec {
    /// An empty branch node: `{"name": .., "subspecs": []}`.
    pub fn new(name: impl Into<String>) -> Self {
        let mut slots = IndexMap::with_capacity(2);
        slots.insert(NAME.to_string(), Slot::Name);
        slots.insert(SUBSPECS.to_string(), Slot::Subspecs);
        Self {
            name: name.into(),
            subspecs: Vec::new(),
            slots,
        }
    }

    /// Build a node from a JSON object. The error string says what is wrong
    /// with the object; callers attach the file it came from.
    pub fn from_map(map: Map<String, Value>) -> std::result::Result<Self, String> {
        let mut name = None;
        let mut subspecs = Vec::new();
        let mut slots = IndexMap::with_capacity(map.len());

        for (key, value) in map {
            match key.as_str() {
                NAME => match value {
                    Value::String(s) => {
                        name = Some(s);
                        slots.insert(key, Slot::Name);
                    }
                    other => return Err(format!("`name` must be a string, got {}", other)),
                },
                SUBSPECS => match value {
                    Value::Array(items) => {
                        for item in items {
                            subspecs.push(Self::from_json(item)?);
                        }
                        slots.insert(key, Slot::Subspecs);
                    }
                    _ => return Err("`subspecs` must be an array".to_string()),
                },
                _ => {
                    let field = FieldValue::from_json(&key, value);
                    slots.insert(key, Slot::Field(field));
                }
            }
        }

        let name = name.ok_or_else(|| "subspec is missing `name`".to_string())?;
        Ok(Self {
            name,
            subspecs,
            slots,
        })
    }

    pub fn from_json(value: Value) -> std::result::Result<Self, String> {
        match value {
            Value::Object(map) => Self::from_map(map),
            other => Err(format!("subspec must be a JSON object, got {}", other)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[Subspec] {
        &self.subspecs
    }

    /// Child list, adding an empty `subspecs` key if the node had none.
    pub fn children_mut(&mut self) -> &mut Vec<Subspec> {
        if !self.slots.contains_key(SUBSPECS) {
            self.slots.insert(SUBSPECS.to_string(), Slot::Subspecs);
        }
        &mut self.subspecs
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        match self.slots.get(key) {
            Some(Slot::Field(v)) => Some(v),
            _ => None,
        }
    }

    pub fn field_mut(&mut self, key: &str) -> Option<&mut FieldValue> {
        match self.slots.get_mut(key) {
            Some(Slot::Field(v)) => Some(v),
            _ => None,
        }
    }

    /// Set an attribute. An existing key keeps its position; a new one goes last.
    pub fn set_field(&mut self, key: &str, value: FieldValue) {
        debug_assert!(key != NAME && key != SUBSPECS);
        self.slots.insert(key.to_string(), Slot::Field(value));
    }

    /// Rewrite a list or string `dependencies` into mapping form.
    pub fn normalize_dependencies(&mut self) {
        if let Some(field) = self.field_mut(DEPENDENCIES) {
            deps::normalize_field(field);
        }
    }

    /// Sort every list-valued merge field, here and in all descendants.
    pub fn sort_merge_fields(&mut self) {
        for key in MERGE_FIELDS {
            if let Some(FieldValue::List(items)) = self.field_mut(key) {
                items.sort();
            }
        }
        for child in &mut self.subspecs {
            child.sort_merge_fields();
        }
    }

    /// [`Subspec::normalize_dependencies`] on this node and all descendants.
    pub(crate) fn normalize_tree(&mut self) {
        self.normalize_dependencies();
        for child in &mut self.subspecs {
            child.normalize_tree();
        }
    }
}

impl Serialize for Subspec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for (key, slot) in &self.slots {
            match slot {
                Slot::Name => map.serialize_entry(key, &self.name)?,
                Slot::Subspecs => map.serialize_entry(key, &self.subspecs)?,
                Slot::Field(v) => map.serialize_entry(key, v)?,
            }
        }
        map.end()
    }
}

/// The base podspec document with its top-level subspec list.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    /// Top-level keys in file order. `subspecs` holds a null placeholder.
    attrs: Map<String, Value>,
    subspecs: Vec<Subspec>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let value = crate::podspec::read_json(path)?;
        Self::from_json(path, value)
    }

    pub fn from_json(path: &Path, value: Value) -> Result<Self> {
        let Value::Object(mut attrs) = value else {
            return Err(MergeError::manifest(path, "base manifest must be a JSON object"));
        };
        let items = match attrs.get_mut(SUBSPECS).map(Value::take) {
            Some(Value::Array(items)) => items,
            Some(_) => return Err(MergeError::manifest(path, "`subspecs` must be an array")),
            None => return Err(MergeError::manifest(path, "can not find `subspecs`")),
        };

        let mut subspecs = Vec::with_capacity(items.len());
        for item in items {
            let mut node = Subspec::from_json(item).map_err(|reason| MergeError::manifest(path, reason))?;
            node.normalize_tree();
            subspecs.push(node);
        }

        Ok(Self { attrs, subspecs })
    }

    pub fn name(&self) -> Option<&str> {
        self.attrs.get(NAME).and_then(Value::as_str)
    }

    pub fn subspecs(&self) -> &[Subspec] {
        &self.subspecs
    }

    pub fn subspecs_mut(&mut self) -> &mut Vec<Subspec> {
        &mut self.subspecs
    }
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.attrs.len()))?;
        for (key, value) in &self.attrs {
            if key == SUBSPECS {
                map.serialize_entry(key, &self.subspecs)?;
            } else {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::podspec::value::DependencyMap;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn node(v: Value) -> Subspec {
        Subspec::from_json(v).unwrap()
    }

    #[test]
    fn keeps_key_order() {
        let s = node(json!({"source_files": "a.m", "name": "Core", "requires_arc": true}));
        let keys: Vec<String> = serde_json::to_value(&s)
            .unwrap()
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["source_files", "name", "requires_arc"]);
    }

    #[test]
    fn nameless_subspec_rejected() {
        let err = Subspec::from_json(json!({"source_files": "a.m"})).unwrap_err();
        assert!(err.contains("missing `name`"), "{}", err);

        let err = Subspec::from_json(json!({"name": "A", "subspecs": [{"frameworks": "UIKit"}]})).unwrap_err();
        assert!(err.contains("missing `name`"), "{}", err);
    }

    #[test]
    fn children_mut_adds_subspecs_key() {
        let mut s = node(json!({"name": "Core"}));
        assert_eq!(serde_json::to_value(&s).unwrap(), json!({"name": "Core"}));
        s.children_mut().push(Subspec::new("Sub"));
        assert_eq!(
            serde_json::to_value(&s).unwrap(),
            json!({"name": "Core", "subspecs": [{"name": "Sub", "subspecs": []}]})
        );
    }

    #[test]
    fn set_field_keeps_position() {
        let mut s = node(json!({"name": "Core", "frameworks": "UIKit", "libraries": "z"}));
        s.set_field("frameworks", FieldValue::List(vec!["Foundation".into(), "UIKit".into()]));
        s.set_field("source_files", FieldValue::Scalar("a.m".into()));
        assert_eq!(
            serde_json::to_string(&s).unwrap(),
            r#"{"name":"Core","frameworks":["Foundation","UIKit"],"libraries":"z","source_files":"a.m"}"#
        );
    }

    #[test]
    fn manifest_requires_subspecs() {
        let err = Manifest::from_json(Path::new("base.json"), json!({"name": "Foo"})).unwrap_err();
        assert!(matches!(err, MergeError::ManifestFormat { .. }));

        let err = Manifest::from_json(Path::new("base.json"), json!({"name": "Foo", "subspecs": {}})).unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn manifest_normalizes_base_dependencies() {
        let m = Manifest::from_json(
            Path::new("base.json"),
            json!({"name": "Foo", "subspecs": [{"name": "A", "subspecs": [{"name": "B", "dependencies": ["Foo/A"]}]}]}),
        )
        .unwrap();
        let mut expected = DependencyMap::new();
        expected.insert("Foo/A".into(), vec![]);
        assert_eq!(
            m.subspecs()[0].children()[0].field(DEPENDENCIES),
            Some(&FieldValue::Dependencies(expected))
        );
    }

    #[test]
    fn manifest_round_trips_layout() {
        let base = json!({"name": "Foo", "version": "1.0", "subspecs": [], "requires_arc": true});
        let m = Manifest::from_json(Path::new("base.json"), base.clone()).unwrap();
        assert_eq!(m.name(), Some("Foo"));
        assert_eq!(serde_json::to_string(&m).unwrap(), serde_json::to_string(&base).unwrap());
    }
}

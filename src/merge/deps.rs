//! `dependencies` handling.
//!
//! Fragments list dependency names; podspecs want `{name: [requirements]}`.

use crate::merge::MergeWarning;
use crate::podspec::{DEPENDENCIES, DependencyMap, FieldValue, Subspec, ValueKind};

/// One entry per name, each with no version requirements.
pub fn normalize<I>(names: I) -> DependencyMap
where
    I: IntoIterator<Item = String>,
{
    names.into_iter().map(|name| (name, Vec::new())).collect()
}

/// Convert a string or list `dependencies` value into mapping form in place.
/// Mappings and unrecognized shapes are left alone.
pub fn normalize_field(field: &mut FieldValue) {
    let deps = match field {
        FieldValue::Scalar(name) => normalize([std::mem::take(name)]),
        FieldValue::List(names) => normalize(std::mem::take(names)),
        FieldValue::Dependencies(_) | FieldValue::Other(_) => return,
    };
    *field = FieldValue::Dependencies(deps);
}

/// Union of two dependency mappings. Existing entries keep their position;
/// requirements not already listed are appended.
pub fn merge_dependency_maps(mut existing: DependencyMap, incoming: &DependencyMap) -> DependencyMap {
    for (name, reqs) in incoming {
        let slot = existing.entry(name.clone()).or_default();
        for req in reqs {
            if !slot.contains(req) {
                slot.push(req.clone());
            }
        }
    }
    existing
}

/// Merge a fragment's (already normalized) `dependencies` into `node`.
pub fn merge_dependencies(node: &mut Subspec, incoming: &FieldValue) -> Result<(), MergeWarning> {
    if node.field(DEPENDENCIES).is_none() {
        node.set_field(DEPENDENCIES, incoming.clone());
        return Ok(());
    }

    let node_name = node.name().to_string();
    match (node.field_mut(DEPENDENCIES), incoming) {
        (Some(FieldValue::Dependencies(existing)), FieldValue::Dependencies(incoming_map)) => {
            *existing = merge_dependency_maps(std::mem::take(existing), incoming_map);
            Ok(())
        }
        (existing, _) => Err(MergeWarning::new(
            &node_name,
            DEPENDENCIES,
            existing.map_or(ValueKind::Other, |v| v.kind()),
            incoming.kind(),
        )),
    }
}

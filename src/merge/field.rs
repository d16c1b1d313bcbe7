//! String/list union for the plain merge fields.
//!
//! Merge semantics (existing node value vs. fragment value):
//! - fragment has no value: nothing to do (callers skip the call)
//! - node has no value: take the fragment's, sorting lists
//! - string or list on both sides: concatenate, keep duplicates, sort
//! - anything else: leave the node alone and report a warning

use crate::merge::MergeWarning;
use crate::podspec::{FieldValue, Subspec};

pub fn merge_field(node: &mut Subspec, key: &str, incoming: &FieldValue) -> Result<(), MergeWarning> {
    if node.field(key).is_none() {
        let mut value = incoming.clone();
        if let FieldValue::List(items) = &mut value {
            items.sort();
        }
        node.set_field(key, value);
        return Ok(());
    }

    let node_name = node.name().to_string();
    let Some(existing) = node.field_mut(key) else {
        return Ok(());
    };

    let contribution: &[String] = match incoming {
        FieldValue::Scalar(s) => std::slice::from_ref(s),
        FieldValue::List(items) => items,
        _ => return Err(MergeWarning::new(&node_name, key, existing.kind(), incoming.kind())),
    };

    let mut merged = match &mut *existing {
        FieldValue::Scalar(s) => {
            let mut list = Vec::with_capacity(1 + contribution.len());
            list.push(std::mem::take(s));
            list
        }
        FieldValue::List(items) => std::mem::take(items),
        other => return Err(MergeWarning::new(&node_name, key, other.kind(), incoming.kind())),
    };
    merged.extend_from_slice(contribution);
    merged.sort();
    *existing = FieldValue::List(merged);
    Ok(())
}

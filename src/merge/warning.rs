use crate::podspec::ValueKind;
use std::fmt;

/// A merge that could not be applied. The field keeps its previous value and
/// the run continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeWarning {
    pub node: String,
    pub field: String,
    pub existing: ValueKind,
    pub incoming: ValueKind,
}

impl MergeWarning {
    pub fn new(node: &str, field: &str, existing: ValueKind, incoming: ValueKind) -> Self {
        Self {
            node: node.to_string(),
            field: field.to_string(),
            existing,
            incoming,
        }
    }
}

impl fmt::Display for MergeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot merge {} into {} for `{}` of subspec `{}`",
            self.incoming, self.existing, self.field, self.node
        )
    }
}

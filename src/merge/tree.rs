use crate::podspec::Subspec;

/// Walk `names` down from `root`, creating `{name, subspecs: []}` nodes for any
/// level that does not exist yet, and return the child list at the end.
///
/// Lookup is by exact name and the first match wins. Resolving the same names
/// twice returns the same list.
pub fn locate<'a, S: AsRef<str>>(root: &'a mut Vec<Subspec>, names: &[S]) -> &'a mut Vec<Subspec> {
    let mut level = root;
    for name in names {
        let name = name.as_ref();
        let idx = match level.iter().position(|s| s.name() == name) {
            Some(idx) => idx,
            None => {
                level.push(Subspec::new(name));
                level.len() - 1
            }
        };
        level = level[idx].children_mut();
    }
    level
}

/// Split a dash-joined parent path into the names to descend through.
///
/// The first segment names the implicit root and is dropped, so `"root"`
/// resolves to the top level and `"root-a-b"` to `["a", "b"]`.
pub fn resolve_path(parent_path: &str) -> Vec<&str> {
    parent_path.split('-').skip(1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn drops_root_segment() {
        assert_eq!(resolve_path("root-a-b"), vec!["a", "b"]);
        assert_eq!(resolve_path("Lynx-Core"), vec!["Core"]);
    }

    #[test]
    fn single_segment_is_top_level() {
        assert!(resolve_path("root").is_empty());
        assert!(resolve_path("").is_empty());
    }

    #[test]
    fn empty_segments_are_names() {
        assert_eq!(resolve_path("root--a"), vec!["", "a"]);
    }
}

use std::collections::HashSet;

use crate::tree::node::{join_path, Node};

/// One visible row of the flattened tree, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    /// Slash-joined path from the root.
    pub path: String,
    /// Final path segment.
    pub name: String,
    /// Nesting depth; top-level entries are depth 0.
    pub depth: usize,
    pub is_dir: bool,
    /// Whether this directory's children are currently hidden.
    pub is_collapsed: bool,
    /// Last entry among its siblings (drives the indent guides).
    pub is_last_sibling: bool,
}

/// Flatten the tree into depth-first pre-order rows, skipping the children
/// of any directory whose path is in `collapsed` (the directory row itself
/// is still emitted). Siblings appear in their storage insertion order.
///
/// Cost is proportional to the number of emitted rows — collapsed subtrees
/// are never walked.
pub fn flatten(root: &Node, collapsed: &HashSet<String>) -> Vec<FlatRow> {
    let mut rows = Vec::new();
    if let Some(children) = root.children() {
        flatten_level(children, "", 0, collapsed, &mut rows);
    }
    rows
}

fn flatten_level(
    children: &indexmap::IndexMap<String, Node>,
    prefix: &str,
    depth: usize,
    collapsed: &HashSet<String>,
    rows: &mut Vec<FlatRow>,
) {
    let last = children.len().saturating_sub(1);
    for (i, (name, node)) in children.iter().enumerate() {
        let path = join_path(prefix, name);
        let is_dir = node.is_dir();
        let is_collapsed = is_dir && collapsed.contains(&path);
        rows.push(FlatRow {
            name: name.clone(),
            depth,
            is_dir,
            is_collapsed,
            is_last_sibling: i == last,
            path: path.clone(),
        });
        if let (false, Some(grandchildren)) = (is_collapsed, node.children()) {
            flatten_level(grandchildren, &path, depth + 1, collapsed, rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        serde_json::from_str(r#"{"src": {"a.ts": null, "b.ts": null}, "readme.md": null}"#).unwrap()
    }

    fn paths(rows: &[FlatRow]) -> Vec<&str> {
        rows.iter().map(|r| r.path.as_str()).collect()
    }

    #[test]
    fn flattens_depth_first_preorder() {
        let rows = flatten(&sample(), &HashSet::new());
        assert_eq!(paths(&rows), ["src", "src/a.ts", "src/b.ts", "readme.md"]);
    }

    #[test]
    fn collapsed_dir_hides_children_but_stays_visible() {
        let collapsed = HashSet::from(["src".to_string()]);
        let rows = flatten(&sample(), &collapsed);
        assert_eq!(paths(&rows), ["src", "readme.md"]);
        assert!(rows[0].is_collapsed);
    }

    #[test]
    fn depth_and_kind_follow_nesting() {
        let rows = flatten(&sample(), &HashSet::new());
        assert_eq!(rows[0].depth, 0);
        assert!(rows[0].is_dir);
        assert_eq!(rows[1].depth, 1);
        assert!(!rows[1].is_dir);
        assert_eq!(rows[3].depth, 0);
    }

    #[test]
    fn last_sibling_flags() {
        let rows = flatten(&sample(), &HashSet::new());
        assert!(!rows[0].is_last_sibling); // src precedes readme.md
        assert!(!rows[1].is_last_sibling); // a.ts precedes b.ts
        assert!(rows[2].is_last_sibling); // b.ts
        assert!(rows[3].is_last_sibling); // readme.md
    }

    #[test]
    fn no_row_has_a_collapsed_ancestor() {
        let root: Node = serde_json::from_str(
            r#"{
                "a": {"b": {"c": {"d.txt": null}, "e.txt": null}, "f.txt": null},
                "g": {"h": {"i.txt": null}}
            }"#,
        )
        .unwrap();
        let collapsed = HashSet::from(["a/b".to_string(), "g".to_string()]);
        let rows = flatten(&root, &collapsed);
        for row in &rows {
            for c in &collapsed {
                assert!(
                    !crate::tree::node::is_strict_descendant(c, &row.path),
                    "{} is under collapsed {}",
                    row.path,
                    c
                );
            }
        }
        assert_eq!(paths(&rows), ["a", "a/b", "a/f.txt", "g"]);
    }

    #[test]
    fn leaf_in_collapsed_set_is_ignored() {
        // Collapse membership only means something for directories.
        let collapsed = HashSet::from(["readme.md".to_string()]);
        let rows = flatten(&sample(), &collapsed);
        assert_eq!(rows.len(), 4);
        assert!(!rows[3].is_collapsed);
    }

    #[test]
    fn empty_root_yields_no_rows() {
        assert!(flatten(&Node::dir(), &HashSet::new()).is_empty());
        assert!(flatten(&Node::Leaf, &HashSet::new()).is_empty());
    }
}

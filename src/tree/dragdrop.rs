use std::collections::HashSet;

use crate::tree::node::is_strict_descendant;

/// An in-progress drag: exists only between `begin_drag` and the matching
/// drop or cancel, and is dropped wholesale on either — no partial state
/// survives into the next interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    /// Paths being dragged, in flattened-list order.
    pub paths: Vec<String>,
}

impl DragSession {
    /// Build the payload for a drag starting over `path`.
    ///
    /// If the grabbed path is already part of the selection the whole
    /// selection travels; otherwise only the grabbed path does, and the
    /// selection is left alone — grabbing is not selecting.
    /// `ordered_selection` is the selection in flattened-list order.
    pub fn grab(path: &str, selected: &HashSet<String>, ordered_selection: Vec<String>) -> Self {
        let paths = if selected.contains(path) {
            ordered_selection
        } else {
            vec![path.to_string()]
        };
        Self { paths }
    }

    /// Whether this payload may land on `target`.
    ///
    /// A payload member can never land on itself or inside its own subtree;
    /// anything else is the caller's problem.
    pub fn can_drop_on(&self, target: &str) -> bool {
        !self
            .paths
            .iter()
            .any(|p| p == target || is_strict_descendant(p, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(paths: &[&str]) -> HashSet<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn grabbing_a_selected_path_drags_the_whole_selection() {
        let selected = selection(&["src/a.ts", "src/b.ts"]);
        let ordered = vec!["src/a.ts".to_string(), "src/b.ts".to_string()];
        let session = DragSession::grab("src/a.ts", &selected, ordered);
        assert_eq!(session.paths, ["src/a.ts", "src/b.ts"]);
    }

    #[test]
    fn grabbing_an_unselected_path_drags_only_it() {
        let selected = selection(&["src/a.ts"]);
        let session = DragSession::grab("readme.md", &selected, vec!["src/a.ts".to_string()]);
        assert_eq!(session.paths, ["readme.md"]);
    }

    #[test]
    fn dropping_into_own_subtree_is_rejected() {
        let session = DragSession {
            paths: vec!["a/b".to_string()],
        };
        assert!(!session.can_drop_on("a/b/c"));
        assert!(!session.can_drop_on("a/b"));
        assert!(session.can_drop_on("a"));
        assert!(session.can_drop_on("other"));
    }

    #[test]
    fn any_payload_member_can_poison_a_target() {
        let session = DragSession {
            paths: vec!["x".to_string(), "a/b".to_string()],
        };
        assert!(!session.can_drop_on("a/b/deep/leaf"));
        assert!(session.can_drop_on("a"));
    }

    #[test]
    fn sibling_name_prefix_is_not_a_descendant() {
        let session = DragSession {
            paths: vec!["a/b".to_string()],
        };
        assert!(session.can_drop_on("a/bc"));
    }
}

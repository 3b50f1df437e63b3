use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// What kind of entry a create request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Folder,
}

/// A node in the caller-supplied tree structure.
///
/// A `Dir` maps child name → child node; enumeration order is insertion
/// order, and map keys guarantee sibling-name uniqueness. A `Leaf` is a
/// terminal entry with no children.
///
/// The serde representation mirrors the JSON shape the demo binary loads:
/// an object is a directory, `null` is a leaf, e.g.
/// `{"src": {"main.rs": null}, "README.md": null}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Dir(IndexMap<String, Node>),
    Leaf,
}

impl Node {
    /// Create an empty directory node.
    pub fn dir() -> Self {
        Node::Dir(IndexMap::new())
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Dir(_))
    }

    /// Immediate children, or `None` on a leaf.
    pub fn children(&self) -> Option<&IndexMap<String, Node>> {
        match self {
            Node::Dir(children) => Some(children),
            Node::Leaf => None,
        }
    }

    fn children_mut(&mut self) -> Option<&mut IndexMap<String, Node>> {
        match self {
            Node::Dir(children) => Some(children),
            Node::Leaf => None,
        }
    }

    /// Look up the node addressed by a slash-joined path.
    ///
    /// The empty path addresses `self` (the anonymous root container).
    pub fn get(&self, path: &str) -> Option<&Node> {
        if path.is_empty() {
            return Some(self);
        }
        let mut current = self;
        for segment in path.split('/') {
            current = current.children()?.get(segment)?;
        }
        Some(current)
    }

    /// Whether a path addresses an existing node.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Whether a path addresses an existing directory.
    pub fn is_dir_at(&self, path: &str) -> bool {
        self.get(path).is_some_and(Node::is_dir)
    }

    /// Count all files and folders in this subtree (not counting `self`).
    pub fn summary(&self) -> NodeSummary {
        let mut counts = NodeSummary::default();
        if let Node::Dir(children) = self {
            for child in children.values() {
                match child {
                    Node::Leaf => counts.files += 1,
                    Node::Dir(_) => {
                        counts.folders += 1;
                        let sub = child.summary();
                        counts.files += sub.files;
                        counts.folders += sub.folders;
                    }
                }
            }
        }
        counts
    }

    // ── Caller-side structural edits ────────────────────────────────────────
    //
    // The engine never mutates the structure; these helpers exist for the
    // application that owns it and applies the engine's move/copy/rename/
    // delete/create requests before feeding the updated tree back in.

    /// Detach and return the subtree at `path`. `None` if the path is absent
    /// or empty.
    pub fn detach(&mut self, path: &str) -> Option<Node> {
        let (parent, name) = split_path(path);
        let parent = self.get_node_mut(parent)?;
        parent.children_mut()?.shift_remove(name)
    }

    /// Insert `node` as a child of the directory at `parent`, under `name`.
    /// Fails (returns `false`) if the parent is missing, is a leaf, or
    /// already has a child with that name.
    pub fn attach(&mut self, parent: &str, name: &str, node: Node) -> bool {
        if name.is_empty() || name.contains('/') {
            return false;
        }
        let Some(children) = self.get_node_mut(parent).and_then(Node::children_mut) else {
            return false;
        };
        if children.contains_key(name) {
            return false;
        }
        children.insert(name.to_string(), node);
        true
    }

    /// Rename the node at `path` to `new_name`, preserving its position
    /// among its siblings.
    pub fn rename(&mut self, path: &str, new_name: &str) -> bool {
        if new_name.is_empty() || new_name.contains('/') {
            return false;
        }
        let (parent, old_name) = split_path(path);
        let Some(children) = self.get_node_mut(parent).and_then(Node::children_mut) else {
            return false;
        };
        if !children.contains_key(old_name) {
            return false;
        }
        if old_name == new_name {
            return true;
        }
        if children.contains_key(new_name) {
            return false;
        }
        // IndexMap has no in-place key rename; rebuild to keep sibling order.
        let renamed: IndexMap<String, Node> = children
            .drain(..)
            .map(|(name, node)| {
                if name == old_name {
                    (new_name.to_string(), node)
                } else {
                    (name, node)
                }
            })
            .collect();
        *children = renamed;
        true
    }

    /// Move the subtree at `from` into the directory at `target`, keeping
    /// its base name. Refuses moves into the subtree itself, onto a missing
    /// target, or when the name already exists there.
    pub fn move_to(&mut self, from: &str, target: &str) -> bool {
        if from.is_empty() || from == target || is_strict_descendant(from, target) {
            return false;
        }
        let name = base_name(from).to_string();
        match self.get(target).and_then(Node::children) {
            Some(children) if !children.contains_key(&name) => {}
            _ => return false,
        }
        let Some(subtree) = self.detach(from) else {
            return false;
        };
        self.attach(target, &name, subtree)
    }
}

/// Running totals from [`Node::summary`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeSummary {
    pub files: usize,
    pub folders: usize,
}

impl Node {
    fn get_node_mut(&mut self, path: &str) -> Option<&mut Node> {
        if path.is_empty() {
            return Some(self);
        }
        let mut current = self;
        for segment in path.split('/') {
            current = current.children_mut()?.get_mut(segment)?;
        }
        Some(current)
    }
}

// ── Path helpers ────────────────────────────────────────────────────────────

/// Join a parent path and a child name. An empty parent yields the bare name.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// The parent of a path, or `None` for a top-level path.
pub fn parent_path(path: &str) -> Option<&str> {
    path.rsplit_once('/').map(|(parent, _)| parent)
}

/// The final segment of a path.
pub fn base_name(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}

/// Split into `(parent, base_name)`, with an empty parent for top-level paths.
pub fn split_path(path: &str) -> (&str, &str) {
    path.rsplit_once('/').unwrap_or(("", path))
}

/// Whether `path` lies strictly inside the subtree rooted at `ancestor`.
pub fn is_strict_descendant(ancestor: &str, path: &str) -> bool {
    path.len() > ancestor.len() + 1
        && path.starts_with(ancestor)
        && path.as_bytes()[ancestor.len()] == b'/'
}

/// The path produced by replacing the final segment of `path` with `new_name`.
pub fn renamed_path(path: &str, new_name: &str) -> String {
    match parent_path(path) {
        Some(parent) => format!("{}/{}", parent, new_name),
        None => new_name.to_string(),
    }
}

use std::time::Instant;

use ftree::config::AppConfig;
use ftree::theme::{resolve_theme, ThemeColors};
use ftree::tree::node::{base_name, join_path, parent_path, Node, NodeKind};
use ftree::{FileTreeState, TreeRequest};

/// Input routing mode.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum AppMode {
    #[default]
    Normal,
    /// Keystrokes edit the search term.
    Search,
}

/// Main application state: the demo plays the "caller" role — it owns the
/// structure, drains the engine's requests, applies them, and feeds the
/// updated structure back.
pub struct App {
    pub root: Node,
    pub tree: FileTreeState,
    pub mode: AppMode,
    pub theme: ThemeColors,
    pub indent_guides: bool,
    pub search_input: String,
    pub should_quit: bool,
    pub status_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(root: Node, config: &AppConfig) -> Self {
        let tree = FileTreeState::new(root.clone(), config.tree_options());
        Self {
            root,
            tree,
            mode: AppMode::Normal,
            theme: resolve_theme(&config.theme),
            indent_guides: config.indent_guides(),
            search_input: String::new(),
            should_quit: false,
            status_message: None,
        }
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message with current timestamp.
    pub fn set_status_message(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }

    /// Clear the status message if it has been displayed for more than 3 seconds.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, ref created)) = self.status_message {
            if created.elapsed().as_secs() > 3 {
                self.status_message = None;
            }
        }
    }

    /// Periodic upkeep: promote debounced search terms, expire status lines.
    pub fn on_tick(&mut self) {
        self.tree.tick();
        self.clear_expired_status();
    }

    /// The paths an operation should act on: the selection when there is
    /// one, else the focused row.
    pub fn operation_targets(&self) -> Vec<String> {
        let selected = self.tree.ordered_selection();
        if !selected.is_empty() {
            selected
        } else {
            self.tree.focused().map(str::to_string).into_iter().collect()
        }
    }

    /// Where a paste should land: the focused directory, the focused leaf's
    /// parent, or the top level.
    pub fn paste_target(&self) -> String {
        match self.tree.focused() {
            Some(path) if self.root.is_dir_at(path) => path.to_string(),
            Some(path) => parent_path(path).unwrap_or("").to_string(),
            None => String::new(),
        }
    }

    /// Drain and apply the engine's queued requests against the owned
    /// structure, then hand the updated structure back to the engine.
    pub fn apply_requests(&mut self) {
        let requests = self.tree.drain_requests();
        if requests.is_empty() {
            return;
        }
        let mut structure_changed = false;
        // Paths produced by this batch get the highlight wash.
        let mut highlights: Vec<String> = Vec::new();
        for request in requests {
            match request {
                TreeRequest::Move { sources, target } => {
                    let target_dir = self.directory_for(&target);
                    let mut moved = 0usize;
                    for source in &sources {
                        if self.root.move_to(source, &target_dir) {
                            moved += 1;
                            highlights.push(join_path(&target_dir, base_name(source)));
                        }
                    }
                    if moved > 0 {
                        structure_changed = true;
                        self.set_status_message(format!(
                            "moved {} into {}",
                            plural(moved),
                            display_dir(&target_dir)
                        ));
                    } else {
                        self.set_status_message("nothing moved".into());
                    }
                }
                TreeRequest::CopyTo { sources, target } => {
                    let target_dir = self.directory_for(&target);
                    let mut copied = 0usize;
                    for source in &sources {
                        if let Some(created) = self.copy_into(source, &target_dir) {
                            copied += 1;
                            highlights.push(created);
                        }
                    }
                    if copied > 0 {
                        structure_changed = true;
                        self.set_status_message(format!(
                            "copied {} into {}",
                            plural(copied),
                            display_dir(&target_dir)
                        ));
                    }
                }
                TreeRequest::Rename { from, to } => {
                    if self.root.rename(&from, base_name(&to)) {
                        structure_changed = true;
                        self.set_status_message(format!("renamed to {}", base_name(&to)));
                        highlights.push(to);
                    } else {
                        self.set_status_message(format!("cannot rename to {}", base_name(&to)));
                    }
                }
                TreeRequest::Delete(paths) => {
                    let mut deleted = 0usize;
                    for path in &paths {
                        if self.root.detach(path).is_some() {
                            deleted += 1;
                        }
                    }
                    if deleted > 0 {
                        structure_changed = true;
                        self.set_status_message(format!("deleted {}", plural(deleted)));
                    }
                }
                TreeRequest::Create { parent, kind } => {
                    let (stem, node) = match kind {
                        NodeKind::File => ("untitled", Node::Leaf),
                        NodeKind::Folder => ("new-folder", Node::dir()),
                    };
                    let name = self.unique_name(&parent, stem);
                    if self.root.attach(&parent, &name, node) {
                        structure_changed = true;
                        let path = join_path(&parent, &name);
                        self.set_status_message(format!("created {}", path));
                        // Drop straight into rename so the placeholder name
                        // never has to be typed over.
                        self.tree.set_structure(self.root.clone());
                        self.tree.begin_rename(&path);
                        structure_changed = false;
                    }
                }
                TreeRequest::SelectionChanged(set) => {
                    if set.len() > 1 {
                        self.set_status_message(format!("{} selected", set.len()));
                    }
                }
                TreeRequest::FavoriteChanged { path, favorite } => {
                    let verb = if favorite { "starred" } else { "unstarred" };
                    self.set_status_message(format!("{} {}", verb, base_name(&path)));
                }
                // Focus-follow and collapse feedback need no structural work.
                TreeRequest::Select(_) | TreeRequest::Toggled { .. } => {}
            }
        }
        if structure_changed {
            self.tree.set_structure(self.root.clone());
        }
        if !highlights.is_empty() {
            self.tree.set_highlighted(highlights);
        }
    }

    /// Resolve a request target to a directory: itself if it is one, else
    /// its parent, else the top level.
    fn directory_for(&self, target: &str) -> String {
        if self.root.is_dir_at(target) {
            target.to_string()
        } else {
            parent_path(target).unwrap_or("").to_string()
        }
    }

    /// Returns the path of the created copy.
    fn copy_into(&mut self, source: &str, target_dir: &str) -> Option<String> {
        let subtree = self.root.get(source).cloned()?;
        let name = self.unique_name(target_dir, base_name(source));
        self.root
            .attach(target_dir, &name, subtree)
            .then(|| join_path(target_dir, &name))
    }

    /// First free name in `dir`: the stem itself, then "stem (copy)",
    /// "stem (copy 2)", …
    fn unique_name(&self, dir: &str, stem: &str) -> String {
        let taken = |name: &str| {
            self.root
                .get(dir)
                .and_then(Node::children)
                .is_some_and(|c| c.contains_key(name))
        };
        if !taken(stem) {
            return stem.to_string();
        }
        let first = format!("{} (copy)", stem);
        if !taken(&first) {
            return first;
        }
        let mut n = 2usize;
        loop {
            let candidate = format!("{} (copy {})", stem, n);
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

fn plural(n: usize) -> String {
    if n == 1 {
        "1 item".to_string()
    } else {
        format!("{} items", n)
    }
}

fn display_dir(dir: &str) -> &str {
    if dir.is_empty() {
        "top level"
    } else {
        dir
    }
}
